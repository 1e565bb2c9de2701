//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{RainfallService, UserService};
use crate::interfaces::http::common::error::ErrorBody;
use crate::interfaces::http::common::MessageResponse;
use crate::interfaces::http::middleware::{auth_middleware, require_admin, AuthState};

use super::modules::{analytics, auth, export, health, rainfall};

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token from /login"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register,
        auth::login,
        rainfall::list_entries,
        rainfall::create_entry,
        rainfall::update_entry,
        rainfall::delete_entry,
        analytics::get_analytics,
        export::export_csv,
    ),
    components(
        schemas(
            ErrorBody,
            MessageResponse,
            auth::RegisterRequest,
            auth::RegisterResponse,
            auth::LoginRequest,
            auth::LoginResponse,
            auth::UserInfo,
            rainfall::RainfallEntryDto,
            rainfall::CreateRainfallRequest,
            rainfall::UpdateRainfallRequest,
            analytics::AnalyticsResponse,
            health::HealthResponse,
            health::ComponentHealth,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Authentication", description = "Registration and login (JWT)"),
        (name = "Rainfall", description = "Yearly rainfall records and CSV export"),
        (name = "Analytics", description = "Aggregate rainfall statistics"),
    ),
    info(
        title = "Rainfall Records API",
        version = "1.0.0",
        description = "REST API for recording and analysing yearly rainfall",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Build the full HTTP surface.
///
/// Mutating data routes carry `require_admin` inside `auth_middleware`, so a
/// request without a valid token is always answered with 401 before any role
/// check happens.
pub fn create_api_router(
    user_service: Arc<UserService>,
    rainfall_service: Arc<RainfallService>,
    db: DatabaseConnection,
) -> Router {
    let middleware_state = AuthState {
        jwt_config: user_service.jwt_config().clone(),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .with_state(auth::AuthHandlerState { user_service });

    let admin_only = middleware::from_fn(require_admin);

    let rainfall_routes = Router::new()
        .route(
            "/data",
            get(rainfall::list_entries)
                .merge(post(rainfall::create_entry).route_layer(admin_only.clone())),
        )
        .route(
            "/data/{id}",
            put(rainfall::update_entry)
                .delete(rainfall::delete_entry)
                .route_layer(admin_only),
        )
        .route("/analytics", get(analytics::get_analytics))
        .route("/export", get(export::export_csv))
        .route_layer(middleware::from_fn_with_state(
            middleware_state,
            auth_middleware,
        ))
        .with_state(rainfall::RainfallAppState { rainfall_service });

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health::HealthState {
            db,
            started_at: Arc::new(Instant::now()),
        });

    let swagger_routes =
        SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .merge(health_routes)
        .merge(auth_routes)
        .merge(rainfall_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
