//! Analytics handler

use axum::{extract::State, Json};

use super::dto::AnalyticsResponse;
use crate::interfaces::http::common::error::ErrorBody;
use crate::interfaces::http::common::ApiError;
use crate::interfaces::http::modules::rainfall::RainfallAppState;

#[utoipa::path(
    get,
    path = "/analytics",
    tag = "Analytics",
    responses(
        (status = 200, description = "Aggregate statistics", body = AnalyticsResponse),
        (status = 401, description = "Not authenticated", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_analytics(
    State(state): State<RainfallAppState>,
) -> Result<Json<AnalyticsResponse>, ApiError> {
    let summary = state.rainfall_service.analytics().await?;
    Ok(Json(summary.into()))
}
