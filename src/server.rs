//! Reusable server runtime.
//!
//! [`ServerHandle`] owns the full lifecycle: database connection,
//! migrations, admin bootstrap, the HTTP server and graceful shutdown.

use std::net::SocketAddr;
use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::application::{RainfallService, UserService};
use crate::config::{AppConfig, LogFormat};
use crate::infrastructure::database::repositories::{RainfallRepository, UserRepository};
use crate::infrastructure::{
    init_database, listen_for_shutdown_signals, run_migrations, ShutdownSignal,
};
use crate::interfaces::http::create_api_router;

// ── Tracing ────────────────────────────────────────────────────────

/// Install the global tracing subscriber. `RUST_LOG` wins over
/// `logging.level`. Calling it twice is harmless.
pub fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    let result = match config.logging.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .try_init(),
        LogFormat::Plain => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init(),
    };

    if result.is_err() {
        warn!("Tracing subscriber already installed");
    }
}

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the service.
pub struct ServerOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
    /// Create the configured admin if the user store is empty (default: true).
    pub create_default_admin: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
            create_default_admin: true,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running service.
///
/// # Examples
///
/// ```rust,no_run
/// use rainfall::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.install_signal_handler();
///     handle.shutdown_signal().wait().await;
///     handle.wait().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Address the HTTP server is bound to.
    pub local_addr: SocketAddr,

    db: DatabaseConnection,
    shutdown: ShutdownSignal,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Validate the config, connect, migrate, bootstrap the admin and start
    /// serving HTTP.
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;
        app_cfg.validate()?;

        info!("Starting rainfall service...");

        let jwt_config = app_cfg.jwt_config();
        info!(
            "JWT configured with {}h token expiration",
            jwt_config.expiration_hours
        );

        // ── Database ───────────────────────────────────────────
        let db = init_database(&app_cfg.database_config()).await?;

        if opts.auto_migrate {
            run_migrations(&db).await?;
        }

        // ── Repositories & Services ────────────────────────────
        let user_service = Arc::new(UserService::new(
            Arc::new(UserRepository::new(db.clone())),
            jwt_config,
            app_cfg.security.bcrypt_cost,
        ));
        let rainfall_service = Arc::new(RainfallService::new(Arc::new(
            RainfallRepository::new(db.clone()),
        )));

        if opts.create_default_admin {
            create_default_admin(&user_service, &app_cfg).await;
        }

        // ── REST API server ────────────────────────────────────
        let api_router = create_api_router(user_service, rainfall_service, db.clone());

        let api_addr = app_cfg.address();
        let listener = tokio::net::TcpListener::bind(&api_addr).await?;
        let local_addr = listener.local_addr()?;
        info!("REST API server listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let shutdown = ShutdownSignal::new();
        let api_shutdown = shutdown.clone();
        let api_server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            config: app_cfg,
            local_addr,
            db,
            shutdown,
            api_task,
        })
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.clone()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        tokio::spawn(listen_for_shutdown_signals(self.shutdown.clone()));
    }

    /// Trigger graceful shutdown (non-blocking).
    pub fn trigger_shutdown(&self) {
        self.shutdown.trigger();
    }

    /// Wait for the server to drain, then close the database.
    pub async fn wait(self) {
        info!("Waiting for in-flight requests to complete...");

        if let Err(e) = self.api_task.await {
            error!("REST API server task panicked: {}", e);
        } else {
            info!("REST API server stopped");
        }

        if let Err(e) = self.db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("Database connection closed");
        }

        info!("Rainfall service shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("Shutting down rainfall service...");
        self.trigger_shutdown();
        self.wait().await;
    }

    /// Check if the server is still running.
    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

/// Start the service and block until SIGINT/SIGTERM has been handled.
pub async fn run(opts: ServerOptions) -> Result<(), Box<dyn std::error::Error>> {
    let handle = ServerHandle::start(opts).await?;
    handle.install_signal_handler();

    info!("Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;
    Ok(())
}

// ── Helpers ────────────────────────────────────────────────────────

/// Create the configured admin if no users exist in the database.
async fn create_default_admin(user_service: &UserService, app_cfg: &AppConfig) {
    let Some(admin) = &app_cfg.admin else {
        return;
    };

    match user_service
        .bootstrap_admin(&admin.username, &admin.password)
        .await
    {
        Ok(true) => warn!("Default admin '{}' created; change its password", admin.username),
        Ok(false) => {}
        Err(e) => error!("Failed to create admin user: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AdminSection;

    fn test_options() -> ServerOptions {
        let mut config = AppConfig::default();
        config.server.host = "127.0.0.1".into();
        config.server.port = 0;
        config.database.url = "sqlite::memory:".into();
        config.database.max_connections = 1;
        config.security.jwt_secret = "server-test".into();
        config.security.bcrypt_cost = crate::infrastructure::crypto::password::MIN_COST;
        config.admin = Some(AdminSection {
            username: "root".into(),
            password: "root-pw".into(),
        });

        ServerOptions {
            config,
            ..ServerOptions::default()
        }
    }

    #[tokio::test]
    async fn refuses_to_start_without_secret() {
        let mut opts = test_options();
        opts.config.security.jwt_secret.clear();

        assert!(ServerHandle::start(opts).await.is_err());
    }

    #[tokio::test]
    async fn starts_and_shuts_down() {
        let handle = ServerHandle::start(test_options()).await.unwrap();
        assert!(handle.is_running());
        assert_ne!(handle.local_addr.port(), 0);

        tokio::time::timeout(std::time::Duration::from_secs(5), handle.shutdown())
            .await
            .unwrap();
    }
}
