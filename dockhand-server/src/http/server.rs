//! Axum server setup
//!
//! Startup order: log the database settings, run the schema bootstrap under
//! the configured policy, then bind and serve until the shutdown future
//! resolves.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use super::routes;
use crate::config::{BootstrapPolicy, DatabaseConfig};
use crate::db::{bootstrap, Connector, DbError, ItemRepo, ItemStore};

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:8000)
    pub bind_addr: SocketAddr,

    /// What to do when the startup bootstrap fails
    pub bootstrap: BootstrapPolicy,

    /// Return 500 from `/db-check` on failure instead of 200
    pub strict_db_check: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            bootstrap: BootstrapPolicy::default(),
            strict_db_check: false,
        }
    }
}

/// Shared application state
pub struct AppState {
    pub store: Arc<dyn ItemStore>,
    pub strict_db_check: bool,
}

impl AppState {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self {
            store,
            strict_db_check: false,
        }
    }
}

/// Build the application router with all routes
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::db_check::router())
        .merge(routes::items::router())
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Run the items service until `shutdown` resolves.
///
/// # Example
///
/// ```ignore
/// let database = DatabaseConfig { host: Some("db".into()), ..Default::default() };
/// run_server(database, ServerConfig::default(), shutdown_signal()).await?;
/// ```
pub async fn run_server<F>(
    database: DatabaseConfig,
    config: ServerConfig,
    shutdown: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    tracing::info!(
        host = database.host.as_deref().unwrap_or("<unset>"),
        db = database.database.as_deref().unwrap_or("<unset>"),
        user = database.user.as_deref().unwrap_or("<unset>"),
        "Database config"
    );

    let connector = Connector::new(database);
    bootstrap::run(&connector, config.bootstrap)
        .await
        .map_err(ServerError::Bootstrap)?;

    let state = AppState {
        store: Arc::new(ItemRepo::new(connector)),
        strict_db_check: config.strict_db_check,
    };
    let app = build_router(state);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database bootstrap failed: {0}")]
    Bootstrap(#[source] DbError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.port(), 8000);
        assert!(config.bind_addr.ip().is_unspecified());
        assert_eq!(config.bootstrap, BootstrapPolicy::BestEffort);
        assert!(!config.strict_db_check);
    }

    #[tokio::test]
    async fn fail_fast_bootstrap_aborts_before_binding() {
        let config = ServerConfig {
            bootstrap: BootstrapPolicy::FailFast,
            ..ServerConfig::default()
        };
        let err = run_server(DatabaseConfig::default(), config, std::future::ready(()))
            .await
            .unwrap_err();
        assert!(matches!(err, ServerError::Bootstrap(DbError::Config(_))));
    }
}
