//! dockhand-greeter: "Hello Docker" responder
//!
//! A single `GET /` route that answers with a static greeting naming the
//! deployment environment. The environment is read once at startup and
//! baked into the router state.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{extract::State, routing::get, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Environment name used when `APP_ENV` is unset
pub const DEFAULT_APP_ENV: &str = "development";

/// Greeter configuration
#[derive(Debug, Clone)]
pub struct GreeterConfig {
    /// Address to bind to (default: 0.0.0.0:5000)
    pub bind_addr: SocketAddr,

    /// Deployment environment shown in the greeting
    pub app_env: String,
}

impl Default for GreeterConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 5000)),
            app_env: DEFAULT_APP_ENV.to_string(),
        }
    }
}

/// Greeter error type
#[derive(Debug, thiserror::Error)]
pub enum GreeterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Render the greeting for an environment name.
pub fn greeting(app_env: &str) -> String {
    format!("Hello, Docker! ENV: {}", app_env)
}

/// GET /
async fn home(State(message): State<Arc<str>>) -> String {
    message.to_string()
}

/// Build the greeter router.
pub fn build_router(config: &GreeterConfig) -> Router {
    let message: Arc<str> = Arc::from(greeting(&config.app_env));

    Router::new()
        .route("/", get(home))
        .layer(TraceLayer::new_for_http())
        .with_state(message)
}

/// Run the greeter until `shutdown` resolves.
pub async fn run_greeter<F>(config: GreeterConfig, shutdown: F) -> Result<(), GreeterError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_router(&config);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!(app_env = %config.app_env, "Greeter listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("Greeter shutdown complete");
    Ok(())
}
