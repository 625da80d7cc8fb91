//! Liveness endpoint

use axum::{routing::get, Json, Router};
use serde::Serialize;

/// Liveness response
#[derive(Serialize)]
pub struct StatusMessage {
    pub message: &'static str,
}

/// GET /
async fn home() -> Json<StatusMessage> {
    Json(StatusMessage {
        message: "Backend is running!",
    })
}

/// Liveness routes
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(home))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn home_reports_running() {
        let Json(body) = home().await;
        assert_eq!(body.message, "Backend is running!");
    }
}
