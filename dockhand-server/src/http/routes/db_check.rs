//! Database connectivity probe
//!
//! A failed probe answers 200 with `db_connection: "failed"` unless the
//! server runs with `strict_db_check`, which turns it into a 500.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use crate::http::server::AppState;

/// Probe response
#[derive(Debug, Serialize)]
pub struct DbCheckResponse {
    pub db_connection: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// GET /db-check
async fn db_check(State(state): State<Arc<AppState>>) -> (StatusCode, Json<DbCheckResponse>) {
    match state.store.now().await {
        Ok(now) => (
            StatusCode::OK,
            Json(DbCheckResponse {
                db_connection: "Db Connection Successful",
                time: Some(now.to_rfc3339()),
                error: None,
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "db-check failed");
            let status = if state.strict_db_check {
                StatusCode::INTERNAL_SERVER_ERROR
            } else {
                StatusCode::OK
            };
            (
                status,
                Json(DbCheckResponse {
                    db_connection: "failed",
                    time: None,
                    error: Some(e.to_string()),
                }),
            )
        }
    }
}

/// Probe routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/db-check", get(db_check))
}
