//! HTTP server layer
//!
//! Axum server with:
//! - Request tracing
//! - Graceful shutdown
//! - JSON envelopes for success and error bodies

pub mod error;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
