//! dockhand-server: items service
//!
//! Four JSON routes over a single Postgres `items` table, with an
//! idempotent schema bootstrap run before the listener accepts traffic.

pub mod config;
pub mod db;
pub mod http;

pub use config::{BootstrapPolicy, ConfigError, DatabaseConfig};
pub use http::{run_server, ServerConfig, ServerError};
