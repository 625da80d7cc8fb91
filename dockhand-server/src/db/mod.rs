//! Database layer - connector, bootstrap and repositories
//!
//! # Design Principles
//!
//! - One connection per operation, closed before returning - no pool
//! - Single-statement autocommit usage, no explicit transactions
//! - Schema bootstrap is idempotent and runs before the listener binds

pub mod bootstrap;
pub mod connect;
pub mod repos;

pub use bootstrap::DatabaseStatus;
pub use connect::{Connector, DbError};
pub use repos::*;
