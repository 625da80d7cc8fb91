//! Database connector
//!
//! Opens one `PgConnection` per operation from [`DatabaseConfig`]. There is
//! no pool: callers connect, run a single statement and close.

use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::Connection;

use crate::config::{ConfigError, DatabaseConfig, ADMIN_DATABASE};

/// Database error type
///
/// Messages are the raw driver text; the route layer forwards them as-is.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Required setting absent
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Store unreachable or credentials rejected
    #[error("{0}")]
    Connection(#[source] sqlx::Error),

    /// Statement failed
    #[error("{0}")]
    Query(#[from] sqlx::Error),
}

/// Builds connections for the configured store
#[derive(Debug, Clone)]
pub struct Connector {
    config: DatabaseConfig,
}

impl Connector {
    pub fn new(config: DatabaseConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Connect to the target database (`POSTGRES_DB`).
    pub async fn connect(&self) -> Result<PgConnection, DbError> {
        let database = self.config.database()?;
        self.connect_to(database).await
    }

    /// Connect to the administrative `postgres` database.
    pub async fn connect_admin(&self) -> Result<PgConnection, DbError> {
        self.connect_to(ADMIN_DATABASE).await
    }

    async fn connect_to(&self, database: &str) -> Result<PgConnection, DbError> {
        let options = self.options(database)?;
        tracing::debug!(host = ?self.config.host, database, "opening connection");

        PgConnection::connect_with(&options)
            .await
            .map_err(DbError::Connection)
    }

    fn options(&self, database: &str) -> Result<PgConnectOptions, ConfigError> {
        Ok(PgConnectOptions::new()
            .host(self.config.host()?)
            .port(self.config.port)
            .username(self.config.user()?)
            .password(self.config.password()?)
            .database(database))
    }
}

/// Close a connection, logging rather than failing if the goodbye is lost.
pub async fn close(conn: PgConnection) {
    if let Err(e) = conn.close().await {
        tracing::debug!(error = %e, "closing connection failed");
    }
}
