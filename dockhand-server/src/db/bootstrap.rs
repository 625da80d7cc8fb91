//! Schema bootstrap
//!
//! Runs once before the listener binds. Ensures the target database exists
//! (created from the admin database if absent), then ensures the `items`
//! table exists. Both steps are idempotent.

use crate::config::BootstrapPolicy;
use crate::db::connect::{close, Connector, DbError};

/// SQLSTATE for `duplicate_database`
const DUPLICATE_DATABASE: &str = "42P04";

const CREATE_ITEMS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS items (
    id SERIAL PRIMARY KEY,
    name TEXT NOT NULL,
    source TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

/// State of the target database before bootstrap ran
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseStatus {
    Created,
    AlreadyExists,
}

/// Run the bootstrap under `policy`.
///
/// With [`BootstrapPolicy::BestEffort`] failures are logged and `Ok(None)`
/// is returned so startup continues.
pub async fn run(
    connector: &Connector,
    policy: BootstrapPolicy,
) -> Result<Option<DatabaseStatus>, DbError> {
    match ensure_schema(connector).await {
        Ok(status) => Ok(Some(status)),
        Err(e) => match policy {
            BootstrapPolicy::BestEffort => {
                tracing::error!(error = %e, "Error initializing database, continuing startup");
                Ok(None)
            }
            BootstrapPolicy::FailFast => Err(e),
        },
    }
}

/// Ensure the target database and the `items` table exist.
pub async fn ensure_schema(connector: &Connector) -> Result<DatabaseStatus, DbError> {
    let status = ensure_database(connector).await?;
    ensure_items_table(connector).await?;
    Ok(status)
}

async fn ensure_database(connector: &Connector) -> Result<DatabaseStatus, DbError> {
    let name = connector.config().database()?;
    let mut conn = connector.connect_admin().await?;
    let result = create_database_if_absent(&mut conn, name).await;
    close(conn).await;

    let status = result?;
    match status {
        DatabaseStatus::Created => tracing::info!("Database '{}' created successfully", name),
        DatabaseStatus::AlreadyExists => tracing::info!("Database '{}' already exists", name),
    }
    Ok(status)
}

async fn create_database_if_absent(
    conn: &mut sqlx::PgConnection,
    name: &str,
) -> Result<DatabaseStatus, DbError> {
    let exists = sqlx::query_scalar::<_, i32>("SELECT 1 FROM pg_database WHERE datname = $1")
        .bind(name)
        .fetch_optional(&mut *conn)
        .await?
        .is_some();

    if exists {
        return Ok(DatabaseStatus::AlreadyExists);
    }

    // CREATE DATABASE takes no bind parameters.
    let create_sql = format!("CREATE DATABASE {}", quote_ident(name));
    match sqlx::query(&create_sql).execute(&mut *conn).await {
        Ok(_) => Ok(DatabaseStatus::Created),
        // Another process won the race.
        Err(e) if is_duplicate_database(&e) => Ok(DatabaseStatus::AlreadyExists),
        Err(e) => Err(e.into()),
    }
}

async fn ensure_items_table(connector: &Connector) -> Result<(), DbError> {
    let mut conn = connector.connect().await?;
    let result = sqlx::query(CREATE_ITEMS_TABLE).execute(&mut conn).await;
    close(conn).await;

    result?;
    tracing::info!("Table 'items' ensured successfully");
    Ok(())
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn is_duplicate_database(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(DUPLICATE_DATABASE))
}
