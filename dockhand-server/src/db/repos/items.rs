//! Item repository
//!
//! Every call opens its own connection, runs one statement and closes:
//! - list: all rows ordered by id
//! - insert: INSERT ... RETURNING the stored row
//! - now: `SELECT NOW()` connectivity probe

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::db::connect::{close, Connector, DbError};

/// Name written by `POST /add-item`
pub const STATIC_ITEM_NAME: &str = "static item";

/// Source written by `POST /add-item`
pub const STATIC_ITEM_SOURCE: &str = "static";

/// Item record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Item {
    pub id: i32,
    pub name: String,
    pub source: String,
    pub created_at: DateTime<Utc>,
}

/// Values for a row about to be inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub source: String,
}

impl NewItem {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// The fixed pair inserted by `POST /add-item`.
    pub fn static_item() -> Self {
        Self::new(STATIC_ITEM_NAME, STATIC_ITEM_SOURCE)
    }
}

/// Data access for the `items` table
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Current time according to the store.
    async fn now(&self) -> Result<DateTime<Utc>, DbError>;

    /// All items, ascending by id. Empty table gives an empty vector.
    async fn list_items(&self) -> Result<Vec<Item>, DbError>;

    /// Insert one item and return the stored row.
    async fn insert_item(&self, item: &NewItem) -> Result<Item, DbError>;
}

/// Postgres-backed item repository
#[derive(Debug, Clone)]
pub struct ItemRepo {
    connector: Connector,
}

impl ItemRepo {
    pub fn new(connector: Connector) -> Self {
        Self { connector }
    }
}

#[async_trait]
impl ItemStore for ItemRepo {
    async fn now(&self) -> Result<DateTime<Utc>, DbError> {
        let mut conn = self.connector.connect().await?;
        let result = sqlx::query_scalar::<_, DateTime<Utc>>("SELECT NOW()")
            .fetch_one(&mut conn)
            .await;
        close(conn).await;

        Ok(result?)
    }

    async fn list_items(&self) -> Result<Vec<Item>, DbError> {
        let mut conn = self.connector.connect().await?;
        let result = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, name, source, created_at
            FROM items
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&mut conn)
        .await;
        close(conn).await;

        Ok(result?)
    }

    async fn insert_item(&self, item: &NewItem) -> Result<Item, DbError> {
        let mut conn = self.connector.connect().await?;
        let result = sqlx::query_as::<_, Item>(
            r#"
            INSERT INTO items (name, source)
            VALUES ($1, $2)
            RETURNING id, name, source, created_at
            "#,
        )
        .bind(&item.name)
        .bind(&item.source)
        .fetch_one(&mut conn)
        .await;
        close(conn).await;

        let stored = result?;
        tracing::debug!(id = stored.id, name = %stored.name, "item inserted");
        Ok(stored)
    }
}
