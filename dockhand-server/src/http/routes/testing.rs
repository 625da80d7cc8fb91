//! Router test helpers: an in-memory store and a request shortcut

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use chrono::{DateTime, Utc};
use tower::ServiceExt;

use crate::config::DatabaseConfig;
use crate::db::{Connector, DbError, Item, ItemRepo, ItemStore, NewItem};
use crate::http::server::{build_router, AppState};

/// In-memory `ItemStore`; `down()` makes every call fail like a dead socket.
#[derive(Default)]
pub(crate) struct MemoryStore {
    items: Mutex<Vec<Item>>,
    down: bool,
}

impl MemoryStore {
    pub(crate) fn down() -> Self {
        Self {
            down: true,
            ..Self::default()
        }
    }

    fn check(&self) -> Result<(), DbError> {
        if self.down {
            return Err(DbError::Connection(sqlx::Error::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            ))));
        }
        Ok(())
    }
}

#[async_trait]
impl ItemStore for MemoryStore {
    async fn now(&self) -> Result<DateTime<Utc>, DbError> {
        self.check()?;
        Ok(Utc::now())
    }

    async fn list_items(&self) -> Result<Vec<Item>, DbError> {
        self.check()?;
        let mut items = self.items.lock().unwrap().clone();
        items.sort_by_key(|i| i.id);
        Ok(items)
    }

    async fn insert_item(&self, item: &NewItem) -> Result<Item, DbError> {
        self.check()?;
        let mut items = self.items.lock().unwrap();
        let id = items.iter().map(|i| i.id).max().unwrap_or(0) + 1;
        let stored = Item {
            id,
            name: item.name.clone(),
            source: item.source.clone(),
            created_at: Utc::now(),
        };
        items.push(stored.clone());
        Ok(stored)
    }
}

/// Real repository aimed at a closed local port.
pub(crate) fn unreachable_repo() -> ItemRepo {
    ItemRepo::new(Connector::new(DatabaseConfig {
        host: Some("127.0.0.1".into()),
        port: 1,
        database: Some("dockhand".into()),
        user: Some("dockhand".into()),
        password: Some("dockhand".into()),
    }))
}

pub(crate) fn app_with(store: impl ItemStore + 'static, strict_db_check: bool) -> Router {
    build_router(AppState {
        store: Arc::new(store),
        strict_db_check,
    })
}

/// Send a body-less request and decode the JSON response.
pub(crate) async fn send(app: &Router, method: Method, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}
