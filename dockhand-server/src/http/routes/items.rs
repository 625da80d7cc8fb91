//! Item endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::db::{Item, NewItem};
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// Item response
#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub id: i32,
    pub name: String,
    pub source: String,
    pub created_at: String,
}

impl From<Item> for ItemResponse {
    fn from(i: Item) -> Self {
        Self {
            id: i.id,
            name: i.name,
            source: i.source,
            created_at: i.created_at.to_rfc3339(),
        }
    }
}

#[derive(Serialize)]
pub struct ItemsResponse {
    pub items: Vec<ItemResponse>,
}

#[derive(Serialize)]
pub struct AddedResponse {
    pub status: &'static str,
    pub item: ItemResponse,
}

/// GET /items - all items ascending by id
async fn list_items(State(state): State<Arc<AppState>>) -> Result<Json<ItemsResponse>, ApiError> {
    let items = state.store.list_items().await?;

    Ok(Json(ItemsResponse {
        items: items.into_iter().map(ItemResponse::from).collect(),
    }))
}

/// POST /add-item - insert the fixed static item
async fn add_item(
    State(state): State<Arc<AppState>>,
) -> Result<(StatusCode, Json<AddedResponse>), ApiError> {
    let item = state.store.insert_item(&NewItem::static_item()).await?;

    Ok((
        StatusCode::CREATED,
        Json(AddedResponse {
            status: "added",
            item: ItemResponse::from(item),
        }),
    ))
}

/// Item routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/items", get(list_items))
        .route("/add-item", post(add_item))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::http::routes::testing::{app_with, send, unreachable_repo, MemoryStore};

    #[tokio::test]
    async fn empty_table_lists_no_items() {
        let app = app_with(MemoryStore::default(), false);
        let (status, body) = send(&app, Method::GET, "/items").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "items": [] }));
    }

    #[tokio::test]
    async fn add_item_twice_creates_distinct_rows() {
        let app = app_with(MemoryStore::default(), false);

        let (status, first) = send(&app, Method::POST, "/add-item").await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(first["status"], "added");
        let (_, second) = send(&app, Method::POST, "/add-item").await;

        for added in [&first, &second] {
            assert_eq!(added["item"]["name"], "static item");
            assert_eq!(added["item"]["source"], "static");
        }
        assert!(second["item"]["id"].as_i64() > first["item"]["id"].as_i64());

        let (_, listed) = send(&app, Method::GET, "/items").await;
        let items = listed["items"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0], first["item"]);
        assert_eq!(items[1], second["item"]);
    }

    #[tokio::test]
    async fn item_has_exactly_four_keys() {
        let app = app_with(MemoryStore::default(), false);
        let (_, body) = send(&app, Method::POST, "/add-item").await;

        let item = body["item"].as_object().unwrap();
        let mut keys: Vec<_> = item.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["created_at", "id", "name", "source"]);
    }

    #[tokio::test]
    async fn get_on_add_item_is_rejected() {
        let app = app_with(MemoryStore::default(), false);
        let response = tower::ServiceExt::oneshot(
            app,
            axum::http::Request::builder()
                .uri("/add-item")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn store_failure_is_500_with_message() {
        let app = app_with(MemoryStore::down(), false);

        for (method, uri) in [(Method::GET, "/items"), (Method::POST, "/add-item")] {
            let (status, body) = send(&app, method, uri).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert!(!body["error"].as_str().unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn unreachable_postgres_is_500() {
        let app = app_with(unreachable_repo(), false);
        let (status, body) = send(&app, Method::GET, "/items").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body["error"].as_str().unwrap().is_empty());
    }
}
