use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection},
        Path, State,
    },
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Serialize;

use crate::errors::ItemError;
use crate::services::item_service;
use crate::state::items::ItemStore;

const JSON: &str = "application/json";

/// Build the collection and single-item routes.
pub fn routes(store: ItemStore) -> Router {
    Router::new()
        .route(
            "/items",
            get(list_items)
                .head(method_not_allowed)
                .post(create_item)
                .fallback(method_not_allowed),
        )
        .route(
            "/items/:key",
            get(get_item)
                .head(method_not_allowed)
                .fallback(method_not_allowed),
        )
        .with_state(store)
}

//
// ─────────────────────────────────────────────────────────────
// GET /items
// Return every stored item as a JSON array
// ─────────────────────────────────────────────────────────────
//
async fn list_items(State(store): State<ItemStore>) -> Result<Response, ItemError> {
    let items = item_service::list(&store)?;
    json_response(StatusCode::OK, &items)
}

//
// ─────────────────────────────────────────────────────────────
// POST /items
// Store a new item under a server-assigned key
// ─────────────────────────────────────────────────────────────
//
async fn create_item(
    State(store): State<ItemStore>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, ItemError> {
    let body = body.map_err(|e| ItemError::InvalidBody(e.body_text()))?;

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .unwrap_or_default();
    if content_type != JSON {
        return Err(ItemError::UnsupportedMediaType(content_type));
    }

    let new_item = item_service::parse_new_item(&body)?;
    let item = item_service::create(&store, new_item)?;

    json_response(StatusCode::CREATED, &item)
}

//
// ─────────────────────────────────────────────────────────────
// GET /items/{key}
// Return a single item or 404
// ─────────────────────────────────────────────────────────────
//
async fn get_item(
    key: Result<Path<String>, PathRejection>,
    State(store): State<ItemStore>,
) -> Result<Response, ItemError> {
    // A key that does not decode can never have been issued.
    let Path(key) = key.map_err(|_| ItemError::NotFound)?;
    let item = item_service::get(&store, &key)?;
    json_response(StatusCode::OK, &item)
}

async fn method_not_allowed() -> ItemError {
    ItemError::MethodNotAllowed
}

fn json_response<T: Serialize>(status: StatusCode, value: &T) -> Result<Response, ItemError> {
    let body = serde_json::to_vec(value)?;
    Ok((status, [(header::CONTENT_TYPE, JSON)], body).into_response())
}
