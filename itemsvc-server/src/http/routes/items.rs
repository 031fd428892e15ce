//! Item endpoints
//!
//! Each handler validates its input, makes one store call, and maps the
//! outcome through `ApiError`.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::repos::Item;
use crate::http::error::ApiError;
use crate::http::extractors::{ValidItemId, ValidJson};
use crate::http::server::AppState;
use crate::models::{ItemChanges, ItemName, NewItem};

/// Create item request
#[derive(Deserialize)]
pub struct CreateItemRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Update item request (both fields overwrite the stored values)
#[derive(Deserialize)]
pub struct UpdateItemRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Delete confirmation
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteResponse {
    pub success: bool,
}

/// GET /items - list all items, newest first
async fn list_items(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Item>>, ApiError> {
    let items = state.store.list().await?;
    Ok(Json(items))
}

/// POST /items - create a new item
async fn create_item(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreateItemRequest>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    let name = ItemName::required(req.name)?;
    let item = state.store.create(NewItem::new(name, req.description)).await?;

    tracing::debug!(id = item.id, "item created");
    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /items/{id} - overwrite name and description
async fn update_item(
    State(state): State<Arc<AppState>>,
    ValidItemId(id): ValidItemId,
    ValidJson(req): ValidJson<UpdateItemRequest>,
) -> Result<Json<Item>, ApiError> {
    let changes = ItemChanges::new(req.name, req.description)?;
    let item = state.store.update(id, changes).await?;
    Ok(Json(item))
}

/// DELETE /items/{id} - remove an item
async fn delete_item(
    State(state): State<Arc<AppState>>,
    ValidItemId(id): ValidItemId,
) -> Result<Json<DeleteResponse>, ApiError> {
    state.store.delete(id).await?;

    tracing::debug!(id, "item deleted");
    Ok(Json(DeleteResponse { success: true }))
}

/// Item routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route("/items/{id}", put(update_item).delete(delete_item))
}
