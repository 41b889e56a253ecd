use axum::extract::{Path, Query, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{error, info};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::{
    CreateItem, EnrichedItem, Item, ItemListResponse, SellItem, UpdateItem,
};
use crate::services;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_item).get(list_items))
        .route("/:id", get(get_item).put(update_item))
        .route("/:id", delete(delete_item))
        .route("/:id/sell", post(sell_item))
        .route("/:id/unsell", post(unsell_item))
}

#[derive(Debug, Deserialize)]
struct ItemListQuery {
    status: Option<String>,
    category: Option<Uuid>,
    sort: Option<String>,
}

async fn list_items(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<ItemListQuery>,
) -> Result<Json<ItemListResponse>, AppError> {
    info!("GET /items - Listing inventory for user {}", user.id);
    let response = services::item_service::list(
        &state.pool,
        user.id,
        params.status.as_deref(),
        params.category,
        params.sort.as_deref(),
    )
    .await
    .map_err(|e| {
        error!("Failed to list items for user {}: {}", user.id, e);
        e
    })?;
    Ok(Json(response))
}

pub async fn get_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<EnrichedItem>, AppError> {
    info!("GET /items/{} - Fetching item", id);
    let item = services::item_service::get(&state.pool, user.id, id).await?;
    Ok(Json(item))
}

#[axum::debug_handler]
pub async fn create_item(
    State(state): State<AppState>,
    user: AuthUser,
    Json(data): Json<CreateItem>,
) -> Result<Json<Item>, AppError> {
    info!("POST /items - Registering purchase for user {}", user.id);
    let item = services::item_service::create(&state.pool, user.id, data)
        .await
        .map_err(|e| {
            error!("Failed to create item: {}", e);
            e
        })?;
    Ok(Json(item))
}

pub async fn update_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(data): Json<UpdateItem>,
) -> Result<Json<Item>, AppError> {
    info!("PUT /items/{} - Updating item", id);
    let item = services::item_service::update(&state.pool, user.id, id, data)
        .await
        .map_err(|e| {
            error!("Failed to update item {}: {}", id, e);
            e
        })?;
    Ok(Json(item))
}

pub async fn sell_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(data): Json<SellItem>,
) -> Result<Json<Item>, AppError> {
    info!("POST /items/{}/sell - Marking item sold", id);
    let item = services::item_service::sell(&state.pool, user.id, id, data)
        .await
        .map_err(|e| {
            error!("Failed to sell item {}: {}", id, e);
            e
        })?;
    Ok(Json(item))
}

pub async fn unsell_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Item>, AppError> {
    info!("POST /items/{}/unsell - Reverting sale", id);
    let item = services::item_service::unsell(&state.pool, user.id, id).await?;
    Ok(Json(item))
}

pub async fn delete_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    info!("DELETE /items/{} - Deleting item", id);
    services::item_service::delete(&state.pool, user.id, id).await?;
    Ok(Json(serde_json::json!({ "deleted": id })))
}
