use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use tracing::{error, info};

use crate::auth::AuthUser;
use crate::db::platform_queries;
use crate::errors::AppError;
use crate::models::{CreatePlatform, Platform};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_platforms).post(create_platform))
}

pub async fn list_platforms(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<Platform>>, AppError> {
    info!("GET /platforms - Fetching platforms for user {}", user.id);
    let platforms = platform_queries::fetch_all(&state.pool, user.id)
        .await
        .map_err(|e| {
            error!("Failed to fetch platforms: {}", e);
            AppError::Db(e)
        })?;
    Ok(Json(platforms))
}

// Upsert by name, so re-posting an existing platform returns the same row.
pub async fn create_platform(
    State(state): State<AppState>,
    user: AuthUser,
    Json(data): Json<CreatePlatform>,
) -> Result<Json<Platform>, AppError> {
    info!("POST /platforms - Creating platform for user {}", user.id);
    let name = data.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Platform name is required".to_string()));
    }
    let platform = platform_queries::upsert(&state.pool, user.id, name)
        .await
        .map_err(|e| {
            error!("Failed to create platform: {}", e);
            AppError::Db(e)
        })?;
    Ok(Json(platform))
}
