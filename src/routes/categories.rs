use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use tracing::{error, info};

use crate::auth::AuthUser;
use crate::db::category_queries;
use crate::errors::AppError;
use crate::models::Category;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_categories))
}

pub async fn list_categories(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<Category>>, AppError> {
    info!("GET /categories - Fetching categories for user {}", user.id);
    let categories = category_queries::fetch_all(&state.pool, user.id)
        .await
        .map_err(|e| {
            error!("Failed to fetch categories: {}", e);
            AppError::Db(e)
        })?;
    Ok(Json(categories))
}
