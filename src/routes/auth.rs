use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::{error, info};

use crate::auth::AuthUser;
use crate::db::user_queries;
use crate::errors::AppError;
use crate::models::{AuthResponse, LoginRequest, RegisterUser, User};
use crate::services;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me))
}

pub async fn register(
    State(state): State<AppState>,
    Json(data): Json<RegisterUser>,
) -> Result<Json<AuthResponse>, AppError> {
    info!("POST /auth/register - Registering new user");
    let response = services::auth_service::register(&state.pool, data)
        .await
        .map_err(|e| {
            error!("Failed to register user: {}", e);
            e
        })?;
    Ok(Json(response))
}

pub async fn me(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<User>, AppError> {
    info!("GET /auth/me - Fetching current user");
    let user = user_queries::find_by_id(&state.pool, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    Ok(Json(user))
}

pub async fn login(
    State(state): State<AppState>,
    Json(data): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    info!("POST /auth/login - Logging in");
    let response = services::auth_service::login(&state.pool, data).await?;
    Ok(Json(response))
}
