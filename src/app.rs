use axum::Router;
use tower_http::cors::CorsLayer;

use crate::routes::{auth, categories, health, items, platforms, reports};
use crate::state::AppState;

pub fn create_app(state: AppState) -> Router {
    Router::<AppState>::new()
        .nest("/health", health::router())
        .nest("/api/auth", auth::router())
        .nest("/api/items", items::router())
        .nest("/api/categories", categories::router())
        .nest("/api/platforms", platforms::router())
        .nest("/api/reports", reports::router())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
