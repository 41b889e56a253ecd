use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{error, info};

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::{AnnualReport, MonthlyReport, TotalReport};
use crate::services::report_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/monthly", get(monthly_report))
        .route("/annual", get(annual_report))
        .route("/total", get(total_report))
}

#[derive(Debug, Deserialize)]
struct MonthlyQuery {
    month: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AnnualQuery {
    year: Option<i32>,
}

async fn monthly_report(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<MonthlyQuery>,
) -> Result<Json<MonthlyReport>, AppError> {
    info!("GET /reports/monthly - month={:?}", params.month);
    let report = report_service::monthly(&state.pool, user.id, params.month.as_deref())
        .await
        .map_err(|e| {
            error!("Failed to build monthly report: {}", e);
            e
        })?;
    Ok(Json(report))
}

async fn annual_report(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<AnnualQuery>,
) -> Result<Json<AnnualReport>, AppError> {
    info!("GET /reports/annual - year={:?}", params.year);
    let report = report_service::annual(&state.pool, user.id, params.year)
        .await
        .map_err(|e| {
            error!("Failed to build annual report: {}", e);
            e
        })?;
    Ok(Json(report))
}

async fn total_report(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<TotalReport>, AppError> {
    info!("GET /reports/total - all-time report");
    let report = report_service::total(&state.pool, user.id)
        .await
        .map_err(|e| {
            error!("Failed to build all-time report: {}", e);
            e
        })?;
    Ok(Json(report))
}
