use crate::models::{BalanceReport, CardBalanceView, RecentTransaction, SpendingEntry};
use crate::period::ReportingPeriod;
use crate::service::{AnalyticsError, AnalyticsService};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use common::AppState;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

const DEFAULT_RECENT_LIMIT: usize = 10;

impl IntoResponse for AnalyticsError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            AnalyticsError::CardNotFound => (StatusCode::NOT_FOUND, "Card not found".to_string()),
            AnalyticsError::Infrastructure(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        (status, Json(json!({ "error": msg }))).into_response()
    }
}

#[derive(Deserialize)]
struct PeriodQuery {
    period: Option<String>,
}

impl PeriodQuery {
    // Missing and unknown values both land on the month default.
    fn reporting_period(&self) -> ReportingPeriod {
        ReportingPeriod::parse(self.period.as_deref().unwrap_or("month"))
    }
}

#[derive(Deserialize)]
struct RecentQuery {
    limit: Option<usize>,
}

/// Read-only projections under `/analytics`.
pub fn analytics_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/balances", get(get_balances))
        .route("/spending", get(get_spending))
        .route("/transactions/recent", get(get_recent_transactions))
        .with_state(state)
}

/// Single-card balance projection; merged into the `/cards` routes.
pub fn card_balance_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/{id}/balance", get(get_card_balance))
        .with_state(state)
}

async fn get_balances(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PeriodQuery>,
) -> Result<Json<BalanceReport>, AnalyticsError> {
    let report = AnalyticsService::balances(&state.db, params.reporting_period()).await?;
    Ok(Json(report))
}

async fn get_spending(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PeriodQuery>,
) -> Result<Json<Vec<SpendingEntry>>, AnalyticsError> {
    let entries = AnalyticsService::spending(&state.db, params.reporting_period()).await?;
    Ok(Json(entries))
}

async fn get_recent_transactions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RecentQuery>,
) -> Result<Json<Vec<RecentTransaction>>, AnalyticsError> {
    let limit = params.limit.unwrap_or(DEFAULT_RECENT_LIMIT);
    let feed = AnalyticsService::recent_activity(&state.db, limit).await?;
    Ok(Json(feed))
}

async fn get_card_balance(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Query(params): Query<PeriodQuery>,
) -> Result<Json<CardBalanceView>, AnalyticsError> {
    let view =
        AnalyticsService::card_balance(&state.db, id, params.reporting_period()).await?;
    Ok(Json(view))
}
