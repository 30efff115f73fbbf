use crate::models::{Budget, RawBudgetRequest};
use crate::service::{BudgetError, BudgetService};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use common::AppState;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

impl IntoResponse for BudgetError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            BudgetError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            BudgetError::NotFound => (StatusCode::NOT_FOUND, "Budget not found".to_string()),
            BudgetError::Infrastructure(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        (status, Json(json!({ "error": msg }))).into_response()
    }
}

/// Wire representation of a budget; amounts in dollars.
#[derive(Serialize)]
pub struct BudgetResponse {
    pub id: i64,
    pub name: String,
    pub limit_amount: f64,
    pub period: String,
    pub require_receipts: bool,
    pub created_at: String,
}

impl From<Budget> for BudgetResponse {
    fn from(b: Budget) -> Self {
        BudgetResponse {
            id: b.id,
            name: b.name,
            limit_amount: b.limit_amount as f64 / 100.0,
            period: b.period.as_str().to_string(),
            require_receipts: b.require_receipts,
            created_at: b.created_at,
        }
    }
}

pub fn budgets_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_budgets).post(create_budget))
        .route("/{id}", get(get_budget).put(update_budget).delete(delete_budget))
        .with_state(state)
}

async fn list_budgets(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<BudgetResponse>>, BudgetError> {
    let budgets = BudgetService::list_budgets(&state.db).await?;
    Ok(Json(budgets.into_iter().map(Into::into).collect()))
}

async fn get_budget(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<BudgetResponse>, BudgetError> {
    let budget = BudgetService::get_budget(&state.db, id).await?;
    Ok(Json(budget.into()))
}

async fn create_budget(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RawBudgetRequest>,
) -> Result<impl IntoResponse, BudgetError> {
    let id = BudgetService::create_budget(
        &state.db,
        payload.name,
        payload.limit_amount,
        &payload.period,
        payload.require_receipts.unwrap_or(false),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

async fn update_budget(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(payload): Json<RawBudgetRequest>,
) -> Result<Json<BudgetResponse>, BudgetError> {
    let budget = BudgetService::update_budget(
        &state.db,
        id,
        payload.name,
        payload.limit_amount,
        &payload.period,
        payload.require_receipts.unwrap_or(false),
    )
    .await?;

    Ok(Json(budget.into()))
}

async fn delete_budget(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, BudgetError> {
    BudgetService::delete_budget(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
