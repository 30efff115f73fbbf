use crate::models::{RawTransactionRequest, Transaction};
use crate::service::{TransactionError, TransactionService};
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

impl IntoResponse for TransactionError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            TransactionError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            TransactionError::NotFound => {
                (StatusCode::NOT_FOUND, "Transaction not found".to_string())
            }
            TransactionError::Infrastructure(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        (status, Json(json!({ "error": msg }))).into_response()
    }
}

#[derive(Serialize)]
pub struct TransactionResponse {
    pub id: i64,
    pub card_budget_id: i64,
    pub amount: f64,
    pub name: String,
    pub date: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub merchant: Option<String>,
}

impl From<Transaction> for TransactionResponse {
    fn from(t: Transaction) -> Self {
        TransactionResponse {
            id: t.id,
            card_budget_id: t.card_budget_id,
            amount: t.amount as f64 / 100.0,
            name: t.name,
            date: t.date,
            description: t.description,
            category: t.category,
            merchant: t.merchant,
        }
    }
}

pub fn transactions_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_transactions).post(create_transaction))
        .route(
            "/{id}",
            get(get_transaction).put(update_transaction).delete(delete_transaction),
        )
        .with_state(state)
}

async fn list_transactions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TransactionResponse>>, TransactionError> {
    let transactions = TransactionService::list_transactions(&state.db).await?;
    Ok(Json(transactions.into_iter().map(Into::into).collect()))
}

async fn get_transaction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<TransactionResponse>, TransactionError> {
    let transaction = TransactionService::get_transaction(&state.db, id).await?;
    Ok(Json(transaction.into()))
}

async fn create_transaction(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RawTransactionRequest>,
) -> Result<impl IntoResponse, TransactionError> {
    let id = TransactionService::create_transaction(
        &state.db,
        payload.card_budget_id,
        payload.amount,
        payload.name,
        payload.date,
        payload.description,
        payload.category,
        payload.merchant,
    )
    .await
    .map_err(|e| {
        tracing::error!("create_transaction error: {:?}", e);
        e
    })?;

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

async fn update_transaction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(payload): Json<RawTransactionRequest>,
) -> Result<Json<TransactionResponse>, TransactionError> {
    let transaction = TransactionService::update_transaction(
        &state.db,
        id,
        payload.card_budget_id,
        payload.amount,
        payload.name,
        payload.date,
        payload.description,
        payload.category,
        payload.merchant,
    )
    .await?;

    Ok(Json(transaction.into()))
}

async fn delete_transaction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, TransactionError> {
    TransactionService::delete_transaction(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
