use crate::models::{Card, RawCreateCardRequest, UpdateCardRequest};
use crate::service::{CardError, CardService};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get},
};
use common::AppState;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

impl IntoResponse for CardError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            CardError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            CardError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            CardError::NotFound => (StatusCode::NOT_FOUND, "Card not found".to_string()),
            CardError::Infrastructure(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        (status, Json(json!({ "error": msg }))).into_response()
    }
}

/// Wire representation of a card with its associated budget ids embedded.
#[derive(Serialize)]
pub struct CardResponse {
    pub id: i64,
    pub name: String,
    pub cardholder_name: String,
    pub status: String,
    pub budget_ids: Vec<i64>,
    pub created_at: String,
}

impl CardResponse {
    fn new(card: Card, budget_ids: Vec<i64>) -> Self {
        CardResponse {
            id: card.id,
            name: card.name,
            cardholder_name: card.cardholder_name,
            status: card.status.as_str().to_string(),
            budget_ids,
            created_at: card.created_at,
        }
    }
}

pub fn cards_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_cards).post(create_card))
        .route("/{id}", get(get_card).put(update_card).delete(delete_card))
        .route("/{id}/budgets", get(list_card_budgets).post(link_budget))
        .route("/{id}/budgets/{budget_id}", delete(unlink_budget))
        .with_state(state)
}

async fn list_cards(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CardResponse>>, CardError> {
    let cards = CardService::list_cards(&state.db).await?;
    let links = CardService::list_links(&state.db).await?;

    let responses = cards
        .into_iter()
        .map(|card| {
            let budget_ids = links
                .iter()
                .filter(|l| l.card_id == card.id)
                .map(|l| l.budget_id)
                .collect();
            CardResponse::new(card, budget_ids)
        })
        .collect();

    Ok(Json(responses))
}

async fn get_card(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<CardResponse>, CardError> {
    let card = CardService::get_card(&state.db, id).await?;
    let links = CardService::list_links_for_card(&state.db, id).await?;
    let budget_ids = links.into_iter().map(|l| l.budget_id).collect();

    Ok(Json(CardResponse::new(card, budget_ids)))
}

async fn create_card(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RawCreateCardRequest>,
) -> Result<impl IntoResponse, CardError> {
    let id = CardService::create_card(
        &state.db,
        payload.name,
        payload.cardholder_name,
        payload.status.as_deref().unwrap_or("issued"),
        payload.budget_ids.unwrap_or_default(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

async fn update_card(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateCardRequest>,
) -> Result<impl IntoResponse, CardError> {
    CardService::update_card(
        &state.db,
        id,
        payload.name,
        payload.cardholder_name,
        &payload.status,
    )
    .await?;
    Ok(StatusCode::OK)
}

async fn delete_card(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, CardError> {
    CardService::delete_card(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(serde::Deserialize)]
struct LinkBudgetRequest {
    budget_id: i64,
}

async fn list_card_budgets(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, CardError> {
    let links = CardService::list_links_for_card(&state.db, id).await?;
    Ok(Json(links))
}

async fn link_budget(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(payload): Json<LinkBudgetRequest>,
) -> Result<impl IntoResponse, CardError> {
    let link_id = CardService::link_budget(&state.db, id, payload.budget_id).await?;
    Ok((StatusCode::CREATED, Json(json!({ "id": link_id }))))
}

async fn unlink_budget(
    State(state): State<Arc<AppState>>,
    Path((id, budget_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, CardError> {
    CardService::unlink_budget(&state.db, id, budget_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
