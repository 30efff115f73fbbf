use crate::models::{Card, CardBudget, CardStatus, CreateCardRequest};
use crate::repository::{CardBudgetRepository, CardRepository};
use budgets::service::{BudgetError, BudgetService};
use database::{Database, RepositoryError};
use tracing::instrument;

#[derive(Debug, thiserror::Error)]
pub enum CardError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Database error: {0}")]
    Infrastructure(String),
    #[error("Card not found")]
    NotFound,
    #[error("Budget is already linked to this card")]
    Conflict(String),
}

impl From<RepositoryError> for CardError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => CardError::NotFound,
            RepositoryError::UniqueViolation(msg) => CardError::Conflict(msg),
            RepositoryError::Infrastructure(e) => CardError::Infrastructure(e.to_string()),
            _ => CardError::Infrastructure(err.to_string()),
        }
    }
}

pub struct CardService;

impl CardService {
    #[instrument(skip(db))]
    pub async fn create_card(
        db: &Database,
        name: String,
        cardholder_name: String,
        status: &str,
        budget_ids: Vec<i64>,
    ) -> Result<i64, CardError> {
        let req = CreateCardRequest::new(name, cardholder_name, status)
            .map_err(CardError::InvalidInput)?;

        // Associations requested at creation time must all resolve; a card
        // pointing at a missing budget would poison every later aggregation.
        for budget_id in &budget_ids {
            BudgetService::get_budget(db, *budget_id).await.map_err(|e| match e {
                BudgetError::NotFound => {
                    CardError::InvalidInput(format!("Budget {} does not exist", budget_id))
                }
                other => CardError::Infrastructure(other.to_string()),
            })?;
        }

        let mut uow = db.begin().await?;
        let mut repo = CardRepository::new(uow.connection());

        let id = repo.create(&req).await?;

        let mut links = CardBudgetRepository::new(uow.connection());
        for budget_id in budget_ids {
            links.link(id, budget_id).await?;
        }

        uow.commit().await?;

        Ok(id)
    }

    #[instrument(skip(db))]
    pub async fn list_cards(db: &Database) -> Result<Vec<Card>, CardError> {
        let mut uow = db.begin().await?;
        let mut repo = CardRepository::new(uow.connection());

        let cards = repo.list().await?;
        Ok(cards)
    }

    #[instrument(skip(db))]
    pub async fn get_card(db: &Database, id: i64) -> Result<Card, CardError> {
        let mut uow = db.begin().await?;
        let mut repo = CardRepository::new(uow.connection());

        let card = repo.find_by_id(id).await?.ok_or(CardError::NotFound)?;
        Ok(card)
    }

    #[instrument(skip(db))]
    pub async fn update_card(
        db: &Database,
        id: i64,
        name: String,
        cardholder_name: String,
        status: &str,
    ) -> Result<(), CardError> {
        if name.trim().is_empty() {
            return Err(CardError::InvalidInput("Card name cannot be empty".into()));
        }
        let status = CardStatus::parse(status).map_err(CardError::InvalidInput)?;

        let mut uow = db.begin().await?;
        let mut repo = CardRepository::new(uow.connection());

        repo.update(id, name.trim(), cardholder_name.trim(), status).await?;

        uow.commit().await?;
        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn delete_card(db: &Database, id: i64) -> Result<(), CardError> {
        let mut uow = db.begin().await?;
        let mut repo = CardRepository::new(uow.connection());

        repo.delete(id).await?;

        uow.commit().await?;
        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn link_budget(db: &Database, card_id: i64, budget_id: i64) -> Result<i64, CardError> {
        BudgetService::get_budget(db, budget_id).await.map_err(|e| match e {
            BudgetError::NotFound => {
                CardError::InvalidInput(format!("Budget {} does not exist", budget_id))
            }
            other => CardError::Infrastructure(other.to_string()),
        })?;

        let mut uow = db.begin().await?;

        let mut cards = CardRepository::new(uow.connection());
        cards.find_by_id(card_id).await?.ok_or(CardError::NotFound)?;

        let mut links = CardBudgetRepository::new(uow.connection());
        let id = links.link(card_id, budget_id).await?;

        uow.commit().await?;
        Ok(id)
    }

    #[instrument(skip(db))]
    pub async fn unlink_budget(db: &Database, card_id: i64, budget_id: i64) -> Result<(), CardError> {
        let mut uow = db.begin().await?;
        let mut links = CardBudgetRepository::new(uow.connection());

        links.unlink(card_id, budget_id).await?;

        uow.commit().await?;
        Ok(())
    }

    /// All card-budget associations, in insertion order.
    #[instrument(skip(db))]
    pub async fn list_links(db: &Database) -> Result<Vec<CardBudget>, CardError> {
        let mut uow = db.begin().await?;
        let mut links = CardBudgetRepository::new(uow.connection());

        let all = links.list().await?;
        Ok(all)
    }

    #[instrument(skip(db))]
    pub async fn list_links_for_card(db: &Database, card_id: i64) -> Result<Vec<CardBudget>, CardError> {
        let mut uow = db.begin().await?;
        let mut links = CardBudgetRepository::new(uow.connection());

        let for_card = links.list_for_card(card_id).await?;
        Ok(for_card)
    }

    /// Resolve a single association by its id. Transactions reference this
    /// id exclusively, so creation-time validation goes through here.
    #[instrument(skip(db))]
    pub async fn get_link(db: &Database, id: i64) -> Result<CardBudget, CardError> {
        let mut uow = db.begin().await?;
        let mut links = CardBudgetRepository::new(uow.connection());

        let link = links.find_by_id(id).await?.ok_or(CardError::NotFound)?;
        Ok(link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use database::get_test_db;

    #[tokio::test]
    async fn test_create_card_with_budgets() {
        let db = get_test_db().await;

        let budget_id = BudgetService::create_budget(&db, "Travel".into(), 500.0, "monthly", false)
            .await
            .unwrap();

        let card_id = CardService::create_card(
            &db,
            "Ops".into(),
            "Ada Lovelace".into(),
            "issued",
            vec![budget_id],
        )
        .await
        .unwrap();

        let links = CardService::list_links_for_card(&db, card_id).await.unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].budget_id, budget_id);
    }

    #[tokio::test]
    async fn test_create_card_rejects_missing_budget() {
        let db = get_test_db().await;

        let result =
            CardService::create_card(&db, "Ops".into(), "Ada".into(), "issued", vec![42]).await;
        assert!(matches!(result, Err(CardError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_link_requires_existing_card() {
        let db = get_test_db().await;

        let budget_id = BudgetService::create_budget(&db, "Travel".into(), 500.0, "monthly", false)
            .await
            .unwrap();

        let result = CardService::link_budget(&db, 999, budget_id).await;
        assert!(matches!(result, Err(CardError::NotFound)));
    }
}
