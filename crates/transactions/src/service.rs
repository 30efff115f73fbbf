use crate::models::{CreateTransactionRequest, Transaction};
use crate::repository::TransactionRepository;
use cards::service::{CardError, CardService};
use database::{Database, RepositoryError};
use tracing::instrument;

#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Database error: {0}")]
    Infrastructure(String),
    #[error("Transaction not found")]
    NotFound,
}

impl From<RepositoryError> for TransactionError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => TransactionError::NotFound,
            RepositoryError::Infrastructure(e) => TransactionError::Infrastructure(e.to_string()),
            _ => TransactionError::Infrastructure(err.to_string()),
        }
    }
}

pub struct TransactionService;

impl TransactionService {
    /// A transaction must reference a resolvable card-budget association at
    /// creation time. Later deletion of the association leaves an orphan,
    /// which analytics tolerates with placeholder labels.
    async fn check_link(db: &Database, card_budget_id: i64) -> Result<(), TransactionError> {
        CardService::get_link(db, card_budget_id).await.map_err(|e| match e {
            CardError::NotFound => TransactionError::InvalidInput(format!(
                "Card-budget association {} does not exist",
                card_budget_id
            )),
            other => TransactionError::Infrastructure(other.to_string()),
        })?;
        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn create_transaction(
        db: &Database,
        card_budget_id: i64,
        amount_dollars: f64,
        name: String,
        date: String,
        description: Option<String>,
        category: Option<String>,
        merchant: Option<String>,
    ) -> Result<i64, TransactionError> {
        Self::check_link(db, card_budget_id).await?;

        let req = CreateTransactionRequest::new(
            card_budget_id,
            amount_dollars,
            name,
            date,
            description,
            category,
            merchant,
        )
        .map_err(TransactionError::InvalidInput)?;

        let mut uow = db.begin().await?;
        let mut repo = TransactionRepository::new(uow.connection());

        let id = repo.create(&req).await?;

        uow.commit().await?;

        Ok(id)
    }

    #[instrument(skip(db))]
    pub async fn update_transaction(
        db: &Database,
        id: i64,
        card_budget_id: i64,
        amount_dollars: f64,
        name: String,
        date: String,
        description: Option<String>,
        category: Option<String>,
        merchant: Option<String>,
    ) -> Result<Transaction, TransactionError> {
        Self::check_link(db, card_budget_id).await?;

        let req = CreateTransactionRequest::new(
            card_budget_id,
            amount_dollars,
            name,
            date,
            description,
            category,
            merchant,
        )
        .map_err(TransactionError::InvalidInput)?;

        let mut uow = db.begin().await?;
        let mut repo = TransactionRepository::new(uow.connection());

        repo.update(id, &req).await?;

        let transaction = repo.find_by_id(id).await?.ok_or(TransactionError::NotFound)?;

        uow.commit().await?;

        Ok(transaction)
    }

    #[instrument(skip(db))]
    pub async fn get_transaction(db: &Database, id: i64) -> Result<Transaction, TransactionError> {
        let mut uow = db.begin().await?;
        let mut repo = TransactionRepository::new(uow.connection());

        let transaction = repo.find_by_id(id).await?.ok_or(TransactionError::NotFound)?;

        Ok(transaction)
    }

    /// Every transaction in creation order. Analytics snapshots are built
    /// from this single read.
    #[instrument(skip(db))]
    pub async fn list_transactions(db: &Database) -> Result<Vec<Transaction>, TransactionError> {
        let mut uow = db.begin().await?;
        let mut repo = TransactionRepository::new(uow.connection());

        let transactions = repo.list().await?;

        Ok(transactions)
    }

    #[instrument(skip(db))]
    pub async fn delete_transaction(db: &Database, id: i64) -> Result<(), TransactionError> {
        let mut uow = db.begin().await?;
        let mut repo = TransactionRepository::new(uow.connection());

        repo.delete(id).await?;

        uow.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use budgets::service::BudgetService;
    use database::get_test_db;

    async fn setup_link(db: &Database) -> i64 {
        let budget_id = BudgetService::create_budget(db, "Travel".into(), 500.0, "monthly", false)
            .await
            .unwrap();
        let card_id =
            CardService::create_card(db, "Ops".into(), "Ada".into(), "issued", vec![budget_id])
                .await
                .unwrap();
        CardService::list_links_for_card(db, card_id).await.unwrap()[0].id
    }

    #[tokio::test]
    async fn test_create_requires_existing_link() {
        let db = get_test_db().await;

        let result = TransactionService::create_transaction(
            &db,
            77,
            10.0,
            "Lunch".into(),
            "2026-08-03".into(),
            None,
            None,
            None,
        )
        .await;
        assert!(matches!(result, Err(TransactionError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let db = get_test_db().await;
        let link_id = setup_link(&db).await;

        TransactionService::create_transaction(
            &db,
            link_id,
            120.0,
            "Flights".into(),
            "2026-08-03".into(),
            None,
            Some("travel".into()),
            None,
        )
        .await
        .unwrap();

        let all = TransactionService::list_transactions(&db).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].amount, 12000);
    }
}
