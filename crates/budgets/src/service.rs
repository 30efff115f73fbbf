use crate::models::{Budget, CreateBudgetRequest};
use crate::repository::BudgetRepository;
use database::{Database, RepositoryError};
use tracing::instrument;

#[derive(Debug, thiserror::Error)]
pub enum BudgetError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Database error: {0}")]
    Infrastructure(String),
    #[error("Budget not found")]
    NotFound,
}

impl From<RepositoryError> for BudgetError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => BudgetError::NotFound,
            RepositoryError::CheckViolation(msg) => BudgetError::InvalidInput(msg),
            RepositoryError::Infrastructure(e) => BudgetError::Infrastructure(e.to_string()),
            _ => BudgetError::Infrastructure(err.to_string()),
        }
    }
}

pub struct BudgetService;

impl BudgetService {
    #[instrument(skip(db))]
    pub async fn create_budget(
        db: &Database,
        name: String,
        limit_dollars: f64,
        period: &str,
        require_receipts: bool,
    ) -> Result<i64, BudgetError> {
        let req = CreateBudgetRequest::new(name, limit_dollars, period, require_receipts)
            .map_err(BudgetError::InvalidInput)?;

        let mut uow = db.begin().await?;
        let mut repo = BudgetRepository::new(uow.connection());

        let id = repo.create(&req).await?;

        uow.commit().await?;

        Ok(id)
    }

    #[instrument(skip(db))]
    pub async fn update_budget(
        db: &Database,
        id: i64,
        name: String,
        limit_dollars: f64,
        period: &str,
        require_receipts: bool,
    ) -> Result<Budget, BudgetError> {
        let req = CreateBudgetRequest::new(name, limit_dollars, period, require_receipts)
            .map_err(BudgetError::InvalidInput)?;

        let mut uow = db.begin().await?;
        let mut repo = BudgetRepository::new(uow.connection());

        repo.update(id, &req).await?;

        let budget = repo.find_by_id(id).await?.ok_or(BudgetError::NotFound)?;

        uow.commit().await?;

        Ok(budget)
    }

    #[instrument(skip(db))]
    pub async fn get_budget(db: &Database, id: i64) -> Result<Budget, BudgetError> {
        let mut uow = db.begin().await?;
        let mut repo = BudgetRepository::new(uow.connection());

        let budget = repo.find_by_id(id).await?.ok_or(BudgetError::NotFound)?;

        Ok(budget)
    }

    #[instrument(skip(db))]
    pub async fn list_budgets(db: &Database) -> Result<Vec<Budget>, BudgetError> {
        let mut uow = db.begin().await?;
        let mut repo = BudgetRepository::new(uow.connection());

        let budgets = repo.list().await?;

        Ok(budgets)
    }

    #[instrument(skip(db))]
    pub async fn delete_budget(db: &Database, id: i64) -> Result<(), BudgetError> {
        let mut uow = db.begin().await?;
        let mut repo = BudgetRepository::new(uow.connection());

        repo.delete(id).await?;

        uow.commit().await?;
        Ok(())
    }
}
