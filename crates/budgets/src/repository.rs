use crate::models::{Budget, BudgetCadence, CreateBudgetRequest};
use database::{self, RepositoryError};
use sqlx::FromRow;

#[derive(FromRow)]
struct BudgetRecord {
    id: i64,
    name: String,
    limit_amount: i64,
    period: String,
    require_receipts: bool,
    created_at: String,
}

impl From<BudgetRecord> for Budget {
    fn from(record: BudgetRecord) -> Self {
        Budget {
            id: record.id,
            name: record.name,
            limit_amount: record.limit_amount,
            // The CHECK constraint keeps this in range; fall back to the
            // default cadence rather than failing the whole row.
            period: BudgetCadence::parse(&record.period).unwrap_or(BudgetCadence::Monthly),
            require_receipts: record.require_receipts,
            created_at: record.created_at,
        }
    }
}

pub(crate) struct BudgetRepository<'a> {
    conn: &'a mut database::Connection,
}

impl<'a> BudgetRepository<'a> {
    pub fn new(conn: &'a mut database::Connection) -> Self {
        Self { conn }
    }

    pub async fn create(&mut self, req: &CreateBudgetRequest) -> Result<i64, RepositoryError> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO budgets (name, limit_amount, period, require_receipts) VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(req.name())
        .bind(req.limit_amount())
        .bind(req.period().as_str())
        .bind(req.require_receipts())
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(id)
    }

    pub async fn update(&mut self, id: i64, req: &CreateBudgetRequest) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE budgets SET name = $1, limit_amount = $2, period = $3, require_receipts = $4 WHERE id = $5",
        )
        .bind(req.name())
        .bind(req.limit_amount())
        .bind(req.period().as_str())
        .bind(req.require_receipts())
        .bind(id)
        .execute(&mut *self.conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    pub async fn find_by_id(&mut self, id: i64) -> Result<Option<Budget>, RepositoryError> {
        let record = sqlx::query_as::<_, BudgetRecord>(
            "SELECT id, name, limit_amount, period, require_receipts, created_at FROM budgets WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(record.map(|r| r.into()))
    }

    pub async fn list(&mut self) -> Result<Vec<Budget>, RepositoryError> {
        let records = sqlx::query_as::<_, BudgetRecord>(
            "SELECT id, name, limit_amount, period, require_receipts, created_at FROM budgets ORDER BY name",
        )
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(records.into_iter().map(|r| r.into()).collect())
    }

    pub async fn delete(&mut self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM budgets WHERE id = $1")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use database::get_test_db;

    #[tokio::test]
    async fn test_create_budget() {
        let db = get_test_db().await;
        let mut uow = db.begin().await.unwrap();
        let mut repo = BudgetRepository::new(uow.connection());

        let req = CreateBudgetRequest::new("Travel".to_string(), 500.0, "monthly", false).unwrap();
        let id = repo.create(&req).await.unwrap();
        assert!(id > 0);

        let budget = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(budget.name, "Travel");
        assert_eq!(budget.limit_amount, 50000);
        assert_eq!(budget.period, BudgetCadence::Monthly);
        assert!(!budget.require_receipts);
    }

    #[tokio::test]
    async fn test_list_budgets_sorted_by_name() {
        let db = get_test_db().await;
        let mut uow = db.begin().await.unwrap();
        let mut repo = BudgetRepository::new(uow.connection());

        repo.create(&CreateBudgetRequest::new("Software".into(), 100.0, "monthly", false).unwrap())
            .await
            .unwrap();
        repo.create(&CreateBudgetRequest::new("Meals".into(), 250.0, "weekly", true).unwrap())
            .await
            .unwrap();

        let budgets = repo.list().await.unwrap();
        assert_eq!(budgets.len(), 2);
        assert_eq!(budgets[0].name, "Meals");
        assert_eq!(budgets[1].name, "Software");
    }

    #[tokio::test]
    async fn test_update_budget() {
        let db = get_test_db().await;
        let mut uow = db.begin().await.unwrap();
        let mut repo = BudgetRepository::new(uow.connection());

        let id = repo
            .create(&CreateBudgetRequest::new("Travel".into(), 500.0, "monthly", false).unwrap())
            .await
            .unwrap();

        let update = CreateBudgetRequest::new("Travel".into(), 750.0, "quarterly", true).unwrap();
        repo.update(id, &update).await.unwrap();

        let budget = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(budget.limit_amount, 75000);
        assert_eq!(budget.period, BudgetCadence::Quarterly);
        assert!(budget.require_receipts);
    }

    #[tokio::test]
    async fn test_delete_budget() {
        let db = get_test_db().await;
        let mut uow = db.begin().await.unwrap();
        let mut repo = BudgetRepository::new(uow.connection());

        let id = repo
            .create(&CreateBudgetRequest::new("Travel".into(), 500.0, "monthly", false).unwrap())
            .await
            .unwrap();

        repo.delete(id).await.unwrap();
        assert!(repo.find_by_id(id).await.unwrap().is_none());
        assert!(matches!(repo.delete(id).await, Err(RepositoryError::NotFound)));
    }
}
