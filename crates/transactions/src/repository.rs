use crate::models::{CreateTransactionRequest, Transaction};
use database::{self, RepositoryError};
use sqlx::FromRow;

#[derive(FromRow)]
struct TransactionRecord {
    id: i64,
    card_budget_id: i64,
    amount: i64,
    name: String,
    date: String,
    description: Option<String>,
    category: Option<String>,
    merchant: Option<String>,
}

impl From<TransactionRecord> for Transaction {
    fn from(record: TransactionRecord) -> Self {
        Transaction {
            id: record.id,
            card_budget_id: record.card_budget_id,
            amount: record.amount,
            name: record.name,
            date: record.date,
            description: record.description,
            category: record.category,
            merchant: record.merchant,
        }
    }
}

pub(crate) struct TransactionRepository<'a> {
    conn: &'a mut database::Connection,
}

impl<'a> TransactionRepository<'a> {
    pub fn new(conn: &'a mut database::Connection) -> Self {
        Self { conn }
    }

    pub async fn create(&mut self, req: &CreateTransactionRequest) -> Result<i64, RepositoryError> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO transactions (card_budget_id, amount, name, date, description, category, merchant) VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING id",
        )
        .bind(req.card_budget_id())
        .bind(req.amount())
        .bind(req.name())
        .bind(req.date())
        .bind(req.description())
        .bind(req.category())
        .bind(req.merchant())
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(id)
    }

    // Replace semantics: an edit overwrites every field.
    pub async fn update(&mut self, id: i64, req: &CreateTransactionRequest) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE transactions SET card_budget_id = $1, amount = $2, name = $3, date = $4, description = $5, category = $6, merchant = $7 WHERE id = $8",
        )
        .bind(req.card_budget_id())
        .bind(req.amount())
        .bind(req.name())
        .bind(req.date())
        .bind(req.description())
        .bind(req.category())
        .bind(req.merchant())
        .bind(id)
        .execute(&mut *self.conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    pub async fn find_by_id(&mut self, id: i64) -> Result<Option<Transaction>, RepositoryError> {
        let record = sqlx::query_as::<_, TransactionRecord>(
            "SELECT id, card_budget_id, amount, name, date, description, category, merchant FROM transactions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(record.map(|r| r.into()))
    }

    /// Insertion order; the recent feed relies on ids as creation order for
    /// its tie-break.
    pub async fn list(&mut self) -> Result<Vec<Transaction>, RepositoryError> {
        let records = sqlx::query_as::<_, TransactionRecord>(
            "SELECT id, card_budget_id, amount, name, date, description, category, merchant FROM transactions ORDER BY id",
        )
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(records.into_iter().map(|r| r.into()).collect())
    }

    pub async fn delete(&mut self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM transactions WHERE id = $1")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
