use crate::models::{Card, CardBudget, CardStatus, CreateCardRequest};
use database::{self, RepositoryError};
use sqlx::FromRow;

#[derive(FromRow)]
struct CardRecord {
    id: i64,
    name: String,
    cardholder_name: String,
    status: String,
    created_at: String,
}

impl From<CardRecord> for Card {
    fn from(record: CardRecord) -> Self {
        Card {
            id: record.id,
            name: record.name,
            cardholder_name: record.cardholder_name,
            status: CardStatus::parse(&record.status).unwrap_or(CardStatus::Issued),
            created_at: record.created_at,
        }
    }
}

#[derive(FromRow)]
struct CardBudgetRecord {
    id: i64,
    card_id: i64,
    budget_id: i64,
    created_at: String,
}

impl From<CardBudgetRecord> for CardBudget {
    fn from(record: CardBudgetRecord) -> Self {
        CardBudget {
            id: record.id,
            card_id: record.card_id,
            budget_id: record.budget_id,
            created_at: record.created_at,
        }
    }
}

pub(crate) struct CardRepository<'a> {
    conn: &'a mut database::Connection,
}

impl<'a> CardRepository<'a> {
    pub fn new(conn: &'a mut database::Connection) -> Self {
        Self { conn }
    }

    pub async fn create(&mut self, req: &CreateCardRequest) -> Result<i64, RepositoryError> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO cards (name, cardholder_name, status) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(req.name())
        .bind(req.cardholder_name())
        .bind(req.status().as_str())
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(id)
    }

    pub async fn list(&mut self) -> Result<Vec<Card>, RepositoryError> {
        let records = sqlx::query_as::<_, CardRecord>(
            "SELECT id, name, cardholder_name, status, created_at FROM cards ORDER BY name",
        )
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(records.into_iter().map(|r| r.into()).collect())
    }

    pub async fn find_by_id(&mut self, id: i64) -> Result<Option<Card>, RepositoryError> {
        let record = sqlx::query_as::<_, CardRecord>(
            "SELECT id, name, cardholder_name, status, created_at FROM cards WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(record.map(|r| r.into()))
    }

    pub async fn update(
        &mut self,
        id: i64,
        name: &str,
        cardholder_name: &str,
        status: CardStatus,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE cards SET name = $1, cardholder_name = $2, status = $3 WHERE id = $4",
        )
        .bind(name)
        .bind(cardholder_name)
        .bind(status.as_str())
        .bind(id)
        .execute(&mut *self.conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    pub async fn delete(&mut self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM cards WHERE id = $1")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

pub(crate) struct CardBudgetRepository<'a> {
    conn: &'a mut database::Connection,
}

impl<'a> CardBudgetRepository<'a> {
    pub fn new(conn: &'a mut database::Connection) -> Self {
        Self { conn }
    }

    pub async fn link(&mut self, card_id: i64, budget_id: i64) -> Result<i64, RepositoryError> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO card_budgets (card_id, budget_id) VALUES ($1, $2) RETURNING id",
        )
        .bind(card_id)
        .bind(budget_id)
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(id)
    }

    pub async fn unlink(&mut self, card_id: i64, budget_id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM card_budgets WHERE card_id = $1 AND budget_id = $2")
            .bind(card_id)
            .bind(budget_id)
            .execute(&mut *self.conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    pub async fn find_by_id(&mut self, id: i64) -> Result<Option<CardBudget>, RepositoryError> {
        let record = sqlx::query_as::<_, CardBudgetRecord>(
            "SELECT id, card_id, budget_id, created_at FROM card_budgets WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(record.map(|r| r.into()))
    }

    pub async fn list(&mut self) -> Result<Vec<CardBudget>, RepositoryError> {
        let records = sqlx::query_as::<_, CardBudgetRecord>(
            "SELECT id, card_id, budget_id, created_at FROM card_budgets ORDER BY id",
        )
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(records.into_iter().map(|r| r.into()).collect())
    }

    pub async fn list_for_card(&mut self, card_id: i64) -> Result<Vec<CardBudget>, RepositoryError> {
        let records = sqlx::query_as::<_, CardBudgetRecord>(
            "SELECT id, card_id, budget_id, created_at FROM card_budgets WHERE card_id = $1 ORDER BY id",
        )
        .bind(card_id)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(records.into_iter().map(|r| r.into()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use database::get_test_db;

    async fn insert_budget(conn: &mut database::Connection, name: &str) -> i64 {
        sqlx::query_scalar(
            "INSERT INTO budgets (name, limit_amount, period) VALUES ($1, 50000, 'monthly') RETURNING id",
        )
        .bind(name)
        .fetch_one(&mut *conn)
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_and_find_card() {
        let db = get_test_db().await;
        let mut uow = db.begin().await.unwrap();
        let mut repo = CardRepository::new(uow.connection());

        let req = CreateCardRequest::new("Marketing".into(), "Ada Lovelace".into(), "issued").unwrap();
        let id = repo.create(&req).await.unwrap();

        let card = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(card.name, "Marketing");
        assert_eq!(card.cardholder_name, "Ada Lovelace");
        assert_eq!(card.status, CardStatus::Issued);
    }

    #[tokio::test]
    async fn test_update_card_status() {
        let db = get_test_db().await;
        let mut uow = db.begin().await.unwrap();
        let mut repo = CardRepository::new(uow.connection());

        let req = CreateCardRequest::new("Marketing".into(), "Ada".into(), "issued").unwrap();
        let id = repo.create(&req).await.unwrap();

        repo.update(id, "Marketing", "Ada", CardStatus::Frozen).await.unwrap();

        let card = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(card.status, CardStatus::Frozen);
    }

    #[tokio::test]
    async fn test_link_and_unlink_budget() {
        let db = get_test_db().await;
        let mut uow = db.begin().await.unwrap();

        let budget_id = insert_budget(uow.connection(), "Travel").await;

        let mut cards = CardRepository::new(uow.connection());
        let card_id = cards
            .create(&CreateCardRequest::new("Ops".into(), "Ada".into(), "issued").unwrap())
            .await
            .unwrap();

        let mut links = CardBudgetRepository::new(uow.connection());
        let link_id = links.link(card_id, budget_id).await.unwrap();
        assert!(link_id > 0);

        let for_card = links.list_for_card(card_id).await.unwrap();
        assert_eq!(for_card.len(), 1);
        assert_eq!(for_card[0].budget_id, budget_id);

        links.unlink(card_id, budget_id).await.unwrap();
        assert!(links.list_for_card(card_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_link_rejected() {
        let db = get_test_db().await;
        let mut uow = db.begin().await.unwrap();

        let budget_id = insert_budget(uow.connection(), "Travel").await;

        let mut cards = CardRepository::new(uow.connection());
        let card_id = cards
            .create(&CreateCardRequest::new("Ops".into(), "Ada".into(), "issued").unwrap())
            .await
            .unwrap();

        let mut links = CardBudgetRepository::new(uow.connection());
        links.link(card_id, budget_id).await.unwrap();

        let result = links.link(card_id, budget_id).await;
        assert!(matches!(result, Err(RepositoryError::UniqueViolation(_))));
    }

    #[tokio::test]
    async fn test_delete_card_cascades_links() {
        let db = get_test_db().await;
        let mut uow = db.begin().await.unwrap();

        let budget_id = insert_budget(uow.connection(), "Travel").await;

        let mut cards = CardRepository::new(uow.connection());
        let card_id = cards
            .create(&CreateCardRequest::new("Ops".into(), "Ada".into(), "issued").unwrap())
            .await
            .unwrap();

        let mut links = CardBudgetRepository::new(uow.connection());
        links.link(card_id, budget_id).await.unwrap();

        let mut cards = CardRepository::new(uow.connection());
        cards.delete(card_id).await.unwrap();

        let mut links = CardBudgetRepository::new(uow.connection());
        assert!(links.list().await.unwrap().is_empty());
    }
}
