use crate::balance;
use crate::models::{BalanceReport, CardBalanceView, PieSlice, RecentTransaction, Snapshot, SpendingEntry};
use crate::period::ReportingPeriod;
use crate::pie;
use crate::recent;
use crate::spending;
use budgets::service::{BudgetError, BudgetService};
use cards::service::{CardError, CardService};
use database::Database;
use tracing::instrument;
use transactions::service::{TransactionError, TransactionService};

#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    #[error("Card not found")]
    CardNotFound,
    #[error("Database error: {0}")]
    Infrastructure(String),
}

impl From<CardError> for AnalyticsError {
    fn from(err: CardError) -> Self {
        AnalyticsError::Infrastructure(err.to_string())
    }
}

impl From<BudgetError> for AnalyticsError {
    fn from(err: BudgetError) -> Self {
        AnalyticsError::Infrastructure(err.to_string())
    }
}

impl From<TransactionError> for AnalyticsError {
    fn from(err: TransactionError) -> Self {
        AnalyticsError::Infrastructure(err.to_string())
    }
}

pub struct AnalyticsService;

impl AnalyticsService {
    /// One read of every entity collection. Aggregation then runs over this
    /// snapshot alone, so concurrent queries share nothing and repeating a
    /// query over the same data gives identical output.
    #[instrument(skip(db))]
    pub async fn load_snapshot(db: &Database) -> Result<Snapshot, AnalyticsError> {
        let cards = CardService::list_cards(db).await?;
        let budgets = BudgetService::list_budgets(db).await?;
        let card_budgets = CardService::list_links(db).await?;
        let transactions = TransactionService::list_transactions(db).await?;

        Ok(Snapshot { cards, budgets, card_budgets, transactions })
    }

    fn today() -> chrono::NaiveDate {
        chrono::Local::now().date_naive()
    }

    #[instrument(skip(db))]
    pub async fn balances(
        db: &Database,
        period: ReportingPeriod,
    ) -> Result<BalanceReport, AnalyticsError> {
        let snapshot = Self::load_snapshot(db).await?;
        let range = period.resolve(Self::today());
        Ok(balance::aggregate(&snapshot, &range))
    }

    #[instrument(skip(db))]
    pub async fn spending(
        db: &Database,
        period: ReportingPeriod,
    ) -> Result<Vec<SpendingEntry>, AnalyticsError> {
        let snapshot = Self::load_snapshot(db).await?;
        let range = period.resolve(Self::today());
        Ok(spending::rank(&snapshot, &range))
    }

    #[instrument(skip(db))]
    pub async fn recent_activity(
        db: &Database,
        limit: usize,
    ) -> Result<Vec<RecentTransaction>, AnalyticsError> {
        let snapshot = Self::load_snapshot(db).await?;
        Ok(recent::recent(&snapshot, limit))
    }

    /// Balance for one card with pie segments over its budget breakdown,
    /// in breakdown insertion order, denominated by the card's total limit.
    #[instrument(skip(db))]
    pub async fn card_balance(
        db: &Database,
        card_id: i64,
        period: ReportingPeriod,
    ) -> Result<CardBalanceView, AnalyticsError> {
        let snapshot = Self::load_snapshot(db).await?;
        let range = period.resolve(Self::today());

        let card = balance::card_balance(&snapshot, card_id, &range)
            .ok_or(AnalyticsError::CardNotFound)?;

        let slices: Vec<PieSlice> = card
            .budget_balances
            .iter()
            .enumerate()
            .map(|(i, row)| PieSlice {
                label: row.budget_name.clone(),
                amount: row.spent_amount,
                color: spending::PALETTE[i % spending::PALETTE.len()].to_string(),
            })
            .collect();

        let segments = pie::segment(&slices, card.total_limit);

        Ok(CardBalanceView { balance: card, segments })
    }
}
