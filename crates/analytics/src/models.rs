use budgets::models::Budget;
use cards::models::{Card, CardBudget};
use serde::{Serialize, Serializer};
use transactions::models::Transaction;

/// Immutable view of the entity store, fetched once per analytics request.
///
/// The engine only ever reads from it; derived results are computed fresh
/// and discarded after the response is built.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub cards: Vec<Card>,
    pub budgets: Vec<Budget>,
    pub card_budgets: Vec<CardBudget>,
    pub transactions: Vec<Transaction>,
}

impl Snapshot {
    pub fn card(&self, id: i64) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn budget(&self, id: i64) -> Option<&Budget> {
        self.budgets.iter().find(|b| b.id == id)
    }

    pub fn link(&self, id: i64) -> Option<&CardBudget> {
        self.card_budgets.iter().find(|l| l.id == id)
    }

    /// Associations for one card, in insertion order. That order is what
    /// per-card pie breakdowns follow.
    pub fn links_for_card(&self, card_id: i64) -> impl Iterator<Item = &CardBudget> {
        self.card_budgets.iter().filter(move |l| l.card_id == card_id)
    }
}

/// Amounts are integer cents internally; the wire carries decimal dollars.
fn cents_as_dollars<S: Serializer>(cents: &i64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(*cents as f64 / 100.0)
}

/// One budget's share of a card's balance within the reporting period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetBalance {
    pub budget_id: i64,
    pub budget_name: String,
    #[serde(serialize_with = "cents_as_dollars")]
    pub limit_amount: i64,
    #[serde(serialize_with = "cents_as_dollars")]
    pub spent_amount: i64,
    /// `limit - spent`; negative means over budget, which is a valid result.
    #[serde(serialize_with = "cents_as_dollars")]
    pub remaining_amount: i64,
    pub period: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardBalance {
    pub card_id: i64,
    pub card_name: String,
    #[serde(serialize_with = "cents_as_dollars")]
    pub total_spent: i64,
    #[serde(serialize_with = "cents_as_dollars")]
    pub total_limit: i64,
    #[serde(serialize_with = "cents_as_dollars")]
    pub remaining_amount: i64,
    pub budget_balances: Vec<BudgetBalance>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceReport {
    pub card_balances: Vec<CardBalance>,
    #[serde(serialize_with = "cents_as_dollars")]
    pub total_spent: i64,
    #[serde(serialize_with = "cents_as_dollars")]
    pub total_limit: i64,
    #[serde(serialize_with = "cents_as_dollars")]
    pub total_remaining: i64,
}

/// Ranked per-budget spend for the spending breakdown chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpendingEntry {
    pub budget_id: i64,
    pub budget_name: String,
    #[serde(serialize_with = "cents_as_dollars")]
    pub total_spent: i64,
    /// Share of the grand total, full precision. Rounding is the
    /// presentation layer's concern.
    pub percentage: f64,
    pub color: String,
}

/// Input to the pie segmentation engine: a labelled, colored amount.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub amount: i64,
    pub color: String,
}

/// A renderable arc. Angles are degrees; layout starts at 0 and segments
/// are laid out consecutively in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSegment {
    pub label: String,
    #[serde(serialize_with = "cents_as_dollars")]
    pub amount: i64,
    pub percentage: f64,
    pub start_angle: f64,
    pub sweep_angle: f64,
    /// SVG arc rendering needs the large-arc path variant above 180°.
    pub large_arc: bool,
    pub color: String,
}

/// A transaction enriched with display names for the activity feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentTransaction {
    pub id: i64,
    pub name: String,
    #[serde(serialize_with = "cents_as_dollars")]
    pub amount: i64,
    /// Raw stored date; kept even when it does not parse.
    pub date: String,
    pub card_name: String,
    pub budget_name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub merchant: Option<String>,
}

/// Single-card balance projection with its pie segmentation attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardBalanceView {
    #[serde(flatten)]
    pub balance: CardBalance,
    pub segments: Vec<PieSegment>,
}
