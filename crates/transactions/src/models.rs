use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A spend recorded against one card-budget association.
///
/// The date is kept as the raw `YYYY-MM-DD` string it was stored with and
/// parsed where period filtering needs it, so a corrupt date degrades a
/// single statistic instead of hiding the whole record.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Transaction {
    pub id: i64,
    pub card_budget_id: i64,
    pub amount: i64, // Cents; spend is positive, refunds negative
    pub name: String,
    pub date: String, // 'YYYY-MM-DD'
    pub description: Option<String>,
    pub category: Option<String>,
    pub merchant: Option<String>,
}

impl Transaction {
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

#[derive(Debug, Serialize)]
pub struct CreateTransactionRequest {
    card_budget_id: i64,
    amount: i64,
    name: String,
    date: String,
    description: Option<String>,
    category: Option<String>,
    merchant: Option<String>,
}

#[derive(Deserialize)]
pub struct RawTransactionRequest {
    pub card_budget_id: i64,
    pub amount: f64,
    pub name: String,
    pub date: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub merchant: Option<String>,
}

impl CreateTransactionRequest {
    pub fn new(
        card_budget_id: i64,
        amount_dollars: f64,
        name: String,
        date: String,
        description: Option<String>,
        category: Option<String>,
        merchant: Option<String>,
    ) -> Result<Self, String> {
        if name.trim().is_empty() {
            return Err("Transaction name cannot be empty".to_string());
        }
        if NaiveDate::parse_from_str(&date, "%Y-%m-%d").is_err() {
            return Err("Invalid date format, expected YYYY-MM-DD".to_string());
        }
        if !amount_dollars.is_finite() {
            return Err("Amount must be a finite number".to_string());
        }

        Ok(Self {
            card_budget_id,
            amount: (amount_dollars * 100.0).round() as i64,
            name: name.trim().to_string(),
            date,
            description,
            category,
            merchant,
        })
    }

    pub fn card_budget_id(&self) -> i64 {
        self.card_budget_id
    }

    pub fn amount(&self) -> i64 {
        self.amount
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn merchant(&self) -> Option<&str> {
        self.merchant.as_deref()
    }
}
