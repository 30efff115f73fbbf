use serde::{Deserialize, Serialize};

/// Renewal cadence of a budget's spending limit.
///
/// This is a property of the budget itself and is independent of the
/// reporting period an analytics query asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetCadence {
    Weekly,
    Monthly,
    Quarterly,
}

impl BudgetCadence {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetCadence::Weekly => "weekly",
            BudgetCadence::Monthly => "monthly",
            BudgetCadence::Quarterly => "quarterly",
        }
    }

    pub fn parse(s: &str) -> Result<Self, String> {
        match s {
            "weekly" => Ok(BudgetCadence::Weekly),
            "monthly" => Ok(BudgetCadence::Monthly),
            "quarterly" => Ok(BudgetCadence::Quarterly),
            other => Err(format!("Unknown budget period: {}", other)),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Budget {
    pub id: i64,
    pub name: String,
    pub limit_amount: i64, // Cents
    pub period: BudgetCadence,
    pub require_receipts: bool,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct CreateBudgetRequest {
    name: String,
    limit_amount: i64,
    period: BudgetCadence,
    require_receipts: bool,
}

#[derive(Deserialize)]
pub struct RawBudgetRequest {
    pub name: String,
    pub limit_amount: f64,
    pub period: String,
    pub require_receipts: Option<bool>,
}

impl CreateBudgetRequest {
    pub fn new(
        name: String,
        limit_dollars: f64,
        period: &str,
        require_receipts: bool,
    ) -> Result<Self, String> {
        if name.trim().is_empty() {
            return Err("Budget name cannot be empty".to_string());
        }
        if limit_dollars < 0.0 {
            return Err("Limit cannot be negative".to_string());
        }
        let period = BudgetCadence::parse(period)?;

        Ok(Self {
            name: name.trim().to_string(),
            limit_amount: (limit_dollars * 100.0).round() as i64,
            period,
            require_receipts,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn limit_amount(&self) -> i64 {
        self.limit_amount
    }

    pub fn period(&self) -> BudgetCadence {
        self.period
    }

    pub fn require_receipts(&self) -> bool {
        self.require_receipts
    }
}
