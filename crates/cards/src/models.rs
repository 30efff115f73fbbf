use serde::{Deserialize, Serialize};

/// Lifecycle status of a virtual card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardStatus {
    Issued,
    Frozen,
    Cancelled,
}

impl CardStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardStatus::Issued => "issued",
            CardStatus::Frozen => "frozen",
            CardStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Result<Self, String> {
        match s {
            "issued" => Ok(CardStatus::Issued),
            "frozen" => Ok(CardStatus::Frozen),
            "cancelled" => Ok(CardStatus::Cancelled),
            other => Err(format!("Unknown card status: {}", other)),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Card {
    pub id: i64,
    pub name: String,
    pub cardholder_name: String,
    pub status: CardStatus,
    pub created_at: String,
}

/// The association a transaction actually references: one card joined to
/// one budget.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct CardBudget {
    pub id: i64,
    pub card_id: i64,
    pub budget_id: i64,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct CreateCardRequest {
    name: String,
    cardholder_name: String,
    status: CardStatus,
}

#[derive(Deserialize)]
pub struct RawCreateCardRequest {
    pub name: String,
    pub cardholder_name: String,
    pub status: Option<String>,
    /// Budgets to associate with the card at creation time.
    pub budget_ids: Option<Vec<i64>>,
}

#[derive(Deserialize)]
pub struct UpdateCardRequest {
    pub name: String,
    pub cardholder_name: String,
    pub status: String,
}

impl CreateCardRequest {
    pub fn new(name: String, cardholder_name: String, status: &str) -> Result<Self, String> {
        if name.trim().is_empty() {
            return Err("Card name cannot be empty".to_string());
        }
        if cardholder_name.trim().is_empty() {
            return Err("Cardholder name cannot be empty".to_string());
        }
        let status = CardStatus::parse(status)?;

        Ok(Self {
            name: name.trim().to_string(),
            cardholder_name: cardholder_name.trim().to_string(),
            status,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cardholder_name(&self) -> &str {
        &self.cardholder_name
    }

    pub fn status(&self) -> CardStatus {
        self.status
    }
}
