use crate::models::{BalanceReport, BudgetBalance, CardBalance, Snapshot};
use crate::period::DateRange;
use cards::models::Card;
use std::collections::HashMap;

/// Sum of in-period amounts per card-budget association.
///
/// Transactions whose date does not parse are excluded here but still
/// surface in the activity feed; statistical corruption must not become
/// display corruption.
fn spent_by_link(snapshot: &Snapshot, range: &DateRange) -> HashMap<i64, i64> {
    let mut spent = HashMap::new();
    for t in &snapshot.transactions {
        let Some(date) = t.parsed_date() else { continue };
        if range.contains(date) {
            *spent.entry(t.card_budget_id).or_insert(0) += t.amount;
        }
    }
    spent
}

fn balance_for_card(snapshot: &Snapshot, card: &Card, spent: &HashMap<i64, i64>) -> CardBalance {
    let mut budget_balances = Vec::new();
    let mut total_spent = 0;
    let mut total_limit = 0;

    for link in snapshot.links_for_card(card.id) {
        // An association whose budget was deleted contributes nothing; one
        // inconsistent row must not abort the whole aggregation.
        let Some(budget) = snapshot.budget(link.budget_id) else {
            tracing::warn!(
                card_budget_id = link.id,
                budget_id = link.budget_id,
                "Skipping association with missing budget"
            );
            continue;
        };

        let spent_amount = spent.get(&link.id).copied().unwrap_or(0);

        budget_balances.push(BudgetBalance {
            budget_id: budget.id,
            budget_name: budget.name.clone(),
            limit_amount: budget.limit_amount,
            spent_amount,
            remaining_amount: budget.limit_amount - spent_amount,
            period: budget.period.as_str().to_string(),
        });

        total_spent += spent_amount;
        total_limit += budget.limit_amount;
    }

    CardBalance {
        card_id: card.id,
        card_name: card.name.clone(),
        total_spent,
        total_limit,
        remaining_amount: total_limit - total_spent,
        budget_balances,
    }
}

/// Per-card and grand-total balances for the reporting period.
///
/// A card with no associated budgets yields all-zero totals; that is a
/// valid state, not 100% utilization.
pub fn aggregate(snapshot: &Snapshot, range: &DateRange) -> BalanceReport {
    let spent = spent_by_link(snapshot, range);

    let card_balances: Vec<CardBalance> = snapshot
        .cards
        .iter()
        .map(|card| balance_for_card(snapshot, card, &spent))
        .collect();

    let total_spent = card_balances.iter().map(|c| c.total_spent).sum::<i64>();
    let total_limit = card_balances.iter().map(|c| c.total_limit).sum::<i64>();

    BalanceReport {
        card_balances,
        total_spent,
        total_limit,
        total_remaining: total_limit - total_spent,
    }
}

/// Balance for a single card, or `None` if the card is not in the snapshot.
pub fn card_balance(snapshot: &Snapshot, card_id: i64, range: &DateRange) -> Option<CardBalance> {
    let card = snapshot.card(card_id)?;
    let spent = spent_by_link(snapshot, range);
    Some(balance_for_card(snapshot, card, &spent))
}

/// Percentage of a limit consumed. A zero limit is 0% used, not an error.
pub fn balance_percentage(spent: i64, limit: i64) -> f64 {
    if limit <= 0 {
        return 0.0;
    }
    spent as f64 / limit as f64 * 100.0
}
