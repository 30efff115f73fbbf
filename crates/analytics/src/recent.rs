use crate::models::{RecentTransaction, Snapshot};
use std::cmp::Ordering;

const UNKNOWN_CARD: &str = "Unknown Card";
const UNKNOWN_BUDGET: &str = "Unknown Budget";

/// The most recent `limit` transactions, newest first, enriched with card
/// and budget display names.
///
/// Equal dates order by most-recently-created first so the feed is stable.
/// Unparseable dates sort to the end but the record keeps its raw date;
/// a corrupt field degrades sorting, not visibility. Orphaned references
/// degrade to placeholder names instead of failing the feed.
pub fn recent(snapshot: &Snapshot, limit: usize) -> Vec<RecentTransaction> {
    let mut ordered: Vec<usize> = (0..snapshot.transactions.len()).collect();
    ordered.sort_by(|&a, &b| {
        let ta = &snapshot.transactions[a];
        let tb = &snapshot.transactions[b];
        let by_date = match (ta.parsed_date(), tb.parsed_date()) {
            (Some(da), Some(db)) => db.cmp(&da),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_date.then(b.cmp(&a))
    });

    ordered
        .into_iter()
        .take(limit)
        .map(|i| {
            let t = &snapshot.transactions[i];

            let link = snapshot.link(t.card_budget_id);
            let card_name = link
                .and_then(|l| snapshot.card(l.card_id))
                .map(|c| c.name.clone())
                .unwrap_or_else(|| UNKNOWN_CARD.to_string());
            let budget_name = link
                .and_then(|l| snapshot.budget(l.budget_id))
                .map(|b| b.name.clone())
                .unwrap_or_else(|| UNKNOWN_BUDGET.to_string());

            RecentTransaction {
                id: t.id,
                name: t.name.clone(),
                amount: t.amount,
                date: t.date.clone(),
                card_name,
                budget_name,
                description: t.description.clone(),
                category: t.category.clone(),
                merchant: t.merchant.clone(),
            }
        })
        .collect()
}
