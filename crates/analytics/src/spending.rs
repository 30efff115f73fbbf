use crate::models::{Snapshot, SpendingEntry};
use crate::period::DateRange;
use std::collections::HashMap;

/// Fixed palette, assigned by rank position modulo its length so snapshots
/// of the same data always color the same way.
pub const PALETTE: [&str; 5] = ["#3B82F6", "#F59E0B", "#EF4444", "#10B981", "#8B5CF6"];

/// Budgets ranked by in-period spend, each with its share of the total.
///
/// Returns an empty list when nothing was spent in the period; the caller's
/// "no spending data" empty state is the defined behavior. Budgets with
/// zero spend are still listed (at 0%) as long as the grand total is
/// positive. Order is spend descending, ties broken by budget name, so the
/// output is deterministic.
pub fn rank(snapshot: &Snapshot, range: &DateRange) -> Vec<SpendingEntry> {
    let link_to_budget: HashMap<i64, i64> = snapshot
        .card_budgets
        .iter()
        .map(|l| (l.id, l.budget_id))
        .collect();

    let mut spent_by_budget: HashMap<i64, i64> = HashMap::new();
    for t in &snapshot.transactions {
        let Some(date) = t.parsed_date() else { continue };
        if !range.contains(date) {
            continue;
        }
        // Orphaned transactions have no budget to attribute to.
        if let Some(budget_id) = link_to_budget.get(&t.card_budget_id) {
            *spent_by_budget.entry(*budget_id).or_insert(0) += t.amount;
        }
    }

    let grand_total: i64 = spent_by_budget.values().sum();
    if grand_total == 0 {
        return Vec::new();
    }

    let mut ranked: Vec<(&str, i64, i64)> = snapshot
        .budgets
        .iter()
        .map(|b| (b.name.as_str(), b.id, spent_by_budget.get(&b.id).copied().unwrap_or(0)))
        .collect();
    ranked.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| a.0.cmp(b.0)));

    ranked
        .into_iter()
        .enumerate()
        .map(|(rank, (name, budget_id, total_spent))| SpendingEntry {
            budget_id,
            budget_name: name.to_string(),
            total_spent,
            percentage: total_spent as f64 / grand_total as f64 * 100.0,
            color: PALETTE[rank % PALETTE.len()].to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::period::ReportingPeriod;
    use budgets::models::{Budget, BudgetCadence};
    use cards::models::{Card, CardBudget, CardStatus};
    use chrono::NaiveDate;
    use transactions::models::Transaction;

    fn budget(id: i64, name: &str) -> Budget {
        Budget {
            id,
            name: name.into(),
            limit_amount: 50000,
            period: BudgetCadence::Monthly,
            require_receipts: false,
            created_at: "2026-01-01 00:00:00".into(),
        }
    }

    fn link(id: i64, budget_id: i64) -> CardBudget {
        CardBudget { id, card_id: 1, budget_id, created_at: "2026-01-01 00:00:00".into() }
    }

    fn tx(id: i64, link_id: i64, cents: i64, date: &str) -> Transaction {
        Transaction {
            id,
            card_budget_id: link_id,
            amount: cents,
            name: format!("tx-{}", id),
            date: date.into(),
            description: None,
            category: None,
            merchant: None,
        }
    }

    fn snapshot(budgets: Vec<Budget>, links: Vec<CardBudget>, txs: Vec<Transaction>) -> Snapshot {
        Snapshot {
            cards: vec![Card {
                id: 1,
                name: "Ops".into(),
                cardholder_name: "Ada".into(),
                status: CardStatus::Issued,
                created_at: "2026-01-01 00:00:00".into(),
            }],
            budgets,
            card_budgets: links,
            transactions: txs,
        }
    }

    fn august() -> DateRange {
        ReportingPeriod::Month.resolve(NaiveDate::from_ymd_opt(2026, 8, 23).unwrap())
    }

    #[test]
    fn test_zero_spend_budget_still_listed_at_zero_percent() {
        let snap = snapshot(
            vec![budget(10, "A"), budget(11, "B")],
            vec![link(100, 10), link(101, 11)],
            vec![tx(1, 100, 10000, "2026-08-03")],
        );

        let entries = rank(&snap, &august());
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].budget_name, "A");
        assert_eq!(entries[0].percentage, 100.0);
        assert_eq!(entries[1].budget_name, "B");
        assert_eq!(entries[1].percentage, 0.0);
    }

    #[test]
    fn test_empty_when_nothing_spent() {
        let snap = snapshot(
            vec![budget(10, "A")],
            vec![link(100, 10)],
            vec![tx(1, 100, 10000, "2026-07-01")], // outside the period
        );

        assert!(rank(&snap, &august()).is_empty());
    }

    #[test]
    fn test_sorted_by_spend_then_name() {
        let snap = snapshot(
            vec![budget(10, "Zeta"), budget(11, "Alpha"), budget(12, "Mid")],
            vec![link(100, 10), link(101, 11), link(102, 12)],
            vec![
                tx(1, 100, 5000, "2026-08-03"),
                tx(2, 101, 5000, "2026-08-04"),
                tx(3, 102, 9000, "2026-08-05"),
            ],
        );

        let entries = rank(&snap, &august());
        let names: Vec<_> = entries.iter().map(|e| e.budget_name.as_str()).collect();
        // Mid spends most; Alpha and Zeta tie and order alphabetically.
        assert_eq!(names, vec!["Mid", "Alpha", "Zeta"]);
    }

    #[test]
    fn test_percentages_sum_to_one_hundred() {
        let snap = snapshot(
            vec![budget(10, "A"), budget(11, "B"), budget(12, "C")],
            vec![link(100, 10), link(101, 11), link(102, 12)],
            vec![
                tx(1, 100, 3333, "2026-08-03"),
                tx(2, 101, 3333, "2026-08-04"),
                tx(3, 102, 3334, "2026-08-05"),
            ],
        );

        let entries = rank(&snap, &august());
        let total: f64 = entries.iter().map(|e| e.percentage).sum();
        assert!((total - 100.0).abs() < 1e-6);
        for e in &entries {
            assert!(e.percentage >= 0.0 && e.percentage <= 100.0);
        }
    }

    #[test]
    fn test_palette_cycles_by_rank() {
        let budgets: Vec<Budget> = (0..7).map(|i| budget(10 + i, &format!("B{}", i))).collect();
        let links: Vec<CardBudget> = (0..7).map(|i| link(100 + i, 10 + i)).collect();
        // Give B0 the most spend, descending from there.
        let txs: Vec<Transaction> = (0..7)
            .map(|i| tx(1 + i, 100 + i, 7000 - i * 1000, &format!("2026-08-{:02}", 3 + i)))
            .collect();

        let entries = rank(&snapshot(budgets, links, txs), &august());
        assert_eq!(entries[0].color, PALETTE[0]);
        assert_eq!(entries[4].color, PALETTE[4]);
        // Rank 5 wraps back to the first palette slot.
        assert_eq!(entries[5].color, PALETTE[0]);
        assert_eq!(entries[6].color, PALETTE[1]);
    }

    #[test]
    fn test_budget_spend_pools_across_cards() {
        // The same budget attached to two different cards via two links.
        let mut snap = snapshot(
            vec![budget(10, "Shared")],
            vec![link(100, 10), link(101, 10)],
            vec![tx(1, 100, 4000, "2026-08-03"), tx(2, 101, 6000, "2026-08-04")],
        );
        snap.card_budgets[1].card_id = 2;

        let entries = rank(&snap, &august());
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].total_spent, 10000);
    }

    #[test]
    fn test_orphaned_transaction_ignored() {
        let snap = snapshot(
            vec![budget(10, "A")],
            vec![link(100, 10)],
            vec![tx(1, 100, 5000, "2026-08-03"), tx(2, 999, 5000, "2026-08-04")],
        );

        let entries = rank(&snap, &august());
        assert_eq!(entries[0].total_spent, 5000);
        assert_eq!(entries[0].percentage, 100.0);
    }
}
