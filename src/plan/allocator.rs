use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::catalog::{PreferenceTable, PriceTable};
use super::types::{Allocation, PurchasePlan};
use super::working::{Round, RoundOutcome, WorkingState};

/// Spends `budget` on the cheapest wanted items first.
///
/// Each round resolves one item: the cheapest one any guest still wants,
/// bought once for every guest preference naming it, in guest order. The
/// run ends when the budget is used up, when every preference is served,
/// or at the first preference that can no longer be afforded. Preferences
/// naming items without a price are never served and stay in
/// [`Allocation::remaining`].
///
/// The caller's tables are cloned; calling this twice with the same inputs
/// gives the same result.
pub fn allocate(budget: Decimal, preferences: &PreferenceTable, prices: &PriceTable) -> Allocation {
    let mut state = WorkingState::new(preferences.clone(), prices.clone());
    let mut purchases = PurchasePlan::default();
    let mut rounds = Vec::new();

    while state.spent < budget && !state.preferences.is_empty() {
        match state.run_round(budget) {
            RoundOutcome::Resolved(round) => {
                record_round(&mut purchases, &round);
                rounds.push(round.summary);
            }
            RoundOutcome::Exhausted(round) => {
                record_round(&mut purchases, &round);
                debug!(item = %round.summary.item, "budget exhausted mid-round");
                rounds.push(round.summary);
                break;
            }
            RoundOutcome::NoCandidates => {
                debug!(
                    guests = state.preferences.len(),
                    "no remaining preference has a price"
                );
                break;
            }
        }
    }

    info!(
        budget = %budget,
        spent = %state.spent,
        items = purchases.len(),
        units = purchases.total_units(),
        unmet = state.preferences.preference_count(),
        "allocation complete"
    );

    Allocation {
        purchases,
        remaining: state.preferences,
        amount_spent: state.spent,
        rounds,
    }
}

fn record_round(purchases: &mut PurchasePlan, round: &Round) {
    let summary = &round.summary;
    debug!(
        item = %summary.item,
        price = %summary.unit_price,
        candidates = summary.candidates,
        satisfied = summary.satisfied,
        spent = %summary.spent_after,
        "round"
    );
    // The quantity is the ordinal of the last candidate bought this round
    if let Some(ordinal) = round.last_ordinal {
        purchases.record(&summary.item, ordinal);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn prefs(rows: Vec<(&str, Vec<&str>)>) -> PreferenceTable {
        rows.into_iter().collect()
    }

    fn prices(rows: &[(&str, Decimal)]) -> PriceTable {
        rows.iter().copied().collect()
    }

    #[test]
    fn buys_cheapest_items_first() {
        let p = prefs(vec![
            ("Ana", vec!["cake", "soda"]),
            ("Ben", vec!["chips", "soda"]),
        ]);
        let c = prices(&[("cake", dec!(8)), ("soda", dec!(1)), ("chips", dec!(3))]);

        let result = allocate(dec!(6), &p, &c);

        let bought: Vec<(&str, u32)> = result
            .purchases
            .iter()
            .map(|p| (p.item.as_str(), p.quantity))
            .collect();
        assert_eq!(bought, vec![("soda", 2), ("chips", 1)]);
        assert_eq!(result.amount_spent, dec!(5));
        assert_eq!(result.remaining.get("Ana"), Some(&["cake".to_string()][..]));
        assert!(result.remaining.get("Ben").is_none());
    }

    #[test]
    fn unaffordable_item_ends_the_run() {
        let p = prefs(vec![("Ana", vec!["wine", "gum"])]);
        let c = prices(&[("wine", dec!(4)), ("gum", dec!(5))]);

        // wine fits, gum does not; nothing else is attempted
        let result = allocate(dec!(8), &p, &c);
        assert_eq!(result.purchases.quantity("wine"), Some(1));
        assert_eq!(result.purchases.quantity("gum"), None);
        assert_eq!(result.amount_spent, dec!(4));
        assert_eq!(result.rounds.len(), 2);
    }

    #[test]
    fn spending_exactly_the_budget_ends_the_run() {
        let p = prefs(vec![("Ana", vec!["soda", "chips"])]);
        let c = prices(&[("soda", dec!(2)), ("chips", dec!(0))]);

        // chips are free and resolved first, then soda uses the whole budget
        let result = allocate(dec!(2), &p, &c);
        assert_eq!(result.purchases.quantity("chips"), Some(1));
        assert_eq!(result.purchases.quantity("soda"), Some(1));
        assert_eq!(result.amount_spent, dec!(2));
        assert!(result.remaining.is_empty());
    }

    #[test]
    fn caller_tables_are_left_untouched() {
        let p = prefs(vec![("Ana", vec!["soda"])]);
        let c = prices(&[("soda", dec!(1))]);
        let before = (p.clone(), c.clone());

        let _ = allocate(dec!(10), &p, &c);
        assert_eq!((p, c), before);
    }
}
