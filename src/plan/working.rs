use rust_decimal::Decimal;

use crate::catalog::{PreferenceTable, PriceTable};
use super::types::RoundSummary;

/// Private copy of both tables plus the running spend, owned by one run
#[derive(Debug, Clone)]
pub(crate) struct WorkingState {
    pub preferences: PreferenceTable,
    pub prices: PriceTable,
    pub spent: Decimal,
}

/// A guest preference that wants this round's item
#[derive(Debug, Clone)]
struct Candidate {
    guest: String,
    position: usize,
}

#[derive(Debug)]
pub(crate) struct Round {
    pub summary: RoundSummary,
    /// 1-based position of the last bought candidate, if any was bought
    pub last_ordinal: Option<u32>,
}

#[derive(Debug)]
pub(crate) enum RoundOutcome {
    /// Every tied candidate was bought
    Resolved(Round),
    /// A candidate could not be afforded; the run is over
    Exhausted(Round),
    /// No remaining preference names a priced item
    NoCandidates,
}

impl WorkingState {
    pub fn new(preferences: PreferenceTable, prices: PriceTable) -> Self {
        Self {
            preferences,
            prices,
            spent: Decimal::ZERO,
        }
    }

    /// Cheapest priced item any guest still wants.
    ///
    /// Only a strictly lower price replaces the current pick, so among equal
    /// prices the first item met in scan order wins.
    fn cheapest_wanted(&self) -> Option<(String, Decimal)> {
        let mut best: Option<(&str, Decimal)> = None;
        for entry in self.preferences.iter() {
            for item in &entry.items {
                if let Some(price) = self.prices.get(item) {
                    if best.is_none_or(|(_, best_price)| price < best_price) {
                        best = Some((item.as_str(), price));
                    }
                }
            }
        }
        best.map(|(item, price)| (item.to_string(), price))
    }

    fn candidates_for(&self, item: &str) -> Vec<Candidate> {
        self.preferences
            .iter()
            .flat_map(|entry| {
                entry
                    .items
                    .iter()
                    .enumerate()
                    .filter(move |(_, wanted)| wanted.as_str() == item)
                    .map(move |(position, _)| Candidate {
                        guest: entry.guest.clone(),
                        position,
                    })
            })
            .collect()
    }

    /// Resolves the cheapest wanted item against `budget`.
    pub fn run_round(&mut self, budget: Decimal) -> RoundOutcome {
        let Some((item, price)) = self.cheapest_wanted() else {
            self.preferences.drop_empty_guests();
            return RoundOutcome::NoCandidates;
        };
        let candidates = self.candidates_for(&item);

        let mut bought = 0;
        let mut last_ordinal = None;
        for (index, _) in candidates.iter().enumerate() {
            if self.spent + price > budget {
                break;
            }
            self.spent += price;
            bought += 1;
            last_ordinal = Some(index as u32 + 1);
        }

        // Positions were taken before any removal, so group them per guest
        // and let the table drop them highest first.
        let mut by_guest: Vec<(&str, Vec<usize>)> = Vec::new();
        for candidate in &candidates[..bought] {
            match by_guest.iter_mut().find(|(g, _)| *g == candidate.guest) {
                Some((_, positions)) => positions.push(candidate.position),
                None => by_guest.push((candidate.guest.as_str(), vec![candidate.position])),
            }
        }
        let mut emptied = Vec::new();
        for (guest, mut positions) in by_guest {
            if self.preferences.remove_positions(guest, &mut positions) {
                emptied.push(guest);
            }
        }

        // A round that ran out of budget only drops the guests it emptied;
        // guests that started out empty stay until a round completes.
        let exhausted = bought < candidates.len();
        if exhausted {
            for guest in emptied {
                self.preferences.remove_guest(guest);
            }
        } else {
            self.prices.remove(&item);
            self.preferences.drop_empty_guests();
        }

        let round = Round {
            summary: RoundSummary {
                item,
                unit_price: price,
                candidates: candidates.len(),
                satisfied: bought,
                spent_after: self.spent,
            },
            last_ordinal,
        };

        if exhausted {
            RoundOutcome::Exhausted(round)
        } else {
            RoundOutcome::Resolved(round)
        }
    }
}
