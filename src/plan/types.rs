use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::PreferenceTable;

/// One purchased item and how many units to buy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purchase {
    pub item: String,
    pub quantity: u32,
}

/// Item name -> quantity bought, in order of first purchase
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PurchasePlan {
    purchases: Vec<Purchase>,
}

impl PurchasePlan {
    /// Sets the recorded quantity for `item`, appending it on first purchase
    pub fn record(&mut self, item: &str, quantity: u32) {
        match self.purchases.iter_mut().find(|p| p.item == item) {
            Some(existing) => existing.quantity = quantity,
            None => self.purchases.push(Purchase {
                item: item.to_string(),
                quantity,
            }),
        }
    }

    pub fn quantity(&self, item: &str) -> Option<u32> {
        self.purchases
            .iter()
            .find(|p| p.item == item)
            .map(|p| p.quantity)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Purchase> {
        self.purchases.iter()
    }

    pub fn len(&self) -> usize {
        self.purchases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.purchases.is_empty()
    }

    /// Sum of every recorded quantity
    pub fn total_units(&self) -> u32 {
        self.purchases.iter().map(|p| p.quantity).sum()
    }
}

/// Guests and the preferences that could not be served
pub type RemainingPreferences = PreferenceTable;

/// What happened in a single round of the allocator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub item: String,
    pub unit_price: Decimal,
    pub candidates: usize,
    pub satisfied: usize,
    pub spent_after: Decimal,
}

/// Result of one allocation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub purchases: PurchasePlan,
    pub remaining: RemainingPreferences,
    pub amount_spent: Decimal,
    pub rounds: Vec<RoundSummary>,
}
