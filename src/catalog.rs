use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One guest and the items they asked for, in the order they asked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestPreferences {
    pub guest: String,
    pub items: Vec<String>,
}

/// Guest name -> preferred item names, kept in order of first appearance.
///
/// Inserting a guest that already exists replaces their list but keeps
/// the position where they first appeared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreferenceTable {
    entries: Vec<GuestPreferences>,
}

impl PreferenceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, guest: impl Into<String>, items: Vec<String>) {
        let guest = guest.into();
        match self.entries.iter_mut().find(|e| e.guest == guest) {
            Some(existing) => existing.items = items,
            None => self.entries.push(GuestPreferences { guest, items }),
        }
    }

    pub fn get(&self, guest: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|e| e.guest == guest)
            .map(|e| e.items.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &GuestPreferences> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of outstanding preferences across every guest
    pub fn preference_count(&self) -> usize {
        self.entries.iter().map(|e| e.items.len()).sum()
    }

    /// Removes the given positions from one guest's list.
    ///
    /// `positions` must refer to the list as it was before any removal;
    /// they are applied highest first so earlier indices stay valid.
    /// Returns true when this call left the guest's list empty.
    pub(crate) fn remove_positions(&mut self, guest: &str, positions: &mut [usize]) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|e| e.guest == guest) else {
            return false;
        };
        let before = entry.items.len();
        positions.sort_unstable_by(|a, b| b.cmp(a));
        for &pos in positions.iter() {
            if pos < entry.items.len() {
                entry.items.remove(pos);
            }
        }
        before > 0 && entry.items.is_empty()
    }

    pub(crate) fn remove_guest(&mut self, guest: &str) {
        self.entries.retain(|e| e.guest != guest);
    }

    pub(crate) fn drop_empty_guests(&mut self) {
        self.entries.retain(|e| !e.items.is_empty());
    }
}

impl<G, I> FromIterator<(G, Vec<I>)> for PreferenceTable
where
    G: Into<String>,
    I: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (G, Vec<I>)>>(iter: T) -> Self {
        let mut table = PreferenceTable::new();
        for (guest, items) in iter {
            table.insert(guest, items.into_iter().map(Into::into).collect());
        }
        table
    }
}

/// Item name -> unit price
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceTable {
    prices: HashMap<String, Decimal>,
}

impl PriceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later inserts for the same item override earlier ones
    pub fn insert(&mut self, item: impl Into<String>, price: Decimal) {
        self.prices.insert(item.into(), price);
    }

    pub fn get(&self, item: &str) -> Option<Decimal> {
        self.prices.get(item).copied()
    }

    pub fn contains(&self, item: &str) -> bool {
        self.prices.contains_key(item)
    }

    pub(crate) fn remove(&mut self, item: &str) -> Option<Decimal> {
        self.prices.remove(item)
    }

    pub fn extend(&mut self, other: PriceTable) {
        self.prices.extend(other.prices);
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Items sorted by name, for stable listings
    pub fn sorted(&self) -> Vec<(&str, Decimal)> {
        let mut items: Vec<(&str, Decimal)> = self
            .prices
            .iter()
            .map(|(name, price)| (name.as_str(), *price))
            .collect();
        items.sort_by(|a, b| a.0.cmp(b.0));
        items
    }
}

impl<S: Into<String>> FromIterator<(S, Decimal)> for PriceTable {
    fn from_iter<T: IntoIterator<Item = (S, Decimal)>>(iter: T) -> Self {
        let mut table = PriceTable::new();
        for (item, price) in iter {
            table.insert(item, price);
        }
        table
    }
}

/// Both source tables as loaded from the data files
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub preferences: PreferenceTable,
    pub prices: PriceTable,
}

impl Catalog {
    pub fn new(preferences: PreferenceTable, prices: PriceTable) -> Self {
        Self { preferences, prices }
    }

    pub fn plan(&self, budget: Decimal) -> crate::plan::Allocation {
        crate::plan::allocate(budget, &self.preferences, &self.prices)
    }
}
