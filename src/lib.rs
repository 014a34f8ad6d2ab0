//! Spend a party budget on the food and drinks guests asked for.
//!
//! The [`plan`] module holds the allocator; the rest loads its inputs from
//! the data files and presents its result.

pub mod budget;
pub mod catalog;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod parser;
pub mod plan;
pub mod web;

pub use catalog::{Catalog, GuestPreferences, PreferenceTable, PriceTable};
pub use error::{Error, Result};
pub use plan::{allocate, Allocation, PurchasePlan, RemainingPreferences};
