pub mod types;
mod working;
mod allocator;

pub use types::{Allocation, Purchase, PurchasePlan, RemainingPreferences, RoundSummary};
pub use allocator::allocate;
