use std::fs::File;
use std::io::Write;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::catalog::PreferenceTable;
use crate::error::{Error, Result};
use crate::plan::{Allocation, PurchasePlan};

/// Formats an amount as dollars with two decimals
pub fn format_money(amount: Decimal) -> String {
    format!("${:.2}", amount.round_dp(2))
}

/// `item: quantity` for every purchased item, in purchase order
pub fn purchase_lines(plan: &PurchasePlan) -> Vec<String> {
    plan.iter()
        .map(|p| format!("{}: {}", p.item, p.quantity))
        .collect()
}

/// `guest: item, item` for every guest with unmet preferences
pub fn remaining_lines(remaining: &PreferenceTable) -> Vec<String> {
    remaining
        .iter()
        .map(|e| format!("{}: {}", e.guest, e.items.join(", ")))
        .collect()
}

/// Headline figures shown under both lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanSummary {
    pub total_cost: Decimal,
    pub leftover_funds: Decimal,
    pub items_to_buy: u32,
    pub items_remaining: usize,
}

impl PlanSummary {
    pub fn new(budget: Decimal, allocation: &Allocation) -> Self {
        Self {
            total_cost: allocation.amount_spent,
            leftover_funds: budget - allocation.amount_spent,
            items_to_buy: allocation.purchases.total_units(),
            items_remaining: allocation.remaining.preference_count(),
        }
    }
}

/// Builds the plain-text report shared by stdout and file output
pub fn render_report(budget: Decimal, allocation: &Allocation) -> String {
    let summary = PlanSummary::new(budget, allocation);
    let mut out = String::new();

    out.push_str(&format!("=== Party Plan for {} ===\n", format_money(budget)));

    out.push_str("\nFood and Drinks:\n");
    if allocation.purchases.is_empty() {
        out.push_str("  [NOTHING AFFORDABLE]\n");
    }
    for line in purchase_lines(&allocation.purchases) {
        out.push_str(&format!("  {}\n", line));
    }

    out.push_str("\nRemaining Items:\n");
    if allocation.remaining.is_empty() {
        out.push_str("  [EVERYONE SERVED]\n");
    }
    for line in remaining_lines(&allocation.remaining) {
        out.push_str(&format!("  {}\n", line));
    }

    out.push('\n');
    out.push_str(&format!("Total Cost: {}\n", format_money(summary.total_cost)));
    out.push_str(&format!("Leftover Funds: {}\n", format_money(summary.leftover_funds)));
    out.push_str(&format!("# of Items to Buy: {}\n", summary.items_to_buy));
    out.push_str(&format!("# of Items Remaining: {}\n", summary.items_remaining));
    out
}

/// Prints the plan in a readable format
pub fn print_report(budget: Decimal, allocation: &Allocation) {
    print!("{}", render_report(budget, allocation));
}

/// Writes the report to a file, stamped with the time it was generated
pub fn write_report_to_file<P: AsRef<Path>>(
    budget: Decimal,
    allocation: &Allocation,
    path: P,
) -> Result<()> {
    let path = path.as_ref();
    let mut file = File::create(path).map_err(|e| Error::io(path, e))?;

    let generated = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    writeln!(file, "Generated {}", generated).map_err(|e| Error::io(path, e))?;
    write!(file, "{}", render_report(budget, allocation)).map_err(|e| Error::io(path, e))?;

    Ok(())
}
