use std::path::Path;

use csv::WriterBuilder;
use rust_decimal::Decimal;

use crate::catalog::PriceTable;
use crate::error::{Error, Result};
use crate::plan::Allocation;

/// Exports the shopping list to CSV
///
/// # Arguments
/// * `allocation` - The result of a planning run
/// * `prices` - The price table the run was made against, for unit prices
/// * `csv_path` - Destination file; overwritten if it exists
///
/// Columns are `item,quantity,unit_price,subtotal`, one row per purchased
/// item in purchase order.
pub fn export_plan_to_csv(
    allocation: &Allocation,
    prices: &PriceTable,
    csv_path: &Path,
) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(csv_path)?;

    wtr.write_record(["item", "quantity", "unit_price", "subtotal"])?;

    for purchase in allocation.purchases.iter() {
        let unit_price = prices.get(&purchase.item).unwrap_or(Decimal::ZERO);
        let subtotal = unit_price * Decimal::from(purchase.quantity);
        let quantity = purchase.quantity.to_string();
        let unit_price = unit_price.to_string();
        let subtotal = subtotal.to_string();
        wtr.write_record([
            purchase.item.as_str(),
            quantity.as_str(),
            unit_price.as_str(),
            subtotal.as_str(),
        ])?;
    }

    wtr.flush().map_err(|e| Error::io(csv_path, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PreferenceTable;
    use crate::plan::allocate;
    use rust_decimal_macros::dec;

    #[test]
    fn writes_one_row_per_purchased_item() {
        let prefs: PreferenceTable = [
            ("Ana", vec!["Soda", "Chips"]),
            ("Ben", vec!["Soda"]),
        ]
        .into_iter()
        .collect();
        let prices: PriceTable = [("Soda", dec!(1.25)), ("Chips", dec!(2.00))].into_iter().collect();
        let allocation = allocate(dec!(20), &prefs, &prices);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.csv");
        export_plan_to_csv(&allocation, &prices, &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<Vec<String>> = reader
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect();
        assert_eq!(
            rows,
            vec![
                vec!["Soda", "2", "1.25", "2.50"],
                vec!["Chips", "1", "2.00", "2.00"],
            ]
        );
    }
}
