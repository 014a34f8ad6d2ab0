use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::{Catalog, PreferenceTable, PriceTable};
use crate::error::{Error, Result};

/// Where the three source files live
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataPaths {
    pub drinks: PathBuf,
    pub food: PathBuf,
    pub people: PathBuf,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            drinks: PathBuf::from("data/drinks.txt"),
            food: PathBuf::from("data/food.txt"),
            people: PathBuf::from("data/people.txt"),
        }
    }
}

/// Matches `<item name>` followed by `:price`, e.g. `<Orange Juice>:2.50`
fn price_line_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*<(?P<name>.*?)>\s*:\s*(?P<price>\S+)\s*$")
            .expect("price line pattern is valid")
    })
}

/// Parses a single item line, returning None if it is malformed
fn parse_price_line(line: &str) -> Option<(String, Decimal)> {
    let caps = price_line_pattern().captures(line)?;
    let name = caps.name("name")?.as_str().trim();
    if name.is_empty() {
        return None;
    }
    let price = Decimal::from_str(caps.name("price")?.as_str()).ok()?;
    if price.is_sign_negative() {
        return None;
    }
    Some((name.to_string(), price))
}

/// Splits a preference line like `Soda, Chips, Cake` into item names
fn split_preferences(line: &str) -> Vec<String> {
    line.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses item records, one `<name>:price` per line.
///
/// Blank lines are ignored; malformed lines are skipped with a warning.
pub fn parse_prices(text: &str) -> PriceTable {
    let mut prices = PriceTable::new();
    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_price_line(line) {
            Some((name, price)) => prices.insert(name, price),
            None => warn!(line = index + 1, content = line, "skipping malformed item record"),
        }
    }
    prices
}

/// Parses guest blocks of three lines: name, preferences, separator.
///
/// Any non-blank line after the name within a block adds preferences.
pub fn parse_preferences(text: &str) -> PreferenceTable {
    let mut table = PreferenceTable::new();
    let lines: Vec<&str> = text.lines().collect();

    for (block_index, block) in lines.chunks(3).enumerate() {
        let guest = block[0].trim();
        if guest.is_empty() {
            if block.iter().any(|l| !l.trim().is_empty()) {
                warn!(line = block_index * 3 + 1, "skipping guest block without a name");
            }
            continue;
        }
        let items: Vec<String> = block[1..]
            .iter()
            .flat_map(|line| split_preferences(line))
            .collect();
        table.insert(guest, items);
    }
    table
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// Loads and merges item files in order; later files override earlier prices
pub fn load_prices<P: AsRef<Path>>(paths: &[P]) -> Result<PriceTable> {
    let mut prices = PriceTable::new();
    for path in paths {
        let path = path.as_ref();
        let parsed = parse_prices(&read_file(path)?);
        debug!(path = %path.display(), items = parsed.len(), "loaded item prices");
        prices.extend(parsed);
    }
    Ok(prices)
}

pub fn load_preferences<P: AsRef<Path>>(path: P) -> Result<PreferenceTable> {
    let path = path.as_ref();
    let table = parse_preferences(&read_file(path)?);
    debug!(path = %path.display(), guests = table.len(), "loaded guest preferences");
    Ok(table)
}

/// Loads drinks, food and people into one catalog
pub fn load_catalog(paths: &DataPaths) -> Result<Catalog> {
    let prices = load_prices(&[&paths.drinks, &paths.food])?;
    let preferences = load_preferences(&paths.people)?;
    Ok(Catalog::new(preferences, prices))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_bracketed_names_and_prices() {
        let prices = parse_prices("<Orange Juice>:2.50\n<Chips>:1\n\n<Veggie: Tray>:12.00\n");
        assert_eq!(prices.len(), 3);
        assert_eq!(prices.get("Orange Juice"), Some(dec!(2.50)));
        assert_eq!(prices.get("Chips"), Some(dec!(1)));
        assert_eq!(prices.get("Veggie: Tray"), Some(dec!(12.00)));
    }

    #[test]
    fn malformed_item_lines_are_skipped() {
        let prices = parse_prices("Soda:1.00\n<Cake>:\n<Pie>:abc\n<Tea>:-1\n<>:3\n<Water>:0.75");
        assert_eq!(prices.len(), 1);
        assert_eq!(prices.get("Water"), Some(dec!(0.75)));
    }

    #[test]
    fn guest_blocks_are_read_in_threes() {
        let table = parse_preferences("Ana\nSoda, Chips\n\nBen\n\n\nCy\nCake\n");
        let guests: Vec<&str> = table.iter().map(|e| e.guest.as_str()).collect();
        assert_eq!(guests, vec!["Ana", "Ben", "Cy"]);
        assert_eq!(
            table.get("Ana"),
            Some(&["Soda".to_string(), "Chips".to_string()][..])
        );
        assert_eq!(table.get("Ben"), Some(&[][..]));
        assert_eq!(table.get("Cy"), Some(&["Cake".to_string()][..]));
    }

    #[test]
    fn duplicate_preferences_are_kept() {
        let table = parse_preferences("Ana\nSoda, Soda,Chips\n");
        assert_eq!(table.get("Ana").map(|items| items.len()), Some(3));
    }

    #[test]
    fn preferences_split_on_bare_commas() {
        let table = parse_preferences("Ana\nSoda,Chips,  Tea\n");
        assert_eq!(
            table.get("Ana"),
            Some(&["Soda".to_string(), "Chips".to_string(), "Tea".to_string()][..])
        );
    }

    #[test]
    fn missing_file_reports_its_path() {
        let err = load_preferences("definitely/not/here.txt").unwrap_err();
        assert!(err.to_string().contains("definitely/not/here.txt"));
    }
}
