use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use rust_decimal::Decimal;

use crate::error::{Error, Result};

/// Plain digits, or digits grouped in threes by commas, with optional cents
fn budget_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(([1-9][0-9]{0,2}(,[0-9]{3})*)|[0-9]+)(\.[0-9]{2})?$")
            .expect("budget pattern is valid")
    })
}

/// Validates a budget as typed by the user and returns its value.
///
/// Accepts `120`, `120.50` and `1,250.00`; rejects empty input, negative
/// amounts, loose comma grouping and anything other than two decimals.
pub fn parse_budget(input: &str) -> Result<Decimal> {
    let trimmed = input.trim();
    if trimmed.is_empty() || !budget_pattern().is_match(trimmed) {
        return Err(Error::InvalidBudget(input.to_string()));
    }
    let digits: String = trimmed.chars().filter(|c| *c != ',').collect();
    Decimal::from_str(&digits).map_err(|_| Error::InvalidBudget(input.to_string()))
}
