//! Loading the three data files from disk and planning against them

use std::fs;
use std::path::Path;

use party_planner::parser::{load_catalog, load_prices, DataPaths};
use party_planner::Error;
use rust_decimal_macros::dec;
use tempfile::TempDir;

fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn fixture() -> (TempDir, DataPaths) {
    let dir = tempfile::tempdir().unwrap();
    let paths = DataPaths {
        drinks: write(dir.path(), "drinks.txt", "<Soda>:1.25\n<Lemonade>:2.00\n"),
        food: write(dir.path(), "food.txt", "<Chips>:3.00\nnot a record\n<Pizza>:12.50\n"),
        people: write(
            dir.path(),
            "people.txt",
            "Alice\nSoda, Pizza\n\nBob\nLemonade, Chips, Guacamole\n\nCarmen\n\n\n",
        ),
    };
    (dir, paths)
}

#[test]
fn drinks_and_food_are_merged_into_one_price_table() {
    let (_dir, paths) = fixture();
    let prices = load_prices(&[&paths.drinks, &paths.food]).unwrap();

    assert_eq!(prices.len(), 4);
    assert_eq!(prices.get("Lemonade"), Some(dec!(2.00)));
    assert_eq!(prices.get("Pizza"), Some(dec!(12.50)));
}

#[test]
fn food_file_overrides_a_drink_of_the_same_name() {
    let dir = tempfile::tempdir().unwrap();
    let drinks = write(dir.path(), "drinks.txt", "<Punch>:4.00\n");
    let food = write(dir.path(), "food.txt", "<Punch>:6.00\n");

    let prices = load_prices(&[drinks, food]).unwrap();
    assert_eq!(prices.get("Punch"), Some(dec!(6.00)));
}

#[test]
fn loaded_catalog_plans_end_to_end() {
    let (_dir, paths) = fixture();
    let catalog = load_catalog(&paths).unwrap();

    let guests: Vec<&str> = catalog.preferences.iter().map(|e| e.guest.as_str()).collect();
    assert_eq!(guests, vec!["Alice", "Bob", "Carmen"]);

    let result = catalog.plan(dec!(10));

    // Soda 1.25, Lemonade 2.00, Chips 3.00, then Pizza does not fit
    assert_eq!(result.purchases.len(), 3);
    assert_eq!(result.amount_spent, dec!(6.25));
    assert_eq!(result.remaining.get("Alice"), Some(&["Pizza".to_string()][..]));
    assert_eq!(result.remaining.get("Bob"), Some(&["Guacamole".to_string()][..]));
    // Carmen asked for nothing and is dropped once the first round runs
    assert!(result.remaining.get("Carmen").is_none());
}

#[test]
fn missing_people_file_is_an_io_error() {
    let (_dir, mut paths) = fixture();
    paths.people = paths.people.with_file_name("nobody.txt");

    match load_catalog(&paths) {
        Err(Error::Io { path, .. }) => assert!(path.ends_with("nobody.txt")),
        other => panic!("expected io error, got {:?}", other),
    }
}
