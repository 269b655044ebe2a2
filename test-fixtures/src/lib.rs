//! Test fixtures for the ProfitLift workspace.
//!
//! Seeded dataset builders shared by tests and benches, plus typed loading
//! of the JSON fixtures under `test-fixtures/golden/`.

use std::path::PathBuf;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use profitlift_core::models::TransactionRecord;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::de::DeserializeOwned;

/// Root directory of the test-fixtures folder.
fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up to find test-fixtures.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    if path.ends_with("test-fixtures") {
        return path;
    }
    while !path.join("test-fixtures").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Load a row-per-(transaction, item) fixture.
pub fn load_transactions(relative_path: &str) -> Vec<TransactionRecord> {
    load_fixture(relative_path)
}

/// Get the absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// Catalog item used by the generators: (id, price, margin, category).
pub const CATALOG: &[(&str, f64, f64, &str)] = &[
    ("bread", 40.0, 0.20, "bakery"),
    ("butter", 55.0, 0.18, "dairy"),
    ("milk", 30.0, 0.12, "dairy"),
    ("chips", 20.0, 0.35, "snacks"),
    ("soda", 35.0, 0.30, "beverages"),
    ("tea", 120.0, 0.25, "beverages"),
    ("biscuits", 25.0, 0.28, "snacks"),
    ("rice", 90.0, 0.10, "staples"),
    ("dal", 110.0, 0.12, "staples"),
    ("sweets", 250.0, 0.40, "festive"),
];

fn catalog_row(txn: &str, index: usize, ts: NaiveDateTime, store: &str) -> TransactionRecord {
    let (item, price, margin, category) = CATALOG[index];
    TransactionRecord::new(txn, item, price)
        .with_margin(margin)
        .with_category(category)
        .with_store(store)
        .with_timestamp(ts)
        .with_derived_context()
}

fn base_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// Seeded grocery dataset with planted associations.
///
/// Two stores, timestamps spread over a year. Bread is followed by butter in
/// about 80% of its baskets and chips by soda in about 70%; the remaining
/// items are uniform noise. Every transaction from October 25 to November 5
/// is tagged with the `diwali` festival and tends to include sweets.
pub fn grocery_dataset(seed: u64, transactions: usize) -> Vec<TransactionRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let start = base_time();
    let mut rows = Vec::with_capacity(transactions * 4);

    for t in 0..transactions {
        let txn = format!("T{t:06}");
        let store = if rng.gen_bool(0.5) { "1" } else { "2" };
        let ts = start
            + Duration::days(rng.gen_range(0..365))
            + Duration::hours(rng.gen_range(6..23))
            + Duration::minutes(rng.gen_range(0..60));
        let festive = ts.date() >= NaiveDate::from_ymd_opt(2024, 10, 25).unwrap_or_default()
            && ts.date() <= NaiveDate::from_ymd_opt(2024, 11, 5).unwrap_or_default();

        let mut picked: Vec<usize> = Vec::new();
        if rng.gen_bool(0.35) {
            picked.push(0);
            if rng.gen_bool(0.8) {
                picked.push(1);
            }
        }
        if rng.gen_bool(0.3) {
            picked.push(3);
            if rng.gen_bool(0.7) {
                picked.push(4);
            }
        }
        if festive && rng.gen_bool(0.6) {
            picked.push(9);
        }
        for _ in 0..rng.gen_range(1..=3) {
            picked.push(rng.gen_range(2..CATALOG.len() - 1));
        }
        picked.sort_unstable();
        picked.dedup();

        for index in picked {
            let mut row = catalog_row(&txn, index, ts, store).with_discount(rng.gen_bool(0.1));
            if festive {
                row = row.with_festival("diwali");
            }
            rows.push(row);
        }
    }
    rows
}

/// `n` transactions that each contain exactly `x` and `y`.
pub fn co_occurrence_dataset(n: usize, x: &str, y: &str) -> Vec<TransactionRecord> {
    (0..n)
        .flat_map(|i| {
            let txn = format!("C{i:04}");
            [
                TransactionRecord::new(txn.clone(), x, 10.0).with_margin(0.2),
                TransactionRecord::new(txn, y, 20.0).with_margin(0.3),
            ]
        })
        .collect()
}

/// Dataset where baskets with `antecedent` carry `consequent` far more often
/// than size-matched baskets without it.
///
/// `treated` antecedent baskets attach the consequent with probability
/// `treated_rate`; `untreated` baskets of similar size attach with
/// `baseline_rate`.
pub fn uplift_dataset(
    seed: u64,
    treated: usize,
    untreated: usize,
    treated_rate: f64,
    baseline_rate: f64,
) -> Vec<TransactionRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let start = base_time();
    let mut rows = Vec::new();

    let mut push_basket = |rng: &mut StdRng, id: String, with_antecedent: bool, rate: f64| {
        let ts = start + Duration::hours(rng.gen_range(0..24 * 90));
        if with_antecedent {
            rows.push(catalog_row(&id, 3, ts, "1"));
        }
        if rng.gen_bool(rate) {
            rows.push(catalog_row(&id, 4, ts, "1"));
        }
        for _ in 0..rng.gen_range(1..=2) {
            let filler = rng.gen_range(5..8);
            rows.push(catalog_row(&id, filler, ts, "1").with_discount(rng.gen_bool(0.2)));
        }
    };

    for i in 0..treated {
        push_basket(&mut rng, format!("A{i:05}"), true, treated_rate);
    }
    for i in 0..untreated {
        push_basket(&mut rng, format!("N{i:05}"), false, baseline_rate);
    }
    rows
}
