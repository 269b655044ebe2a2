//! Per-basket features and outcomes for the outcome models.

use profitlift_core::models::{Basket, ItemSet};
use statrs::statistics::Statistics;

/// Column order of every feature row.
pub const FEATURE_NAMES: [&str; 4] = ["basket_size", "avg_price", "has_discount", "hour"];

/// One arm of a simulated experiment: a feature row and a 0/1 outcome per basket.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureTable {
    transaction_ids: Vec<String>,
    features: Vec<Vec<f64>>,
    outcomes: Vec<f64>,
}

impl FeatureTable {
    /// Features of each basket; the outcome is whether it holds any `consequent` item.
    pub fn from_baskets(baskets: &[&Basket<'_>], consequent: &ItemSet) -> Self {
        let mut table = Self::default();
        for basket in baskets {
            table.transaction_ids.push(basket.transaction_id.to_string());
            table.features.push(vec![
                basket.item_count() as f64,
                basket.mean_price(),
                if basket.has_discount() { 1.0 } else { 0.0 },
                f64::from(basket.hour()),
            ]);
            table
                .outcomes
                .push(if basket.contains_any(consequent) { 1.0 } else { 0.0 });
        }
        table
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Transaction id of each row, aligned with [`Self::features`].
    pub fn transaction_ids(&self) -> &[String] {
        &self.transaction_ids
    }

    /// Feature matrix, one row per basket in [`FEATURE_NAMES`] order.
    pub fn features(&self) -> &[Vec<f64>] {
        &self.features
    }

    /// 1.0 where the basket holds a consequent item, else 0.0.
    pub fn outcomes(&self) -> &[f64] {
        &self.outcomes
    }

    /// Share of baskets with a positive outcome; 0 when empty.
    pub fn outcome_rate(&self) -> f64 {
        if self.outcomes.is_empty() {
            0.0
        } else {
            self.outcomes.iter().mean()
        }
    }
}
