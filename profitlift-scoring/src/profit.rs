//! Expected incremental profit per basket.

use std::collections::BTreeMap;

use profitlift_core::constants::DEFAULT_MARGIN_PCT;
use profitlift_core::models::{ContextualRule, ItemSet, TransactionRecord};
use rustc_hash::FxHashMap;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
struct ItemTotals {
    price_sum: f64,
    priced_rows: usize,
    margin_sum: f64,
    rows: usize,
}

/// Per-item price and margin sums over a row set, built once per scoring pass.
#[derive(Debug, Clone, Default)]
pub struct ItemEconomics {
    totals: FxHashMap<String, ItemTotals>,
}

impl ItemEconomics {
    /// Index `rows`; rows without a margin count at `default_margin_pct`.
    pub fn build(rows: &[TransactionRecord], default_margin_pct: f64) -> Self {
        let mut totals: FxHashMap<String, ItemTotals> = FxHashMap::default();
        for row in rows {
            let Some(item) = row.item() else { continue };
            let entry = totals.entry(item.to_string()).or_default();
            if row.price.is_finite() {
                entry.price_sum += row.price;
                entry.priced_rows += 1;
            }
            entry.margin_sum += row
                .margin_pct
                .filter(|m| m.is_finite())
                .unwrap_or(default_margin_pct);
            entry.rows += 1;
        }
        Self { totals }
    }

    /// Mean price and mean margin over every row of any item in `items`.
    pub fn price_and_margin(&self, items: &ItemSet) -> Option<(f64, f64)> {
        let combined = items
            .iter()
            .filter_map(|item| self.totals.get(item))
            .fold(ItemTotals::default(), |acc, t| ItemTotals {
                price_sum: acc.price_sum + t.price_sum,
                priced_rows: acc.priced_rows + t.priced_rows,
                margin_sum: acc.margin_sum + t.margin_sum,
                rows: acc.rows + t.rows,
            });
        if combined.rows == 0 {
            return None;
        }
        let price = if combined.priced_rows == 0 {
            0.0
        } else {
            combined.price_sum / combined.priced_rows as f64
        };
        Some((price, combined.margin_sum / combined.rows as f64))
    }

    /// mean(consequent price) × mean(consequent margin) × confidence, or 0.
    pub fn rule_profit(&self, rule: &ContextualRule) -> f64 {
        match self.price_and_margin(&rule.consequent) {
            Some((price, margin)) => price * margin * rule.confidence,
            None => {
                debug!(consequent = %rule.consequent, "no transaction rows for consequent items");
                0.0
            }
        }
    }
}

/// Estimates expected incremental profit for rules.
#[derive(Debug, Clone)]
pub struct ProfitCalculator {
    default_margin_pct: f64,
}

impl ProfitCalculator {
    /// Calculator falling back to `default_margin_pct` for rows without a margin.
    pub fn new(default_margin_pct: f64) -> Self {
        Self { default_margin_pct }
    }

    /// Margin assumed for rows that carry none.
    pub fn default_margin_pct(&self) -> f64 {
        self.default_margin_pct
    }

    /// Index `rows` for repeated profit lookups.
    pub fn economics(&self, rows: &[TransactionRecord]) -> ItemEconomics {
        ItemEconomics::build(rows, self.default_margin_pct)
    }

    /// Expected profit of one rule over `rows`. Zero when no row carries a
    /// consequent item.
    pub fn calculate_rule_profit(&self, rule: &ContextualRule, rows: &[TransactionRecord]) -> f64 {
        self.economics(rows).rule_profit(rule)
    }

    /// Mean recorded margin per category. Rows without a margin are ignored.
    pub fn category_margins(&self, rows: &[TransactionRecord]) -> BTreeMap<String, f64> {
        let mut sums: BTreeMap<String, (f64, usize)> = BTreeMap::new();
        for row in rows {
            if let (Some(category), Some(margin)) = (row.category.as_deref(), row.margin_pct) {
                if margin.is_finite() {
                    let entry = sums.entry(category.to_string()).or_insert((0.0, 0));
                    entry.0 += margin;
                    entry.1 += 1;
                }
            }
        }
        sums.into_iter()
            .map(|(category, (sum, n))| (category, sum / n as f64))
            .collect()
    }
}

impl Default for ProfitCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_MARGIN_PCT)
    }
}
