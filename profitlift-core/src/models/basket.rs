//! Per-transaction views over row-level data.

use std::collections::BTreeMap;

use chrono::Timelike;

use super::{ItemSet, TransactionRecord};
use crate::constants::DEFAULT_HOUR;

/// All rows of one transaction, borrowed from the caller's slice.
#[derive(Debug, Clone)]
pub struct Basket<'a> {
    pub transaction_id: &'a str,
    pub rows: Vec<&'a TransactionRecord>,
}

impl<'a> Basket<'a> {
    /// Distinct non-missing item ids.
    pub fn items(&self) -> ItemSet {
        self.rows.iter().filter_map(|r| r.item()).collect()
    }

    /// Rows carrying an item id.
    pub fn item_count(&self) -> usize {
        self.rows.iter().filter(|r| r.item().is_some()).count()
    }

    /// Mean of finite row prices; 0 when none.
    pub fn mean_price(&self) -> f64 {
        let prices: Vec<f64> = self
            .rows
            .iter()
            .map(|r| r.price)
            .filter(|p| p.is_finite())
            .collect();
        if prices.is_empty() {
            0.0
        } else {
            prices.iter().sum::<f64>() / prices.len() as f64
        }
    }

    /// Any row flagged as discounted.
    pub fn has_discount(&self) -> bool {
        self.rows.iter().any(|r| r.discount_flag)
    }

    /// Hour of the first timestamped row, noon when none has one.
    pub fn hour(&self) -> u32 {
        self.rows
            .iter()
            .find_map(|r| r.timestamp)
            .map_or(DEFAULT_HOUR, |ts| ts.hour())
    }

    /// Whether any basket item is in `items`.
    pub fn contains_any(&self, items: &ItemSet) -> bool {
        self.rows
            .iter()
            .filter_map(|r| r.item())
            .any(|item| items.contains(item))
    }
}

/// Group rows by transaction id, ordered by id.
pub fn group_by_transaction<'a, I>(rows: I) -> Vec<Basket<'a>>
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    let mut grouped: BTreeMap<&'a str, Vec<&'a TransactionRecord>> = BTreeMap::new();
    for row in rows {
        grouped
            .entry(row.transaction_id.as_str())
            .or_default()
            .push(row);
    }
    grouped
        .into_iter()
        .map(|(transaction_id, rows)| Basket {
            transaction_id,
            rows,
        })
        .collect()
}
