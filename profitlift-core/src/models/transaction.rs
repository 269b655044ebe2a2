//! One row per (transaction, item) pair as handed over by ingestion.

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use super::{valid_quarter, DayType, TimeBin};

/// A single line item. Optional columns degrade segmentation gracefully.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub transaction_id: String,
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,
    #[serde(default)]
    pub store_id: Option<String>,
    #[serde(default)]
    pub item_id: Option<String>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub margin_pct: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub discount_flag: bool,
    #[serde(default, alias = "context_time_bin")]
    pub time_bin: Option<TimeBin>,
    #[serde(default, alias = "context_weekday_weekend")]
    pub day_type: Option<DayType>,
    #[serde(default, alias = "context_quarter")]
    pub quarter: Option<u8>,
    #[serde(default, alias = "context_festival")]
    pub festival: Option<String>,
}

fn default_quantity() -> u32 {
    1
}

impl TransactionRecord {
    /// Row with every optional field unset.
    pub fn new(transaction_id: impl Into<String>, item_id: impl Into<String>, price: f64) -> Self {
        Self {
            transaction_id: transaction_id.into(),
            timestamp: None,
            store_id: None,
            item_id: Some(item_id.into()),
            quantity: 1,
            price,
            margin_pct: None,
            category: None,
            discount_flag: false,
            time_bin: None,
            day_type: None,
            quarter: None,
            festival: None,
        }
    }

    pub fn with_timestamp(mut self, timestamp: NaiveDateTime) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn with_store(mut self, store_id: impl Into<String>) -> Self {
        self.store_id = Some(store_id.into());
        self
    }

    pub fn with_margin(mut self, margin_pct: f64) -> Self {
        self.margin_pct = Some(margin_pct);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_discount(mut self, discount: bool) -> Self {
        self.discount_flag = discount;
        self
    }

    pub fn with_time_bin(mut self, time_bin: TimeBin) -> Self {
        self.time_bin = Some(time_bin);
        self
    }

    pub fn with_day_type(mut self, day_type: DayType) -> Self {
        self.day_type = Some(day_type);
        self
    }

    /// Quarters outside 1..=4 leave the field unset.
    pub fn with_quarter(mut self, quarter: u8) -> Self {
        self.quarter = valid_quarter(quarter);
        self
    }

    pub fn with_festival(mut self, festival: impl Into<String>) -> Self {
        self.festival = Some(festival.into());
        self
    }

    /// Fill unset time bin, day type and quarter from the timestamp.
    pub fn with_derived_context(mut self) -> Self {
        if let Some(ts) = self.timestamp {
            self.time_bin.get_or_insert(TimeBin::from_hour(ts.hour()));
            self.day_type.get_or_insert(DayType::from_date(ts.date()));
            // month0 is 0..=11, so the quarter always fits in a u8
            self.quarter.get_or_insert((ts.month0() / 3 + 1) as u8);
        }
        self
    }

    /// Item id, treating blank strings as missing.
    pub fn item(&self) -> Option<&str> {
        self.item_id.as_deref().filter(|id| !id.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn derives_context_from_timestamp() {
        let ts = NaiveDate::from_ymd_opt(2024, 11, 2)
            .and_then(|d| d.and_hms_opt(19, 30, 0))
            .unwrap();
        let row = TransactionRecord::new("t1", "tea", 20.0)
            .with_timestamp(ts)
            .with_derived_context();
        assert_eq!(row.time_bin, Some(TimeBin::Evening));
        assert_eq!(row.day_type, Some(DayType::Weekend));
        assert_eq!(row.quarter, Some(4));
    }

    #[test]
    fn explicit_context_is_kept() {
        let ts = NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|d| d.and_hms_opt(8, 0, 0))
            .unwrap();
        let row = TransactionRecord::new("t1", "tea", 20.0)
            .with_timestamp(ts)
            .with_time_bin(TimeBin::Night)
            .with_derived_context();
        assert_eq!(row.time_bin, Some(TimeBin::Night));
        assert_eq!(row.quarter, Some(1));
    }

    #[test]
    fn blank_item_is_missing() {
        let mut row = TransactionRecord::new("t1", " ", 1.0);
        assert_eq!(row.item(), None);
        row.item_id = None;
        assert_eq!(row.item(), None);
    }
}
