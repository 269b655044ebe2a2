//! Caller-supplied context narrowing.

use serde::{Deserialize, Serialize};

use super::{Context, DayType, TimeBin, TransactionRecord};

/// Restricts the transaction set before mining. All-unset matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextFilter {
    pub store_id: Option<String>,
    pub time_bin: Option<TimeBin>,
    pub day_type: Option<DayType>,
    pub quarter: Option<u8>,
    pub festival: Option<String>,
}

impl ContextFilter {
    /// No dimension constrained.
    pub fn is_empty(&self) -> bool {
        self.store_id.is_none()
            && self.time_bin.is_none()
            && self.day_type.is_none()
            && self.quarter.is_none()
            && self.festival.is_none()
    }

    /// Every set dimension equals the row's value.
    pub fn matches(&self, row: &TransactionRecord) -> bool {
        fn check<T: PartialEq + ?Sized>(want: Option<&T>, have: Option<&T>) -> bool {
            want.map_or(true, |w| have == Some(w))
        }
        check(self.store_id.as_deref(), row.store_id.as_deref())
            && check(self.time_bin.as_ref(), row.time_bin.as_ref())
            && check(self.day_type.as_ref(), row.day_type.as_ref())
            && check(self.quarter.as_ref(), row.quarter.as_ref())
            && check(self.festival.as_deref(), row.festival.as_deref())
    }

    /// Rows passing the filter, cloned.
    pub fn apply(&self, rows: &[TransactionRecord]) -> Vec<TransactionRecord> {
        rows.iter().filter(|r| self.matches(r)).cloned().collect()
    }

    /// The context this filter selects.
    pub fn to_context(&self) -> Context {
        let mut ctx = Context::overall();
        if let Some(store) = &self.store_id {
            ctx = ctx.with_store(store.clone());
        }
        if let Some(bin) = self.time_bin {
            ctx = ctx.with_time_bin(bin);
        }
        if let Some(day) = self.day_type {
            ctx = ctx.with_day_type(day);
        }
        if let Some(q) = self.quarter {
            ctx = ctx.with_quarter(q);
        }
        if let Some(festival) = &self.festival {
            ctx = ctx.with_festival(festival.clone());
        }
        ctx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_matches_everything() {
        let row = TransactionRecord::new("t1", "a", 1.0);
        assert!(ContextFilter::default().matches(&row));
    }

    #[test]
    fn store_filter_requires_store() {
        let filter = ContextFilter {
            store_id: Some("7".into()),
            ..Default::default()
        };
        assert!(!filter.matches(&TransactionRecord::new("t1", "a", 1.0)));
        assert!(filter.matches(&TransactionRecord::new("t1", "a", 1.0).with_store("7")));
        assert_eq!(filter.to_context().label(), "Store 7");
    }
}
