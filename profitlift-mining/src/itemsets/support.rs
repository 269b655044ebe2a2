use profitlift_core::errors::{MiningError, MiningResult};

/// Absolute support floor derived from a relative `min_support`.
///
/// An itemset is frequent when it occurs at least once and in at least
/// `min_support × n` of `n` transactions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SupportThreshold {
    min_count: f64,
}

impl SupportThreshold {
    /// Errors when `min_support` is outside [0, 1].
    pub fn new(min_support: f64, transaction_count: usize) -> MiningResult<Self> {
        if !(0.0..=1.0).contains(&min_support) {
            return Err(MiningError::InvalidThreshold {
                name: "min_support",
                value: min_support,
            });
        }
        Ok(Self {
            min_count: min_support * transaction_count as f64,
        })
    }

    /// Whether `count` occurrences meet the floor.
    #[inline]
    pub fn is_frequent(&self, count: usize) -> bool {
        count > 0 && count as f64 >= self.min_count
    }
}
