use super::error_code::{self, ProfitLiftErrorCode};

/// Errors raised while mining itemsets and rules.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MiningError {
    #[error("invalid {name}: {value} (must be within [0, 1])")]
    InvalidThreshold { name: &'static str, value: f64 },

    #[error("itemset of {len} items is too large for subset enumeration (max {max})")]
    ItemsetTooLarge { len: usize, max: usize },

    #[error("invalid rule: {reason}")]
    InvalidRule { reason: String },

    #[error("segment {context} failed: {message}")]
    SegmentFailed { context: String, message: String },
}

impl ProfitLiftErrorCode for MiningError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidThreshold { .. } => error_code::INVALID_THRESHOLD,
            Self::InvalidRule { .. } => error_code::INVALID_RULE,
            Self::SegmentFailed { .. } => error_code::SEGMENT_FAILED,
            Self::ItemsetTooLarge { .. } => error_code::MINING_ERROR,
        }
    }
}
