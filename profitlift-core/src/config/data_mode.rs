//! Volume-based mining presets.
//!
//! Large chains and small stores need very different thresholds: a kirana
//! with 800 baskets has no useful store × time-bin segments.

use serde::{Deserialize, Serialize};

use super::MiningConfig;

/// Recommended mining preset for a dataset size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataMode {
    /// ≥ 10 000 transactions: full pairwise context analysis.
    Full,
    /// ≥ 2 000 transactions: single context dimensions.
    Standard,
    /// ≥ 500 transactions: single dimensions, looser thresholds.
    Compact,
    /// Fewer than 500 transactions: overall patterns only.
    Minimal,
}

impl DataMode {
    /// Mode for a dataset holding `count` transactions.
    pub fn for_transaction_count(count: usize) -> Self {
        match count {
            n if n >= 10_000 => Self::Full,
            n if n >= 2_000 => Self::Standard,
            n if n >= 500 => Self::Compact,
            _ => Self::Minimal,
        }
    }

    /// Lowercase mode name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Standard => "standard",
            Self::Compact => "compact",
            Self::Minimal => "minimal",
        }
    }

    /// One-line description for dashboards.
    pub fn description(self) -> &'static str {
        match self {
            Self::Full => "Full context analysis with store × time combinations",
            Self::Standard => "Standard analysis with single context dimensions",
            Self::Compact => "Compact analysis optimized for smaller data",
            Self::Minimal => "Basic patterns from overall data (limited context)",
        }
    }

    /// Mining thresholds for this mode; other fields keep their defaults.
    pub fn mining_config(self) -> MiningConfig {
        let (max_depth, min_support, min_confidence, min_rows_per_context) = match self {
            Self::Full => (2, 0.01, 0.3, 100),
            Self::Standard => (1, 0.02, 0.25, 50),
            Self::Compact => (1, 0.05, 0.2, 30),
            Self::Minimal => (0, 0.08, 0.15, 10),
        };
        MiningConfig {
            max_depth,
            min_support,
            min_confidence,
            min_rows_per_context,
            ..MiningConfig::default()
        }
    }
}
