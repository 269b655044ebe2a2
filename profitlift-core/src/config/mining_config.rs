//! Mining configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Which itemset backend the context-aware miner runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MiningStrategy {
    /// Prefix-tree (FP-growth) mining.
    #[default]
    FpGrowth,
    /// Vertical tid-list intersection (Eclat).
    Eclat,
}

/// Configuration for segmentation and itemset/rule mining.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MiningConfig {
    /// Minimum support as a fraction of segment transactions. Default: 0.01.
    pub min_support: f64,
    /// Minimum rule confidence. Default: 0.3.
    pub min_confidence: f64,
    /// Minimum rows before a segment is kept (auto-backoff). Default: 100.
    pub min_rows_per_context: usize,
    /// Deepest context combination (0, 1 or 2). Default: 2.
    pub max_depth: u8,
    /// Segments with fewer clean transactions are skipped. Default: 5.
    pub min_transactions_per_segment: usize,
    /// Itemset backend. Default: FP-growth.
    pub strategy: MiningStrategy,
    /// Optional cap on itemset size.
    pub max_itemset_len: Option<usize>,
    /// Mine segments on the rayon pool. Default: true.
    pub parallel: bool,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            min_support: 0.01,
            min_confidence: 0.3,
            min_rows_per_context: 100,
            max_depth: constants::MAX_CONTEXT_DEPTH,
            min_transactions_per_segment: constants::MIN_TRANSACTIONS_PER_SEGMENT,
            strategy: MiningStrategy::default(),
            max_itemset_len: None,
            parallel: true,
        }
    }
}
