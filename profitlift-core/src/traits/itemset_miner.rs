use crate::errors::MiningResult;
use crate::models::{FrequentItemsets, ItemSet};

/// Frequent itemset discovery over one segment's transactions.
pub trait ItemsetMiner: Send + Sync {
    /// Find every itemset contained in at least `min_support × n` of the
    /// `n` transactions. An empty input yields an empty pool.
    fn mine(&self, transactions: &[ItemSet], min_support: f64) -> MiningResult<FrequentItemsets>;

    /// Human-readable backend name.
    fn name(&self) -> &str;
}
