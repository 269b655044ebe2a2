//! In-memory cache of mined rule sets keyed by mining parameters.

use std::sync::Arc;

use moka::sync::Cache;
use profitlift_core::models::ContextualRule;

/// Which pass produced a cached rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleSetKind {
    Rules,
    Bundles,
}

/// Mining parameter tuple. Thresholds are keyed by their bit pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuleCacheKey {
    kind: RuleSetKind,
    min_support_bits: u64,
    min_confidence_bits: u64,
    min_rows_per_context: usize,
    max_depth: u8,
}

impl RuleCacheKey {
    /// Key for a rule set mined with these parameters.
    pub fn new(
        kind: RuleSetKind,
        min_support: f64,
        min_confidence: f64,
        min_rows_per_context: usize,
        max_depth: u8,
    ) -> Self {
        Self {
            kind,
            min_support_bits: min_support.to_bits(),
            min_confidence_bits: min_confidence.to_bits(),
            min_rows_per_context,
            max_depth,
        }
    }

    /// Pass that produced the rule set.
    pub fn kind(&self) -> RuleSetKind {
        self.kind
    }
}

/// Unbounded, non-expiring rule cache. Entries leave only through [`RuleCache::clear`].
pub struct RuleCache {
    cache: Cache<RuleCacheKey, Arc<Vec<ContextualRule>>>,
}

impl RuleCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self {
            cache: Cache::builder().build(),
        }
    }

    /// Cached rule set for `key`.
    pub fn get(&self, key: &RuleCacheKey) -> Option<Arc<Vec<ContextualRule>>> {
        self.cache.get(key)
    }

    /// Store `rules` under `key`, returning the shared copy.
    pub fn put(&self, key: RuleCacheKey, rules: Vec<ContextualRule>) -> Arc<Vec<ContextualRule>> {
        let rules = Arc::new(rules);
        self.cache.insert(key, Arc::clone(&rules));
        rules
    }

    /// Invalidate every entry and wait for eviction to settle.
    pub fn clear(&self) {
        let keys: Vec<RuleCacheKey> = self.cache.iter().map(|(k, _)| *k).collect();
        for key in &keys {
            self.cache.invalidate(key);
        }
        self.cache.run_pending_tasks();
    }

    /// Entry count after pending maintenance runs.
    pub fn len(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for RuleCache {
    fn default() -> Self {
        Self::new()
    }
}
