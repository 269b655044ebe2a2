//! Orchestration configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the analytics engine that fronts the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// How many top-ranked rules receive causal estimation. Default: 10.
    pub causal_top_n: usize,
    /// Candidates kept before scoring, as a multiple of the limit. Default: 10.
    pub candidate_multiplier: usize,
    /// Lower bound on candidates kept before scoring. Default: 500.
    pub min_candidates: usize,
    /// Support floor for bundle mining. Default: 0.05.
    pub bundle_min_support: f64,
    /// Context depth for bundle mining. Default: 0.
    pub bundle_max_depth: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            causal_top_n: 10,
            candidate_multiplier: 10,
            min_candidates: 500,
            bundle_min_support: 0.05,
            bundle_max_depth: 0,
        }
    }
}
