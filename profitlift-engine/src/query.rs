//! Request parameters for engine operations.

use profitlift_core::models::{ContextFilter, ItemSet};
use serde::{Deserialize, Serialize};

/// Parameters of a rule or bundle request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleQuery {
    /// Default: 0.01.
    pub min_support: f64,
    /// Default: 0.3.
    pub min_confidence: f64,
    /// Rules with lower lift are dropped before scoring. Default: 1.0.
    pub min_lift: f64,
    /// Default: 25.
    pub limit: usize,
    /// Default: 50.
    pub min_rows_per_context: usize,
    /// Default: true.
    pub include_causal: bool,
    /// Default: 0.
    pub max_depth: u8,
    /// Narrows the rows before mining.
    pub filter: Option<ContextFilter>,
}

impl Default for RuleQuery {
    fn default() -> Self {
        Self {
            min_support: 0.01,
            min_confidence: 0.3,
            min_lift: 1.0,
            limit: 25,
            min_rows_per_context: 50,
            include_causal: true,
            max_depth: 0,
            filter: None,
        }
    }
}

/// A user-supplied promotion to evaluate without mining.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhatIfScenario {
    pub antecedent: ItemSet,
    pub consequent: ItemSet,
    #[serde(default)]
    pub context: ContextFilter,
    /// Fraction of revenue given away, in [0, 1].
    #[serde(default)]
    pub anticipated_discount_pct: f64,
    /// Baskets the projection is scaled to.
    #[serde(default)]
    pub expected_traffic: Option<u64>,
}

impl WhatIfScenario {
    /// Scenario over the whole population, no discount and no traffic.
    pub fn new(antecedent: ItemSet, consequent: ItemSet) -> Self {
        Self {
            antecedent,
            consequent,
            context: ContextFilter::default(),
            anticipated_discount_pct: 0.0,
            expected_traffic: None,
        }
    }

    pub fn with_context(mut self, context: ContextFilter) -> Self {
        self.context = context;
        self
    }

    pub fn with_discount(mut self, pct: f64) -> Self {
        self.anticipated_discount_pct = pct;
        self
    }

    /// Scale the projection to `baskets`; 0 projects no total.
    pub fn with_traffic(mut self, baskets: u64) -> Self {
        self.expected_traffic = Some(baskets);
        self
    }
}
