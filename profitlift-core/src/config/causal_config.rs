//! Causal estimation configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Hyper-parameters of the outcome classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Gradient descent step size. Default: 0.1.
    pub learning_rate: f64,
    /// Gradient descent iterations. Default: 200.
    pub max_iterations: usize,
    /// L2 penalty on non-intercept coefficients. Default: 0.01.
    pub l2_penalty: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            max_iterations: 200,
            l2_penalty: 0.01,
        }
    }
}

/// Configuration for the simulated-experiment uplift estimator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CausalConfig {
    /// Minimum incremental attach rate considered significant. Default: 0.05.
    pub min_incremental_lift: f64,
    /// Seed for the treatment split and bootstrap. Default: 42.
    pub seed: u64,
    /// Share of antecedent-positive baskets kept as treatment. Default: 0.7.
    pub treatment_fraction: f64,
    /// Antecedent-positive baskets required to simulate at all. Default: 10.
    pub min_antecedent_transactions: usize,
    /// Minimum baskets per arm. Default: 3.
    pub min_group_size: usize,
    /// Relative basket-size window for external control matching. Default: 0.5.
    pub basket_size_tolerance: f64,
    /// Bootstrap resamples for the confidence interval. Default: 20.
    pub bootstrap_resamples: usize,
    /// Two-sided confidence level. Default: 0.95.
    pub confidence_level: f64,
    /// Margin used when no consequent rows exist. Default: 0.25.
    pub default_margin_pct: f64,
    pub classifier: ClassifierConfig,
}

impl Default for CausalConfig {
    fn default() -> Self {
        Self {
            min_incremental_lift: 0.05,
            seed: constants::DEFAULT_SEED,
            treatment_fraction: 0.7,
            min_antecedent_transactions: 10,
            min_group_size: 3,
            basket_size_tolerance: 0.5,
            bootstrap_resamples: 20,
            confidence_level: 0.95,
            default_margin_pct: constants::DEFAULT_MARGIN_PCT,
            classifier: ClassifierConfig::default(),
        }
    }
}
