//! Scoring configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Weights of the blended ranking objective.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub lift: f64,
    pub profit_margin: f64,
    pub diversity: f64,
    pub confidence: f64,
}

impl ScoringWeights {
    /// Sum of the four weights.
    pub fn sum(&self) -> f64 {
        self.lift + self.profit_margin + self.diversity + self.confidence
    }

    /// Whether the weights sum to 1 within tolerance.
    pub fn is_normalized(&self) -> bool {
        (self.sum() - 1.0).abs() <= constants::WEIGHT_SUM_TOLERANCE
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            lift: 0.30,
            profit_margin: 0.40,
            diversity: 0.15,
            confidence: 0.15,
        }
    }
}

/// Configuration for rule scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub weights: ScoringWeights,
    /// Margin used for rows without a margin fraction. Default: 0.25.
    pub default_margin_pct: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            default_margin_pct: constants::DEFAULT_MARGIN_PCT,
        }
    }
}
