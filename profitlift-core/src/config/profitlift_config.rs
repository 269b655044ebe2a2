//! Top-level ProfitLift configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{CausalConfig, EngineConfig, MiningConfig, ScoringConfig};
use crate::constants;
use crate::errors::ConfigError;

/// Project config file name looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "profitlift.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`PROFITLIFT_*`)
/// 2. Project config (`profitlift.toml` in the project root)
/// 3. Compiled defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProfitLiftConfig {
    pub mining: MiningConfig,
    pub scoring: ScoringConfig,
    pub causal: CausalConfig,
    pub engine: EngineConfig,
}

impl ProfitLiftConfig {
    /// Load configuration for the project rooted at `root`.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        let mut config = if project_config_path.exists() {
            Self::from_file(&project_config_path)?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML file. Missing sections and keys take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Apply `PROFITLIFT_*` environment overrides. Unparseable values are
    /// logged and ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Some(v) = env_parse::<f64>("PROFITLIFT_MIN_SUPPORT") {
            self.mining.min_support = v;
        }
        if let Some(v) = env_parse::<f64>("PROFITLIFT_MIN_CONFIDENCE") {
            self.mining.min_confidence = v;
        }
        if let Some(v) = env_parse::<usize>("PROFITLIFT_MIN_ROWS_PER_CONTEXT") {
            self.mining.min_rows_per_context = v;
        }
        if let Some(v) = env_parse::<u8>("PROFITLIFT_MAX_DEPTH") {
            self.mining.max_depth = v;
        }
        if let Some(v) = env_parse::<f64>("PROFITLIFT_MIN_INCREMENTAL_LIFT") {
            self.causal.min_incremental_lift = v;
        }
        if let Some(v) = env_parse::<u64>("PROFITLIFT_SEED") {
            self.causal.seed = v;
        }
    }

    /// Validate the configuration values.
    ///
    /// Scoring weights that do not sum to 1 are accepted; the scorer warns.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_fraction("mining.min_support", self.mining.min_support)?;
        check_fraction("mining.min_confidence", self.mining.min_confidence)?;
        if self.mining.max_depth > constants::MAX_CONTEXT_DEPTH {
            return Err(invalid("mining.max_depth", "must be 0, 1 or 2"));
        }
        if self.mining.max_itemset_len == Some(0) {
            return Err(invalid("mining.max_itemset_len", "must be greater than 0"));
        }
        check_fraction("scoring.default_margin_pct", self.scoring.default_margin_pct)?;
        let w = &self.scoring.weights;
        if [w.lift, w.profit_margin, w.diversity, w.confidence]
            .iter()
            .any(|v| !v.is_finite() || *v < 0.0)
        {
            return Err(invalid("scoring.weights", "must be finite and non-negative"));
        }
        check_fraction("causal.treatment_fraction", self.causal.treatment_fraction)?;
        check_fraction("causal.default_margin_pct", self.causal.default_margin_pct)?;
        if !(self.causal.confidence_level > 0.0 && self.causal.confidence_level < 1.0) {
            return Err(invalid("causal.confidence_level", "must be strictly between 0 and 1"));
        }
        if self.causal.bootstrap_resamples == 0 {
            return Err(invalid("causal.bootstrap_resamples", "must be greater than 0"));
        }
        let tolerance = self.causal.basket_size_tolerance;
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(invalid("causal.basket_size_tolerance", "must be non-negative"));
        }
        if self.causal.classifier.learning_rate <= 0.0 {
            return Err(invalid("causal.classifier.learning_rate", "must be positive"));
        }
        check_fraction("engine.bundle_min_support", self.engine.bundle_min_support)?;
        if self.engine.bundle_max_depth > constants::MAX_CONTEXT_DEPTH {
            return Err(invalid("engine.bundle_max_depth", "must be 0, 1 or 2"));
        }
        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(key, value = %raw, "ignoring unparseable environment override");
            None
        }
    }
}

fn check_fraction(field: &str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(field, "must be between 0.0 and 1.0"))
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}
