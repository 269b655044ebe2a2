//! Configuration system for ProfitLift.
//! TOML-based, 3-layer resolution: env > project file > defaults.

pub mod causal_config;
pub mod data_mode;
pub mod engine_config;
pub mod mining_config;
pub mod profitlift_config;
pub mod scoring_config;

pub use causal_config::{CausalConfig, ClassifierConfig};
pub use data_mode::DataMode;
pub use engine_config::EngineConfig;
pub use mining_config::{MiningConfig, MiningStrategy};
pub use profitlift_config::ProfitLiftConfig;
pub use scoring_config::{ScoringConfig, ScoringWeights};
