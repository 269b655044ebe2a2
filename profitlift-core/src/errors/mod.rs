//! Error handling for ProfitLift.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.
//!
//! Insufficient data is never an error: those paths return empty or zeroed
//! values. These enums cover invalid input and unexpected failures.

pub mod causal_error;
pub mod config_error;
pub mod error_code;
pub mod mining_error;

pub use causal_error::CausalError;
pub use config_error::ConfigError;
pub use error_code::ProfitLiftErrorCode;
pub use mining_error::MiningError;

/// Top-level error aggregating subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum ProfitLiftError {
    #[error("mining error: {0}")]
    Mining(#[from] MiningError),

    #[error("causal error: {0}")]
    Causal(#[from] CausalError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ProfitLiftErrorCode for ProfitLiftError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Mining(e) => e.error_code(),
            Self::Causal(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}

/// Convenience alias used across the workspace.
pub type ProfitLiftResult<T> = Result<T, ProfitLiftError>;

/// Result alias for mining operations.
pub type MiningResult<T> = Result<T, MiningError>;

/// Result alias for causal estimation operations.
pub type CausalResult<T> = Result<T, CausalError>;
