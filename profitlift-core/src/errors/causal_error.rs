use super::error_code::{self, ProfitLiftErrorCode};

/// Errors raised by the causal estimation stack.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CausalError {
    #[error("{model} model must be fitted before prediction")]
    NotFitted { model: &'static str },

    #[error("cannot train on empty {arm} data")]
    EmptyTrainingData { arm: &'static str },

    #[error("{arm} data has {features} feature rows but {outcomes} outcomes")]
    LengthMismatch {
        arm: &'static str,
        features: usize,
        outcomes: usize,
    },

    #[error("feature dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("estimation failed: {reason}")]
    EstimationFailed { reason: String },
}

impl ProfitLiftErrorCode for CausalError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFitted { .. } => error_code::NOT_FITTED,
            _ => error_code::CAUSAL_ERROR,
        }
    }
}
