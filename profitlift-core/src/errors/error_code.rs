//! Stable string codes for errors surfaced to the API collaborator.

pub const MINING_ERROR: &str = "MINING_ERROR";
pub const INVALID_THRESHOLD: &str = "INVALID_THRESHOLD";
pub const INVALID_RULE: &str = "INVALID_RULE";
pub const SEGMENT_FAILED: &str = "SEGMENT_FAILED";
pub const NOT_FITTED: &str = "MODEL_NOT_FITTED";
pub const CAUSAL_ERROR: &str = "CAUSAL_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";

/// Maps an error to a stable, machine-readable code.
pub trait ProfitLiftErrorCode {
    fn error_code(&self) -> &'static str;
}
