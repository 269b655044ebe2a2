//! # profitlift-core
//!
//! Foundation crate for the ProfitLift analytics pipeline.
//! Defines shared types, traits, errors, config, constants, and tracing setup.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod tracing_setup;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::ProfitLiftConfig;
pub use errors::{ProfitLiftError, ProfitLiftResult};
pub use models::{
    Basket, Context, ContextFilter, ContextualRule, DayType, FrequentItemset, FrequentItemsets,
    ItemSet, TimeBin, TransactionRecord, UpliftResult,
};
