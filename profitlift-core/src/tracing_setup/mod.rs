//! Observability for ProfitLift.
//! `tracing` crate with `EnvFilter`, per-subsystem log levels.

pub mod setup;
pub mod spans;

pub use setup::{init_tracing, LOG_ENV_VAR};
