//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::VERSION;

/// Environment variable holding per-subsystem log directives.
pub const LOG_ENV_VAR: &str = "PROFITLIFT_LOG";

const DEFAULT_DIRECTIVE: &str = "info";

static INIT: Once = Once::new();

/// Initialize the ProfitLift tracing/logging system.
///
/// Reads `PROFITLIFT_LOG` for per-subsystem levels, e.g.
/// `PROFITLIFT_LOG=profitlift_mining=debug,profitlift_causal=warn`.
/// An explicit `filter` wins over the environment; with neither, `info` is used.
/// `json` switches the formatter to newline-delimited JSON.
///
/// Idempotent. If the host process already installed a global subscriber
/// this is a no-op.
pub fn init_tracing(filter: Option<&str>, json: bool) {
    INIT.call_once(|| {
        let filter = match filter {
            Some(directives) => EnvFilter::try_new(directives)
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE)),
            None => EnvFilter::try_from_env(LOG_ENV_VAR)
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE)),
        };

        let installed = if json {
            tracing_subscriber::registry()
                .with(fmt::layer().json().with_target(true).with_current_span(true))
                .with(filter)
                .try_init()
        } else {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_line_number(true),
                )
                .with(filter)
                .try_init()
        };

        match installed {
            Ok(()) => tracing::info!(version = VERSION, "profitlift tracing initialised"),
            Err(_) => tracing::debug!("global tracing subscriber already set; keeping it"),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init_tracing(Some("debug"), false);
        init_tracing(None, true);
        tracing::info!("still logging after repeated init");
    }
}
