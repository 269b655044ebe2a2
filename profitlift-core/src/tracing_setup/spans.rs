//! Span definitions per pipeline stage: mining, scoring, causal estimation.

/// Create a mining span for one segment.
#[macro_export]
macro_rules! mining_span {
    ($context:expr, $transactions:expr) => {
        tracing::info_span!(
            $crate::tracing_setup::spans::names::MINING,
            context = %$context,
            transactions = $transactions
        )
    };
}

/// Create a scoring span.
#[macro_export]
macro_rules! scoring_span {
    ($rule_count:expr) => {
        tracing::info_span!(
            $crate::tracing_setup::spans::names::SCORING,
            rule_count = $rule_count
        )
    };
}

/// Create a causal estimation span for one rule.
#[macro_export]
macro_rules! causal_span {
    ($rule:expr) => {
        tracing::info_span!($crate::tracing_setup::spans::names::CAUSAL, rule = %$rule)
    };
}

/// Span names, shared by the span macros and anything filtering on them.
pub mod names {
    pub const MINING: &str = "profitlift.mining";
    pub const SCORING: &str = "profitlift.scoring";
    pub const CAUSAL: &str = "profitlift.causal";
}
