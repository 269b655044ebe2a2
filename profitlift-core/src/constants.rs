/// ProfitLift version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Seed shared by every randomized step (treatment split, bootstrap).
pub const DEFAULT_SEED: u64 = 42;

/// Segments with fewer clean transactions than this are never mined.
pub const MIN_TRANSACTIONS_PER_SEGMENT: usize = 5;

/// Floor for festival segment thresholds at depth 1.
pub const FESTIVAL_MIN_ROWS_FLOOR: usize = 20;

/// Floor for festival × time-bin segment thresholds at depth 2.
pub const FESTIVAL_PAIR_MIN_ROWS_FLOOR: usize = 15;

/// Deepest supported context combination.
pub const MAX_CONTEXT_DEPTH: u8 = 2;

/// Hour used for transactions without a timestamp.
pub const DEFAULT_HOUR: u32 = 12;

/// Margin assumed when an item carries no margin fraction.
pub const DEFAULT_MARGIN_PCT: f64 = 0.25;

/// Tolerance for the scoring weights sum check.
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.001;

/// Label of the unsegmented population.
pub const OVERALL_LABEL: &str = "Overall";
