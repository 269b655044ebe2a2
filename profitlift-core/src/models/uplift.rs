use serde::{Deserialize, Serialize};

/// Causal uplift estimate for one rule.
///
/// All-zero when the data is insufficient; rates populated but incremental
/// metrics zero when the effect is not significant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpliftResult {
    pub incremental_attach_rate: f64,
    pub incremental_revenue: f64,
    pub incremental_margin: f64,
    pub control_rate: f64,
    pub treatment_rate: f64,
    pub sample_size: usize,
    /// Bootstrap (lower, upper) bounds on the incremental attach rate.
    pub confidence_interval: Option<(f64, f64)>,
}

impl UpliftResult {
    /// Everything zero except the sample size.
    pub fn zeroed(sample_size: usize) -> Self {
        Self {
            sample_size,
            ..Self::default()
        }
    }

    /// Observed rates kept, incremental metrics zeroed.
    pub fn not_significant(control_rate: f64, treatment_rate: f64, sample_size: usize) -> Self {
        Self {
            control_rate,
            treatment_rate,
            sample_size,
            ..Self::default()
        }
    }

    /// Positive incremental attach rate.
    pub fn is_significant(&self) -> bool {
        self.incremental_attach_rate > 0.0
    }
}
