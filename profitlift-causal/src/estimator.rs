//! CausalEstimator: simulated experiment, paired outcome model, headline uplift.

use std::panic::{catch_unwind, AssertUnwindSafe};

use profitlift_core::causal_span;
use profitlift_core::config::CausalConfig;
use profitlift_core::errors::{CausalError, CausalResult};
use profitlift_core::models::{ContextualRule, TransactionRecord, UpliftResult};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::bootstrap::bootstrap_interval;
use crate::classifier::LogisticClassifier;
use crate::simulator::{SimulatedExperiment, TreatmentSimulator};
use crate::t_learner::PairedOutcomeModel;

/// Headline uplift plus the fitted outcome model, when one could be fitted.
#[derive(Debug, Clone)]
pub struct ModelledUplift {
    pub result: UpliftResult,
    pub model: Option<PairedOutcomeModel<LogisticClassifier>>,
}

impl ModelledUplift {
    fn without_model(result: UpliftResult) -> Self {
        Self {
            result,
            model: None,
        }
    }
}

/// Estimates the incremental effect of promoting a rule.
///
/// The headline attach-rate uplift is the difference of raw group means.
/// The paired outcome model is fitted on the same arms and returned by
/// [`CausalEstimator::estimate_with_model`] for per-record scoring. Never
/// fails: insufficient data and internal errors both yield zeroed results.
#[derive(Debug, Clone)]
pub struct CausalEstimator {
    config: CausalConfig,
    simulator: TreatmentSimulator,
}

impl CausalEstimator {
    /// Estimator whose simulator is seeded from `config.seed`.
    pub fn new(config: CausalConfig) -> Self {
        Self {
            simulator: TreatmentSimulator::new(&config),
            config,
        }
    }

    /// Settings the estimator was built with.
    pub fn config(&self) -> &CausalConfig {
        &self.config
    }

    /// Uplift for `rule` over `rows`. Never fails: any error yields a zeroed result.
    pub fn estimate_uplift(
        &self,
        rule: &ContextualRule,
        rows: &[TransactionRecord],
    ) -> UpliftResult {
        self.estimate_with_model(rule, rows).result
    }

    /// Like [`Self::estimate_uplift`], also returning the fitted paired model when one was trained.
    pub fn estimate_with_model(
        &self,
        rule: &ContextualRule,
        rows: &[TransactionRecord],
    ) -> ModelledUplift {
        let span = causal_span!(rule);
        let _guard = span.enter();

        let outcome = catch_unwind(AssertUnwindSafe(|| self.try_estimate(rule, rows)));
        let result = match outcome {
            Ok(result) => result,
            Err(_) => Err(CausalError::EstimationFailed {
                reason: "panic during estimation".to_string(),
            }),
        };
        match result {
            Ok(modelled) => modelled,
            Err(e) => {
                warn!(rule = %rule, error = %e, "error in causal estimation");
                ModelledUplift::without_model(UpliftResult::zeroed(0))
            }
        }
    }

    /// Estimates for the first `top_n` rules, in rule order.
    pub fn estimate_many(
        &self,
        rules: &[ContextualRule],
        rows: &[TransactionRecord],
        top_n: usize,
    ) -> Vec<UpliftResult> {
        rules
            .par_iter()
            .take(top_n)
            .map(|rule| self.estimate_uplift(rule, rows))
            .collect()
    }

    fn try_estimate(
        &self,
        rule: &ContextualRule,
        rows: &[TransactionRecord],
    ) -> CausalResult<ModelledUplift> {
        let SimulatedExperiment { control, treatment } =
            self.simulator.simulate_experiment(rows, rule);
        let sample_size = control.len() + treatment.len();

        let min_group = self.config.min_group_size;
        if control.len() < min_group || treatment.len() < min_group {
            debug!(
                rule = %rule,
                control = control.len(),
                treatment = treatment.len(),
                "insufficient data for causal estimation"
            );
            return Ok(ModelledUplift::without_model(UpliftResult::zeroed(sample_size)));
        }

        let mut model = PairedOutcomeModel::logistic(&self.config.classifier);
        model.fit(
            control.features(),
            control.outcomes(),
            treatment.features(),
            treatment.outcomes(),
        )?;

        let control_rate = control.outcome_rate();
        let treatment_rate = treatment.outcome_rate();
        let incremental = treatment_rate - control_rate;

        if incremental < self.config.min_incremental_lift {
            debug!(
                rule = %rule,
                incremental,
                threshold = self.config.min_incremental_lift,
                "incremental lift below threshold"
            );
            return Ok(ModelledUplift {
                result: UpliftResult::not_significant(control_rate, treatment_rate, sample_size),
                model: Some(model),
            });
        }

        let (avg_price, avg_margin) = self.consequent_economics(rule, rows);
        let incremental_revenue = incremental * avg_price;
        let confidence_interval = bootstrap_interval(
            control.outcomes(),
            treatment.outcomes(),
            self.config.bootstrap_resamples,
            self.config.confidence_level,
            self.config.seed,
        );

        debug!(rule = %rule, uplift = incremental, "causal estimate");
        Ok(ModelledUplift {
            result: UpliftResult {
                incremental_attach_rate: incremental,
                incremental_revenue,
                incremental_margin: incremental_revenue * avg_margin,
                control_rate,
                treatment_rate,
                sample_size,
                confidence_interval,
            },
            model: Some(model),
        })
    }

    /// Mean price and recorded margin over every row selling a consequent item.
    fn consequent_economics(
        &self,
        rule: &ContextualRule,
        rows: &[TransactionRecord],
    ) -> (f64, f64) {
        let consequent_rows: Vec<&TransactionRecord> = rows
            .iter()
            .filter(|r| r.item().is_some_and(|item| rule.consequent.contains(item)))
            .collect();
        if consequent_rows.is_empty() {
            return (0.0, self.config.default_margin_pct);
        }

        let avg_price = mean(consequent_rows.iter().map(|r| r.price)).unwrap_or(0.0);
        let avg_margin = mean(consequent_rows.iter().filter_map(|r| r.margin_pct))
            .unwrap_or(self.config.default_margin_pct);
        (avg_price, avg_margin)
    }
}

impl Default for CausalEstimator {
    fn default() -> Self {
        Self::new(CausalConfig::default())
    }
}

/// Mean of the finite values, `None` when there are none.
fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values
        .filter(|v| v.is_finite())
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}
