//! Paired outcome model: one classifier per arm, uplift as the difference.

use profitlift_core::config::ClassifierConfig;
use profitlift_core::errors::{CausalError, CausalResult};
use profitlift_core::traits::OutcomeClassifier;

use crate::classifier::LogisticClassifier;

/// T-learner over any [`OutcomeClassifier`].
///
/// Uplift for a row is `P(outcome | treatment model) - P(outcome | control model)`.
#[derive(Debug, Clone)]
pub struct PairedOutcomeModel<C: OutcomeClassifier = LogisticClassifier> {
    control: C,
    treatment: C,
    fitted: bool,
}

impl PairedOutcomeModel<LogisticClassifier> {
    /// Two logistic arms sharing `config`.
    pub fn logistic(config: &ClassifierConfig) -> Self {
        Self::new(
            LogisticClassifier::new(config.clone()),
            LogisticClassifier::new(config.clone()),
        )
    }
}

impl<C: OutcomeClassifier> PairedOutcomeModel<C> {
    /// Unfitted model over the given arm classifiers.
    pub fn new(control: C, treatment: C) -> Self {
        Self {
            control,
            treatment,
            fitted: false,
        }
    }

    /// Fit both arms. Either arm being empty is an error.
    pub fn fit(
        &mut self,
        x_control: &[Vec<f64>],
        y_control: &[f64],
        x_treatment: &[Vec<f64>],
        y_treatment: &[f64],
    ) -> CausalResult<()> {
        self.fitted = false;
        check_arm("control", x_control, y_control)?;
        check_arm("treatment", x_treatment, y_treatment)?;
        self.control.fit(x_control, y_control)?;
        self.treatment.fit(x_treatment, y_treatment)?;
        self.fitted = true;
        Ok(())
    }

    /// True once both arms fitted successfully.
    pub fn is_fitted(&self) -> bool {
        self.fitted
    }

    /// Per-row treatment minus control probability.
    pub fn predict_uplift(&self, x: &[Vec<f64>]) -> CausalResult<Vec<f64>> {
        let treated = self.predict_treatment_probability(x)?;
        let control = self.predict_control_probability(x)?;
        Ok(treated.iter().zip(&control).map(|(t, c)| t - c).collect())
    }

    /// Probabilities from the treatment arm.
    pub fn predict_treatment_probability(&self, x: &[Vec<f64>]) -> CausalResult<Vec<f64>> {
        self.ensure_fitted()?;
        self.treatment.predict_proba(x)
    }

    /// Probabilities from the control arm.
    pub fn predict_control_probability(&self, x: &[Vec<f64>]) -> CausalResult<Vec<f64>> {
        self.ensure_fitted()?;
        self.control.predict_proba(x)
    }

    fn ensure_fitted(&self) -> CausalResult<()> {
        if self.fitted {
            Ok(())
        } else {
            Err(CausalError::NotFitted { model: "t-learner" })
        }
    }
}

fn check_arm(arm: &'static str, x: &[Vec<f64>], y: &[f64]) -> CausalResult<()> {
    if x.is_empty() || y.is_empty() {
        return Err(CausalError::EmptyTrainingData { arm });
    }
    if x.len() != y.len() {
        return Err(CausalError::LengthMismatch {
            arm,
            features: x.len(),
            outcomes: y.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arm(rate_per_ten: usize) -> (Vec<Vec<f64>>, Vec<f64>) {
        let x = (0..10).map(|i| vec![i as f64, 1.0]).collect();
        let y = (0..10).map(|i| if i < rate_per_ten { 1.0 } else { 0.0 }).collect();
        (x, y)
    }

    #[test]
    fn prediction_requires_fit() {
        let model = PairedOutcomeModel::logistic(&ClassifierConfig::default());
        assert!(!model.is_fitted());
        assert_eq!(
            model.predict_uplift(&[vec![0.0, 0.0]]).unwrap_err(),
            CausalError::NotFitted { model: "t-learner" }
        );
    }

    #[test]
    fn empty_arm_is_rejected() {
        let mut model = PairedOutcomeModel::logistic(&ClassifierConfig::default());
        let (x, y) = arm(5);
        let err = model.fit(&[], &[], &x, &y).unwrap_err();
        assert_eq!(err, CausalError::EmptyTrainingData { arm: "control" });
        assert!(!model.is_fitted());
    }

    #[test]
    fn constant_arms_give_exact_uplift() {
        let mut model = PairedOutcomeModel::logistic(&ClassifierConfig::default());
        let (xc, yc) = arm(0);
        let (xt, yt) = arm(10);
        model.fit(&xc, &yc, &xt, &yt).unwrap();
        assert_eq!(model.predict_uplift(&xc).unwrap(), vec![1.0; 10]);
    }
}
