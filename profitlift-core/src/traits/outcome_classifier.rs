use crate::errors::CausalResult;

/// Binary outcome model used by each arm of the paired outcome model.
pub trait OutcomeClassifier: Send + Sync {
    /// Train on feature rows `x` with 0/1 labels `y`.
    fn fit(&mut self, x: &[Vec<f64>], y: &[f64]) -> CausalResult<()>;

    /// P(outcome = 1) for each feature row.
    fn predict_proba(&self, x: &[Vec<f64>]) -> CausalResult<Vec<f64>>;

    fn is_fitted(&self) -> bool;
}
