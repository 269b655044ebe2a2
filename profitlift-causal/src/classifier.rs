//! L2-regularised logistic regression fitted by batch gradient descent.

use profitlift_core::config::ClassifierConfig;
use profitlift_core::errors::{CausalError, CausalResult};
use profitlift_core::traits::OutcomeClassifier;
use statrs::statistics::Statistics;

const MODEL_NAME: &str = "logistic";

#[derive(Debug, Clone, PartialEq)]
struct Standardizer {
    means: Vec<f64>,
    scales: Vec<f64>,
}

impl Standardizer {
    fn fit(x: &[Vec<f64>], dim: usize) -> Self {
        let mut means = Vec::with_capacity(dim);
        let mut scales = Vec::with_capacity(dim);
        for j in 0..dim {
            let column: Vec<f64> = x.iter().map(|row| row[j]).collect();
            let mean = column.iter().mean();
            let sd = column.iter().std_dev();
            means.push(if mean.is_finite() { mean } else { 0.0 });
            // constant columns keep their raw spread
            scales.push(if sd.is_finite() && sd > 0.0 { sd } else { 1.0 });
        }
        Self { means, scales }
    }

    fn transform<'a>(&'a self, row: &'a [f64]) -> impl Iterator<Item = f64> + 'a {
        row.iter()
            .zip(self.means.iter().zip(&self.scales))
            .map(|(v, (m, s))| (v - m) / s)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Fitted {
    /// Training labels held a single class.
    Constant(f64),
    Linear {
        standardizer: Standardizer,
        /// Intercept first.
        coefficients: Vec<f64>,
    },
}

/// Binary outcome classifier for one arm of the paired outcome model.
#[derive(Debug, Clone)]
pub struct LogisticClassifier {
    config: ClassifierConfig,
    dim: usize,
    fitted: Option<Fitted>,
}

impl LogisticClassifier {
    /// Unfitted classifier.
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            config,
            dim: 0,
            fitted: None,
        }
    }

    /// Fitted coefficients on standardised features, intercept first.
    pub fn coefficients(&self) -> Option<&[f64]> {
        match &self.fitted {
            Some(Fitted::Linear { coefficients, .. }) => Some(coefficients),
            _ => None,
        }
    }

    fn gradient_descent(&self, z: &[Vec<f64>], y: &[f64]) -> Vec<f64> {
        let n = z.len() as f64;
        let mut coef = vec![0.0; self.dim + 1];
        for _ in 0..self.config.max_iterations {
            let mut grad = vec![0.0; self.dim + 1];
            for (row, &label) in z.iter().zip(y) {
                let error = sigmoid(logit(&coef, row.iter().copied())) - label;
                grad[0] += error;
                for (g, v) in grad[1..].iter_mut().zip(row) {
                    *g += error * v;
                }
            }
            coef[0] -= self.config.learning_rate * grad[0] / n;
            for j in 1..=self.dim {
                coef[j] -= self.config.learning_rate
                    * (grad[j] / n + self.config.l2_penalty * coef[j]);
            }
        }
        coef
    }
}

impl Default for LogisticClassifier {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}

impl OutcomeClassifier for LogisticClassifier {
    fn fit(&mut self, x: &[Vec<f64>], y: &[f64]) -> CausalResult<()> {
        if x.is_empty() {
            return Err(CausalError::EmptyTrainingData { arm: MODEL_NAME });
        }
        if x.len() != y.len() {
            return Err(CausalError::LengthMismatch {
                arm: MODEL_NAME,
                features: x.len(),
                outcomes: y.len(),
            });
        }
        let dim = x[0].len();
        if let Some(row) = x.iter().find(|row| row.len() != dim) {
            return Err(CausalError::DimensionMismatch {
                expected: dim,
                actual: row.len(),
            });
        }
        self.dim = dim;

        let positives = y.iter().filter(|&&v| v > 0.5).count();
        if positives == 0 || positives == y.len() {
            self.fitted = Some(Fitted::Constant(positives as f64 / y.len() as f64));
            return Ok(());
        }

        let standardizer = Standardizer::fit(x, dim);
        let z: Vec<Vec<f64>> = x
            .iter()
            .map(|row| standardizer.transform(row).collect())
            .collect();
        let coefficients = self.gradient_descent(&z, y);
        self.fitted = Some(Fitted::Linear {
            standardizer,
            coefficients,
        });
        Ok(())
    }

    fn predict_proba(&self, x: &[Vec<f64>]) -> CausalResult<Vec<f64>> {
        let fitted = self
            .fitted
            .as_ref()
            .ok_or(CausalError::NotFitted { model: MODEL_NAME })?;
        if let Some(row) = x.iter().find(|row| row.len() != self.dim) {
            return Err(CausalError::DimensionMismatch {
                expected: self.dim,
                actual: row.len(),
            });
        }
        Ok(match fitted {
            Fitted::Constant(p) => vec![*p; x.len()],
            Fitted::Linear {
                standardizer,
                coefficients,
            } => x
                .iter()
                .map(|row| sigmoid(logit(coefficients, standardizer.transform(row))))
                .collect(),
        })
    }

    fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }
}

fn logit(coef: &[f64], row: impl Iterator<Item = f64>) -> f64 {
    coef[0] + coef[1..].iter().zip(row).map(|(c, v)| c * v).sum::<f64>()
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
