//! Builds treatment and control arms from observational baskets.

use profitlift_core::config::CausalConfig;
use profitlift_core::models::{group_by_transaction, Basket, ContextualRule, TransactionRecord};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, warn};

use crate::features::FeatureTable;

/// Control and treatment arms, one feature row per basket.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulatedExperiment {
    pub control: FeatureTable,
    pub treatment: FeatureTable,
}

impl SimulatedExperiment {
    /// Both arms empty.
    pub fn is_empty(&self) -> bool {
        self.control.is_empty() && self.treatment.is_empty()
    }

    /// Baskets across both arms.
    pub fn sample_size(&self) -> usize {
        self.control.len() + self.treatment.len()
    }
}

/// Emulates an A/B test for a rule.
///
/// Antecedent-positive baskets are shuffled with a fixed seed and split into
/// treatment and holdout. Control is the holdout plus antecedent-negative
/// baskets whose size lies within the tolerance window around the mean
/// antecedent-positive basket size.
#[derive(Debug, Clone)]
pub struct TreatmentSimulator {
    seed: u64,
    treatment_fraction: f64,
    min_antecedent_transactions: usize,
    min_group_size: usize,
    basket_size_tolerance: f64,
}

impl TreatmentSimulator {
    /// Simulator using the seed, split and matching settings of `config`.
    pub fn new(config: &CausalConfig) -> Self {
        Self {
            seed: config.seed,
            treatment_fraction: config.treatment_fraction,
            min_antecedent_transactions: config.min_antecedent_transactions,
            min_group_size: config.min_group_size,
            basket_size_tolerance: config.basket_size_tolerance,
        }
    }

    /// Both arms, or two empty tables when the data cannot support the test.
    pub fn simulate_experiment(
        &self,
        rows: &[TransactionRecord],
        rule: &ContextualRule,
    ) -> SimulatedExperiment {
        let baskets = group_by_transaction(rows);
        let (mut positive, negative): (Vec<&Basket<'_>>, Vec<&Basket<'_>>) =
            baskets.iter().partition(|b| b.contains_any(&rule.antecedent));

        if positive.len() < self.min_antecedent_transactions {
            debug!(
                rule = %rule,
                antecedent_transactions = positive.len(),
                "insufficient antecedent transactions"
            );
            return SimulatedExperiment::default();
        }

        let mean_size =
            positive.iter().map(|b| b.item_count() as f64).sum::<f64>() / positive.len() as f64;

        positive.shuffle(&mut StdRng::seed_from_u64(self.seed));
        let split = (positive.len() as f64 * self.treatment_fraction).floor() as usize;
        let (treatment, holdout) = positive.split_at(split.min(positive.len()));

        let tolerance = (mean_size * self.basket_size_tolerance).max(1.0);
        let matched: Vec<&Basket<'_>> = negative
            .into_iter()
            .filter(|b| (b.item_count() as f64 - mean_size).abs() <= tolerance)
            .collect();

        let mut control: Vec<&Basket<'_>> = if matched.is_empty() {
            warn!(rule = %rule, "no matched external control, falling back to treatment holdout");
            holdout.to_vec()
        } else {
            matched.into_iter().chain(holdout.iter().copied()).collect()
        };
        let mut treatment = treatment.to_vec();

        if control.len() < self.min_group_size || treatment.len() < self.min_group_size {
            debug!(
                rule = %rule,
                control = control.len(),
                treatment = treatment.len(),
                "not enough samples after control/treatment split"
            );
            return SimulatedExperiment::default();
        }

        control.sort_by_key(|b| b.transaction_id);
        treatment.sort_by_key(|b| b.transaction_id);

        SimulatedExperiment {
            control: FeatureTable::from_baskets(&control, &rule.consequent),
            treatment: FeatureTable::from_baskets(&treatment, &rule.consequent),
        }
    }
}

impl Default for TreatmentSimulator {
    fn default() -> Self {
        Self::new(&CausalConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use profitlift_core::models::{Context, ItemSet};

    fn rule() -> ContextualRule {
        ContextualRule::try_new(
            ItemSet::single("chips"),
            ItemSet::single("soda"),
            0.1,
            0.5,
            1.0,
            Context::overall(),
        )
        .unwrap()
    }

    fn basket(id: &str, items: &[&str]) -> Vec<TransactionRecord> {
        items
            .iter()
            .map(|item| TransactionRecord::new(id, *item, 10.0))
            .collect()
    }

    #[test]
    fn too_few_antecedent_baskets_yields_empty_arms() {
        let rows: Vec<_> = (0..9).flat_map(|i| basket(&format!("t{i}"), &["chips"])).collect();
        assert!(TreatmentSimulator::default().simulate_experiment(&rows, &rule()).is_empty());
    }

    #[test]
    fn splits_seventy_thirty_and_matches_by_size() {
        let mut rows: Vec<_> = (0..10)
            .flat_map(|i| basket(&format!("a{i}"), &["chips", "soda"]))
            .collect();
        // size 2 matches, size 6 falls outside 2 ± 1
        rows.extend((0..4).flat_map(|i| basket(&format!("n{i}"), &["tea", "milk"])));
        rows.extend(basket("big", &["a", "b", "c", "d", "e", "f"]));

        let experiment = TreatmentSimulator::default().simulate_experiment(&rows, &rule());
        assert_eq!(experiment.treatment.len(), 7);
        assert_eq!(experiment.control.len(), 4 + 3);
        assert!(!experiment.control.transaction_ids().iter().any(|id| id == "big"));
        assert_eq!(experiment.treatment.outcome_rate(), 1.0);
    }

    #[test]
    fn split_is_reproducible() {
        let rows: Vec<_> = (0..20)
            .flat_map(|i| basket(&format!("a{i:02}"), &["chips"]))
            .collect();
        let sim = TreatmentSimulator::default();
        assert_eq!(
            sim.simulate_experiment(&rows, &rule()),
            sim.simulate_experiment(&rows, &rule())
        );
    }

    #[test]
    fn falls_back_to_holdout_without_external_control() {
        let rows: Vec<_> = (0..10)
            .flat_map(|i| basket(&format!("a{i}"), &["chips"]))
            .collect();
        let experiment = TreatmentSimulator::default().simulate_experiment(&rows, &rule());
        assert_eq!(experiment.treatment.len(), 7);
        assert_eq!(experiment.control.len(), 3);
    }
}
