//! MultiObjectiveScorer: per-context normalized blend of lift, profit,
//! diversity and confidence.

use std::cmp::Ordering;

use profitlift_core::config::{ScoringConfig, ScoringWeights};
use profitlift_core::models::{Context, ContextualRule, TransactionRecord};
use profitlift_core::scoring_span;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};

use crate::diversity::ItemFrequencies;
use crate::profit::{ItemEconomics, ProfitCalculator};

/// Ranks rules by
/// `w_lift·norm(lift) + w_profit·norm(profit) + w_diversity·diversity + w_confidence·confidence`.
///
/// Lift and profit are min-max scaled within each context; a context whose
/// values are all equal uses a range of 1, so every rule normalizes to 0.
#[derive(Debug, Clone)]
pub struct MultiObjectiveScorer {
    weights: ScoringWeights,
    profit: ProfitCalculator,
}

impl MultiObjectiveScorer {
    /// Scorer using the configured weights; warns if they do not sum to 1.
    pub fn new(config: &ScoringConfig) -> Self {
        warn_if_unnormalized(&config.weights);
        Self {
            weights: config.weights,
            profit: ProfitCalculator::new(config.default_margin_pct),
        }
    }

    /// Current objective weights.
    pub fn weights(&self) -> ScoringWeights {
        self.weights
    }

    /// Replace the weights for subsequent scoring.
    pub fn set_weights(&mut self, weights: ScoringWeights) {
        warn_if_unnormalized(&weights);
        info!(
            lift = weights.lift,
            profit_margin = weights.profit_margin,
            diversity = weights.diversity,
            confidence = weights.confidence,
            "updated scoring weights"
        );
        self.weights = weights;
    }

    /// Calculator used for the profit objective.
    pub fn profit_calculator(&self) -> &ProfitCalculator {
        &self.profit
    }

    /// Fill profit, diversity and overall scores, then sort descending by
    /// overall score. The sort is stable: ties keep context-group order.
    pub fn score_rules(
        &self,
        rules: Vec<ContextualRule>,
        rows: &[TransactionRecord],
    ) -> Vec<ContextualRule> {
        let span = scoring_span!(rules.len());
        let _guard = span.enter();

        let economics = self.profit.economics(rows);
        let mut groups = group_by_context_label(rules);
        info!(contexts = groups.len(), "scoring rules across contexts");

        groups
            .par_iter_mut()
            .for_each(|group| self.score_group(group, &economics));

        let mut scored: Vec<ContextualRule> = groups.into_iter().flatten().collect();
        scored.sort_by(|a, b| {
            let (a, b) = (a.overall_score.unwrap_or(0.0), b.overall_score.unwrap_or(0.0));
            b.partial_cmp(&a).unwrap_or(Ordering::Equal)
        });
        info!(rules = scored.len(), "scored rules");
        scored
    }

    fn score_group(&self, group: &mut [ContextualRule], economics: &ItemEconomics) {
        let Some(first) = group.first() else { return };
        debug!(context = %first.context, rules = group.len(), "scoring context");

        for rule in group.iter_mut() {
            rule.profit_score = Some(economics.rule_profit(rule));
        }

        // Same label can in principle cover distinct contexts; diversity only
        // compares rules whose context is equal.
        let diversities: Vec<f64> = {
            let mut by_context: FxHashMap<&Context, ItemFrequencies<'_>> = FxHashMap::default();
            for rule in group.iter() {
                by_context.entry(&rule.context).or_insert_with(|| {
                    ItemFrequencies::new(group.iter().filter(|r| r.context == rule.context))
                });
            }
            group
                .iter()
                .map(|rule| {
                    by_context
                        .get(&rule.context)
                        .map_or(1.0, |freq| freq.diversity_of(rule))
                })
                .collect()
        };

        let lift = MinMax::of(group.iter().map(|r| r.lift));
        let profit = MinMax::of(group.iter().map(|r| r.profit_score.unwrap_or(0.0)));
        let w = self.weights;

        for (rule, diversity) in group.iter_mut().zip(diversities) {
            let profit_score = rule.profit_score.unwrap_or(0.0);
            rule.diversity_score = Some(diversity);
            rule.overall_score = Some(
                w.lift * lift.normalize(rule.lift)
                    + w.profit_margin * profit.normalize(profit_score)
                    + w.diversity * diversity
                    + w.confidence * rule.confidence,
            );
        }
    }
}

impl Default for MultiObjectiveScorer {
    fn default() -> Self {
        Self::new(&ScoringConfig::default())
    }
}

fn warn_if_unnormalized(weights: &ScoringWeights) {
    if !weights.is_normalized() {
        warn!(total = weights.sum(), "scoring weights don't sum to 1.0");
    }
}

/// Rules grouped by context label, groups and members in first-appearance order.
fn group_by_context_label(rules: Vec<ContextualRule>) -> Vec<Vec<ContextualRule>> {
    let mut index: FxHashMap<String, usize> = FxHashMap::default();
    let mut groups: Vec<Vec<ContextualRule>> = Vec::new();
    for rule in rules {
        let label = rule.context.label();
        let pos = *index.entry(label).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[pos].push(rule);
    }
    groups
}

#[derive(Debug, Clone, Copy)]
struct MinMax {
    min: f64,
    range: f64,
}

impl MinMax {
    fn of(values: impl Iterator<Item = f64>) -> Self {
        let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        if !min.is_finite() || !max.is_finite() {
            return Self { min: 0.0, range: 1.0 };
        }
        let range = if max == min { 1.0 } else { max - min };
        Self { min, range }
    }

    fn normalize(&self, value: f64) -> f64 {
        (value - self.min) / self.range
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_range_normalizes_to_zero() {
        let mm = MinMax::of([2.0, 2.0, 2.0].into_iter());
        assert_eq!(mm.normalize(2.0), 0.0);
    }

    #[test]
    fn min_max_scaling() {
        let mm = MinMax::of([1.0, 3.0, 2.0].into_iter());
        assert_eq!(mm.normalize(3.0), 1.0);
        assert_eq!(mm.normalize(1.0), 0.0);
        assert_eq!(mm.normalize(2.0), 0.5);
    }

    #[test]
    fn empty_input_scores_nothing() {
        assert!(MultiObjectiveScorer::default().score_rules(Vec::new(), &[]).is_empty());
    }
}
