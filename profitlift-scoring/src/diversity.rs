//! In-context diversity: penalizes rules built from items that dominate
//! their own context.

use profitlift_core::models::{Context, ContextualRule};
use rustc_hash::FxHashMap;
use serde::Serialize;

/// Diversity summary for one context.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextDiversityStats {
    pub context: String,
    pub avg_diversity: f64,
    pub min_diversity: f64,
    pub max_diversity: f64,
    pub rules_count: usize,
}

/// How often each item appears among a set of same-context rules.
pub(crate) struct ItemFrequencies<'r> {
    counts: FxHashMap<&'r str, usize>,
    rule_count: usize,
}

impl<'r> ItemFrequencies<'r> {
    pub(crate) fn new<I>(rules: I) -> Self
    where
        I: IntoIterator<Item = &'r ContextualRule>,
    {
        let mut counts: FxHashMap<&'r str, usize> = FxHashMap::default();
        let mut rule_count = 0;
        for rule in rules {
            rule_count += 1;
            // A rule's sides are disjoint, so each item is counted once per rule.
            for item in rule.antecedent.iter().chain(rule.consequent.iter()) {
                *counts.entry(item).or_insert(0) += 1;
            }
        }
        Self { counts, rule_count }
    }

    /// 1 − mean item frequency, clamped to [0, 1]. Lone rules score 1.
    pub(crate) fn diversity_of(&self, rule: &ContextualRule) -> f64 {
        if self.rule_count <= 1 {
            return 1.0;
        }
        let items = rule.items();
        if items.is_empty() {
            return 1.0;
        }
        let total: f64 = items
            .iter()
            .map(|item| self.counts.get(item).copied().unwrap_or(0) as f64 / self.rule_count as f64)
            .sum();
        (1.0 - total / items.len() as f64).clamp(0.0, 1.0)
    }
}

/// Scores diversity strictly within a rule's own context.
#[derive(Debug, Clone, Default)]
pub struct DiversityScorer;

impl DiversityScorer {
    pub fn new() -> Self {
        Self
    }

    /// Diversity of `rule` among the members of `context_rules` that share
    /// its context. Rules from other contexts are ignored.
    pub fn calculate_diversity(
        &self,
        rule: &ContextualRule,
        context_rules: &[ContextualRule],
    ) -> f64 {
        ItemFrequencies::new(context_rules.iter().filter(|r| r.context == rule.context))
            .diversity_of(rule)
    }

    /// Per-context avg/min/max diversity, contexts in first-appearance order.
    pub fn context_diversity_stats(&self, rules: &[ContextualRule]) -> Vec<ContextDiversityStats> {
        let mut order: Vec<&Context> = Vec::new();
        let mut groups: FxHashMap<&Context, Vec<&ContextualRule>> = FxHashMap::default();
        for rule in rules {
            groups
                .entry(&rule.context)
                .or_insert_with(|| {
                    order.push(&rule.context);
                    Vec::new()
                })
                .push(rule);
        }

        order
            .into_iter()
            .filter_map(|context| {
                let members = groups.remove(context)?;
                let frequencies = ItemFrequencies::new(members.iter().copied());
                let scores: Vec<f64> =
                    members.iter().map(|r| frequencies.diversity_of(r)).collect();
                let (min, max) = scores.iter().fold(
                    (f64::INFINITY, f64::NEG_INFINITY),
                    |(lo, hi), &s| (lo.min(s), hi.max(s)),
                );
                Some(ContextDiversityStats {
                    context: context.label(),
                    avg_diversity: scores.iter().sum::<f64>() / scores.len() as f64,
                    min_diversity: min,
                    max_diversity: max,
                    rules_count: members.len(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use profitlift_core::models::ItemSet;

    fn rule(a: &str, c: &str, ctx: Context) -> ContextualRule {
        ContextualRule::try_new(ItemSet::single(a), ItemSet::single(c), 0.1, 0.5, 1.2, ctx).unwrap()
    }

    #[test]
    fn ubiquitous_items_score_low() {
        let ctx = Context::overall();
        let rules = vec![
            rule("milk", "bread", ctx.clone()),
            rule("milk", "eggs", ctx.clone()),
            rule("milk", "tea", ctx.clone()),
            rule("chips", "soda", ctx),
        ];
        let scorer = DiversityScorer::new();
        let common = scorer.calculate_diversity(&rules[0], &rules);
        let rare = scorer.calculate_diversity(&rules[3], &rules);
        // milk 3/4, bread 1/4 → 1 − 0.5
        assert!((common - 0.5).abs() < 1e-12);
        // chips 1/4, soda 1/4 → 0.75
        assert!((rare - 0.75).abs() < 1e-12);
    }

    #[test]
    fn stats_cover_each_context() {
        let rules = vec![
            rule("a", "b", Context::overall()),
            rule("a", "c", Context::overall()),
            rule("a", "b", Context::overall().with_store("1")),
        ];
        let stats = DiversityScorer::new().context_diversity_stats(&rules);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].context, "Overall");
        assert_eq!(stats[0].rules_count, 2);
        assert!((stats[0].avg_diversity - 0.25).abs() < 1e-12);
        assert_eq!(stats[1].max_diversity, 1.0);
    }
}
