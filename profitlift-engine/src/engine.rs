//! AnalyticsEngine: the entry point the presentation layer calls.

use std::borrow::Cow;
use std::sync::Arc;

use profitlift_causal::CausalEstimator;
use profitlift_core::config::{MiningConfig, ProfitLiftConfig};
use profitlift_core::errors::{ConfigError, ProfitLiftResult};
use profitlift_core::models::{ContextFilter, ContextualRule, TransactionRecord, UpliftResult};
use profitlift_mining::ContextAwareMiner;
use profitlift_scoring::MultiObjectiveScorer;
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use tracing::{debug, info};

use crate::cache::{RuleCache, RuleCacheKey, RuleSetKind};
use crate::explain;
use crate::query::{RuleQuery, WhatIfScenario};
use crate::report::{BundleRecommendation, DashboardStats, Opportunity, RankedRule, WhatIfResult};

/// Rules shown on the dashboard.
fn dashboard_query() -> RuleQuery {
    RuleQuery {
        min_support: 0.05,
        min_confidence: 0.1,
        min_lift: 1.2,
        limit: 200,
        max_depth: 0,
        ..RuleQuery::default()
    }
}

/// Rules counted towards the profit opportunity.
const PROFIT_OPPORTUNITY_RULES: usize = 20;
/// Monthly basket volume the opportunity is projected over.
const PROFIT_OPPORTUNITY_VOLUME: f64 = 1000.0;
const TOP_OPPORTUNITIES: usize = 5;

/// Mines, scores and estimates uplift on caller-supplied rows.
///
/// Mined rule sets are cached per parameter tuple. The cache is never
/// invalidated automatically; call [`AnalyticsEngine::clear_cache`] after the
/// underlying data changes.
pub struct AnalyticsEngine {
    config: ProfitLiftConfig,
    scorer: MultiObjectiveScorer,
    estimator: CausalEstimator,
    cache: RuleCache,
}

impl AnalyticsEngine {
    /// Engine with an empty rule cache.
    pub fn new(config: ProfitLiftConfig) -> Self {
        Self {
            scorer: MultiObjectiveScorer::new(&config.scoring),
            estimator: CausalEstimator::new(config.causal.clone()),
            cache: RuleCache::new(),
            config,
        }
    }

    /// Configuration the engine was built with.
    pub fn config(&self) -> &ProfitLiftConfig {
        &self.config
    }

    /// Mined rule sets, keyed by mining parameters.
    pub fn cache(&self) -> &RuleCache {
        &self.cache
    }

    /// Drop every cached rule set.
    pub fn clear_cache(&self) {
        self.cache.clear();
        info!("rule cache cleared");
    }

    /// Scored rules with explanations; the first `causal_top_n` carry uplift.
    pub fn rules(&self, rows: &[TransactionRecord], query: &RuleQuery) -> Vec<RankedRule> {
        let rows = filtered(rows, query.filter.as_ref());
        if rows.is_empty() {
            debug!("no transactions matched the query filter");
            return Vec::new();
        }

        let key = RuleCacheKey::new(
            RuleSetKind::Rules,
            query.min_support,
            query.min_confidence,
            query.min_rows_per_context,
            query.max_depth,
        );
        let mined = self.mined_rules(
            &rows,
            key,
            query.min_support,
            query.min_confidence,
            query.min_rows_per_context,
            query.max_depth,
        );

        let max_candidates = query
            .limit
            .saturating_mul(self.config.engine.candidate_multiplier)
            .max(self.config.engine.min_candidates);
        let candidates: Vec<ContextualRule> = mined
            .iter()
            .filter(|r| r.lift >= query.min_lift)
            .take(max_candidates)
            .cloned()
            .collect();
        if candidates.is_empty() {
            return Vec::new();
        }

        let top: Vec<ContextualRule> = self
            .scorer
            .score_rules(candidates, &rows)
            .into_iter()
            .take(query.limit)
            .collect();

        let uplifts = if query.include_causal {
            self.estimator
                .estimate_many(&top, &rows, self.config.engine.causal_top_n)
        } else {
            Vec::new()
        };

        top.into_iter()
            .enumerate()
            .map(|(i, rule)| {
                let uplift = uplifts.get(i).cloned();
                let explanation = explain::rule_explanation(&rule, uplift.as_ref());
                RankedRule {
                    rule,
                    uplift,
                    explanation,
                }
            })
            .collect()
    }

    /// Bundle recommendations from a shallow, higher-support mining pass.
    pub fn bundles(
        &self,
        rows: &[TransactionRecord],
        query: &RuleQuery,
    ) -> Vec<BundleRecommendation> {
        let rows = filtered(rows, query.filter.as_ref());
        if rows.is_empty() {
            return Vec::new();
        }

        let engine = &self.config.engine;
        let min_support = query.min_support.max(engine.bundle_min_support);
        let key = RuleCacheKey::new(
            RuleSetKind::Bundles,
            min_support,
            query.min_confidence,
            query.min_rows_per_context,
            engine.bundle_max_depth,
        );
        let mined = self.mined_rules(
            &rows,
            key,
            min_support,
            query.min_confidence,
            query.min_rows_per_context,
            engine.bundle_max_depth,
        );

        let candidates: Vec<ContextualRule> = mined
            .iter()
            .filter(|r| r.lift >= query.min_lift)
            .cloned()
            .collect();
        if candidates.is_empty() {
            return Vec::new();
        }

        let mut seen = FxHashSet::default();
        let unique: Vec<(usize, ContextualRule)> = self
            .scorer
            .score_rules(candidates, &rows)
            .into_iter()
            .take(query.limit)
            .enumerate()
            .filter(|(_, rule)| seen.insert(rule.key()))
            .collect();

        unique
            .into_par_iter()
            .map(|(rank, rule)| {
                let uplift = (query.include_causal && rank < engine.causal_top_n)
                    .then(|| self.estimator.estimate_uplift(&rule, &rows));
                bundle_from_rule(rule, uplift)
            })
            .collect()
    }

    /// Project the effect of promoting a user-chosen rule in a context.
    ///
    /// Fails only on an invalid scenario: empty or overlapping item sets, or
    /// a discount outside [0, 1].
    pub fn what_if(
        &self,
        rows: &[TransactionRecord],
        scenario: &WhatIfScenario,
    ) -> ProfitLiftResult<WhatIfResult> {
        let discount = scenario.anticipated_discount_pct;
        if !(0.0..=1.0).contains(&discount) {
            return Err(ConfigError::ValidationFailed {
                field: "anticipated_discount_pct".to_string(),
                message: format!("must be within [0, 1], got {discount}"),
            }
            .into());
        }
        let rule = ContextualRule::try_new(
            scenario.antecedent.clone(),
            scenario.consequent.clone(),
            0.0,
            0.0,
            0.0,
            scenario.context.to_context(),
        )?;

        // zero baskets projects no total, same as no traffic at all
        let traffic = scenario.expected_traffic.filter(|&baskets| baskets > 0);
        let rows = filtered(rows, Some(&scenario.context));
        if rows.is_empty() {
            return Ok(WhatIfResult::no_history(traffic.is_some()));
        }

        let uplift = self.estimator.estimate_uplift(&rule, &rows);
        let multiplier = 1.0 - discount;
        let incremental_revenue = uplift.incremental_revenue * multiplier;
        let incremental_margin = uplift.incremental_margin * multiplier;
        let incremental_attach_rate = uplift.incremental_attach_rate;
        let projected_attach_rate = uplift
            .treatment_rate
            .max(uplift.control_rate + incremental_attach_rate);
        let projected_margin_total = traffic.map(|baskets| incremental_margin * baskets as f64);

        let narrative = explain::what_if_narrative(
            &rule,
            projected_attach_rate,
            incremental_attach_rate,
            incremental_margin,
            traffic.zip(projected_margin_total),
        );

        Ok(WhatIfResult {
            projected_attach_rate,
            incremental_attach_rate,
            incremental_revenue,
            incremental_margin,
            projected_margin_total,
            uplift: Some(UpliftResult {
                incremental_revenue,
                incremental_margin,
                ..uplift
            }),
            narrative,
        })
    }

    /// Dashboard headline numbers from an overall-only pass.
    pub fn stats(&self, rows: &[TransactionRecord]) -> DashboardStats {
        let ranked = self.rules(rows, &dashboard_query());
        if ranked.is_empty() {
            return DashboardStats::default();
        }

        let avg_lift = ranked.iter().map(|r| r.rule.lift).sum::<f64>() / ranked.len() as f64;
        let profit_opportunity = ranked
            .iter()
            .take(PROFIT_OPPORTUNITY_RULES)
            .filter_map(|r| r.rule.profit_score)
            .sum::<f64>()
            * PROFIT_OPPORTUNITY_VOLUME;

        DashboardStats {
            avg_lift: round_cents(avg_lift),
            profit_opportunity: round_cents(profit_opportunity),
            active_rules: ranked.len(),
            top_opportunities: ranked
                .iter()
                .take(TOP_OPPORTUNITIES)
                .map(|r| Opportunity {
                    label: format!(
                        "{} + {}",
                        r.rule.antecedent.iter().collect::<Vec<_>>().join(", "),
                        r.rule.consequent.iter().collect::<Vec<_>>().join(", ")
                    ),
                    value: r.rule.profit_score,
                })
                .collect(),
        }
    }

    fn mined_rules(
        &self,
        rows: &[TransactionRecord],
        key: RuleCacheKey,
        min_support: f64,
        min_confidence: f64,
        min_rows_per_context: usize,
        max_depth: u8,
    ) -> Arc<Vec<ContextualRule>> {
        if let Some(rules) = self.cache.get(&key) {
            debug!(kind = ?key.kind(), rules = rules.len(), "rule cache hit");
            return rules;
        }
        let miner = ContextAwareMiner::new(MiningConfig {
            min_support,
            min_confidence,
            min_rows_per_context,
            max_depth,
            ..self.config.mining.clone()
        });
        let rules = miner.mine_all_contexts(rows, max_depth);
        self.cache.put(key, rules)
    }
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self::new(ProfitLiftConfig::default())
    }
}

fn filtered<'a>(
    rows: &'a [TransactionRecord],
    filter: Option<&ContextFilter>,
) -> Cow<'a, [TransactionRecord]> {
    match filter {
        Some(f) if !f.is_empty() => Cow::Owned(f.apply(rows)),
        _ => Cow::Borrowed(rows),
    }
}

fn bundle_from_rule(rule: ContextualRule, uplift: Option<UpliftResult>) -> BundleRecommendation {
    let expected_margin = match &uplift {
        Some(u) => Some(u.incremental_margin),
        None => rule.profit_score,
    };
    let expected_attach_rate = match &uplift {
        Some(u) if u.treatment_rate > 0.0 => u.treatment_rate,
        _ => rule.confidence,
    };
    let narrative = explain::bundle_narrative(
        &rule,
        uplift.as_ref(),
        expected_attach_rate,
        expected_margin.unwrap_or(0.0),
    );
    BundleRecommendation {
        bundle_id: rule.key(),
        anchor_items: rule.antecedent.clone(),
        recommended_items: rule.consequent.clone(),
        context: rule.context.clone(),
        overall_score: rule.overall_score.unwrap_or(0.0),
        expected_margin,
        expected_attach_rate,
        narrative,
        uplift,
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
