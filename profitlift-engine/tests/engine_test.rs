//! End-to-end tests for the analytics engine.

use profitlift_core::errors::{ProfitLiftError, ProfitLiftErrorCode};
use profitlift_core::models::{ContextFilter, ItemSet};
use profitlift_engine::{AnalyticsEngine, RuleQuery, WhatIfScenario};
use test_fixtures::{grocery_dataset, uplift_dataset};

fn items(names: &[&str]) -> ItemSet {
    names.iter().copied().collect()
}

#[test]
fn rules_are_ranked_capped_and_partially_estimated() {
    let rows = grocery_dataset(42, 1_500);
    let engine = AnalyticsEngine::default();
    let ranked = engine.rules(&rows, &RuleQuery::default());

    assert!(!ranked.is_empty());
    assert!(ranked.len() <= 25);
    for pair in ranked.windows(2) {
        assert!(pair[0].rule.overall_score >= pair[1].rule.overall_score);
    }
    for (i, r) in ranked.iter().enumerate() {
        assert!(r.rule.lift >= 1.0);
        assert_eq!(r.uplift.is_some(), i < 10, "rank {i}");
        assert!(r.explanation.starts_with("When shoppers buy"));
    }
}

#[test]
fn causal_estimation_can_be_disabled() {
    let rows = grocery_dataset(42, 1_000);
    let query = RuleQuery {
        include_causal: false,
        ..Default::default()
    };
    let ranked = AnalyticsEngine::default().rules(&rows, &query);
    assert!(!ranked.is_empty());
    assert!(ranked.iter().all(|r| r.uplift.is_none()));
}

#[test]
fn unbounded_limit_keeps_every_candidate() {
    let rows = grocery_dataset(42, 1_000);
    let engine = AnalyticsEngine::default();
    let capped = engine.rules(
        &rows,
        &RuleQuery {
            include_causal: false,
            ..Default::default()
        },
    );
    let unbounded = engine.rules(
        &rows,
        &RuleQuery {
            limit: usize::MAX,
            include_causal: false,
            ..Default::default()
        },
    );
    assert!(unbounded.len() >= capped.len());
    for pair in unbounded.windows(2) {
        assert!(pair[0].rule.overall_score >= pair[1].rule.overall_score);
    }
}

#[test]
fn min_lift_filters_candidates() {
    let rows = grocery_dataset(7, 1_000);
    let query = RuleQuery {
        min_lift: 2.0,
        include_causal: false,
        ..Default::default()
    };
    let ranked = AnalyticsEngine::default().rules(&rows, &query);
    assert!(ranked.iter().all(|r| r.rule.lift >= 2.0));
}

#[test]
fn cache_holds_one_entry_per_parameter_tuple_until_cleared() {
    let rows = grocery_dataset(42, 800);
    let engine = AnalyticsEngine::default();
    let query = RuleQuery {
        include_causal: false,
        ..Default::default()
    };

    let first = engine.rules(&rows, &query);
    assert_eq!(engine.cache().len(), 1);
    let second = engine.rules(&rows, &query);
    assert_eq!(first.len(), second.len());
    assert_eq!(engine.cache().len(), 1);

    engine.bundles(&rows, &query);
    assert_eq!(engine.cache().len(), 2);

    engine.rules(&rows, &RuleQuery { min_confidence: 0.5, ..query.clone() });
    assert_eq!(engine.cache().len(), 3);

    engine.clear_cache();
    assert!(engine.cache().is_empty());
}

#[test]
fn filter_matching_nothing_returns_nothing() {
    let rows = grocery_dataset(42, 500);
    let query = RuleQuery {
        filter: Some(ContextFilter {
            store_id: Some("99".into()),
            ..Default::default()
        }),
        ..Default::default()
    };
    let engine = AnalyticsEngine::default();
    assert!(engine.rules(&rows, &query).is_empty());
    assert!(engine.bundles(&rows, &query).is_empty());
    assert!(engine.cache().is_empty());
}

#[test]
fn bundles_are_unique_and_bounded() {
    let rows = grocery_dataset(42, 1_500);
    let query = RuleQuery {
        limit: 10,
        ..Default::default()
    };
    let bundles = AnalyticsEngine::default().bundles(&rows, &query);

    assert!(!bundles.is_empty());
    assert!(bundles.len() <= 10);
    let mut ids: Vec<&str> = bundles.iter().map(|b| b.bundle_id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), bundles.len());
    for bundle in &bundles {
        assert!(bundle.context.is_overall());
        assert!(bundle.anchor_items.is_disjoint(&bundle.recommended_items));
        assert!((0.0..=1.0).contains(&bundle.expected_attach_rate));
        assert!(!bundle.narrative.is_empty());
    }
}

#[test]
fn what_if_projects_discounted_margin() {
    let rows = uplift_dataset(42, 200, 400, 0.8, 0.2);
    let engine = AnalyticsEngine::default();
    let scenario = WhatIfScenario::new(items(&["chips"]), items(&["soda"])).with_traffic(1_000);

    let full = engine.what_if(&rows, &scenario).unwrap();
    let half = engine.what_if(&rows, &scenario.clone().with_discount(0.5)).unwrap();

    let uplift = full.uplift.clone().unwrap();
    assert!(full.incremental_attach_rate > 0.0);
    assert!(full.projected_attach_rate >= uplift.treatment_rate);
    assert!((half.incremental_margin - full.incremental_margin * 0.5).abs() < 1e-9);
    assert!((half.incremental_revenue - full.incremental_revenue * 0.5).abs() < 1e-9);
    assert_eq!(half.incremental_attach_rate, full.incremental_attach_rate);
    let total = full.projected_margin_total.unwrap();
    assert!((total - full.incremental_margin * 1_000.0).abs() < 1e-6);
    assert!(full.narrative.contains("overall shopper base"));
    assert!(full.narrative.contains("Over roughly 1,000 baskets"));
}

#[test]
fn what_if_without_history() {
    let rows = uplift_dataset(42, 50, 50, 0.8, 0.2);
    let scenario = WhatIfScenario::new(items(&["chips"]), items(&["soda"]))
        .with_context(ContextFilter {
            store_id: Some("missing".into()),
            ..Default::default()
        })
        .with_traffic(500);
    let result = AnalyticsEngine::default().what_if(&rows, &scenario).unwrap();
    assert_eq!(result.projected_attach_rate, 0.0);
    assert_eq!(result.projected_margin_total, Some(0.0));
    assert!(result.uplift.is_none());

    let no_baskets = scenario.with_traffic(0);
    let result = AnalyticsEngine::default().what_if(&rows, &no_baskets).unwrap();
    assert_eq!(result.projected_margin_total, None);
}

#[test]
fn zero_traffic_projects_no_total() {
    let rows = uplift_dataset(42, 200, 400, 0.8, 0.2);
    let scenario = WhatIfScenario::new(items(&["chips"]), items(&["soda"])).with_traffic(0);
    let result = AnalyticsEngine::default().what_if(&rows, &scenario).unwrap();
    assert!(result.uplift.is_some());
    assert_eq!(result.projected_margin_total, None);
    assert!(!result.narrative.contains("Over roughly"));
}

#[test]
fn invalid_scenarios_are_rejected() {
    let engine = AnalyticsEngine::default();
    let overlapping = WhatIfScenario::new(items(&["chips"]), items(&["chips"]));
    let err = engine.what_if(&[], &overlapping).unwrap_err();
    assert!(matches!(err, ProfitLiftError::Mining(_)));
    assert_eq!(err.error_code(), "INVALID_RULE");

    let discount = WhatIfScenario::new(items(&["chips"]), items(&["soda"])).with_discount(1.5);
    let err = engine.what_if(&[], &discount).unwrap_err();
    assert!(matches!(err, ProfitLiftError::Config(_)));
}

#[test]
fn stats_summarise_dashboard_rules() {
    let engine = AnalyticsEngine::default();
    assert_eq!(engine.stats(&[]), Default::default());

    let rows = grocery_dataset(42, 1_500);
    let stats = engine.stats(&rows);
    assert!(stats.active_rules > 0);
    assert!(stats.avg_lift >= 1.2);
    assert!(stats.top_opportunities.len() <= 5);
    assert!(stats.profit_opportunity >= 0.0);
    assert!(stats.top_opportunities.iter().all(|o| o.label.contains(" + ")));
}

#[test]
fn ranked_rules_serialize() {
    let rows = grocery_dataset(3, 600);
    let ranked = AnalyticsEngine::default().rules(&rows, &RuleQuery::default());
    let json = serde_json::to_string(&ranked).unwrap();
    assert!(json.contains("\"explanation\""));
}
