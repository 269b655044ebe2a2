//! Integration tests for the simulated-experiment uplift estimator.

use profitlift_causal::{CausalEstimator, TreatmentSimulator, FEATURE_NAMES};
use profitlift_core::config::CausalConfig;
use profitlift_core::models::{Context, ContextualRule, ItemSet, UpliftResult};
use test_fixtures::uplift_dataset;

fn chips_to_soda() -> ContextualRule {
    ContextualRule::try_new(
        ItemSet::single("chips"),
        ItemSet::single("soda"),
        0.2,
        0.7,
        1.5,
        Context::overall(),
    )
    .unwrap()
}

#[test]
fn planted_effect_is_detected() {
    let rows = uplift_dataset(42, 200, 400, 0.8, 0.2);
    let result = CausalEstimator::default().estimate_uplift(&chips_to_soda(), &rows);

    assert!(result.is_significant());
    assert!(result.treatment_rate > result.control_rate);
    assert!(result.incremental_attach_rate > 0.2, "{result:?}");
    assert!((result.incremental_revenue - result.incremental_attach_rate * 35.0).abs() < 1e-9);
    assert!((result.incremental_margin - result.incremental_revenue * 0.30).abs() < 1e-9);

    let (lower, upper) = result.confidence_interval.unwrap();
    assert!(lower <= upper);
}

#[test]
fn unreachable_threshold_zeroes_incremental_metrics() {
    let rows = uplift_dataset(42, 200, 400, 0.8, 0.2);
    let estimator = CausalEstimator::new(CausalConfig {
        min_incremental_lift: 1.0,
        ..Default::default()
    });
    let result = estimator.estimate_uplift(&chips_to_soda(), &rows);

    assert_eq!(result.incremental_attach_rate, 0.0);
    assert_eq!(result.incremental_revenue, 0.0);
    assert_eq!(result.incremental_margin, 0.0);
    assert_ne!(result.treatment_rate, result.control_rate);
    assert!(result.sample_size > 0);
}

#[test]
fn empty_frame_is_all_zero() {
    let result = CausalEstimator::default().estimate_uplift(&chips_to_soda(), &[]);
    assert_eq!(result.sample_size, 0);
    assert_eq!(result, UpliftResult::zeroed(0));
}

#[test]
fn too_few_antecedent_baskets_is_zeroed() {
    let rows = uplift_dataset(1, 9, 50, 0.9, 0.1);
    let result = CausalEstimator::default().estimate_uplift(&chips_to_soda(), &rows);
    assert_eq!(result, UpliftResult::zeroed(0));
}

#[test]
fn estimates_are_reproducible() {
    let rows = uplift_dataset(3, 80, 160, 0.7, 0.3);
    let estimator = CausalEstimator::default();
    assert_eq!(
        estimator.estimate_uplift(&chips_to_soda(), &rows),
        estimator.estimate_uplift(&chips_to_soda(), &rows)
    );
}

#[test]
fn sample_size_counts_both_arms() {
    let rows = uplift_dataset(5, 100, 200, 0.8, 0.2);
    let experiment = TreatmentSimulator::default().simulate_experiment(&rows, &chips_to_soda());
    let result = CausalEstimator::default().estimate_uplift(&chips_to_soda(), &rows);
    assert_eq!(result.sample_size, experiment.sample_size());
    assert_eq!(experiment.treatment.len(), 70);
}

#[test]
fn fitted_model_scores_individual_records() {
    let rows = uplift_dataset(42, 200, 400, 0.8, 0.2);
    let estimated = CausalEstimator::default().estimate_with_model(&chips_to_soda(), &rows);
    let model = estimated.model.expect("model fitted on sufficient data");
    assert!(model.is_fitted());

    let record = vec![3.0, 30.0, 0.0, 12.0];
    assert_eq!(record.len(), FEATURE_NAMES.len());
    let uplift = model.predict_uplift(&[record]).unwrap();
    assert_eq!(uplift.len(), 1);
    assert!((-1.0..=1.0).contains(&uplift[0]));
}

#[test]
fn estimate_many_respects_top_n_and_order() {
    let rows = uplift_dataset(42, 200, 400, 0.8, 0.2);
    let other = ContextualRule::try_new(
        ItemSet::single("tea"),
        ItemSet::single("soda"),
        0.1,
        0.3,
        1.0,
        Context::overall(),
    )
    .unwrap();
    let rules = vec![chips_to_soda(), other.clone(), chips_to_soda()];
    let estimator = CausalEstimator::default();

    let results = estimator.estimate_many(&rules, &rows, 2);
    assert_eq!(results.len(), 2);
    assert_eq!(results[0], estimator.estimate_uplift(&chips_to_soda(), &rows));
    assert_eq!(results[1], estimator.estimate_uplift(&other, &rows));
}
