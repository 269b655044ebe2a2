use criterion::{criterion_group, criterion_main, Criterion};

use profitlift_causal::CausalEstimator;
use profitlift_core::models::{Context, ContextualRule, ItemSet};

fn bench_estimate_uplift(c: &mut Criterion) {
    let rows = test_fixtures::uplift_dataset(42, 1_000, 2_000, 0.8, 0.2);
    let rule = ContextualRule::try_new(
        ItemSet::single("chips"),
        ItemSet::single("soda"),
        0.3,
        0.8,
        1.5,
        Context::overall(),
    )
    .expect("valid rule");
    let estimator = CausalEstimator::default();

    c.bench_function("estimate_uplift_3k_transactions", |b| {
        b.iter(|| estimator.estimate_uplift(&rule, &rows))
    });
}

criterion_group!(benches, bench_estimate_uplift);
criterion_main!(benches);
