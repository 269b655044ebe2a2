use criterion::{criterion_group, criterion_main, Criterion};

use profitlift_core::config::MiningConfig;
use profitlift_mining::ContextAwareMiner;
use profitlift_scoring::MultiObjectiveScorer;

fn bench_score_rules(c: &mut Criterion) {
    let rows = test_fixtures::grocery_dataset(42, 5_000);
    let rules = ContextAwareMiner::new(MiningConfig::default()).mine_all_contexts(&rows, 2);
    let scorer = MultiObjectiveScorer::default();

    c.bench_function("score_rules_depth2_5k_transactions", |b| {
        b.iter(|| scorer.score_rules(rules.clone(), &rows))
    });
}

criterion_group!(benches, bench_score_rules);
criterion_main!(benches);
