use criterion::{criterion_group, criterion_main, Criterion};

use profitlift_core::config::{MiningConfig, MiningStrategy};
use profitlift_core::models::{group_by_transaction, ItemSet};
use profitlift_core::traits::ItemsetMiner;
use profitlift_mining::{ContextAwareMiner, Eclat, FpGrowth};

fn bench_backends(c: &mut Criterion) {
    let rows = test_fixtures::grocery_dataset(42, 5_000);
    let transactions: Vec<ItemSet> = group_by_transaction(&rows)
        .iter()
        .map(|b| b.items())
        .collect();

    c.bench_function("fp_growth_5k_transactions", |b| {
        b.iter(|| FpGrowth::new().mine(&transactions, 0.01).unwrap())
    });
    c.bench_function("eclat_5k_transactions", |b| {
        b.iter(|| Eclat::new().mine(&transactions, 0.01).unwrap())
    });
}

fn bench_context_pass(c: &mut Criterion) {
    let rows = test_fixtures::grocery_dataset(42, 5_000);
    for strategy in [MiningStrategy::FpGrowth, MiningStrategy::Eclat] {
        let miner = ContextAwareMiner::new(MiningConfig {
            strategy,
            ..Default::default()
        });
        c.bench_function(&format!("mine_all_contexts_depth2_{strategy:?}"), |b| {
            b.iter(|| miner.mine_all_contexts(&rows, 2))
        });
    }
}

criterion_group!(benches, bench_backends, bench_context_pass);
criterion_main!(benches);
