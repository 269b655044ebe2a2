//! ContextAwareMiner: segments, mines and tags rules across every context.

use std::panic::{catch_unwind, AssertUnwindSafe};

use profitlift_core::config::MiningConfig;
use profitlift_core::errors::{MiningError, MiningResult};
use profitlift_core::mining_span;
use profitlift_core::models::{group_by_transaction, ContextualRule, ItemSet, TransactionRecord};
use profitlift_core::traits::ItemsetMiner;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::itemsets;
use crate::rules::RuleGenerator;
use crate::segmentation::{ContextSegmenter, Segment, SegmentStats};

/// Orchestrates segmentation, itemset mining and rule generation.
///
/// A failing or panicking segment contributes no rules; the pass continues
/// with every other segment.
pub struct ContextAwareMiner {
    config: MiningConfig,
    segmenter: ContextSegmenter,
    backend: Box<dyn ItemsetMiner>,
}

impl ContextAwareMiner {
    /// Miner using the backend selected by `config.strategy`.
    pub fn new(config: MiningConfig) -> Self {
        let backend = itemsets::backend_for(config.strategy, config.max_itemset_len);
        Self::with_backend(config, backend)
    }

    /// Miner with an explicit itemset backend.
    pub fn with_backend(config: MiningConfig, backend: Box<dyn ItemsetMiner>) -> Self {
        Self {
            segmenter: ContextSegmenter::new(config.min_rows_per_context),
            config,
            backend,
        }
    }

    /// Mining settings in use.
    pub fn config(&self) -> &MiningConfig {
        &self.config
    }

    /// Segmenter built from `min_rows_per_context`.
    pub fn segmenter(&self) -> &ContextSegmenter {
        &self.segmenter
    }

    /// Name of the itemset mining backend.
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Mine every segment up to `max_depth` and return all context-tagged rules.
    ///
    /// Rules come out in segment order, then generation order within a
    /// segment, whether or not segments run in parallel.
    pub fn mine_all_contexts(
        &self,
        rows: &[TransactionRecord],
        max_depth: u8,
    ) -> Vec<ContextualRule> {
        let segments = self.segmenter.segment(rows, max_depth);
        info!(
            segments = segments.len(),
            backend = self.backend.name(),
            "created context segments"
        );

        let per_segment: Vec<Vec<ContextualRule>> = if self.config.parallel {
            segments
                .as_slice()
                .par_iter()
                .map(|segment| self.mine_isolated(segment))
                .collect()
        } else {
            segments
                .iter()
                .map(|segment| self.mine_isolated(segment))
                .collect()
        };

        let rules: Vec<ContextualRule> = per_segment.into_iter().flatten().collect();
        info!(rules = rules.len(), "total rules found across all contexts");
        rules
    }

    /// Segment statistics for `rows` at `max_depth`.
    pub fn context_stats(&self, rows: &[TransactionRecord], max_depth: u8) -> Vec<SegmentStats> {
        let segments = self.segmenter.segment(rows, max_depth);
        self.segmenter.segment_stats(&segments)
    }

    fn mine_isolated(&self, segment: &Segment<'_>) -> Vec<ContextualRule> {
        let outcome = catch_unwind(AssertUnwindSafe(|| self.mine_segment(segment)));
        let result = match outcome {
            Ok(result) => result,
            Err(panic) => Err(MiningError::SegmentFailed {
                context: segment.context.label(),
                message: panic_message(panic.as_ref()),
            }),
        };
        match result {
            Ok(rules) => rules,
            Err(e) => {
                warn!(context = %segment.context, error = %e, "error mining context");
                Vec::new()
            }
        }
    }

    /// Mine one segment. Too few transactions yields no rules, not an error.
    pub fn mine_segment(&self, segment: &Segment<'_>) -> MiningResult<Vec<ContextualRule>> {
        let transactions: Vec<ItemSet> = group_by_transaction(segment.rows.iter().copied())
            .iter()
            .map(|basket| basket.items())
            .filter(|items| !items.is_empty())
            .collect();

        let span = mining_span!(segment.context, transactions.len());
        let _guard = span.enter();

        if transactions.len() < self.config.min_transactions_per_segment {
            debug!(
                context = %segment.context,
                transactions = transactions.len(),
                "skipping context: too few transactions"
            );
            return Ok(Vec::new());
        }

        let itemsets = self.backend.mine(&transactions, self.config.min_support)?;
        if itemsets.is_empty() {
            debug!(context = %segment.context, "no frequent itemsets found");
            return Ok(Vec::new());
        }

        let generator = RuleGenerator::new(self.config.min_confidence)?;
        let rules = generator
            .generate_rules(&itemsets, &transactions)?
            .into_iter()
            .map(|rule| rule.into_contextual(segment.context.clone()))
            .collect::<MiningResult<Vec<_>>>()?;

        debug!(context = %segment.context, rules = rules.len(), "mined context");
        Ok(rules)
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic with non-string payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use profitlift_core::models::{Context, FrequentItemsets};

    struct PanickingMiner;

    impl ItemsetMiner for PanickingMiner {
        fn mine(&self, _: &[ItemSet], _: f64) -> MiningResult<FrequentItemsets> {
            panic!("backend exploded");
        }
        fn name(&self) -> &str {
            "panicking"
        }
    }

    fn rows(n: usize) -> Vec<TransactionRecord> {
        (0..n)
            .flat_map(|i| {
                let txn = format!("t{i}");
                [
                    TransactionRecord::new(txn.clone(), "chips", 20.0),
                    TransactionRecord::new(txn, "soda", 30.0),
                ]
            })
            .collect()
    }

    #[test]
    fn skips_segments_with_too_few_transactions() {
        let miner = ContextAwareMiner::new(MiningConfig {
            min_rows_per_context: 1,
            ..Default::default()
        });
        assert!(miner.mine_all_contexts(&rows(4), 0).is_empty());
        assert!(!miner.mine_all_contexts(&rows(5), 0).is_empty());
    }

    #[test]
    fn panicking_backend_yields_no_rules() {
        let miner = ContextAwareMiner::with_backend(
            MiningConfig {
                min_rows_per_context: 1,
                parallel: false,
                ..Default::default()
            },
            Box::new(PanickingMiner),
        );
        assert!(miner.mine_all_contexts(&rows(10), 0).is_empty());
    }

    #[test]
    fn rules_carry_segment_context() {
        let data: Vec<TransactionRecord> =
            rows(10).into_iter().map(|r| r.with_store("9")).collect();
        let miner = ContextAwareMiner::new(MiningConfig {
            min_rows_per_context: 1,
            ..Default::default()
        });
        let rules = miner.mine_all_contexts(&data, 1);
        assert!(rules.iter().any(|r| r.context == Context::overall()));
        assert!(rules.iter().any(|r| r.context == Context::overall().with_store("9")));
    }
}
