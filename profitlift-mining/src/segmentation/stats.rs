//! Per-segment summary statistics.

use profitlift_core::models::Context;
use rustc_hash::FxHashSet;
use serde::Serialize;

use super::SegmentMap;

/// Size and shape of one segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentStats {
    pub context: Context,
    pub label: String,
    pub row_count: usize,
    pub transaction_count: usize,
    pub unique_stores: usize,
    /// Rows per transaction.
    pub avg_basket_size: f64,
    pub is_festival: bool,
}

impl SegmentStats {
    /// Stats for each segment, in segment order.
    pub fn for_segments(segments: &SegmentMap<'_>) -> Vec<SegmentStats> {
        segments
            .iter()
            .map(|segment| {
                let transactions: FxHashSet<&str> = segment
                    .rows
                    .iter()
                    .map(|r| r.transaction_id.as_str())
                    .collect();
                let stores: FxHashSet<&str> = segment
                    .rows
                    .iter()
                    .filter_map(|r| r.store_id.as_deref())
                    .collect();
                let avg_basket_size = if transactions.is_empty() {
                    0.0
                } else {
                    segment.rows.len() as f64 / transactions.len() as f64
                };
                SegmentStats {
                    label: segment.context.label(),
                    is_festival: segment.context.festival().is_some(),
                    context: segment.context.clone(),
                    row_count: segment.rows.len(),
                    transaction_count: transactions.len(),
                    unique_stores: stores.len(),
                    avg_basket_size,
                }
            })
            .collect()
    }
}
