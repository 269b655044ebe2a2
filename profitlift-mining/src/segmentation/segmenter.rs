//! Partitions transaction rows into per-context segments.

use std::hash::Hash;

use profitlift_core::constants::{FESTIVAL_MIN_ROWS_FLOOR, FESTIVAL_PAIR_MIN_ROWS_FLOOR};
use profitlift_core::models::{valid_quarter, Context, DayType, TimeBin, TransactionRecord};
use rustc_hash::FxHashMap;
use tracing::debug;

use super::SegmentStats;

/// One context and the rows that fall inside it.
#[derive(Debug, Clone)]
pub struct Segment<'a> {
    pub context: Context,
    pub rows: Vec<&'a TransactionRecord>,
}

/// Segments in generation order with lookup by context.
#[derive(Debug, Clone, Default)]
pub struct SegmentMap<'a> {
    segments: Vec<Segment<'a>>,
    index: FxHashMap<Context, usize>,
}

impl<'a> SegmentMap<'a> {
    fn insert(&mut self, context: Context, rows: Vec<&'a TransactionRecord>) {
        match self.index.get(&context) {
            Some(&pos) => self.segments[pos].rows = rows,
            None => {
                self.index.insert(context.clone(), self.segments.len());
                self.segments.push(Segment { context, rows });
            }
        }
    }

    /// Segment for `context`, if it met its threshold.
    pub fn get(&self, context: &Context) -> Option<&Segment<'a>> {
        self.index.get(context).map(|&pos| &self.segments[pos])
    }

    /// Whether `context` was kept as a segment.
    pub fn contains(&self, context: &Context) -> bool {
        self.index.contains_key(context)
    }

    /// Number of segments, Overall included.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Never true for a map built by [`ContextSegmenter::segment`].
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segments in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Segment<'a>> {
        self.segments.iter()
    }

    /// Segment contexts in insertion order.
    pub fn contexts(&self) -> impl Iterator<Item = &Context> {
        self.segments.iter().map(|s| &s.context)
    }

    /// Segments as a slice, Overall first.
    pub fn as_slice(&self) -> &[Segment<'a>] {
        &self.segments
    }
}

impl<'a, 's> IntoIterator for &'s SegmentMap<'a> {
    type Item = &'s Segment<'a>;
    type IntoIter = std::slice::Iter<'s, Segment<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

/// Builds context segments, dropping any below its row threshold.
///
/// Never fails: a dimension no row carries simply produces no segments.
#[derive(Debug, Clone)]
pub struct ContextSegmenter {
    min_rows: usize,
}

impl ContextSegmenter {
    /// Segmenter keeping non-festival segments with at least `min_rows` rows.
    pub fn new(min_rows: usize) -> Self {
        Self { min_rows }
    }

    /// Row threshold for store, time bin, day type and quarter segments.
    pub fn min_rows(&self) -> usize {
        self.min_rows
    }

    fn festival_threshold(&self) -> usize {
        (self.min_rows / 2).max(FESTIVAL_MIN_ROWS_FLOOR)
    }

    fn festival_pair_threshold(&self) -> usize {
        (self.min_rows / 3).max(FESTIVAL_PAIR_MIN_ROWS_FLOOR)
    }

    /// Segment `rows` up to `max_depth` (0 overall, 1 single, 2 pairs).
    ///
    /// Overall is always first. Single dimensions follow in the order store,
    /// time bin, day type, quarter, festival; then store × time bin,
    /// day type × time bin, store × quarter, festival × time bin. Values
    /// within a family keep their first-appearance order.
    pub fn segment<'a>(&self, rows: &'a [TransactionRecord], max_depth: u8) -> SegmentMap<'a> {
        let mut segments = SegmentMap::default();
        segments.insert(Context::overall(), rows.iter().collect());

        if max_depth >= 1 {
            self.add_single_dimension_segments(rows, &mut segments);
        }
        if max_depth >= 2 {
            self.add_pair_segments(rows, &mut segments);
        }

        debug!(
            segments = segments.len(),
            rows = rows.len(),
            max_depth,
            "context segmentation complete"
        );
        segments
    }

    /// Summary statistics for each segment, in segment order.
    pub fn segment_stats(&self, segments: &SegmentMap<'_>) -> Vec<SegmentStats> {
        SegmentStats::for_segments(segments)
    }

    fn add_single_dimension_segments<'a>(
        &self,
        rows: &'a [TransactionRecord],
        segments: &mut SegmentMap<'a>,
    ) {
        let min_rows = self.min_rows;
        add_family(rows, segments, store_of, min_rows, |s| {
            Context::overall().with_store(s)
        });
        add_family(rows, segments, |r| r.time_bin, min_rows, |b| {
            Context::overall().with_time_bin(b)
        });
        add_family(rows, segments, |r| r.day_type, min_rows, |d| {
            Context::overall().with_day_type(d)
        });
        add_family(rows, segments, quarter_of, min_rows, |q| {
            Context::overall().with_quarter(q)
        });
        add_family(rows, segments, festival_of, self.festival_threshold(), |f| {
            Context::overall().with_festival(f)
        });
    }

    fn add_pair_segments<'a>(
        &self,
        rows: &'a [TransactionRecord],
        segments: &mut SegmentMap<'a>,
    ) {
        let min_rows = self.min_rows;
        add_pair_family(
            rows,
            segments,
            store_of,
            |r| r.time_bin,
            min_rows,
            |s, b: TimeBin| Context::overall().with_store(s).with_time_bin(b),
        );
        add_pair_family(
            rows,
            segments,
            |r| r.day_type,
            |r| r.time_bin,
            min_rows,
            |d: DayType, b: TimeBin| Context::overall().with_day_type(d).with_time_bin(b),
        );
        add_pair_family(
            rows,
            segments,
            store_of,
            quarter_of,
            min_rows,
            |s, q: u8| Context::overall().with_store(s).with_quarter(q),
        );
        add_pair_family(
            rows,
            segments,
            festival_of,
            |r| r.time_bin,
            self.festival_pair_threshold(),
            |f, b: TimeBin| Context::overall().with_festival(f).with_time_bin(b),
        );
    }
}

impl Default for ContextSegmenter {
    fn default() -> Self {
        Self::new(100)
    }
}

fn store_of(row: &TransactionRecord) -> Option<&str> {
    row.store_id.as_deref().filter(|s| !s.trim().is_empty())
}

fn festival_of(row: &TransactionRecord) -> Option<&str> {
    row.festival.as_deref().filter(|f| !f.trim().is_empty())
}

fn quarter_of(row: &TransactionRecord) -> Option<u8> {
    row.quarter.and_then(valid_quarter)
}

/// Distinct keys in first-appearance order, plus the rows under each key.
fn partition<'a, K, F>(
    rows: &'a [TransactionRecord],
    key: F,
) -> (Vec<K>, FxHashMap<K, Vec<&'a TransactionRecord>>)
where
    K: Copy + Eq + Hash,
    F: Fn(&'a TransactionRecord) -> Option<K>,
{
    let mut order = Vec::new();
    let mut groups: FxHashMap<K, Vec<&'a TransactionRecord>> = FxHashMap::default();
    for row in rows {
        if let Some(k) = key(row) {
            groups
                .entry(k)
                .or_insert_with(|| {
                    order.push(k);
                    Vec::new()
                })
                .push(row);
        }
    }
    (order, groups)
}

fn add_family<'a, K, F, C>(
    rows: &'a [TransactionRecord],
    segments: &mut SegmentMap<'a>,
    key: F,
    threshold: usize,
    to_context: C,
) where
    K: Copy + Eq + Hash,
    F: Fn(&'a TransactionRecord) -> Option<K>,
    C: Fn(K) -> Context,
{
    let (order, mut groups) = partition(rows, key);
    for k in order {
        let Some(members) = groups.remove(&k) else {
            continue;
        };
        if members.len() >= threshold {
            segments.insert(to_context(k), members);
        }
    }
}

fn add_pair_family<'a, A, B, FA, FB, C>(
    rows: &'a [TransactionRecord],
    segments: &mut SegmentMap<'a>,
    first: FA,
    second: FB,
    threshold: usize,
    to_context: C,
) where
    A: Copy + Eq + Hash,
    B: Copy + Eq + Hash,
    FA: Fn(&'a TransactionRecord) -> Option<A>,
    FB: Fn(&'a TransactionRecord) -> Option<B>,
    C: Fn(A, B) -> Context,
{
    let (first_order, _) = partition(rows, &first);
    let (second_order, _) = partition(rows, &second);
    let (_, mut groups) = partition(rows, |r| Some((first(r)?, second(r)?)));
    for &a in &first_order {
        for &b in &second_order {
            let Some(members) = groups.remove(&(a, b)) else {
                continue;
            };
            if members.len() >= threshold {
                segments.insert(to_context(a, b), members);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(txn: &str, store: &str, bin: TimeBin) -> TransactionRecord {
        TransactionRecord::new(txn, "x", 1.0)
            .with_store(store)
            .with_time_bin(bin)
    }

    #[test]
    fn depth_zero_is_overall_only() {
        let rows = vec![row("t1", "1", TimeBin::Morning)];
        let segments = ContextSegmenter::new(1).segment(&rows, 0);
        assert_eq!(segments.len(), 1);
        assert!(segments.contains(&Context::overall()));
    }

    #[test]
    fn overall_exists_for_empty_input() {
        let segments = ContextSegmenter::new(1).segment(&[], 2);
        assert_eq!(segments.len(), 1);
        assert!(segments.as_slice()[0].rows.is_empty());
    }

    #[test]
    fn first_appearance_order_within_family() {
        let rows = vec![
            row("t1", "B", TimeBin::Morning),
            row("t2", "A", TimeBin::Morning),
        ];
        let segments = ContextSegmenter::new(1).segment(&rows, 1);
        let labels: Vec<String> = segments.contexts().map(Context::label).collect();
        assert_eq!(labels, vec!["Overall", "Store B", "Store A", "Morning"]);
    }

    #[test]
    fn out_of_range_quarter_forms_no_segment() {
        let mut rows = vec![
            row("t1", "A", TimeBin::Morning),
            row("t2", "A", TimeBin::Morning),
        ];
        for r in &mut rows {
            r.quarter = Some(0);
        }
        let segments = ContextSegmenter::new(1).segment(&rows, 2);
        let labels: Vec<String> = segments.contexts().map(Context::label).collect();
        assert_eq!(labels, vec!["Overall", "Store A", "Morning", "Store A + Morning"]);
        assert!(segments.contexts().all(|c| c.quarter().is_none()));
    }

    #[test]
    fn festival_threshold_has_floor() {
        let seg = ContextSegmenter::new(10);
        assert_eq!(seg.festival_threshold(), 20);
        assert_eq!(seg.festival_pair_threshold(), 15);
        let seg = ContextSegmenter::new(100);
        assert_eq!(seg.festival_threshold(), 50);
        assert_eq!(seg.festival_pair_threshold(), 33);
    }
}
