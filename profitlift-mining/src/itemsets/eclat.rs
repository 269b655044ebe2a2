//! Vertical (Eclat) frequent itemset mining over tid-lists.

use profitlift_core::errors::MiningResult;
use profitlift_core::models::{FrequentItemsets, ItemSet};
use profitlift_core::traits::ItemsetMiner;
use smallvec::SmallVec;

use super::{ItemInterner, SupportThreshold};

/// Eclat over interned items.
///
/// Each item carries the sorted list of transaction indices containing it;
/// itemsets grow depth-first by intersecting tid-lists while the
/// intersection stays frequent.
#[derive(Debug, Clone, Default)]
pub struct Eclat {
    max_len: Option<usize>,
}

impl Eclat {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop extending itemsets beyond `max_len` items.
    pub fn with_max_len(mut self, max_len: Option<usize>) -> Self {
        self.max_len = max_len;
        self
    }

    fn extend(
        &self,
        prefix: &SmallVec<[u32; 8]>,
        class: &[(u32, Vec<u32>)],
        threshold: &SupportThreshold,
        out: &mut Vec<(SmallVec<[u32; 8]>, usize)>,
    ) {
        for (i, (item, tids)) in class.iter().enumerate() {
            let mut itemset = prefix.clone();
            itemset.push(*item);
            out.push((itemset.clone(), tids.len()));

            if self.max_len.is_some_and(|max| itemset.len() >= max) {
                continue;
            }
            let next: Vec<(u32, Vec<u32>)> = class[i + 1..]
                .iter()
                .filter_map(|(other, other_tids)| {
                    let shared = intersect(tids, other_tids);
                    threshold
                        .is_frequent(shared.len())
                        .then_some((*other, shared))
                })
                .collect();
            if !next.is_empty() {
                self.extend(&itemset, &next, threshold, out);
            }
        }
    }
}

/// Merge-intersect two sorted tid-lists.
fn intersect(a: &[u32], b: &[u32]) -> Vec<u32> {
    let mut out = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out
}

impl ItemsetMiner for Eclat {
    fn mine(&self, transactions: &[ItemSet], min_support: f64) -> MiningResult<FrequentItemsets> {
        let threshold = SupportThreshold::new(min_support, transactions.len())?;
        let mut pool = FrequentItemsets::new(transactions.len());
        if transactions.is_empty() {
            return Ok(pool);
        }

        let mut interner = ItemInterner::default();
        let encoded = interner.encode_all(transactions);
        let mut tid_lists: Vec<Vec<u32>> = vec![Vec::new(); interner.len()];
        for (tid, ids) in encoded.iter().enumerate() {
            for &id in ids {
                tid_lists[id as usize].push(tid as u32);
            }
        }

        let mut root: Vec<(u32, Vec<u32>)> = tid_lists
            .into_iter()
            .enumerate()
            .map(|(id, tids)| (id as u32, tids))
            .filter(|(_, tids)| threshold.is_frequent(tids.len()))
            .collect();
        // Rarest first keeps intersections small.
        root.sort_by(|a, b| a.1.len().cmp(&b.1.len()).then(a.0.cmp(&b.0)));

        let mut found = Vec::new();
        self.extend(&SmallVec::new(), &root, &threshold, &mut found);

        for (ids, count) in found {
            pool.insert(interner.decode(&ids), count);
        }
        pool.sort();
        Ok(pool)
    }

    fn name(&self) -> &str {
        "eclat"
    }
}
