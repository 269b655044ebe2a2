//! Prefix-tree (FP-growth) frequent itemset mining.

use profitlift_core::errors::MiningResult;
use profitlift_core::models::{FrequentItemsets, ItemSet};
use profitlift_core::traits::ItemsetMiner;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::{ItemInterner, SupportThreshold};

type Suffix = SmallVec<[u32; 8]>;

/// FP-growth over interned items.
///
/// Transactions are inserted into a prefix tree ordered by descending item
/// frequency; frequent itemsets are extracted recursively from conditional
/// trees built from each item's prefix paths.
#[derive(Debug, Clone, Default)]
pub struct FpGrowth {
    max_len: Option<usize>,
}

impl FpGrowth {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop extending itemsets beyond `max_len` items.
    pub fn with_max_len(mut self, max_len: Option<usize>) -> Self {
        self.max_len = max_len;
        self
    }
}

struct FpNode {
    item: u32,
    count: usize,
    parent: usize,
    children: FxHashMap<u32, usize>,
}

/// Arena-backed FP-tree. Node 0 is the root.
struct FpTree {
    nodes: Vec<FpNode>,
    /// Every node carrying an item.
    header: FxHashMap<u32, Vec<usize>>,
    /// Frequent items, least frequent first.
    items: Vec<(u32, usize)>,
}

const ROOT: usize = 0;

impl FpTree {
    /// Build from weighted id lists, keeping only frequent items.
    fn build(paths: &[(Vec<u32>, usize)], threshold: &SupportThreshold) -> Self {
        let mut counts: FxHashMap<u32, usize> = FxHashMap::default();
        for (items, weight) in paths {
            for &item in items {
                *counts.entry(item).or_insert(0) += weight;
            }
        }
        counts.retain(|_, count| threshold.is_frequent(*count));

        let mut tree = FpTree {
            nodes: vec![FpNode {
                item: u32::MAX,
                count: 0,
                parent: ROOT,
                children: FxHashMap::default(),
            }],
            header: FxHashMap::default(),
            items: Vec::new(),
        };

        let mut ordered: Vec<u32> = Vec::new();
        for (items, weight) in paths {
            ordered.clear();
            ordered.extend(items.iter().copied().filter(|i| counts.contains_key(i)));
            // Descending frequency, ties by id, so every path shares one order.
            ordered.sort_unstable_by(|a, b| counts[b].cmp(&counts[a]).then(a.cmp(b)));
            tree.insert(&ordered, *weight);
        }

        let mut items: Vec<(u32, usize)> = counts.into_iter().collect();
        items.sort_unstable_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)));
        tree.items = items;
        tree
    }

    fn insert(&mut self, path: &[u32], weight: usize) {
        let mut current = ROOT;
        for &item in path {
            let next = match self.nodes[current].children.get(&item) {
                Some(&child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(FpNode {
                        item,
                        count: 0,
                        parent: current,
                        children: FxHashMap::default(),
                    });
                    self.nodes[current].children.insert(item, child);
                    self.header.entry(item).or_default().push(child);
                    child
                }
            };
            self.nodes[next].count += weight;
            current = next;
        }
    }

    /// Prefix paths ending just above each node of `item`, weighted by the node count.
    fn conditional_paths(&self, item: u32) -> Vec<(Vec<u32>, usize)> {
        let Some(nodes) = self.header.get(&item) else {
            return Vec::new();
        };
        nodes
            .iter()
            .filter_map(|&node| {
                let mut path = Vec::new();
                let mut current = self.nodes[node].parent;
                while current != ROOT {
                    path.push(self.nodes[current].item);
                    current = self.nodes[current].parent;
                }
                if path.is_empty() {
                    None
                } else {
                    Some((path, self.nodes[node].count))
                }
            })
            .collect()
    }
}

impl FpGrowth {
    fn grow(
        &self,
        tree: &FpTree,
        suffix: &Suffix,
        threshold: &SupportThreshold,
        out: &mut Vec<(Suffix, usize)>,
    ) {
        for &(item, count) in &tree.items {
            let mut itemset = suffix.clone();
            itemset.push(item);
            out.push((itemset.clone(), count));

            if self.max_len.is_some_and(|max| itemset.len() >= max) {
                continue;
            }
            let paths = tree.conditional_paths(item);
            if paths.is_empty() {
                continue;
            }
            let conditional = FpTree::build(&paths, threshold);
            if !conditional.items.is_empty() {
                self.grow(&conditional, &itemset, threshold, out);
            }
        }
    }
}

impl ItemsetMiner for FpGrowth {
    fn mine(&self, transactions: &[ItemSet], min_support: f64) -> MiningResult<FrequentItemsets> {
        let threshold = SupportThreshold::new(min_support, transactions.len())?;
        let mut pool = FrequentItemsets::new(transactions.len());
        if transactions.is_empty() {
            return Ok(pool);
        }

        let mut interner = ItemInterner::default();
        let paths: Vec<(Vec<u32>, usize)> = interner
            .encode_all(transactions)
            .into_iter()
            .filter(|ids| !ids.is_empty())
            .map(|ids| (ids, 1))
            .collect();

        let tree = FpTree::build(&paths, &threshold);
        let mut found = Vec::new();
        self.grow(&tree, &Suffix::new(), &threshold, &mut found);

        for (ids, count) in found {
            pool.insert(interner.decode(&ids), count);
        }
        pool.sort();
        Ok(pool)
    }

    fn name(&self) -> &str {
        "fp-growth"
    }
}
