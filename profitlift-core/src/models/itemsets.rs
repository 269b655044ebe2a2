//! Frequent itemset pool shared by the mining backends and the rule generator.

use rustc_hash::FxHashMap;

use super::ItemSet;

/// An itemset with its absolute and relative support.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequentItemset {
    pub items: ItemSet,
    pub count: usize,
    pub support: f64,
}

/// All frequent itemsets found in one transaction list.
#[derive(Debug, Clone, Default)]
pub struct FrequentItemsets {
    itemsets: Vec<FrequentItemset>,
    index: FxHashMap<ItemSet, usize>,
    transaction_count: usize,
}

impl FrequentItemsets {
    /// Empty collection over `transaction_count` transactions.
    pub fn new(transaction_count: usize) -> Self {
        Self {
            itemsets: Vec::new(),
            index: FxHashMap::default(),
            transaction_count,
        }
    }

    /// Record `items` seen in `count` transactions. Re-inserting replaces the count.
    pub fn insert(&mut self, items: ItemSet, count: usize) {
        let support = if self.transaction_count == 0 {
            0.0
        } else {
            count as f64 / self.transaction_count as f64
        };
        match self.index.get(&items) {
            Some(&pos) => {
                self.itemsets[pos].count = count;
                self.itemsets[pos].support = support;
            }
            None => {
                self.index.insert(items.clone(), self.itemsets.len());
                self.itemsets.push(FrequentItemset {
                    items,
                    count,
                    support,
                });
            }
        }
    }

    /// Relative support of `items`, if frequent.
    pub fn support_of(&self, items: &ItemSet) -> Option<f64> {
        self.index.get(items).map(|&pos| self.itemsets[pos].support)
    }

    /// Absolute count of `items`, if frequent.
    pub fn count_of(&self, items: &ItemSet) -> Option<usize> {
        self.index.get(items).map(|&pos| self.itemsets[pos].count)
    }

    /// Denominator used for support.
    pub fn transaction_count(&self) -> usize {
        self.transaction_count
    }

    pub fn len(&self) -> usize {
        self.itemsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.itemsets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FrequentItemset> {
        self.itemsets.iter()
    }

    /// Order by size, then items, so output never depends on discovery order.
    pub fn sort(&mut self) {
        self.itemsets
            .sort_by(|a, b| a.items.len().cmp(&b.items.len()).then_with(|| a.items.cmp(&b.items)));
        self.index = self
            .itemsets
            .iter()
            .enumerate()
            .map(|(pos, fi)| (fi.items.clone(), pos))
            .collect();
    }
}
