//! Association rule generation from a frequent itemset pool.

use profitlift_core::errors::{MiningError, MiningResult};
use profitlift_core::models::{Context, ContextualRule, FrequentItemsets, ItemSet};
use rustc_hash::FxHashMap;
use tracing::warn;

/// Itemsets above this size are skipped when expanding rules (2^n subsets).
pub const MAX_RULE_ITEMSET_LEN: usize = 20;

/// A directional rule before it is tagged with a context.
#[derive(Debug, Clone, PartialEq)]
pub struct AssociationRule {
    pub antecedent: ItemSet,
    pub consequent: ItemSet,
    pub support: f64,
    pub confidence: f64,
    pub lift: f64,
}

impl AssociationRule {
    /// Tag the rule with the context of the segment it was mined from.
    pub fn into_contextual(self, context: Context) -> MiningResult<ContextualRule> {
        ContextualRule::try_new(
            self.antecedent,
            self.consequent,
            self.support,
            self.confidence,
            self.lift,
            context,
        )
    }
}

/// Expands every frequent itemset of two or more items into
/// `antecedent → itemset − antecedent` rules.
///
/// Subset supports come from the pool. A subset missing from the pool (the
/// miner was capped by `max_itemset_len`) is recounted from `transactions`.
#[derive(Debug, Clone)]
pub struct RuleGenerator {
    min_confidence: f64,
}

impl RuleGenerator {
    /// Generator keeping rules with confidence of at least `min_confidence` in [0, 1].
    pub fn new(min_confidence: f64) -> MiningResult<Self> {
        if !(0.0..=1.0).contains(&min_confidence) {
            return Err(MiningError::InvalidThreshold {
                name: "min_confidence",
                value: min_confidence,
            });
        }
        Ok(Self { min_confidence })
    }

    /// Confidence floor applied to every generated rule.
    pub fn min_confidence(&self) -> f64 {
        self.min_confidence
    }

    /// Rules from every itemset of two or more items. Itemsets longer than
    /// [`MAX_RULE_ITEMSET_LEN`] are logged and skipped; the rest still expand.
    pub fn generate_rules(
        &self,
        itemsets: &FrequentItemsets,
        transactions: &[ItemSet],
    ) -> MiningResult<Vec<AssociationRule>> {
        let n = itemsets.transaction_count();
        if n == 0 {
            return Ok(Vec::new());
        }
        let mut counter = SubsetCounter {
            pool: itemsets,
            transactions,
            recounted: FxHashMap::default(),
        };

        let mut rules = Vec::new();
        for frequent in itemsets.iter().filter(|f| f.items.len() >= 2) {
            let k = frequent.items.len();
            if k > MAX_RULE_ITEMSET_LEN {
                let skipped = MiningError::ItemsetTooLarge {
                    len: k,
                    max: MAX_RULE_ITEMSET_LEN,
                };
                warn!(error = %skipped, "skipping itemset during rule generation");
                continue;
            }
            let items = frequent.items.as_slice();
            let full: u32 = (1u32 << k) - 1;
            for mask in 1..full {
                let antecedent: ItemSet = select(items, mask);
                let consequent: ItemSet = select(items, full & !mask);

                let antecedent_count = counter.count(&antecedent);
                if antecedent_count == 0 {
                    continue;
                }
                let confidence = frequent.count as f64 / antecedent_count as f64;
                if confidence < self.min_confidence {
                    continue;
                }
                let consequent_count = counter.count(&consequent);
                if consequent_count == 0 {
                    continue;
                }
                let consequent_support = consequent_count as f64 / n as f64;

                rules.push(AssociationRule {
                    antecedent,
                    consequent,
                    support: frequent.support,
                    confidence,
                    lift: confidence / consequent_support,
                });
            }
        }
        Ok(rules)
    }
}

fn select(items: &[String], mask: u32) -> ItemSet {
    items
        .iter()
        .enumerate()
        .filter(|(bit, _)| mask & (1u32 << bit) != 0)
        .map(|(_, item)| item.as_str())
        .collect()
}

struct SubsetCounter<'a> {
    pool: &'a FrequentItemsets,
    transactions: &'a [ItemSet],
    recounted: FxHashMap<ItemSet, usize>,
}

impl SubsetCounter<'_> {
    fn count(&mut self, subset: &ItemSet) -> usize {
        if let Some(count) = self.pool.count_of(subset) {
            return count;
        }
        if let Some(&count) = self.recounted.get(subset) {
            return count;
        }
        let count = self
            .transactions
            .iter()
            .filter(|t| subset.is_subset(t))
            .count();
        self.recounted.insert(subset.clone(), count);
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> ItemSet {
        items.iter().copied().collect()
    }

    #[test]
    fn confidence_and_lift_from_pool() {
        let mut pool = FrequentItemsets::new(10);
        pool.insert(set(&["a"]), 5);
        pool.insert(set(&["b"]), 4);
        pool.insert(set(&["a", "b"]), 4);
        let rules = RuleGenerator::new(0.0).unwrap().generate_rules(&pool, &[]).unwrap();
        assert_eq!(rules.len(), 2);

        let a_to_b = rules.iter().find(|r| r.antecedent == set(&["a"])).unwrap();
        assert!((a_to_b.confidence - 0.8).abs() < 1e-12);
        assert!((a_to_b.lift - 2.0).abs() < 1e-12);
        assert!((a_to_b.support - 0.4).abs() < 1e-12);

        let b_to_a = rules.iter().find(|r| r.antecedent == set(&["b"])).unwrap();
        assert!((b_to_a.confidence - 1.0).abs() < 1e-12);
    }

    #[test]
    fn confidence_floor_filters() {
        let mut pool = FrequentItemsets::new(10);
        pool.insert(set(&["a"]), 5);
        pool.insert(set(&["b"]), 4);
        pool.insert(set(&["a", "b"]), 4);
        let rules = RuleGenerator::new(0.9).unwrap().generate_rules(&pool, &[]).unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].consequent, set(&["a"]));
    }

    #[test]
    fn missing_subsets_are_recounted() {
        let transactions = vec![set(&["a", "b"]), set(&["a", "b"]), set(&["a"])];
        let mut pool = FrequentItemsets::new(3);
        pool.insert(set(&["a", "b"]), 2);
        let rules = RuleGenerator::new(0.0)
            .unwrap()
            .generate_rules(&pool, &transactions)
            .unwrap();
        let a_to_b = rules.iter().find(|r| r.antecedent == set(&["a"])).unwrap();
        assert!((a_to_b.confidence - 2.0 / 3.0).abs() < 1e-12);
        assert!((a_to_b.lift - 1.0).abs() < 1e-12);
    }

    #[test]
    fn oversized_itemset_does_not_drop_other_rules() {
        let mut pool = FrequentItemsets::new(5);
        pool.insert(set(&["a"]), 5);
        pool.insert(set(&["b"]), 5);
        pool.insert(set(&["a", "b"]), 5);
        let wide: ItemSet = (0..=MAX_RULE_ITEMSET_LEN).map(|i| format!("w{i:02}")).collect();
        assert_eq!(wide.len(), MAX_RULE_ITEMSET_LEN + 1);
        pool.insert(wide, 5);

        let rules = RuleGenerator::new(0.1)
            .unwrap()
            .generate_rules(&pool, &[])
            .unwrap();
        assert_eq!(rules.len(), 2);
        assert!(rules.iter().any(|r| r.antecedent == set(&["a"]) && r.consequent == set(&["b"])));
        assert!(rules.iter().any(|r| r.antecedent == set(&["b"]) && r.consequent == set(&["a"])));
    }

    #[test]
    fn rejects_invalid_confidence() {
        assert!(RuleGenerator::new(-0.1).is_err());
    }
}
