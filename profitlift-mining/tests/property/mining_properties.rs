//! Property tests for itemset mining backends.

use proptest::prelude::*;

use profitlift_core::models::ItemSet;
use profitlift_core::traits::ItemsetMiner;
use profitlift_mining::{Eclat, FpGrowth, RuleGenerator};

fn transactions() -> impl Strategy<Value = Vec<ItemSet>> {
    proptest::collection::vec(
        proptest::collection::vec("[a-h]", 1..6)
            .prop_map(|items| items.into_iter().collect::<ItemSet>()),
        0..40,
    )
}

proptest! {
    #[test]
    fn fp_growth_and_eclat_agree(data in transactions(), min_support in 0.05f64..0.6) {
        let fp = FpGrowth::new().mine(&data, min_support).unwrap();
        let ec = Eclat::new().mine(&data, min_support).unwrap();
        prop_assert_eq!(fp.len(), ec.len());
        for itemset in fp.iter() {
            let other = ec.support_of(&itemset.items);
            prop_assert!(other.is_some());
            prop_assert!((itemset.support - other.unwrap_or_default()).abs() < 1e-9);
        }
    }

    #[test]
    fn supports_match_direct_count(data in transactions(), min_support in 0.05f64..0.6) {
        let pool = FpGrowth::new().mine(&data, min_support).unwrap();
        for itemset in pool.iter() {
            let direct = data.iter().filter(|t| itemset.items.is_subset(t)).count();
            prop_assert_eq!(itemset.count, direct);
            prop_assert!(itemset.count as f64 >= min_support * data.len() as f64);
        }
    }

    #[test]
    fn rule_metrics_are_consistent(data in transactions(), min_confidence in 0.0f64..1.0) {
        let pool = Eclat::new().mine(&data, 0.1).unwrap();
        let rules = RuleGenerator::new(min_confidence)
            .unwrap()
            .generate_rules(&pool, &data)
            .unwrap();
        for rule in rules {
            prop_assert!(rule.antecedent.is_disjoint(&rule.consequent));
            prop_assert!(rule.confidence >= min_confidence);
            prop_assert!(rule.confidence <= 1.0 + 1e-12);
            prop_assert!(rule.lift >= 0.0);
        }
    }
}
