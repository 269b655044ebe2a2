//! Property tests for diversity and multi-objective scoring.

use proptest::prelude::*;

use profitlift_core::models::{Context, ContextualRule, ItemSet};
use profitlift_scoring::{DiversityScorer, MultiObjectiveScorer};

fn rules() -> impl Strategy<Value = Vec<ContextualRule>> {
    proptest::collection::vec(("[a-f]", "[g-k]", 0u8..3, 0.0f64..1.0, 0.0f64..5.0), 1..25).prop_map(
        |raw| {
            raw.into_iter()
                .map(|(a, c, store, confidence, lift)| {
                    let ctx = if store == 0 {
                        Context::overall()
                    } else {
                        Context::overall().with_store(store.to_string())
                    };
                    let (antecedent, consequent) = (ItemSet::single(a), ItemSet::single(c));
                    ContextualRule::try_new(antecedent, consequent, 0.1, confidence, lift, ctx)
                        .unwrap()
                })
                .collect()
        },
    )
}

proptest! {
    #[test]
    fn diversity_is_bounded(rules in rules()) {
        let scorer = DiversityScorer::new();
        for rule in &rules {
            let d = scorer.calculate_diversity(rule, &rules);
            prop_assert!((0.0..=1.0).contains(&d));
        }
    }

    #[test]
    fn scoring_preserves_rules_and_orders_them(rules in rules()) {
        let n = rules.len();
        let scored = MultiObjectiveScorer::default().score_rules(rules, &[]);
        prop_assert_eq!(scored.len(), n);
        for pair in scored.windows(2) {
            prop_assert!(pair[0].overall_score >= pair[1].overall_score);
        }
    }
}
