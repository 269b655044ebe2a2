//! Property tests for bootstrap intervals.

use profitlift_causal::bootstrap::bootstrap_interval;
use proptest::prelude::*;

fn outcomes() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(prop::bool::ANY.prop_map(|b| if b { 1.0 } else { 0.0 }), 1..60)
}

proptest! {
    #[test]
    fn lower_bound_never_exceeds_upper(
        control in outcomes(),
        treatment in outcomes(),
        resamples in 1usize..50,
        level in 0.5f64..0.99,
        seed in any::<u64>(),
    ) {
        let (lower, upper) =
            bootstrap_interval(&control, &treatment, resamples, level, seed).unwrap();
        prop_assert!(lower <= upper);
        prop_assert!((-1.0..=1.0).contains(&lower));
        prop_assert!((-1.0..=1.0).contains(&upper));
    }
}
