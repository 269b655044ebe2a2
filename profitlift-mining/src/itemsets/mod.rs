//! Frequent itemset backends.
//!
//! Both backends intern items to dense `u32` ids, apply the same
//! [`SupportThreshold`], and report identical supports for identical input.

pub mod eclat;
pub mod fp_growth;
pub mod interner;
pub mod support;

pub use eclat::Eclat;
pub use fp_growth::FpGrowth;
pub use interner::ItemInterner;
pub use support::SupportThreshold;

use profitlift_core::config::MiningStrategy;
use profitlift_core::traits::ItemsetMiner;

/// Backend for a configured strategy.
pub fn backend_for(strategy: MiningStrategy, max_len: Option<usize>) -> Box<dyn ItemsetMiner> {
    match strategy {
        MiningStrategy::FpGrowth => Box::new(FpGrowth::new().with_max_len(max_len)),
        MiningStrategy::Eclat => Box::new(Eclat::new().with_max_len(max_len)),
    }
}
