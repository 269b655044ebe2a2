//! # profitlift-mining
//!
//! Context-aware association rule mining.
//!
//! Transactions are partitioned into context segments, each segment is mined
//! for frequent itemsets (FP-growth or Eclat), and the itemsets are expanded
//! into directional rules tagged with the segment's context.

pub mod engine;
pub mod itemsets;
pub mod rules;
pub mod segmentation;

pub use engine::ContextAwareMiner;
pub use itemsets::{Eclat, FpGrowth};
pub use rules::{AssociationRule, RuleGenerator};
pub use segmentation::{ContextSegmenter, Segment, SegmentMap, SegmentStats};
