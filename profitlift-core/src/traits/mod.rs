//! Seams between the pipeline stages and their pluggable backends.

pub mod itemset_miner;
pub mod outcome_classifier;

pub use itemset_miner::ItemsetMiner;
pub use outcome_classifier::OutcomeClassifier;
