//! # profitlift-causal
//!
//! Estimates the incremental effect of promoting a rule by emulating an A/B
//! test on observational data: antecedent baskets are split into treatment
//! and holdout, matched with size-similar baskets lacking the antecedent,
//! and compared on consequent attach rate. A paired outcome model
//! (T-learner) is fitted alongside for record-level uplift scoring.

pub mod bootstrap;
pub mod classifier;
pub mod estimator;
pub mod features;
pub mod simulator;
pub mod t_learner;

pub use classifier::LogisticClassifier;
pub use estimator::{CausalEstimator, ModelledUplift};
pub use features::{FeatureTable, FEATURE_NAMES};
pub use simulator::{SimulatedExperiment, TreatmentSimulator};
pub use t_learner::PairedOutcomeModel;
