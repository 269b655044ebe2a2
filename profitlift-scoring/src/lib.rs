//! # profitlift-scoring
//!
//! Ranks mined rules by a blended objective: lift and expected profit
//! (min-max normalized within each context), in-context diversity, and
//! confidence.

pub mod diversity;
pub mod multi_objective;
pub mod profit;

pub use diversity::{ContextDiversityStats, DiversityScorer};
pub use multi_objective::MultiObjectiveScorer;
pub use profit::{ItemEconomics, ProfitCalculator};
