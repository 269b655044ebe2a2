//! # profitlift-engine
//!
//! Fronts the mining, scoring and causal crates with the operations a
//! presentation layer needs: ranked rules with explanations, bundle
//! recommendations, what-if scenarios and dashboard statistics. Mined rule
//! sets are cached per parameter tuple until explicitly cleared.

pub mod cache;
pub mod engine;
pub mod explain;
pub mod query;
pub mod report;

pub use cache::{RuleCache, RuleCacheKey, RuleSetKind};
pub use engine::AnalyticsEngine;
pub use query::{RuleQuery, WhatIfScenario};
pub use report::{BundleRecommendation, DashboardStats, Opportunity, RankedRule, WhatIfResult};
