//! Results returned by the analytics engine.

use profitlift_core::models::{Context, ContextualRule, ItemSet, UpliftResult};
use serde::{Deserialize, Serialize};

/// A scored rule, its uplift when estimated, and a plain-language explanation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedRule {
    pub rule: ContextualRule,
    pub uplift: Option<UpliftResult>,
    pub explanation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleRecommendation {
    /// Stable identifier, equal to the source rule's key.
    pub bundle_id: String,
    pub anchor_items: ItemSet,
    pub recommended_items: ItemSet,
    pub context: Context,
    pub overall_score: f64,
    /// Incremental margin when uplift was estimated, else the rule's profit score.
    pub expected_margin: Option<f64>,
    /// Treatment attach rate when positive, else the rule's confidence.
    pub expected_attach_rate: f64,
    pub narrative: String,
    pub uplift: Option<UpliftResult>,
}

/// Projection for a what-if scenario. Revenue and margin include the discount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhatIfResult {
    pub projected_attach_rate: f64,
    pub incremental_attach_rate: f64,
    pub incremental_revenue: f64,
    pub incremental_margin: f64,
    pub projected_margin_total: Option<f64>,
    pub uplift: Option<UpliftResult>,
    pub narrative: String,
}

impl WhatIfResult {
    pub(crate) fn no_history(with_traffic: bool) -> Self {
        Self {
            projected_attach_rate: 0.0,
            incremental_attach_rate: 0.0,
            incremental_revenue: 0.0,
            incremental_margin: 0.0,
            projected_margin_total: with_traffic.then_some(0.0),
            uplift: None,
            narrative: "Not enough matching history to simulate this scenario yet.".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    pub label: String,
    pub value: Option<f64>,
}

/// Headline numbers for a dashboard. Lift and profit are rounded to cents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub avg_lift: f64,
    pub profit_opportunity: f64,
    pub active_rules: usize,
    pub top_opportunities: Vec<Opportunity>,
}
