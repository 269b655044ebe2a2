//! Context-tagged association rules.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::{Context, ItemSet};
use crate::errors::{MiningError, MiningResult};

/// `antecedent → consequent` mined under one context.
///
/// Identity is the (antecedent, consequent, context) triple. Scores are unset
/// until the scorer fills them in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextualRule {
    pub antecedent: ItemSet,
    pub consequent: ItemSet,
    pub support: f64,
    pub confidence: f64,
    pub lift: f64,
    pub context: Context,
    pub profit_score: Option<f64>,
    pub diversity_score: Option<f64>,
    pub overall_score: Option<f64>,
}

impl ContextualRule {
    /// Build a rule, rejecting empty or overlapping sides and negative or
    /// non-finite metrics.
    pub fn try_new(
        antecedent: ItemSet,
        consequent: ItemSet,
        support: f64,
        confidence: f64,
        lift: f64,
        context: Context,
    ) -> MiningResult<Self> {
        if antecedent.is_empty() || consequent.is_empty() {
            return Err(MiningError::InvalidRule {
                reason: "antecedent and consequent must be non-empty".to_string(),
            });
        }
        if !antecedent.is_disjoint(&consequent) {
            return Err(MiningError::InvalidRule {
                reason: format!("{antecedent} overlaps {consequent}"),
            });
        }
        for (name, value) in [("support", support), ("confidence", confidence), ("lift", lift)] {
            if !value.is_finite() || value < 0.0 {
                return Err(MiningError::InvalidRule {
                    reason: format!("{name} must be a non-negative number, got {value}"),
                });
            }
        }
        Ok(Self {
            antecedent,
            consequent,
            support,
            confidence,
            lift,
            context,
            profit_score: None,
            diversity_score: None,
            overall_score: None,
        })
    }

    /// Every item mentioned by the rule.
    pub fn items(&self) -> ItemSet {
        self.antecedent.union(&self.consequent)
    }

    /// Stable string key, e.g. `bread-butter__jam__Store 1`.
    pub fn key(&self) -> String {
        format!(
            "{}__{}__{}",
            self.antecedent.as_slice().join("-"),
            self.consequent.as_slice().join("-"),
            self.context.label()
        )
    }

    /// Whether an overall score has been assigned.
    pub fn is_scored(&self) -> bool {
        self.overall_score.is_some()
    }
}

impl PartialEq for ContextualRule {
    fn eq(&self, other: &Self) -> bool {
        self.antecedent == other.antecedent
            && self.consequent == other.consequent
            && self.context == other.context
    }
}

impl Eq for ContextualRule {}

impl Hash for ContextualRule {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.antecedent.hash(state);
        self.consequent.hash(state);
        self.context.hash(state);
    }
}

impl fmt::Display for ContextualRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} → {} (context: {})",
            self.antecedent, self.consequent, self.context
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn set(items: &[&str]) -> ItemSet {
        items.iter().copied().collect()
    }

    #[test]
    fn rejects_overlap() {
        let (antecedent, consequent) = (set(&["a"]), set(&["a", "b"]));
        let err = ContextualRule::try_new(antecedent, consequent, 0.1, 0.5, 1.0, Context::overall())
            .unwrap_err();
        assert!(matches!(err, MiningError::InvalidRule { .. }));
    }

    #[test]
    fn rejects_negative_lift() {
        let rule =
            ContextualRule::try_new(set(&["a"]), set(&["b"]), 0.1, 0.5, -1.0, Context::overall());
        assert!(rule.is_err());
    }

    #[test]
    fn identity_ignores_metrics() {
        let a = ContextualRule::try_new(set(&["a"]), set(&["b"]), 0.1, 0.5, 1.0, Context::overall())
            .unwrap();
        let mut b =
            ContextualRule::try_new(set(&["a"]), set(&["b"]), 0.2, 0.9, 3.0, Context::overall())
                .unwrap();
        b.overall_score = Some(0.7);
        let unique: HashSet<_> = [a.clone(), b].into_iter().collect();
        assert_eq!(unique.len(), 1);
        assert_eq!(a.to_string(), "a → b (context: Overall)");
        assert_eq!(a.key(), "a__b__Overall");
    }
}
