use serde::{Deserialize, Serialize};

/// One measured factor and how far it pushed the score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureContribution {
    pub feature: String,
    pub contribution: f64,
}

impl FeatureContribution {
    pub fn new(feature: impl Into<String>, contribution: f64) -> Self {
        Self {
            feature: feature.into(),
            contribution,
        }
    }
}

/// Per-user risk score as produced by the scoring backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreSummary {
    pub current_score: f64,
    pub model_version: String,
    /// Already ranked by the backend; rendered in this order.
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub top_features: Vec<FeatureContribution>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricingExplanation {
    pub risk_score: f64,
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub top_features: Vec<FeatureContribution>,
    pub model_version: String,
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub explanation: String,
}
