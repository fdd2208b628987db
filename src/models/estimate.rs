use serde::{Deserialize, Serialize};

/// Monthly cost estimate as returned by the model.
///
/// The breakdown keeps the model's order and is not reconciled against
/// `total_monthly_cost`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostEstimate {
    #[serde(alias = "total_monthly_cost")]
    pub total_monthly_cost: f64,
    pub breakdown: Vec<BreakdownItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Cost attributed to one component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownItem {
    pub component: String,
    pub cost: f64,
}

/// Cheaper service suggestions for the current pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativesSuggestion {
    pub suggestions: Vec<ServiceAlternative>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceAlternative {
    #[serde(alias = "original_service")]
    pub original_service: String,
    #[serde(alias = "alternative_service")]
    pub alternative_service: String,
    pub explanation: String,
}
