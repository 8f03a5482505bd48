use serde::Serialize;

use radar_core::advice::AdviceKind;
use radar_core::elasticity::Reliability;

use crate::candidate_pipeline::HasRequestId;
use crate::groups::ProductGroup;

// ---------------------------------------------------------------------------
// Query types
// ---------------------------------------------------------------------------

/// A price-change scenario to scan the whole elasticity table against.
#[derive(Clone, Debug)]
pub struct ScenarioQuery {
    pub request_id: String,
    /// Price change percentage applied to every category in the scan.
    pub price_change_pct: f64,
    /// Margin rate as a fraction in (0, 1). `None` lets the
    /// default-margin hydrator fill in the calibrated default.
    pub margin_rate: Option<f64>,
    /// Restrict the scan to these categories. Empty means all.
    pub categories: Vec<String>,
}

impl HasRequestId for ScenarioQuery {
    fn request_id(&self) -> &str {
        &self.request_id
    }
}

// ---------------------------------------------------------------------------
// Candidate types
// ---------------------------------------------------------------------------

/// One category's simulated outcome under the scan scenario, as it moves
/// through the pipeline stages.
#[derive(Clone, Debug, Serialize)]
pub struct OpportunityCandidate {
    pub category: String,
    pub mean_elasticity: f64,
    pub baseline_revenue: f64,
    pub expected_revenue: f64,
    pub revenue_change: f64,
    pub expected_profit_change: f64,
    pub profit_change_ratio: f64,
    pub is_elastic: bool,
    pub advice: AdviceKind,

    // Enrichment fields (populated by hydrators)
    pub reliability: Option<Reliability>,
    pub group: Option<ProductGroup>,

    // Scoring fields (populated by scorers)
    pub priority_score: Option<f64>,
}

impl Default for OpportunityCandidate {
    fn default() -> Self {
        Self {
            category: String::new(),
            mean_elasticity: 0.0,
            baseline_revenue: 0.0,
            expected_revenue: 0.0,
            revenue_change: 0.0,
            expected_profit_change: 0.0,
            profit_change_ratio: 0.0,
            is_elastic: false,
            advice: AdviceKind::Neutral,
            reliability: None,
            group: None,
            priority_score: None,
        }
    }
}
