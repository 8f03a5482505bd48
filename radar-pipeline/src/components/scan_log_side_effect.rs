use async_trait::async_trait;
use std::sync::Arc;

use crate::side_effect::{SideEffect, SideEffectInput};
use crate::types::{OpportunityCandidate, ScenarioQuery};

/// Writes a one-line scan summary to the log after selection.
///
/// In production this would publish to the reporting store; here it
/// gives operators a greppable record of what each scan surfaced.
pub struct ScanLogSideEffect;

#[async_trait]
impl SideEffect<ScenarioQuery, OpportunityCandidate> for ScanLogSideEffect {
    async fn run(
        &self,
        input: Arc<SideEffectInput<ScenarioQuery, OpportunityCandidate>>,
    ) -> Result<(), String> {
        let total_uplift: f64 = input
            .selected_candidates
            .iter()
            .map(|c| c.expected_profit_change)
            .sum();
        log::info!(
            "request_id={} scan at {:+.1}% selected {} opportunities, projected uplift {:.2}",
            input.query.request_id,
            input.query.price_change_pct,
            input.selected_candidates.len(),
            total_uplift
        );
        Ok(())
    }
}
