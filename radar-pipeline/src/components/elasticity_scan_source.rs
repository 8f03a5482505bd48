use std::sync::Arc;

use async_trait::async_trait;

use radar_core::advice::classify;
use radar_core::elasticity::ElasticityTable;
use radar_core::simulator::{simulate_with_policy, ZeroProfitPolicy};
use radar_core::thresholds;

use crate::source::Source;
use crate::types::{OpportunityCandidate, ScenarioQuery};

/// Source that simulates the query's price-change scenario against every
/// category in the elasticity table and emits one candidate per category.
///
/// Runs under [`ZeroProfitPolicy::ReportZero`] so a zero-revenue category
/// still yields an accountable candidate; the baseline filter then
/// removes it visibly instead of the row vanishing here.
pub struct ElasticityScanSource {
    table: Arc<ElasticityTable>,
}

impl ElasticityScanSource {
    pub fn new(table: Arc<ElasticityTable>) -> Self {
        Self { table }
    }
}

#[async_trait]
impl Source<ScenarioQuery, OpportunityCandidate> for ElasticityScanSource {
    fn enable(&self, _query: &ScenarioQuery) -> bool {
        !self.table.is_empty()
    }

    async fn get_candidates(
        &self,
        query: &ScenarioQuery,
    ) -> Result<Vec<OpportunityCandidate>, String> {
        let margin_rate = query.margin_rate.unwrap_or(thresholds::DEFAULT_MARGIN_RATE);

        let mut candidates = Vec::new();
        for row in self.table.rows() {
            if !query.categories.is_empty() && !query.categories.contains(&row.category) {
                continue;
            }

            let result = simulate_with_policy(
                row.mean_elasticity,
                row.category_revenue,
                query.price_change_pct,
                margin_rate,
                ZeroProfitPolicy::ReportZero,
            )
            .map_err(|e| format!("simulation failed for '{}': {}", row.category, e))?;

            let advice = classify(
                row.mean_elasticity,
                query.price_change_pct,
                result.revenue_change,
                result.profit_change_ratio,
            );

            candidates.push(OpportunityCandidate {
                category: row.category.clone(),
                mean_elasticity: row.mean_elasticity,
                baseline_revenue: row.category_revenue,
                expected_revenue: result.expected_revenue,
                revenue_change: result.revenue_change,
                expected_profit_change: result.expected_profit_change,
                profit_change_ratio: result.profit_change_ratio,
                is_elastic: result.is_elastic,
                advice: advice.kind,
                ..OpportunityCandidate::default()
            });
        }

        Ok(candidates)
    }
}
