use async_trait::async_trait;

use crate::filter::{Filter, FilterResult};
use crate::types::{OpportunityCandidate, ScenarioQuery};

/// Removes candidates whose baseline revenue is below a floor. A
/// simulation against near-zero revenue produces near-zero deltas that
/// would only pad the ranking.
pub struct LowBaselineFilter {
    pub min_baseline_revenue: f64,
}

impl LowBaselineFilter {
    pub fn new(min_baseline_revenue: f64) -> Self {
        Self {
            min_baseline_revenue,
        }
    }
}

impl Default for LowBaselineFilter {
    fn default() -> Self {
        Self {
            min_baseline_revenue: 100.0,
        }
    }
}

#[async_trait]
impl Filter<ScenarioQuery, OpportunityCandidate> for LowBaselineFilter {
    async fn filter(
        &self,
        _query: &ScenarioQuery,
        candidates: Vec<OpportunityCandidate>,
    ) -> Result<FilterResult<OpportunityCandidate>, String> {
        let (kept, removed): (Vec<_>, Vec<_>) = candidates
            .into_iter()
            .partition(|c| c.baseline_revenue >= self.min_baseline_revenue);

        Ok(FilterResult { kept, removed })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn partitions_on_baseline_revenue() {
        let filter = LowBaselineFilter::new(500.0);
        let query = ScenarioQuery {
            request_id: "t".into(),
            price_change_pct: -10.0,
            margin_rate: Some(0.25),
            categories: vec![],
        };
        let candidates = vec![
            OpportunityCandidate {
                category: "big".into(),
                baseline_revenue: 2400.0,
                ..OpportunityCandidate::default()
            },
            OpportunityCandidate {
                category: "small".into(),
                baseline_revenue: 50.0,
                ..OpportunityCandidate::default()
            },
        ];
        let FilterResult { kept, removed } = filter.filter(&query, candidates).await.unwrap();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].category, "big");
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].category, "small");
    }
}
