use std::sync::Arc;

use async_trait::async_trait;

use radar_core::elasticity::ElasticityTable;

use crate::groups::group_for_category;
use crate::hydrator::Hydrator;
use crate::types::{OpportunityCandidate, ScenarioQuery};

/// Attaches the statistical reliability tier and the product group to
/// each candidate. Both are pure lookups against read-only context.
pub struct ReliabilityHydrator {
    table: Arc<ElasticityTable>,
}

impl ReliabilityHydrator {
    pub fn new(table: Arc<ElasticityTable>) -> Self {
        Self { table }
    }
}

#[async_trait]
impl Hydrator<ScenarioQuery, OpportunityCandidate> for ReliabilityHydrator {
    async fn hydrate(
        &self,
        _query: &ScenarioQuery,
        candidates: &[OpportunityCandidate],
    ) -> Result<Vec<OpportunityCandidate>, String> {
        let hydrated = candidates
            .iter()
            .map(|c| OpportunityCandidate {
                reliability: self.table.get(&c.category).ok().map(|row| row.reliability()),
                group: group_for_category(&c.category),
                ..OpportunityCandidate::default()
            })
            .collect();
        Ok(hydrated)
    }

    fn update(&self, candidate: &mut OpportunityCandidate, hydrated: OpportunityCandidate) {
        candidate.reliability = hydrated.reliability;
        candidate.group = hydrated.group;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groups::ProductGroup;
    use radar_core::elasticity::{CategoryElasticity, Reliability};

    #[tokio::test]
    async fn attaches_reliability_and_group() {
        let table = Arc::new(
            ElasticityTable::from_rows(vec![CategoryElasticity {
                category: "toys".into(),
                mean_elasticity: -1.2,
                category_revenue: 800.0,
                avg_r_squared: Some(0.35),
            }])
            .unwrap(),
        );
        let hydrator = ReliabilityHydrator::new(table);
        let query = ScenarioQuery {
            request_id: "t".into(),
            price_change_pct: -5.0,
            margin_rate: Some(0.25),
            categories: vec![],
        };
        let mut candidate = OpportunityCandidate {
            category: "toys".into(),
            ..OpportunityCandidate::default()
        };
        let hydrated = hydrator.hydrate(&query, &[candidate.clone()]).await.unwrap();
        hydrator.update(&mut candidate, hydrated.into_iter().next().unwrap());

        assert_eq!(candidate.reliability, Some(Reliability::High));
        assert_eq!(candidate.group, Some(ProductGroup::SportsLeisure));
    }
}
