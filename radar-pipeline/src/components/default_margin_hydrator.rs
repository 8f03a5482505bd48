use async_trait::async_trait;

use radar_core::thresholds;

use crate::query_hydrator::QueryHydrator;
use crate::types::ScenarioQuery;

/// Fills in the calibrated default margin rate when the query omits one,
/// so every downstream stage sees a concrete margin.
pub struct DefaultMarginHydrator;

#[async_trait]
impl QueryHydrator<ScenarioQuery> for DefaultMarginHydrator {
    fn enable(&self, query: &ScenarioQuery) -> bool {
        query.margin_rate.is_none()
    }

    async fn hydrate(&self, query: &ScenarioQuery) -> Result<ScenarioQuery, String> {
        Ok(ScenarioQuery {
            margin_rate: Some(thresholds::DEFAULT_MARGIN_RATE),
            ..query.clone()
        })
    }

    fn update(&self, query: &mut ScenarioQuery, hydrated: ScenarioQuery) {
        query.margin_rate = hydrated.margin_rate;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_when_margin_is_present() {
        let hydrator = DefaultMarginHydrator;
        let query = ScenarioQuery {
            request_id: "t".into(),
            price_change_pct: 5.0,
            margin_rate: Some(0.3),
            categories: vec![],
        };
        assert!(!hydrator.enable(&query));
    }

    #[tokio::test]
    async fn fills_the_default_margin() {
        let hydrator = DefaultMarginHydrator;
        let mut query = ScenarioQuery {
            request_id: "t".into(),
            price_change_pct: 5.0,
            margin_rate: None,
            categories: vec![],
        };
        assert!(hydrator.enable(&query));
        let hydrated = hydrator.hydrate(&query).await.unwrap();
        hydrator.update(&mut query, hydrated);
        assert_eq!(query.margin_rate, Some(thresholds::DEFAULT_MARGIN_RATE));
    }
}
