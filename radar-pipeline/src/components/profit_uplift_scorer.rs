use async_trait::async_trait;

use radar_core::elasticity::Reliability;

use crate::scorer::Scorer;
use crate::types::{OpportunityCandidate, ScenarioQuery};

/// Scores candidates by projected profit uplift on a log scale, weighted
/// by how much the elasticity estimate can be trusted.
///
/// The sign of the uplift is preserved so scenarios that destroy profit
/// rank below ones that merely do nothing.
pub struct ProfitUpliftScorer;

fn reliability_weight(reliability: Option<Reliability>) -> f64 {
    match reliability {
        Some(Reliability::High) => 1.0,
        Some(Reliability::Moderate) => 0.75,
        // Unhydrated candidates get the conservative weight too.
        Some(Reliability::Low) | None => 0.5,
    }
}

#[async_trait]
impl Scorer<ScenarioQuery, OpportunityCandidate> for ProfitUpliftScorer {
    async fn score(
        &self,
        _query: &ScenarioQuery,
        candidates: &[OpportunityCandidate],
    ) -> Result<Vec<OpportunityCandidate>, String> {
        let scored = candidates
            .iter()
            .map(|c| {
                let uplift = c.expected_profit_change;
                let base_score = uplift.signum() * (uplift.abs() + 1.0).ln();
                let weight = reliability_weight(c.reliability);
                OpportunityCandidate {
                    priority_score: Some(base_score * weight),
                    ..OpportunityCandidate::default()
                }
            })
            .collect();

        Ok(scored)
    }

    fn update(&self, candidate: &mut OpportunityCandidate, scored: OpportunityCandidate) {
        candidate.priority_score = scored.priority_score;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_query() -> ScenarioQuery {
        ScenarioQuery {
            request_id: "t".into(),
            price_change_pct: -10.0,
            margin_rate: Some(0.25),
            categories: vec![],
        }
    }

    #[tokio::test]
    async fn bigger_uplift_scores_higher() {
        let scorer = ProfitUpliftScorer;
        let candidates = vec![
            OpportunityCandidate {
                expected_profit_change: 5000.0,
                reliability: Some(Reliability::High),
                ..OpportunityCandidate::default()
            },
            OpportunityCandidate {
                expected_profit_change: 50.0,
                reliability: Some(Reliability::High),
                ..OpportunityCandidate::default()
            },
        ];
        let scored = scorer.score(&make_query(), &candidates).await.unwrap();
        assert!(scored[0].priority_score.unwrap() > scored[1].priority_score.unwrap());
    }

    #[tokio::test]
    async fn reliability_discounts_the_score() {
        let scorer = ProfitUpliftScorer;
        let base = OpportunityCandidate {
            expected_profit_change: 1000.0,
            ..OpportunityCandidate::default()
        };
        let candidates = vec![
            OpportunityCandidate {
                reliability: Some(Reliability::High),
                ..base.clone()
            },
            OpportunityCandidate {
                reliability: Some(Reliability::Low),
                ..base.clone()
            },
            OpportunityCandidate {
                reliability: None,
                ..base
            },
        ];
        let scored = scorer.score(&make_query(), &candidates).await.unwrap();
        let high = scored[0].priority_score.unwrap();
        let low = scored[1].priority_score.unwrap();
        let none = scored[2].priority_score.unwrap();
        assert!(high > low);
        assert_eq!(low, none);
        assert!((low - high * 0.5).abs() < 1e-12);
    }

    #[tokio::test]
    async fn profit_destruction_scores_negative() {
        let scorer = ProfitUpliftScorer;
        let candidates = vec![OpportunityCandidate {
            expected_profit_change: -800.0,
            reliability: Some(Reliability::High),
            ..OpportunityCandidate::default()
        }];
        let scored = scorer.score(&make_query(), &candidates).await.unwrap();
        assert!(scored[0].priority_score.unwrap() < 0.0);
    }
}
