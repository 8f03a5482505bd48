use crate::selector::Selector;
use crate::types::{OpportunityCandidate, ScenarioQuery};

/// Selects the top K candidates by priority score.
pub struct TopKSelector {
    pub k: usize,
}

impl Default for TopKSelector {
    fn default() -> Self {
        Self { k: 5 }
    }
}

impl Selector<ScenarioQuery, OpportunityCandidate> for TopKSelector {
    fn score(&self, candidate: &OpportunityCandidate) -> f64 {
        candidate.priority_score.unwrap_or(f64::NEG_INFINITY)
    }

    fn size(&self) -> Option<usize> {
        Some(self.k)
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

    fn scored(category: &str, score: Option<f64>) -> OpportunityCandidate {
        OpportunityCandidate {
            category: category.into(),
            priority_score: score,
            ..OpportunityCandidate::default()
        }
    }

    #[test]
    fn picks_highest_scores() {
        let selector = TopKSelector { k: 2 };
        let selected = selector.select(
            &make_query(),
            vec![
                scored("low", Some(1.0)),
                scored("high", Some(10.0)),
                scored("mid", Some(5.0)),
            ],
        );
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].category, "high");
        assert_eq!(selected[1].category, "mid");
    }

    #[test]
    fn nan_scores_sink_to_the_bottom() {
        let selector = TopKSelector { k: 3 };
        let selected = selector.select(
            &make_query(),
            vec![
                scored("nan", Some(f64::NAN)),
                scored("real", Some(2.0)),
                scored("unscored", None),
            ],
        );
        assert_eq!(selected[0].category, "real");
        assert_ne!(selected[0].category, "nan");
    }
}
