use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::groups::ProductGroup;
use crate::scorer::Scorer;
use crate::types::{OpportunityCandidate, ScenarioQuery};

/// Attenuates scores for repeated product groups so the scan surfaces
/// opportunities across the assortment instead of five furniture rows.
///
/// Candidates are walked in current-score order; each later appearance
/// of the same group is multiplied by `decay_factor^position`, floored
/// so repeats are demoted rather than erased.
pub struct GroupDiversityScorer {
    pub decay_factor: f64,
    pub floor: f64,
}

impl Default for GroupDiversityScorer {
    fn default() -> Self {
        Self {
            decay_factor: 0.7,
            floor: 0.1,
        }
    }
}

impl GroupDiversityScorer {
    fn multiplier(&self, position: usize) -> f64 {
        (1.0 - self.floor) * self.decay_factor.powf(position as f64) + self.floor
    }
}

#[async_trait]
impl Scorer<ScenarioQuery, OpportunityCandidate> for GroupDiversityScorer {
    async fn score(
        &self,
        _query: &ScenarioQuery,
        candidates: &[OpportunityCandidate],
    ) -> Result<Vec<OpportunityCandidate>, String> {
        let mut group_counts: HashMap<Option<ProductGroup>, usize> = HashMap::new();
        let mut scored = vec![OpportunityCandidate::default(); candidates.len()];

        // Walk in descending score order so the best row of each group
        // keeps its full score.
        let mut ordered: Vec<(usize, &OpportunityCandidate)> =
            candidates.iter().enumerate().collect();
        ordered.sort_by(|(_, a), (_, b)| {
            let a_score = a.priority_score.unwrap_or(f64::NEG_INFINITY);
            let b_score = b.priority_score.unwrap_or(f64::NEG_INFINITY);
            b_score.partial_cmp(&a_score).unwrap_or(Ordering::Equal)
        });

        for (original_idx, candidate) in ordered {
            let entry = group_counts.entry(candidate.group).or_insert(0);
            let position = *entry;
            *entry += 1;

            let multiplier = self.multiplier(position);
            let adjusted = candidate.priority_score.map(|s| s * multiplier);

            scored[original_idx] = OpportunityCandidate {
                priority_score: adjusted,
                ..OpportunityCandidate::default()
            };
        }

        Ok(scored)
    }

    fn update(&self, candidate: &mut OpportunityCandidate, scored: OpportunityCandidate) {
        candidate.priority_score = scored.priority_score;
    }
}
