use async_trait::async_trait;
use std::sync::Arc;

use radar_core::elasticity::ElasticityTable;

use crate::candidate_pipeline::CandidatePipeline;
use crate::components::default_margin_hydrator::DefaultMarginHydrator;
use crate::components::elasticity_scan_source::ElasticityScanSource;
use crate::components::group_diversity_scorer::GroupDiversityScorer;
use crate::components::low_baseline_filter::LowBaselineFilter;
use crate::components::profit_uplift_scorer::ProfitUpliftScorer;
use crate::components::reliability_hydrator::ReliabilityHydrator;
use crate::components::scan_log_side_effect::ScanLogSideEffect;
use crate::components::top_k_selector::TopKSelector;
use crate::filter::Filter;
use crate::hydrator::Hydrator;
use crate::query_hydrator::QueryHydrator;
use crate::scorer::Scorer;
use crate::selector::Selector;
use crate::side_effect::SideEffect;
use crate::source::Source;
use crate::types::{OpportunityCandidate, ScenarioQuery};

/// The ranked pricing-opportunity scan.
///
/// Pipeline flow:
/// 1. DefaultMarginHydrator fills in the default margin rate
/// 2. ElasticityScanSource simulates the scenario for every category
/// 3. ReliabilityHydrator attaches reliability tier and product group
/// 4. LowBaselineFilter removes categories with negligible revenue
/// 5. ProfitUpliftScorer assigns log-scale uplift scores
/// 6. GroupDiversityScorer attenuates repeated product groups
/// 7. TopKSelector picks the top N
/// 8. ScanLogSideEffect records the scan summary
pub struct OpportunityScanPipeline {
    query_hydrators: Vec<Box<dyn QueryHydrator<ScenarioQuery>>>,
    sources: Vec<Box<dyn Source<ScenarioQuery, OpportunityCandidate>>>,
    hydrators: Vec<Box<dyn Hydrator<ScenarioQuery, OpportunityCandidate>>>,
    filters: Vec<Box<dyn Filter<ScenarioQuery, OpportunityCandidate>>>,
    scorers: Vec<Box<dyn Scorer<ScenarioQuery, OpportunityCandidate>>>,
    selector: TopKSelector,
    post_selection_hydrators: Vec<Box<dyn Hydrator<ScenarioQuery, OpportunityCandidate>>>,
    post_selection_filters: Vec<Box<dyn Filter<ScenarioQuery, OpportunityCandidate>>>,
    side_effects: Arc<Vec<Box<dyn SideEffect<ScenarioQuery, OpportunityCandidate>>>>,
    result_size: usize,
}

impl OpportunityScanPipeline {
    /// Create a scan over a loaded elasticity table with the default
    /// result size.
    pub fn with_table(table: Arc<ElasticityTable>) -> Self {
        Self::with_table_and_size(table, 5)
    }

    /// Create a scan with a custom result size.
    pub fn with_table_and_size(table: Arc<ElasticityTable>, result_size: usize) -> Self {
        let query_hydrators: Vec<Box<dyn QueryHydrator<ScenarioQuery>>> =
            vec![Box::new(DefaultMarginHydrator)];

        let sources: Vec<Box<dyn Source<ScenarioQuery, OpportunityCandidate>>> =
            vec![Box::new(ElasticityScanSource::new(Arc::clone(&table)))];

        let hydrators: Vec<Box<dyn Hydrator<ScenarioQuery, OpportunityCandidate>>> =
            vec![Box::new(ReliabilityHydrator::new(table))];

        let filters: Vec<Box<dyn Filter<ScenarioQuery, OpportunityCandidate>>> =
            vec![Box::new(LowBaselineFilter::default())];

        let scorers: Vec<Box<dyn Scorer<ScenarioQuery, OpportunityCandidate>>> = vec![
            Box::new(ProfitUpliftScorer),
            Box::new(GroupDiversityScorer::default()),
        ];

        let selector = TopKSelector { k: result_size };

        let side_effects: Arc<Vec<Box<dyn SideEffect<ScenarioQuery, OpportunityCandidate>>>> =
            Arc::new(vec![Box::new(ScanLogSideEffect)]);

        Self {
            query_hydrators,
            sources,
            hydrators,
            filters,
            scorers,
            selector,
            post_selection_hydrators: Vec::new(),
            post_selection_filters: Vec::new(),
            side_effects,
            result_size,
        }
    }
}

#[async_trait]
impl CandidatePipeline<ScenarioQuery, OpportunityCandidate> for OpportunityScanPipeline {
    fn query_hydrators(&self) -> &[Box<dyn QueryHydrator<ScenarioQuery>>] {
        &self.query_hydrators
    }

    fn sources(&self) -> &[Box<dyn Source<ScenarioQuery, OpportunityCandidate>>] {
        &self.sources
    }

    fn hydrators(&self) -> &[Box<dyn Hydrator<ScenarioQuery, OpportunityCandidate>>] {
        &self.hydrators
    }

    fn filters(&self) -> &[Box<dyn Filter<ScenarioQuery, OpportunityCandidate>>] {
        &self.filters
    }

    fn scorers(&self) -> &[Box<dyn Scorer<ScenarioQuery, OpportunityCandidate>>] {
        &self.scorers
    }

    fn selector(&self) -> &dyn Selector<ScenarioQuery, OpportunityCandidate> {
        &self.selector
    }

    fn post_selection_hydrators(
        &self,
    ) -> &[Box<dyn Hydrator<ScenarioQuery, OpportunityCandidate>>] {
        &self.post_selection_hydrators
    }

    fn post_selection_filters(&self) -> &[Box<dyn Filter<ScenarioQuery, OpportunityCandidate>>] {
        &self.post_selection_filters
    }

    fn side_effects(&self) -> Arc<Vec<Box<dyn SideEffect<ScenarioQuery, OpportunityCandidate>>>> {
        Arc::clone(&self.side_effects)
    }

    fn result_size(&self) -> usize {
        self.result_size
    }
}
