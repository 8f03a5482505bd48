//! The generic pipeline driver.
//!
//! A pipeline is an ordered set of stages over a query type `Q` and a
//! candidate type `C`. `execute` runs them in a fixed order, skipping
//! any stage whose `enable` declines the query:
//!
//! 1. query hydrators (fill query defaults)
//! 2. sources (produce candidates)
//! 3. hydrators (enrich candidates)
//! 4. filters (partition into kept/removed)
//! 5. scorers (assign/adjust scores)
//! 6. selector (sort + truncate)
//! 7. post-selection hydrators and filters
//! 8. side effects (observed-only; failures never change the result)
//!
//! A failing stage logs a warning and is skipped; the pipeline keeps
//! the candidates it had, so one broken component degrades the result
//! instead of erasing it.

use std::sync::Arc;

use async_trait::async_trait;

use crate::filter::Filter;
use crate::hydrator::Hydrator;
use crate::query_hydrator::QueryHydrator;
use crate::scorer::Scorer;
use crate::selector::Selector;
use crate::side_effect::{SideEffect, SideEffectInput};
use crate::source::Source;

/// Queries expose a request id for log correlation.
pub trait HasRequestId {
    fn request_id(&self) -> &str;
}

/// Everything `execute` produced, including the candidates that were
/// filtered out along the way.
pub struct PipelineResult<Q, C> {
    pub query: Q,
    /// Candidates as produced by the sources, before filtering.
    pub retrieved_candidates: Vec<C>,
    /// Candidates removed by filters.
    pub filtered_candidates: Vec<C>,
    /// The final ranked selection.
    pub selected_candidates: Vec<C>,
}

#[async_trait]
pub trait CandidatePipeline<Q, C>: Send + Sync
where
    Q: Clone + Send + Sync + HasRequestId + 'static,
    C: Clone + Send + Sync + 'static,
{
    fn query_hydrators(&self) -> &[Box<dyn QueryHydrator<Q>>];
    fn sources(&self) -> &[Box<dyn Source<Q, C>>];
    fn hydrators(&self) -> &[Box<dyn Hydrator<Q, C>>];
    fn filters(&self) -> &[Box<dyn Filter<Q, C>>];
    fn scorers(&self) -> &[Box<dyn Scorer<Q, C>>];
    fn selector(&self) -> &dyn Selector<Q, C>;
    fn post_selection_hydrators(&self) -> &[Box<dyn Hydrator<Q, C>>];
    fn post_selection_filters(&self) -> &[Box<dyn Filter<Q, C>>];
    fn side_effects(&self) -> Arc<Vec<Box<dyn SideEffect<Q, C>>>>;

    /// Maximum number of selected candidates.
    fn result_size(&self) -> usize;

    /// Run the full stage sequence for one query.
    async fn execute(&self, query: Q) -> PipelineResult<Q, C> {
        let mut query = query;

        for hydrator in self.query_hydrators() {
            if !hydrator.enable(&query) {
                continue;
            }
            match hydrator.hydrate(&query).await {
                Ok(hydrated) => hydrator.update(&mut query, hydrated),
                Err(e) => {
                    log::warn!(
                        "request_id={} query hydrator {} failed: {}",
                        query.request_id(),
                        hydrator.name(),
                        e
                    );
                }
            }
        }

        let mut candidates: Vec<C> = Vec::new();
        for source in self.sources() {
            if !source.enable(&query) {
                continue;
            }
            match source.get_candidates(&query).await {
                Ok(mut fetched) => {
                    log::info!(
                        "request_id={} source {} produced {} candidates",
                        query.request_id(),
                        source.name(),
                        fetched.len()
                    );
                    candidates.append(&mut fetched);
                }
                Err(e) => {
                    log::warn!(
                        "request_id={} source {} failed: {}",
                        query.request_id(),
                        source.name(),
                        e
                    );
                }
            }
        }
        let retrieved_candidates = candidates.clone();

        run_hydrators(self.hydrators(), &query, &mut candidates).await;

        let mut filtered_candidates: Vec<C> = Vec::new();
        candidates =
            run_filters(self.filters(), &query, candidates, &mut filtered_candidates).await;

        for scorer in self.scorers() {
            if !scorer.enable(&query) {
                continue;
            }
            match scorer.score(&query, &candidates).await {
                Ok(scored) if scored.len() == candidates.len() => {
                    for (candidate, s) in candidates.iter_mut().zip(scored) {
                        scorer.update(candidate, s);
                    }
                }
                Ok(scored) => {
                    log::warn!(
                        "request_id={} scorer {} returned {} results for {} candidates, skipping",
                        query.request_id(),
                        scorer.name(),
                        scored.len(),
                        candidates.len()
                    );
                }
                Err(e) => {
                    log::warn!(
                        "request_id={} scorer {} failed: {}",
                        query.request_id(),
                        scorer.name(),
                        e
                    );
                }
            }
        }

        let mut selected = if self.selector().enable(&query) {
            self.selector().select(&query, candidates)
        } else {
            candidates
        };
        selected.truncate(self.result_size());

        run_hydrators(self.post_selection_hydrators(), &query, &mut selected).await;
        selected = run_filters(
            self.post_selection_filters(),
            &query,
            selected,
            &mut filtered_candidates,
        )
        .await;

        log::info!(
            "request_id={} pipeline selected {} of {} retrieved candidates ({} filtered)",
            query.request_id(),
            selected.len(),
            retrieved_candidates.len(),
            filtered_candidates.len()
        );

        let side_effect_query = Arc::new(query.clone());
        let input = Arc::new(SideEffectInput {
            query: Arc::clone(&side_effect_query),
            selected_candidates: selected.clone(),
        });
        for side_effect in self.side_effects().iter() {
            if !side_effect.enable(Arc::clone(&side_effect_query)) {
                continue;
            }
            if let Err(e) = side_effect.run(Arc::clone(&input)).await {
                log::warn!(
                    "request_id={} side effect {} failed: {}",
                    query.request_id(),
                    side_effect.name(),
                    e
                );
            }
        }

        PipelineResult {
            query,
            retrieved_candidates,
            filtered_candidates,
            selected_candidates: selected,
        }
    }
}

async fn run_hydrators<Q, C>(
    hydrators: &[Box<dyn Hydrator<Q, C>>],
    query: &Q,
    candidates: &mut Vec<C>,
) where
    Q: Clone + Send + Sync + HasRequestId + 'static,
    C: Clone + Send + Sync + 'static,
{
    for hydrator in hydrators {
        if !hydrator.enable(query) {
            continue;
        }
        match hydrator.hydrate(query, candidates).await {
            Ok(hydrated) if hydrated.len() == candidates.len() => {
                for (candidate, h) in candidates.iter_mut().zip(hydrated) {
                    hydrator.update(candidate, h);
                }
            }
            Ok(hydrated) => {
                log::warn!(
                    "request_id={} hydrator {} returned {} results for {} candidates, skipping",
                    query.request_id(),
                    hydrator.name(),
                    hydrated.len(),
                    candidates.len()
                );
            }
            Err(e) => {
                log::warn!(
                    "request_id={} hydrator {} failed: {}",
                    query.request_id(),
                    hydrator.name(),
                    e
                );
            }
        }
    }
}

async fn run_filters<Q, C>(
    filters: &[Box<dyn Filter<Q, C>>],
    query: &Q,
    mut candidates: Vec<C>,
    removed_acc: &mut Vec<C>,
) -> Vec<C>
where
    Q: Clone + Send + Sync + HasRequestId + 'static,
    C: Clone + Send + Sync + 'static,
{
    for filter in filters {
        if !filter.enable(query) {
            continue;
        }
        match filter.filter(query, candidates.clone()).await {
            Ok(result) => {
                log::info!(
                    "request_id={} filter {} kept {} removed {}",
                    query.request_id(),
                    filter.name(),
                    result.kept.len(),
                    result.removed.len()
                );
                candidates = result.kept;
                removed_acc.extend(result.removed);
            }
            Err(e) => {
                log::warn!(
                    "request_id={} filter {} failed: {}",
                    query.request_id(),
                    filter.name(),
                    e
                );
            }
        }
    }
    candidates
}
