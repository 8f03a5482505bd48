use async_trait::async_trait;

use crate::util;

/// Hydrators enrich candidates with context fetched after sourcing:
/// lookups, joins, derived labels. Same return-and-update shape as
/// scorers so enrichments compose field by field.
#[async_trait]
pub trait Hydrator<Q, C>: Send + Sync
where
    Q: Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
{
    /// Decide if this hydrator should run for the given query.
    fn enable(&self, _query: &Q) -> bool {
        true
    }

    /// Enrich the candidate slice, returning one result per input in
    /// the same order.
    async fn hydrate(&self, query: &Q, candidates: &[C]) -> Result<Vec<C>, String>;

    /// Copy this hydrator's fields from the hydrated value onto the candidate.
    fn update(&self, candidate: &mut C, hydrated: C);

    /// Returns a stable name for logging/metrics.
    fn name(&self) -> &str {
        util::short_type_name(std::any::type_name::<Self>())
    }
}
