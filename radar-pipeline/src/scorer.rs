use async_trait::async_trait;

use crate::util;

/// Scorers assign or adjust candidate scores. Each scorer returns a
/// parallel vector of partially populated candidates; `update` copies
/// only the fields that scorer owns back onto the originals, so scorers
/// compose without clobbering each other.
#[async_trait]
pub trait Scorer<Q, C>: Send + Sync
where
    Q: Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
{
    /// Decide if this scorer should run for the given query.
    fn enable(&self, _query: &Q) -> bool {
        true
    }

    /// Score the candidate slice, returning one result per input in the
    /// same order.
    async fn score(&self, query: &Q, candidates: &[C]) -> Result<Vec<C>, String>;

    /// Copy this scorer's fields from the scored value onto the candidate.
    fn update(&self, candidate: &mut C, scored: C);

    /// Returns a stable name for logging/metrics.
    fn name(&self) -> &str {
        util::short_type_name(std::any::type_name::<Self>())
    }
}
