use async_trait::async_trait;

use crate::util;

/// Query hydrators run before candidate fetching and fill in missing
/// query context (defaults, resolved identifiers).
#[async_trait]
pub trait QueryHydrator<Q>: Send + Sync
where
    Q: Clone + Send + Sync + 'static,
{
    /// Decide if this query hydrator should run for the given query.
    fn enable(&self, _query: &Q) -> bool {
        true
    }

    /// Produce a new query with this hydrator's fields populated.
    async fn hydrate(&self, query: &Q) -> Result<Q, String>;

    /// Copy only the fields this hydrator is responsible for onto the
    /// live query.
    fn update(&self, query: &mut Q, hydrated: Q);

    /// Returns a stable name for logging/metrics.
    fn name(&self) -> &str {
        util::short_type_name(std::any::type_name::<Self>())
    }
}
