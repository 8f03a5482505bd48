use crate::util;

/// Selectors sort and truncate the candidate list after scoring.
pub trait Selector<Q, C>: Send + Sync
where
    Q: Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
{
    /// Default selection: sort descending, then truncate to `size()`.
    fn select(&self, _query: &Q, candidates: Vec<C>) -> Vec<C> {
        let mut sorted = self.sort(candidates);
        if let Some(limit) = self.size() {
            sorted.truncate(limit);
        }
        sorted
    }

    /// Decide if this selector should run for the given query.
    fn enable(&self, _query: &Q) -> bool {
        true
    }

    /// Extract the sort key from a candidate.
    fn score(&self, candidate: &C) -> f64;

    /// Sort candidates by score, descending.
    ///
    /// NaN scores go to the end of the list so they never surface as top
    /// candidates; a NaN at the top would mean missing data outranking
    /// real results.
    fn sort(&self, candidates: Vec<C>) -> Vec<C> {
        let mut sorted = candidates;
        sorted.sort_by(|a, b| {
            let sa = self.score(a);
            let sb = self.score(b);
            match (sa.is_nan(), sb.is_nan()) {
                (true, true) => std::cmp::Ordering::Equal,
                (true, false) => std::cmp::Ordering::Greater,
                (false, true) => std::cmp::Ordering::Less,
                (false, false) => sb.partial_cmp(&sa).unwrap_or(std::cmp::Ordering::Equal),
            }
        });
        sorted
    }

    /// Maximum number of candidates to keep. `None` means no truncation.
    fn size(&self) -> Option<usize> {
        None
    }

    /// Returns a stable name for logging/metrics.
    fn name(&self) -> &str {
        util::short_type_name(std::any::type_name::<Self>())
    }
}
