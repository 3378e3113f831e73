//! Interval label cache
//!
//! Log entries resolve their human-readable interval label ("1m", "500ms")
//! through an explicit cache injected at construction rather than hidden
//! process-global state. The key space is the small, closed set of configured
//! interval durations, so the cache never needs eviction.

use dashmap::DashMap;

use crate::formatting::duration_short_text;

/// Cache of interval duration → short label
///
/// Compute-if-absent is idempotent: two threads racing to resolve the same
/// duration may both format the label, but the results are equal and either
/// insertion wins harmlessly.
#[derive(Debug, Default)]
pub struct IntervalNameCache {
    names: DashMap<u64, String>,
}

impl IntervalNameCache {
    #[must_use]
    pub fn new() -> Self {
        Self {
            names: DashMap::new(),
        }
    }

    /// Resolve the short label for an interval duration
    pub fn resolve(&self, interval_duration_ns: u64) -> String {
        if let Some(name) = self.names.get(&interval_duration_ns) {
            return name.clone();
        }
        let name = duration_short_text(interval_duration_ns);
        self.names.insert(interval_duration_ns, name.clone());
        name
    }

    /// Number of distinct durations resolved so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::nanos;

    #[test]
    fn test_resolve_formats_label() {
        let cache = IntervalNameCache::new();
        assert_eq!(cache.resolve(nanos::PER_MINUTE), "1m");
    }

    #[test]
    fn test_resolve_caches_result() {
        let cache = IntervalNameCache::new();
        let first = cache.resolve(500 * nanos::PER_MILLI);
        let second = cache.resolve(500 * nanos::PER_MILLI);

        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_distinct_durations_distinct_entries() {
        let cache = IntervalNameCache::new();
        cache.resolve(nanos::PER_SECOND);
        cache.resolve(nanos::PER_MINUTE);

        assert_eq!(cache.len(), 2);
    }
}
