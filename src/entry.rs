//! Named rolling-metric entries
//!
//! A [`TimeIntervalLogEntry`] is the unit instrumented call sites talk to: it
//! binds one aggregator ring to a human-readable interval name and the
//! skip-partial-bucket policy. Entries are created once per named metric and
//! live for the process lifetime of that metric.

use crate::error::MetricsError;
use crate::metric::OperationMetric;
use crate::stats::{IntervalNameCache, OperationStatistics, TimeIntervalStatisticsAggregator};

/// Common surface of metric log entries
///
/// Kept as a trait so call sites stay polymorphic over windowed and
/// cumulative entry variants.
pub trait LogEntry: Send + Sync {
    /// Identity of the metric this entry tracks
    fn id(&self) -> &str;

    /// Record a completed operation, bucketed by its stop time
    fn add_value(&self, metric: &OperationMetric);

    /// Record a completed operation from primitives, bucketed at "now"
    fn add_value_parts(
        &self,
        duration_ns: u64,
        response_size: u64,
        cache_enabled: bool,
        cache_hit: bool,
        failed: bool,
    );

    /// Aggregate over the configured window
    fn statistics(&self) -> OperationStatistics;

    /// Discard accumulated values where the entry kind supports it
    fn clear(&self);

    /// Configured window duration in nanoseconds
    fn interval_duration_ns(&self) -> u64;

    /// Cached human-readable interval label
    fn interval_name(&self) -> &str;
}

/// Rolling-window log entry backed by a fragment ring
#[derive(Debug)]
pub struct TimeIntervalLogEntry {
    id: String,
    interval_duration_ns: u64,
    interval_name: String,
    skip_last_interval: bool,
    statistics: TimeIntervalStatisticsAggregator,
}

impl TimeIntervalLogEntry {
    /// Build an entry for the given window duration
    ///
    /// The interval label is resolved through the injected cache; the
    /// aggregator is sized per the fragment policy. A zero duration is a
    /// caller bug and surfaces immediately.
    pub fn new(
        id: impl Into<String>,
        interval_duration_ns: u64,
        names: &IntervalNameCache,
    ) -> Result<Self, MetricsError> {
        let statistics = TimeIntervalStatisticsAggregator::for_window(interval_duration_ns)?;
        Ok(Self {
            id: id.into(),
            interval_duration_ns,
            interval_name: names.resolve(interval_duration_ns),
            skip_last_interval: true,
            statistics,
        })
    }

    /// Aggregate with a per-call override of the partial-bucket policy
    #[must_use]
    pub fn statistics_with(&self, skip_last_interval: bool) -> OperationStatistics {
        self.statistics
            .statistics(self.interval_duration_ns, skip_last_interval)
    }

    #[must_use]
    pub fn skip_last_interval(&self) -> bool {
        self.skip_last_interval
    }

    pub fn set_skip_last_interval(&mut self, skip_last_interval: bool) {
        self.skip_last_interval = skip_last_interval;
    }

    /// Internal ring, exposed for tests that need deterministic timestamps
    #[must_use]
    pub fn aggregator(&self) -> &TimeIntervalStatisticsAggregator {
        &self.statistics
    }
}

impl LogEntry for TimeIntervalLogEntry {
    fn id(&self) -> &str {
        &self.id
    }

    fn add_value(&self, metric: &OperationMetric) {
        self.statistics
            .interval_at(metric.stop_time_ns())
            .log_statistic(metric);
    }

    fn add_value_parts(
        &self,
        duration_ns: u64,
        response_size: u64,
        cache_enabled: bool,
        cache_hit: bool,
        failed: bool,
    ) {
        self.statistics.current_interval().log_statistic_parts(
            duration_ns,
            response_size,
            cache_enabled,
            cache_hit,
            !failed,
        );
    }

    fn statistics(&self) -> OperationStatistics {
        self.statistics
            .statistics(self.interval_duration_ns, self.skip_last_interval)
    }

    fn clear(&self) {
        // nothing to do: windowed data self-expires through rotation
    }

    fn interval_duration_ns(&self) -> u64 {
        self.interval_duration_ns
    }

    fn interval_name(&self) -> &str {
        &self.interval_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::nanos;

    fn names() -> IntervalNameCache {
        IntervalNameCache::new()
    }

    #[test]
    fn test_entry_construction() {
        let entry = TimeIntervalLogEntry::new("response-time", nanos::PER_MINUTE, &names())
            .expect("valid interval");

        assert_eq!(entry.id(), "response-time");
        assert_eq!(entry.interval_duration_ns(), nanos::PER_MINUTE);
        assert_eq!(entry.interval_name(), "1m");
        assert!(entry.skip_last_interval());
        assert_eq!(entry.aggregator().fragment_count(), 12);
    }

    #[test]
    fn test_zero_interval_rejected() {
        assert!(matches!(
            TimeIntervalLogEntry::new("bad", 0, &names()),
            Err(MetricsError::ZeroIntervalDuration)
        ));
    }

    #[test]
    fn test_identical_durations_share_cached_name() {
        let cache = names();
        let a = TimeIntervalLogEntry::new("a", nanos::PER_MINUTE, &cache).expect("valid");
        let b = TimeIntervalLogEntry::new("b", nanos::PER_MINUTE, &cache).expect("valid");

        assert_eq!(a.interval_name(), b.interval_name());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_add_value_routes_by_stop_time() {
        let entry = TimeIntervalLogEntry::new("ops", nanos::PER_MINUTE, &names()).expect("valid");
        let metric =
            crate::metric::OperationMetric::from_raw("ops", 1_000, 5_000, true, 0, false, false);

        entry.add_value(&metric);

        // the event sits in the fragment owning t=5000; query from far enough
        // ahead that skip-last cannot hide it, within the window
        let width = entry.aggregator().fragment_duration_ns();
        let stats = entry.aggregator().statistics_at(width + 1, nanos::PER_MINUTE, true);
        assert_eq!(stats.count(), 1);
        assert_eq!(stats.total_duration_ns(), 4_000);
    }

    #[test]
    fn test_add_value_parts_counts_failure() {
        let entry = TimeIntervalLogEntry::new("ops", nanos::PER_MINUTE, &names()).expect("valid");

        entry.add_value_parts(2_500, 128, true, false, true);

        let stats = entry.statistics_with(false);
        assert_eq!(stats.count(), 1);
        assert_eq!(stats.failure_count(), 1);
        assert_eq!(stats.cache_miss_count(), 1);
    }

    #[test]
    fn test_statistics_respects_default_skip_policy() {
        let entry = TimeIntervalLogEntry::new("ops", nanos::PER_MINUTE, &names()).expect("valid");

        entry.add_value_parts(100, 0, false, false, false);

        // the value just written sits in the currently-filling fragment
        assert_eq!(entry.statistics().count(), 0);
        assert_eq!(entry.statistics_with(false).count(), 1);
    }

    #[test]
    fn test_set_skip_last_interval() {
        let mut entry = TimeIntervalLogEntry::new("ops", nanos::PER_MINUTE, &names()).expect("valid");
        entry.set_skip_last_interval(false);

        entry.add_value_parts(100, 0, false, false, false);

        assert_eq!(entry.statistics().count(), 1);
    }

    #[test]
    fn test_clear_is_noop() {
        let entry = TimeIntervalLogEntry::new("ops", nanos::PER_MINUTE, &names()).expect("valid");
        entry.add_value_parts(100, 0, false, false, false);
        entry.clear();

        assert_eq!(entry.statistics_with(false).count(), 1);
    }
}
