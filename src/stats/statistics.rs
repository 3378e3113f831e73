//! Per-fragment operation statistics
//!
//! [`OperationStatistics`] accumulates counts and durations for the events
//! that landed in one time fragment. The same type doubles as the immutable
//! snapshot handed to readers: copying it out of the fragment decouples the
//! reader from concurrent in-place mutation.

use crate::metric::OperationMetric;

/// Accumulated statistics for one time fragment
///
/// Invariants: `count >= 0`; when `count > 0`,
/// `min_duration_ns <= max_duration_ns <= total_duration_ns`. All fields are
/// monotonically non-decreasing within one fragment lifetime and reset only
/// on rotation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OperationStatistics {
    count: u64,
    total_duration_ns: u64,
    min_duration_ns: u64,
    max_duration_ns: u64,
    failure_count: u64,
    cache_hit_count: u64,
    cache_miss_count: u64,
}

impl OperationStatistics {
    /// Record one completed operation
    ///
    /// A metric reference is always present by construction; the "missing
    /// metric" precondition of the ingestion contract is discharged by the
    /// type system.
    pub fn log_statistic(&mut self, metric: &OperationMetric) {
        self.log_statistic_parts(
            metric.duration_ns(),
            metric.response_size(),
            metric.cache_enabled(),
            metric.cache_hit(),
            metric.successful(),
        );
    }

    /// Record one completed operation from primitive values
    ///
    /// `response_size` is accepted for ingestion-signature parity with call
    /// sites; windowed statistics do not aggregate it.
    pub fn log_statistic_parts(
        &mut self,
        duration_ns: u64,
        _response_size: u64,
        cache_enabled: bool,
        cache_hit: bool,
        successful: bool,
    ) {
        if self.count == 0 {
            self.min_duration_ns = duration_ns;
            self.max_duration_ns = duration_ns;
        } else {
            self.min_duration_ns = self.min_duration_ns.min(duration_ns);
            self.max_duration_ns = self.max_duration_ns.max(duration_ns);
        }
        self.count += 1;
        self.total_duration_ns = self.total_duration_ns.saturating_add(duration_ns);
        if !successful {
            self.failure_count += 1;
        }
        if cache_enabled {
            if cache_hit {
                self.cache_hit_count += 1;
            } else {
                self.cache_miss_count += 1;
            }
        }
    }

    /// Combine two statistics field-wise
    ///
    /// Associative and commutative: windowed reads merge an arbitrary subset
    /// of fragment snapshots in arbitrary order.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        if self.count == 0 {
            return *other;
        }
        if other.count == 0 {
            return *self;
        }
        Self {
            count: self.count + other.count,
            total_duration_ns: self.total_duration_ns.saturating_add(other.total_duration_ns),
            min_duration_ns: self.min_duration_ns.min(other.min_duration_ns),
            max_duration_ns: self.max_duration_ns.max(other.max_duration_ns),
            failure_count: self.failure_count + other.failure_count,
            cache_hit_count: self.cache_hit_count + other.cache_hit_count,
            cache_miss_count: self.cache_miss_count + other.cache_miss_count,
        }
    }

    /// Independent copy for readers
    #[must_use]
    #[inline]
    pub fn snapshot(&self) -> Self {
        *self
    }

    #[must_use]
    #[inline]
    pub fn count(&self) -> u64 {
        self.count
    }

    #[must_use]
    #[inline]
    pub fn total_duration_ns(&self) -> u64 {
        self.total_duration_ns
    }

    /// Minimum recorded duration; zero when no operations were recorded
    #[must_use]
    #[inline]
    pub fn min_duration_ns(&self) -> u64 {
        self.min_duration_ns
    }

    #[must_use]
    #[inline]
    pub fn max_duration_ns(&self) -> u64 {
        self.max_duration_ns
    }

    #[must_use]
    #[inline]
    pub fn failure_count(&self) -> u64 {
        self.failure_count
    }

    #[must_use]
    #[inline]
    pub fn cache_hit_count(&self) -> u64 {
        self.cache_hit_count
    }

    #[must_use]
    #[inline]
    pub fn cache_miss_count(&self) -> u64 {
        self.cache_miss_count
    }

    /// Average duration across recorded operations
    ///
    /// Returns 0 if no operations have been recorded.
    #[must_use]
    pub fn average_duration_ns(&self) -> u64 {
        if self.count == 0 {
            0
        } else {
            self.total_duration_ns / self.count
        }
    }

    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}
