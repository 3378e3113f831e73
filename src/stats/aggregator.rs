//! Fixed-size ring of time fragments
//!
//! The aggregator routes every write to the fragment owning the event's
//! timestamp, recycling slots as time advances, and answers windowed-sum
//! queries by merging the fragments that cover the requested range. Memory
//! is bounded by the fragment count regardless of event rate or uptime:
//! ranges older than the ring are unrecoverably evicted.

use std::ops::{Deref, DerefMut};

use parking_lot::MappedMutexGuard;

use super::fragment::TimeFragment;
use super::statistics::OperationStatistics;
use crate::constants::fragments;
use crate::error::MetricsError;
use crate::time::now_nanos;

/// Mutable handle on the statistics of one resolved interval
///
/// Holds the fragment lock for its lifetime; drop it promptly after
/// recording. Dereferences to [`OperationStatistics`].
pub struct IntervalGuard<'a> {
    statistics: MappedMutexGuard<'a, OperationStatistics>,
}

impl Deref for IntervalGuard<'_> {
    type Target = OperationStatistics;

    fn deref(&self) -> &OperationStatistics {
        &self.statistics
    }
}

impl DerefMut for IntervalGuard<'_> {
    fn deref_mut(&mut self) -> &mut OperationStatistics {
        &mut self.statistics
    }
}

/// Ring-buffer aggregator of time-bucketed operation statistics
///
/// Bucketing is always by event timestamp, never arrival order: two events
/// with the same timestamp land in the same fragment regardless of which
/// thread processes them first. A timestamp whose range was already evicted
/// (or lies far in the future) is silently counted into whatever window
/// currently occupies its slot; rotation resolves clock anomalies
/// structurally rather than raising errors.
#[derive(Debug)]
pub struct TimeIntervalStatisticsAggregator {
    fragments: Box<[TimeFragment]>,
    fragment_duration_ns: u64,
}

impl TimeIntervalStatisticsAggregator {
    /// Create an aggregator with an explicit fragment width and count
    pub fn new(fragment_duration_ns: u64, fragment_count: usize) -> Result<Self, MetricsError> {
        if fragment_duration_ns == 0 {
            return Err(MetricsError::ZeroIntervalDuration);
        }
        if fragment_count == 0 {
            return Err(MetricsError::ZeroFragmentCount);
        }
        let fragments = (0..fragment_count)
            .map(|_| TimeFragment::new())
            .collect::<Vec<_>>()
            .into_boxed_slice();
        Ok(Self {
            fragments,
            fragment_duration_ns,
        })
    }

    /// Create an aggregator sized for the given window duration
    ///
    /// Windows of one second or less are captured in a single full-width
    /// fragment with two spares; larger windows are split into ten fragments
    /// plus two spares, giving ~10% reporting granularity.
    pub fn for_window(window_duration_ns: u64) -> Result<Self, MetricsError> {
        if window_duration_ns == 0 {
            return Err(MetricsError::ZeroIntervalDuration);
        }
        if window_duration_ns <= fragments::SINGLE_FRAGMENT_MAX_NS {
            Self::new(window_duration_ns, fragments::SMALL_WINDOW_COUNT)
        } else {
            Self::new(
                window_duration_ns / fragments::WINDOW_SPLIT,
                fragments::SPLIT_WINDOW_COUNT,
            )
        }
    }

    #[must_use]
    #[inline]
    pub fn fragment_count(&self) -> usize {
        self.fragments.len()
    }

    #[must_use]
    #[inline]
    pub fn fragment_duration_ns(&self) -> u64 {
        self.fragment_duration_ns
    }

    /// Aligned start of the window owning `timestamp_ns`
    #[inline]
    fn window_start(&self, timestamp_ns: u64) -> u64 {
        timestamp_ns - timestamp_ns % self.fragment_duration_ns
    }

    /// Resolve the fragment owning `timestamp_ns` and return a write handle
    ///
    /// Rotates the slot first if it still holds an older window; the reset
    /// happens exactly once per transition and contention resolves in O(1).
    pub fn interval_at(&self, timestamp_ns: u64) -> IntervalGuard<'_> {
        let index = (timestamp_ns / self.fragment_duration_ns) as usize % self.fragments.len();
        let window_start = self.window_start(timestamp_ns);
        IntervalGuard {
            statistics: self.fragments[index].claim(window_start),
        }
    }

    /// Write handle for the fragment owning the current time
    pub fn current_interval(&self) -> IntervalGuard<'_> {
        self.interval_at(now_nanos())
    }

    /// Merge the fragments covering the last `window_duration_ns`
    ///
    /// With `skip_last_interval` the fragment containing "now" is excluded,
    /// avoiding a still-filling (hence biased-low) bucket in the report.
    #[must_use]
    pub fn statistics(
        &self,
        window_duration_ns: u64,
        skip_last_interval: bool,
    ) -> OperationStatistics {
        self.statistics_at(now_nanos(), window_duration_ns, skip_last_interval)
    }

    /// Windowed merge anchored at an explicit "now"
    ///
    /// Fragments whose window start falls within
    /// `[now - window_duration_ns, now]` contribute; reads race freely with
    /// writes and return an eventually-consistent aggregate.
    #[must_use]
    pub fn statistics_at(
        &self,
        now_ns: u64,
        window_duration_ns: u64,
        skip_last_interval: bool,
    ) -> OperationStatistics {
        let window_floor = now_ns.saturating_sub(window_duration_ns);
        let current_start = self.window_start(now_ns);

        let mut merged = OperationStatistics::default();
        for fragment in self.fragments.iter() {
            let Some((start, statistics)) = fragment.snapshot() else {
                continue;
            };
            if start < window_floor || start > now_ns {
                continue;
            }
            if skip_last_interval && start == current_start {
                continue;
            }
            merged = merged.merge(&statistics);
        }
        merged
    }
}
