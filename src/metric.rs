//! Completed-operation records
//!
//! An [`OperationMetric`] describes one finished operation: when it ran,
//! whether it succeeded, how large the response was, and how the cache
//! behaved. It is produced once per operation and fanned out read-only to
//! every consumer (windowed statistics, textual logs, counter sinks).

use crate::time::now_nanos;

/// Immutable record of one completed operation
///
/// Timestamps are nanoseconds in the shared process-wide unit of
/// [`crate::time::now_nanos`]; all writers feeding one log entry must use the
/// same unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationMetric {
    operation_name: String,
    properties: Vec<(String, String)>,
    start_time_ns: u64,
    stop_time_ns: u64,
    successful: bool,
    response_size: u64,
    cache_enabled: bool,
    cache_hit: bool,
}

impl OperationMetric {
    /// Create a fully-specified metric from raw values
    ///
    /// Useful for call sites that captured timing themselves and for tests.
    #[allow(clippy::too_many_arguments)]
    pub fn from_raw(
        operation_name: impl Into<String>,
        start_time_ns: u64,
        stop_time_ns: u64,
        successful: bool,
        response_size: u64,
        cache_enabled: bool,
        cache_hit: bool,
    ) -> Self {
        Self {
            operation_name: operation_name.into(),
            properties: Vec::new(),
            start_time_ns,
            stop_time_ns,
            successful,
            response_size,
            cache_enabled,
            cache_hit,
        }
    }

    /// Begin measuring an operation, stamping the start time
    ///
    /// Call [`stop`](Self::stop) when the operation completes; until then the
    /// metric must not be handed to any consumer.
    pub fn start(operation_name: impl Into<String>, cache_enabled: bool) -> Self {
        Self {
            operation_name: operation_name.into(),
            properties: Vec::new(),
            start_time_ns: now_nanos(),
            stop_time_ns: 0,
            successful: false,
            response_size: 0,
            cache_enabled,
            cache_hit: false,
        }
    }

    /// Complete the measurement, stamping the stop time and outcome
    pub fn stop(&mut self, response_size: u64, cache_hit: bool, successful: bool) {
        self.stop_time_ns = now_nanos();
        self.response_size = response_size;
        self.cache_hit = cache_hit;
        self.successful = successful;
    }

    /// Attach an operation parameter, preserving insertion order
    pub fn add_property(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.properties.push((name.into(), value.into()));
    }

    /// Builder-style variant of [`add_property`](Self::add_property)
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_property(name, value);
        self
    }

    /// Operation identity, as reported to logs and counter sinks
    #[must_use]
    pub fn operation_name(&self) -> &str {
        &self.operation_name
    }

    /// Operation parameters in insertion order
    #[must_use]
    pub fn properties(&self) -> &[(String, String)] {
        &self.properties
    }

    #[must_use]
    #[inline]
    pub fn start_time_ns(&self) -> u64 {
        self.start_time_ns
    }

    #[must_use]
    #[inline]
    pub fn stop_time_ns(&self) -> u64 {
        self.stop_time_ns
    }

    #[must_use]
    #[inline]
    pub fn successful(&self) -> bool {
        self.successful
    }

    #[must_use]
    #[inline]
    pub fn response_size(&self) -> u64 {
        self.response_size
    }

    #[must_use]
    #[inline]
    pub fn cache_enabled(&self) -> bool {
        self.cache_enabled
    }

    #[must_use]
    #[inline]
    pub fn cache_hit(&self) -> bool {
        self.cache_hit
    }

    /// Elapsed time of the operation
    ///
    /// Saturates to zero if the clock was adjusted between start and stop so
    /// a skewed pair can never produce a huge wrapped duration.
    #[must_use]
    #[inline]
    pub fn duration_ns(&self) -> u64 {
        self.stop_time_ns.saturating_sub(self.start_time_ns)
    }
}
