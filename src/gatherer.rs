//! Metric reporting sinks
//!
//! A gatherer fans one completed operation out to two independent paths: a
//! leveled textual log (formatted only when the gate is open) and an
//! always-on counter sink. The paths are never coupled, so disabling textual
//! logging never disables counting.

use std::fmt;
use std::sync::Arc;

use tracing::Level;

use crate::formatting::{format_entry_line, format_information_line, format_metric_line};
use crate::metric::OperationMetric;

/// Default gate for operation exit lines
const DEFAULT_LEVEL: Level = Level::DEBUG;

/// Default gate for the more verbose operation entry traces
const DEFAULT_ENTRY_LEVEL: Level = Level::TRACE;

/// Narrow reporting interface of the always-on counter registry
///
/// The registry itself lives outside this crate; gatherers only push
/// completed operations through this seam.
pub trait CounterSink: Send + Sync + fmt::Debug {
    /// Count one completed operation under its operation identity
    fn increase(&self, metric: &OperationMetric);

    /// Whether the registry is currently collecting
    fn is_enabled(&self) -> bool;
}

/// Counter sink that discards everything
///
/// Default collaborator when no registry is wired in.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCounterSink;

impl CounterSink for NullCounterSink {
    fn increase(&self, _metric: &OperationMetric) {}

    fn is_enabled(&self) -> bool {
        false
    }
}

/// Consumer reporting completed operations to logging and counting subsystems
pub trait MetricGatherer: Send + Sync {
    /// Report one completed operation
    fn gather_metric(&self, metric: &OperationMetric);

    /// Report one completed operation, optionally printing its parameters
    fn gather_metric_with_properties(&self, metric: &OperationMetric, print_properties: bool);

    /// Emit the verbose operation-entry trace, gated at its own level
    fn gather_metric_entry_log(&self, metric: &OperationMetric);

    /// Emit a free-form line, formatted only if the gate for `level` is open
    fn gather_information_log(&self, level: Level, message: &str, properties: &[(String, String)]);

    /// Whether any reporting path would currently accept a metric
    ///
    /// Lets callers skip expensive pre-formatting when no gate is open.
    fn is_enabled(&self) -> bool;

    /// Like [`is_enabled`](Self::is_enabled), additionally requiring the
    /// most verbose gate for marker-scoped detail
    fn is_enabled_for(&self, marker: &str) -> bool;

    /// Acquire resources; no-op for sink kinds that hold none
    fn start(&self);

    /// Release resources; no-op for sink kinds that hold none
    fn stop(&self);
}

/// Gatherer reporting through the `tracing` facade plus a counter sink
pub struct LogMetricGatherer {
    level: Level,
    entry_level: Level,
    counters: Arc<dyn CounterSink>,
}

impl fmt::Debug for LogMetricGatherer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogMetricGatherer")
            .field("level", &self.level)
            .field("entry_level", &self.entry_level)
            .field("counters", &self.counters)
            .finish()
    }
}

impl Default for LogMetricGatherer {
    fn default() -> Self {
        Self::new(Arc::new(NullCounterSink))
    }
}

impl LogMetricGatherer {
    /// Build a gatherer with default levels and the given counter sink
    pub fn new(counters: Arc<dyn CounterSink>) -> Self {
        Self {
            level: DEFAULT_LEVEL,
            entry_level: DEFAULT_ENTRY_LEVEL,
            counters,
        }
    }

    /// Build a gatherer with explicit exit and entry gate levels
    pub fn with_levels(level: Level, entry_level: Level, counters: Arc<dyn CounterSink>) -> Self {
        Self {
            level,
            entry_level,
            counters,
        }
    }

    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    pub fn set_level(&mut self, level: Level) {
        self.level = level;
    }

    #[must_use]
    pub fn entry_level(&self) -> Level {
        self.entry_level
    }

    pub fn set_entry_level(&mut self, entry_level: Level) {
        self.entry_level = entry_level;
    }

    /// Whether the current subscriber would record an event at `level`
    ///
    /// `tracing` gates need a level known at the callsite, hence the fan-out.
    fn gate_open(level: Level) -> bool {
        if level == Level::ERROR {
            tracing::enabled!(Level::ERROR)
        } else if level == Level::WARN {
            tracing::enabled!(Level::WARN)
        } else if level == Level::INFO {
            tracing::enabled!(Level::INFO)
        } else if level == Level::DEBUG {
            tracing::enabled!(Level::DEBUG)
        } else {
            tracing::enabled!(Level::TRACE)
        }
    }

    fn emit(level: Level, line: &str) {
        if level == Level::ERROR {
            tracing::error!("{line}");
        } else if level == Level::WARN {
            tracing::warn!("{line}");
        } else if level == Level::INFO {
            tracing::info!("{line}");
        } else if level == Level::DEBUG {
            tracing::debug!("{line}");
        } else {
            tracing::trace!("{line}");
        }
    }
}

impl MetricGatherer for LogMetricGatherer {
    fn gather_metric(&self, metric: &OperationMetric) {
        self.gather_metric_with_properties(metric, false);
    }

    fn gather_metric_with_properties(&self, metric: &OperationMetric, print_properties: bool) {
        if Self::gate_open(self.level) {
            let line = format_metric_line(metric, print_properties);
            Self::emit(self.level, &line);
        }
        // counting is independent of the textual gate
        self.counters.increase(metric);
    }

    fn gather_metric_entry_log(&self, metric: &OperationMetric) {
        if Self::gate_open(self.entry_level) {
            let line = format_entry_line(metric);
            Self::emit(self.entry_level, &line);
        }
    }

    fn gather_information_log(&self, level: Level, message: &str, properties: &[(String, String)]) {
        if Self::gate_open(level) {
            let line = format_information_line(message, properties);
            Self::emit(level, &line);
        }
    }

    fn is_enabled(&self) -> bool {
        Self::gate_open(self.level) || self.counters.is_enabled()
    }

    fn is_enabled_for(&self, _marker: &str) -> bool {
        self.is_enabled() && Self::gate_open(Level::TRACE)
    }

    fn start(&self) {
        // nothing to acquire for a log-backed sink
    }

    fn stop(&self) {
        // nothing to release for a log-backed sink
    }
}
