//! End-to-end tests: metrics through entries, gatherers, and configuration

use std::io::Write;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use tempfile::NamedTempFile;

use opstats::{
    load_config, CounterSink, IntervalNameCache, LogEntry, LogMetricGatherer, MetricGatherer,
    OperationMetric, ProfilerConfig, TimeIntervalLogEntry,
};

const SECOND_NS: u64 = 1_000_000_000;

/// Counter sink that remembers everything it was handed
#[derive(Debug, Default)]
struct RecordingSink {
    metrics: Mutex<Vec<OperationMetric>>,
}

impl CounterSink for RecordingSink {
    fn increase(&self, metric: &OperationMetric) {
        self.metrics.lock().unwrap().push(metric.clone());
    }

    fn is_enabled(&self) -> bool {
        true
    }
}

#[test]
fn test_metric_flows_into_windowed_statistics() {
    let names = IntervalNameCache::new();
    let entry = TimeIntervalLogEntry::new("select-order", 60 * SECOND_NS, &names).unwrap();

    let mut metric = OperationMetric::start("select-order", true);
    metric.stop(4_096, true, true);
    entry.add_value(&metric);

    let stats = entry.statistics_with(false);
    assert_eq!(stats.count(), 1);
    assert_eq!(stats.cache_hit_count(), 1);
    assert_eq!(stats.total_duration_ns(), metric.duration_ns());
}

#[test]
fn test_gatherer_counts_while_log_gate_closed() {
    // no subscriber is installed in this test binary: the textual path is
    // gated off, the counter path must still see every operation
    let sink = Arc::new(RecordingSink::default());
    let gatherer = LogMetricGatherer::new(sink.clone());

    let mut metric = OperationMetric::start("update-cart", false);
    metric.stop(128, false, true);
    gatherer.gather_metric(&metric);
    gatherer.gather_metric_with_properties(&metric, true);
    gatherer.gather_metric_entry_log(&metric);

    let seen = sink.metrics.lock().unwrap();
    // entry traces do not count; the two exit reports do
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].operation_name(), "update-cart");
}

#[test]
fn test_gatherer_and_entry_share_one_event() {
    let names = IntervalNameCache::new();
    let entry = TimeIntervalLogEntry::new("checkout", 60 * SECOND_NS, &names).unwrap();
    let sink = Arc::new(RecordingSink::default());
    let gatherer = LogMetricGatherer::new(sink.clone());

    let mut metric = OperationMetric::start("checkout", true);
    metric.stop(1_024, false, false);

    // the same completed operation fans out to both consumers
    entry.add_value(&metric);
    gatherer.gather_metric(&metric);

    let stats = entry.statistics_with(false);
    assert_eq!(stats.count(), 1);
    assert_eq!(stats.failure_count(), 1);
    assert_eq!(stats.cache_miss_count(), 1);
    assert_eq!(sink.metrics.lock().unwrap().len(), 1);
}

#[test]
fn test_config_round_trip_builds_entries() -> Result<()> {
    let config = ProfilerConfig {
        entries: vec![
            opstats::EntryConfig {
                id: "search".to_string(),
                interval_ms: 1_000,
                skip_last_interval: false,
            },
            opstats::EntryConfig {
                id: "checkout".to_string(),
                interval_ms: 60_000,
                skip_last_interval: true,
            },
        ],
        log_level: "info".to_string(),
        entry_log_level: "debug".to_string(),
    };
    let config_toml = toml::to_string_pretty(&config)?;

    let mut temp_file = NamedTempFile::new()?;
    write!(temp_file, "{}", config_toml)?;

    let loaded = load_config(temp_file.path().to_str().unwrap())?;
    assert_eq!(loaded, config);

    let names = IntervalNameCache::new();
    let entries = loaded.build_entries(&names)?;
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].interval_name(), "1s");
    assert_eq!(entries[1].interval_name(), "1m");
    assert!(!entries[0].skip_last_interval());
    assert!(entries[1].skip_last_interval());

    let (level, entry_level) = loaded.levels()?;
    assert_eq!(level, tracing::Level::INFO);
    assert_eq!(entry_level, tracing::Level::DEBUG);

    Ok(())
}

#[test]
fn test_load_config_invalid_toml() -> Result<()> {
    let mut temp_file = NamedTempFile::new()?;
    write!(temp_file, "invalid toml content [[[")?;

    let result = load_config(temp_file.path().to_str().unwrap());
    assert!(result.is_err());
    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("failed to parse config file")
    );

    Ok(())
}
