//! Profiler configuration
//!
//! TOML-backed configuration for named rolling metrics and gatherer log
//! levels. Loading is the only I/O in the crate; everything downstream is
//! in-memory arithmetic.

use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::constants::nanos;
use crate::entry::TimeIntervalLogEntry;
use crate::error::MetricsError;
use crate::stats::IntervalNameCache;

/// Default rolling window: one minute
fn default_interval_ms() -> u64 {
    60_000
}

fn default_skip_last_interval() -> bool {
    true
}

fn default_log_level() -> String {
    "debug".to_string()
}

fn default_entry_log_level() -> String {
    "trace".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfilerConfig {
    /// Named rolling metrics to track
    #[serde(default)]
    pub entries: Vec<EntryConfig>,
    /// Gate for operation exit lines
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Gate for the verbose operation entry traces
    #[serde(default = "default_entry_log_level")]
    pub entry_log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntryConfig {
    pub id: String,
    /// Rolling window duration in milliseconds
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    #[serde(default = "default_skip_last_interval")]
    pub skip_last_interval: bool,
}

impl EntryConfig {
    /// Window duration in the engine's nanosecond unit
    #[must_use]
    pub fn interval_ns(&self) -> u64 {
        self.interval_ms.saturating_mul(nanos::PER_MILLI)
    }
}

impl ProfilerConfig {
    /// Build one log entry per configured metric
    ///
    /// All entries resolve their interval labels through the same injected
    /// cache.
    pub fn build_entries(
        &self,
        names: &IntervalNameCache,
    ) -> Result<Vec<TimeIntervalLogEntry>, MetricsError> {
        self.entries
            .iter()
            .map(|config| {
                let mut entry = TimeIntervalLogEntry::new(&config.id, config.interval_ns(), names)?;
                entry.set_skip_last_interval(config.skip_last_interval);
                Ok(entry)
            })
            .collect()
    }

    /// Resolve the configured (exit, entry) gate levels
    pub fn levels(&self) -> Result<(Level, Level), MetricsError> {
        Ok((
            parse_level(&self.log_level)?,
            parse_level(&self.entry_log_level)?,
        ))
    }
}

/// Parse a log level name ("info", "debug", ...) case-insensitively
pub fn parse_level(name: &str) -> Result<Level, MetricsError> {
    name.parse()
        .map_err(|_| MetricsError::UnknownLogLevel(name.to_string()))
}

pub fn load_config(config_path: &str) -> Result<ProfilerConfig, MetricsError> {
    let config_content =
        std::fs::read_to_string(config_path).map_err(|e| MetricsError::ConfigRead {
            path: config_path.to_string(),
            source: e,
        })?;

    let config: ProfilerConfig =
        toml::from_str(&config_content).map_err(|e| MetricsError::ConfigParse {
            path: config_path.to_string(),
            source: e,
        })?;

    Ok(config)
}

pub fn create_default_config() -> ProfilerConfig {
    ProfilerConfig {
        entries: vec![EntryConfig {
            id: "database-operations".to_string(),
            interval_ms: default_interval_ms(),
            skip_last_interval: default_skip_last_interval(),
        }],
        log_level: default_log_level(),
        entry_log_level: default_entry_log_level(),
    }
}
