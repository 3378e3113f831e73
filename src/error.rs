//! Error types for the statistics engine
//!
//! The aggregation core itself is pure in-memory arithmetic and infallible;
//! errors only arise from invalid configuration supplied by the caller.

use thiserror::Error;

/// Errors surfaced while building or configuring statistics components
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MetricsError {
    /// An interval or fragment duration of zero cannot bucket timestamps
    #[error("interval duration must be greater than zero")]
    ZeroIntervalDuration,

    /// A ring with no fragments cannot hold statistics
    #[error("fragment count must be greater than zero")]
    ZeroFragmentCount,

    /// Configuration file could not be read
    #[error("failed to read config file '{path}': {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be parsed
    #[error("failed to parse config file '{path}': {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// A log level name in the configuration did not resolve
    #[error("unknown log level '{0}'")]
    UnknownLogLevel(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_interval_message() {
        let err = MetricsError::ZeroIntervalDuration;
        assert!(err.to_string().contains("greater than zero"));
    }

    #[test]
    fn test_config_read_preserves_source() {
        use std::error::Error;

        let err = MetricsError::ConfigRead {
            path: "/missing/profiler.toml".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };

        assert!(err.to_string().contains("/missing/profiler.toml"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_unknown_log_level_message() {
        let err = MetricsError::UnknownLogLevel("loud".to_string());
        assert!(err.to_string().contains("loud"));
    }
}
