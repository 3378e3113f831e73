//! Log formatting utilities
//!
//! Rendering is kept separate from gating so callers can skip every
//! formatting cost when no log gate is open.

use crate::metric::OperationMetric;

/// Format bytes in human-readable format (KB, MB, GB)
#[inline]
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Short label for an interval duration: "500ms", "1m", "2h"
///
/// Picks the largest unit that divides the duration evenly, so uneven values
/// stay exact ("90s" rather than a rounded "1.5m").
#[must_use]
pub fn duration_short_text(duration_ns: u64) -> String {
    use crate::constants::nanos;

    const UNITS: [(u64, &str); 6] = [
        (nanos::PER_DAY, "d"),
        (nanos::PER_HOUR, "h"),
        (nanos::PER_MINUTE, "m"),
        (nanos::PER_SECOND, "s"),
        (nanos::PER_MILLI, "ms"),
        (nanos::PER_MICRO, "us"),
    ];

    if duration_ns == 0 {
        return "0ns".to_string();
    }
    for (unit, suffix) in UNITS {
        if duration_ns % unit == 0 {
            return format!("{}{}", duration_ns / unit, suffix);
        }
    }
    format!("{}ns", duration_ns)
}

/// Format a duration for log lines with two-decimal precision
#[must_use]
pub fn format_duration_ns(duration_ns: u64) -> String {
    use crate::constants::nanos;

    if duration_ns >= nanos::PER_SECOND {
        format!("{:.2}s", duration_ns as f64 / nanos::PER_SECOND as f64)
    } else if duration_ns >= nanos::PER_MILLI {
        format!("{:.2}ms", duration_ns as f64 / nanos::PER_MILLI as f64)
    } else if duration_ns >= nanos::PER_MICRO {
        format!("{:.2}us", duration_ns as f64 / nanos::PER_MICRO as f64)
    } else {
        format!("{}ns", duration_ns)
    }
}

fn cache_outcome(metric: &OperationMetric) -> &'static str {
    if !metric.cache_enabled() {
        "off"
    } else if metric.cache_hit() {
        "hit"
    } else {
        "miss"
    }
}

fn append_properties(line: &mut String, properties: &[(String, String)]) {
    if properties.is_empty() {
        return;
    }
    line.push_str(" properties=[");
    for (i, (name, value)) in properties.iter().enumerate() {
        if i > 0 {
            line.push_str(", ");
        }
        line.push_str(name);
        line.push('=');
        line.push_str(value);
    }
    line.push(']');
}

/// Render one completed operation as an exit log line
#[must_use]
pub fn format_metric_line(metric: &OperationMetric, print_properties: bool) -> String {
    let mut line = format!(
        "Operation exit: {} duration={} size={} success={} cache={}",
        metric.operation_name(),
        format_duration_ns(metric.duration_ns()),
        format_bytes(metric.response_size()),
        metric.successful(),
        cache_outcome(metric),
    );
    if print_properties {
        append_properties(&mut line, metric.properties());
    }
    line
}

/// Render an operation-entry trace line, always including parameters
#[must_use]
pub fn format_entry_line(metric: &OperationMetric) -> String {
    let mut line = format!("Operation entry: {}", metric.operation_name());
    append_properties(&mut line, metric.properties());
    line
}

/// Render a free-form information line with optional parameters
#[must_use]
pub fn format_information_line(message: &str, properties: &[(String, String)]) -> String {
    let mut line = message.to_string();
    append_properties(&mut line, properties);
    line
}
