//! Process-wide monotonic clock
//!
//! All writers and readers of one aggregator must share a single time unit.
//! `now_nanos` measures nanoseconds since a process-wide anchor captured on
//! first use, so timestamps are monotonic and comparable across threads.

use std::sync::OnceLock;
use std::time::Instant;

static ANCHOR: OnceLock<Instant> = OnceLock::new();

/// Current time in nanoseconds since the process-wide anchor
///
/// The first call establishes the anchor and returns a value near zero.
#[inline]
pub fn now_nanos() -> u64 {
    ANCHOR.get_or_init(Instant::now).elapsed().as_nanos() as u64
}
