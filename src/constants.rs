//! Constants used throughout the statistics engine
//!
//! This module centralizes the fragment sizing policy and time unit
//! conversions to improve maintainability and reduce duplication.

/// Time unit conversions (nanoseconds)
pub mod nanos {
    /// Nanoseconds per microsecond
    pub const PER_MICRO: u64 = 1_000;

    /// Nanoseconds per millisecond
    pub const PER_MILLI: u64 = 1_000_000;

    /// Nanoseconds per second
    pub const PER_SECOND: u64 = 1_000_000_000;

    /// Nanoseconds per minute
    pub const PER_MINUTE: u64 = 60 * PER_SECOND;

    /// Nanoseconds per hour
    pub const PER_HOUR: u64 = 60 * PER_MINUTE;

    /// Nanoseconds per day
    pub const PER_DAY: u64 = 24 * PER_HOUR;
}

/// Fragment sizing policy
///
/// A window is stored as a fixed ring of fragments, so memory stays constant
/// regardless of event rate. Small windows get a single full-width fragment
/// plus spares; larger windows are split for ~10% reporting granularity.
pub mod fragments {
    /// Windows at or below this duration are captured in one full-width fragment
    pub const SINGLE_FRAGMENT_MAX_NS: u64 = super::nanos::PER_SECOND;

    /// Ring size for small windows: the filling fragment, one stale, one buffer
    pub const SMALL_WINDOW_COUNT: usize = 3;

    /// Larger windows are split into this many equal fragments
    pub const WINDOW_SPLIT: u64 = 10;

    /// Extra fragments kept beyond the split so a full window stays queryable
    /// while the newest slot fills and the oldest awaits reuse
    pub const BUFFER_COUNT: usize = 2;

    /// Ring size for split windows
    pub const SPLIT_WINDOW_COUNT: usize = WINDOW_SPLIT as usize + BUFFER_COUNT;

    // Compile-time validation

    /// A split window must still cover the full interval after excluding
    /// the currently-filling fragment
    const _SPLIT_COVERS_WINDOW: () = assert!(
        SPLIT_WINDOW_COUNT > WINDOW_SPLIT as usize,
        "ring must hold more fragments than the window spans"
    );

    /// Small windows need at least one spare beyond the filling fragment
    const _SMALL_HAS_SPARE: () = assert!(
        SMALL_WINDOW_COUNT >= 2,
        "small-window ring needs a spare fragment"
    );
}
