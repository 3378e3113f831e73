//! Reusable ring slots
//!
//! A [`TimeFragment`] is one slot of the aggregation ring: an
//! [`OperationStatistics`] accumulator tagged with the window it currently
//! represents. Slots are recycled: when the ring wraps onto a slot whose tag
//! is stale, the first writer to reach the fragment lock resets it for the
//! new window, so a fragment never mixes data from two disjoint time ranges.

use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};

use super::statistics::OperationStatistics;

/// Tag for a fragment that has never been written
const EMPTY_WINDOW: u64 = u64::MAX;

#[derive(Debug)]
struct FragmentState {
    window_start_ns: u64,
    statistics: OperationStatistics,
}

/// One slot of the aggregation ring
///
/// The lock is scoped to this fragment alone: writers targeting different
/// fragments never contend, and because rotation reset and per-event
/// accumulation run under the same lock, exactly one writer performs each
/// reset and a reader can never observe a torn counter group.
#[derive(Debug)]
pub struct TimeFragment {
    state: Mutex<FragmentState>,
}

impl TimeFragment {
    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(FragmentState {
                window_start_ns: EMPTY_WINDOW,
                statistics: OperationStatistics::default(),
            }),
        }
    }

    /// Lock this fragment for writing into the given window
    ///
    /// If the slot still holds an older window, its statistics are reset and
    /// the new window start installed before the handle is returned; a
    /// concurrent writer racing for the same transition simply observes the
    /// freshly reset fragment once it acquires the lock.
    pub(crate) fn claim(&self, window_start_ns: u64) -> MappedMutexGuard<'_, OperationStatistics> {
        let mut state = self.state.lock();
        if state.window_start_ns != window_start_ns {
            state.window_start_ns = window_start_ns;
            state.statistics = OperationStatistics::default();
        }
        MutexGuard::map(state, |s| &mut s.statistics)
    }

    /// Snapshot the resident window and its statistics
    ///
    /// Returns `None` while the fragment is empty (never written).
    pub(crate) fn snapshot(&self) -> Option<(u64, OperationStatistics)> {
        let state = self.state.lock();
        if state.window_start_ns == EMPTY_WINDOW {
            None
        } else {
            Some((state.window_start_ns, state.statistics))
        }
    }
}
