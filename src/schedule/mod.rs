//! Scheduling port.
//!
//! All waiting in the engine is expressed as timers scheduled through the
//! [`Scheduler`] trait: hold-to-repeat ticks, long-press polls and display
//! dismissals. Hosts back the trait with their UI run loop; tests use the
//! deterministic [`VirtualScheduler`].
//!
//! ## Contract
//!
//! - Timer ids are unique for the lifetime of a scheduler.
//! - `cancel` is idempotent: cancelling an unknown or already-fired
//!   one-shot timer returns `false` and does nothing.
//! - A cancelled timer never fires.
//! - Repeating timers fire every `interval` with no catch-up of missed ticks.
//!
//! Firing is reported back to the host, which dispatches the [`TimerId`] to
//! the components that own it. Components compare the id against the one
//! they currently hold, so a stale id can never reactivate state.

mod virtual_clock;

pub use virtual_clock::VirtualScheduler;

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::core::Timestamp;

/// Handle to a scheduled timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimerId(pub u64);

impl TimerId {
    /// Create a new timer ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TimerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Timer({})", self.0)
    }
}

/// A timer that has come due.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerFire {
    /// Which timer fired.
    pub timer: TimerId,
    /// The scheduled fire time.
    pub at: Timestamp,
}

/// Trait for timer backends.
pub trait Scheduler {
    /// Current time on the engine timeline.
    fn now(&self) -> Timestamp;

    /// Schedule a one-shot timer firing after `delay`.
    fn schedule_once(&mut self, delay: Duration) -> TimerId;

    /// Schedule a timer firing every `interval`, first after one interval.
    fn schedule_repeating(&mut self, interval: Duration) -> TimerId;

    /// Cancel a timer. Returns `true` if the timer was still scheduled.
    fn cancel(&mut self, timer: TimerId) -> bool;

    /// Is the timer still scheduled?
    fn is_scheduled(&self, timer: TimerId) -> bool;
}
