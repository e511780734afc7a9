//! Deterministic virtual-clock scheduler.
//!
//! Time only moves when the host calls [`VirtualScheduler::run_until`] or
//! [`VirtualScheduler::advance`]. Timers due at the same instant fire in
//! the order they were scheduled.

use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::time::Duration;

use tracing::trace;

use crate::core::Timestamp;

use super::{Scheduler, TimerFire, TimerId};

/// Ordering key: fire time, then scheduling sequence.
type QueueKey = (Timestamp, u64);

#[derive(Clone, Debug)]
struct TimerEntry {
    key: QueueKey,
    /// `Some` for repeating timers.
    interval: Option<Duration>,
}

/// Virtual-clock [`Scheduler`] for tests and replays.
///
/// ## Example
///
/// ```
/// use std::time::Duration;
/// use lifetap::schedule::{Scheduler, VirtualScheduler};
///
/// let mut clock = VirtualScheduler::new();
/// let timer = clock.schedule_repeating(Duration::from_millis(800));
///
/// let fires = clock.advance(Duration::from_millis(2_000));
/// assert_eq!(fires.len(), 2);
/// assert!(fires.iter().all(|f| f.timer == timer));
/// ```
#[derive(Clone, Debug, Default)]
pub struct VirtualScheduler {
    now: Timestamp,
    queue: BTreeMap<QueueKey, TimerId>,
    timers: FxHashMap<TimerId, TimerEntry>,
    next_id: u64,
    next_seq: u64,
}

impl VirtualScheduler {
    /// Smallest repeat interval; keeps a zero interval from spinning forever.
    const MIN_INTERVAL: Duration = Duration::from_millis(1);

    /// Create a scheduler at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scheduler starting at `now`.
    #[must_use]
    pub fn starting_at(now: Timestamp) -> Self {
        Self {
            now,
            ..Self::default()
        }
    }

    /// Number of scheduled timers.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.timers.len()
    }

    /// Fire time of a scheduled timer.
    #[must_use]
    pub fn fire_time(&self, timer: TimerId) -> Option<Timestamp> {
        self.timers.get(&timer).map(|e| e.key.0)
    }

    /// Pop the next timer due at or before `deadline`.
    ///
    /// Moves the clock to the timer's fire time and re-arms repeating timers.
    pub fn next_due(&mut self, deadline: Timestamp) -> Option<TimerFire> {
        let (&key, &timer) = self.queue.iter().next()?;
        if key.0 > deadline {
            return None;
        }
        self.queue.remove(&key);
        self.now = self.now.max(key.0);

        let interval = self.timers.get(&timer).and_then(|e| e.interval);
        match interval {
            Some(interval) => {
                let next_key = (key.0 + interval, self.bump_seq());
                self.queue.insert(next_key, timer);
                if let Some(entry) = self.timers.get_mut(&timer) {
                    entry.key = next_key;
                }
            }
            None => {
                self.timers.remove(&timer);
            }
        }

        trace!(%timer, at = %key.0, "timer fired");
        Some(TimerFire { timer, at: key.0 })
    }

    /// Fire every timer due up to `deadline`, handing each to `dispatch`.
    ///
    /// The dispatcher receives the scheduler so it can schedule and cancel
    /// timers; timers it schedules are honoured if they fall due before
    /// `deadline`. The clock ends at `deadline`.
    pub fn run_until<F>(&mut self, deadline: Timestamp, mut dispatch: F)
    where
        F: FnMut(&mut Self, TimerFire),
    {
        while let Some(fire) = self.next_due(deadline) {
            dispatch(self, fire);
        }
        self.now = self.now.max(deadline);
    }

    /// Advance the clock by `by`, returning every fire in order.
    ///
    /// Convenience for callers that do not react to fires while time moves.
    pub fn advance(&mut self, by: Duration) -> Vec<TimerFire> {
        let deadline = self.now + by;
        let mut fires = Vec::new();
        self.run_until(deadline, |_, fire| fires.push(fire));
        fires
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    fn insert(&mut self, delay: Duration, interval: Option<Duration>) -> TimerId {
        let timer = TimerId(self.next_id);
        self.next_id += 1;

        let key = (self.now + delay, self.bump_seq());
        self.queue.insert(key, timer);
        self.timers.insert(timer, TimerEntry { key, interval });
        timer
    }
}

impl Scheduler for VirtualScheduler {
    fn now(&self) -> Timestamp {
        self.now
    }

    fn schedule_once(&mut self, delay: Duration) -> TimerId {
        self.insert(delay, None)
    }

    fn schedule_repeating(&mut self, interval: Duration) -> TimerId {
        let interval = interval.max(Self::MIN_INTERVAL);
        self.insert(interval, Some(interval))
    }

    fn cancel(&mut self, timer: TimerId) -> bool {
        match self.timers.remove(&timer) {
            Some(entry) => {
                self.queue.remove(&entry.key);
                true
            }
            None => false,
        }
    }

    fn is_scheduled(&self, timer: TimerId) -> bool {
        self.timers.contains_key(&timer)
    }
}
