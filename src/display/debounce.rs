//! Last-writer-wins dismissal timer.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::core::Timestamp;
use crate::schedule::{Scheduler, TimerId};

/// A scheduled dismissal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingDismissal {
    pub timer: TimerId,
    pub scheduled_at: Timestamp,
    pub fire_at: Timestamp,
}

/// Owns at most one pending dismissal. Each trigger cancels the previous
/// one, so only the quiet period after the last trigger counts.
#[derive(Clone, Debug)]
pub struct Debouncer {
    window: Duration,
    pending: Option<PendingDismissal>,
}

impl Debouncer {
    /// Create a debouncer with the given quiet window.
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self { window, pending: None }
    }

    #[must_use]
    pub fn window(&self) -> Duration {
        self.window
    }

    /// The dismissal currently scheduled, if any.
    #[must_use]
    pub fn pending(&self) -> Option<&PendingDismissal> {
        self.pending.as_ref()
    }

    /// Restart the window from now.
    pub fn trigger<S>(&mut self, scheduler: &mut S) -> PendingDismissal
    where
        S: Scheduler + ?Sized,
    {
        self.cancel(scheduler);
        let now = scheduler.now();
        let dismissal = PendingDismissal {
            timer: scheduler.schedule_once(self.window),
            scheduled_at: now,
            fire_at: now + self.window,
        };
        self.pending = Some(dismissal);
        dismissal
    }

    /// Drop the pending dismissal without firing it.
    pub fn cancel<S>(&mut self, scheduler: &mut S) -> bool
    where
        S: Scheduler + ?Sized,
    {
        match self.pending.take() {
            Some(pending) => {
                scheduler.cancel(pending.timer);
                true
            }
            None => false,
        }
    }

    /// Consume the pending dismissal if `timer` is it.
    pub fn handle_timer(&mut self, timer: TimerId) -> Option<PendingDismissal> {
        match self.pending {
            Some(pending) if pending.timer == timer => self.pending.take(),
            _ => None,
        }
    }
}
