//! The "+N/-N" change indicator.
//!
//! Every applied life change adds to a running total and keeps the
//! indicator visible. The indicator hides, and the total resets to zero,
//! once no change has arrived for the display window. A burst of changes
//! therefore produces one dismissal showing the sum of the burst.

use std::time::Duration;

use tracing::debug;

use crate::schedule::{Scheduler, TimerId};

use super::debounce::{Debouncer, PendingDismissal};

/// Cumulative change value with a debounced visibility window.
#[derive(Clone, Debug)]
pub struct ChangeDisplayCoordinator {
    cumulative_change: i32,
    visible: bool,
    debounce: Debouncer,
}

impl ChangeDisplayCoordinator {
    /// Create a hidden indicator with the given quiet window.
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            cumulative_change: 0,
            visible: false,
            debounce: Debouncer::new(window),
        }
    }

    /// Sum of the changes shown since the indicator last hid.
    #[must_use]
    pub fn cumulative_change(&self) -> i32 {
        self.cumulative_change
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The dismissal currently scheduled, if any.
    #[must_use]
    pub fn pending(&self) -> Option<&PendingDismissal> {
        self.debounce.pending()
    }

    /// Show an applied change and restart the window.
    pub fn record<S>(&mut self, applied_delta: i32, scheduler: &mut S)
    where
        S: Scheduler + ?Sized,
    {
        self.cumulative_change = self.cumulative_change.saturating_add(applied_delta);
        self.visible = true;
        let pending = self.debounce.trigger(scheduler);
        debug!(
            delta = applied_delta,
            cumulative = self.cumulative_change,
            fire_at = %pending.fire_at,
            "change shown"
        );
    }

    /// Handle a fired timer. Returns `true` if it hid the indicator.
    pub fn handle_timer(&mut self, timer: TimerId) -> bool {
        if self.debounce.handle_timer(timer).is_none() {
            return false;
        }
        debug!(cumulative = self.cumulative_change, "change indicator dismissed");
        self.visible = false;
        self.cumulative_change = 0;
        true
    }

    /// Hide immediately and cancel any pending dismissal.
    pub fn clear<S>(&mut self, scheduler: &mut S)
    where
        S: Scheduler + ?Sized,
    {
        self.debounce.cancel(scheduler);
        self.visible = false;
        self.cumulative_change = 0;
    }
}
