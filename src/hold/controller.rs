//! Hold-to-repeat controller.
//!
//! While a long-press is held the controller keeps a repeating timer
//! running. Each tick is handed back to the caller as a [`HoldTick`]; the
//! caller applies the step. The first step happens at the first tick, one
//! interval after `start`, not at `start` itself.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use tracing::debug;

use crate::core::{HoldConfig, Side};
use crate::schedule::{Scheduler, TimerId};

/// Identity of one hold session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SessionId(pub u64);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Hold({})", self.0)
    }
}

/// An active hold. Exists only between `start` and `stop`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoldSession {
    pub id: SessionId,
    pub side: Side,
    pub step_amount: i32,
    pub interval: Duration,
    pub timer: TimerId,
}

/// One repeat tick to apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoldTick {
    pub session: SessionId,
    pub side: Side,
    pub step: i32,
}

/// Repeating-step controller. At most one session is active at a time.
#[derive(Clone, Debug)]
pub struct HoldRepeatController {
    interval: Duration,
    session: Option<HoldSession>,
    next_session: u64,
}

impl HoldRepeatController {
    /// Create an idle controller.
    #[must_use]
    pub fn new(config: &HoldConfig) -> Self {
        Self {
            interval: config.repeat_interval,
            session: None,
            next_session: 0,
        }
    }

    /// Repeat interval for new sessions.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// The active session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&HoldSession> {
        self.session.as_ref()
    }

    /// Is a hold active?
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Begin repeating `step` on `side`.
    ///
    /// Returns `None` without scheduling anything if a session is already
    /// active.
    pub fn start<S>(&mut self, side: Side, step: i32, scheduler: &mut S) -> Option<SessionId>
    where
        S: Scheduler + ?Sized,
    {
        if let Some(active) = &self.session {
            debug!(session = %active.id, "hold already active, start ignored");
            return None;
        }

        let id = SessionId(self.next_session);
        self.next_session += 1;
        let timer = scheduler.schedule_repeating(self.interval);
        self.session = Some(HoldSession {
            id,
            side,
            step_amount: step,
            interval: self.interval,
            timer,
        });
        debug!(session = %id, ?side, step, %timer, "hold started");
        Some(id)
    }

    /// End the active session. Safe to call when idle.
    pub fn stop<S>(&mut self, scheduler: &mut S) -> Option<HoldSession>
    where
        S: Scheduler + ?Sized,
    {
        let session = self.session.take()?;
        scheduler.cancel(session.timer);
        debug!(session = %session.id, "hold stopped");
        Some(session)
    }

    /// End the session only if it is still `id`.
    pub fn stop_session<S>(&mut self, id: SessionId, scheduler: &mut S) -> bool
    where
        S: Scheduler + ?Sized,
    {
        match self.session {
            Some(session) if session.id == id => self.stop(scheduler).is_some(),
            _ => false,
        }
    }

    /// Map a fired timer to a tick. Timers this controller does not
    /// currently own yield nothing.
    pub fn handle_timer(&self, timer: TimerId) -> Option<HoldTick> {
        let session = self.session.as_ref().filter(|s| s.timer == timer)?;
        Some(HoldTick {
            session: session.id,
            side: session.side,
            step: session.step_amount,
        })
    }
}

impl Default for HoldRepeatController {
    fn default() -> Self {
        Self::new(&HoldConfig::default())
    }
}
