//! Tap and long-press recognition.
//!
//! A single finger that stays inside the jitter tolerance is a press:
//! released before `long_press_duration` it is a tap, held past it it is a
//! long-press. Long-press activation is time-driven, so the host polls the
//! recognizer when the long-press deadline passes.

use std::time::Duration;

use tracing::debug;

use crate::core::{GestureConfig, Point, Timestamp};

use super::gesture::{GestureResult, RecognizerState, Recognizer};
use super::tracker::{TouchEvent, TouchId, TouchTracker, TrackerChange};

/// Tap / long-press recognizer.
#[derive(Clone, Debug)]
pub struct PressRecognizer {
    long_press_duration: Duration,
    jitter_tolerance: f32,
    state: RecognizerState,
    touch: Option<TouchId>,
    origin: Point,
    started_at: Timestamp,
}

impl PressRecognizer {
    /// Create a recognizer from gesture thresholds.
    #[must_use]
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            long_press_duration: config.long_press_duration,
            jitter_tolerance: config.tap_jitter_tolerance,
            state: RecognizerState::Idle,
            touch: None,
            origin: Point::default(),
            started_at: Timestamp::ZERO,
        }
    }

    /// Is a long-press currently held?
    #[must_use]
    pub fn is_long_press_active(&self) -> bool {
        self.state == RecognizerState::Qualifying
    }

    /// When the current press becomes a long-press, if one is being tracked.
    #[must_use]
    pub fn long_press_deadline(&self) -> Option<Timestamp> {
        (self.state == RecognizerState::Tracking).then(|| self.started_at + self.long_press_duration)
    }

    /// Fail the attempt, reporting the end of an active long-press.
    fn fail(&mut self, reason: &'static str) -> Option<GestureResult> {
        let was_active = self.is_long_press_active();
        if !self.state.is_terminal() {
            debug!(reason, "press recognizer failed");
        }
        self.state = RecognizerState::Failed;
        was_active.then_some(GestureResult::LongPress {
            origin: self.origin,
            is_active: false,
        })
    }
}

impl Recognizer for PressRecognizer {
    fn handle(
        &mut self,
        _event: &TouchEvent,
        change: &TrackerChange,
        tracker: &TouchTracker,
    ) -> Option<GestureResult> {
        if self.state.is_terminal() {
            return None;
        }

        match *change {
            TrackerChange::Began { id, .. } => {
                if tracker.violates_arity(1) {
                    return self.fail("second touch");
                }
                if let Some(touch) = tracker.get(id) {
                    self.touch = Some(id);
                    self.origin = touch.origin;
                    self.started_at = touch.started_at;
                    self.state = RecognizerState::Tracking;
                }
                None
            }
            TrackerChange::Moved(id) if Some(id) == self.touch => {
                // An active long-press keeps holding even if the finger drifts.
                if self.state == RecognizerState::Tracking {
                    let moved = tracker.get(id).map_or(0.0, |t| t.distance());
                    if moved > self.jitter_tolerance {
                        return self.fail("moved beyond jitter tolerance");
                    }
                }
                None
            }
            TrackerChange::Ended(touch) if Some(touch.id) == self.touch => {
                let held = touch.updated_at.saturating_since(self.started_at);
                let moved = touch.distance();
                match self.state {
                    RecognizerState::Qualifying => {
                        self.state = RecognizerState::Recognized;
                        Some(GestureResult::LongPress {
                            origin: self.origin,
                            is_active: false,
                        })
                    }
                    RecognizerState::Tracking if moved > self.jitter_tolerance => {
                        self.fail("moved beyond jitter tolerance")
                    }
                    RecognizerState::Tracking if held < self.long_press_duration => {
                        self.state = RecognizerState::Recognized;
                        Some(GestureResult::Tap { origin: self.origin })
                    }
                    RecognizerState::Tracking => {
                        // Held long enough but released before any poll.
                        self.state = RecognizerState::Recognized;
                        Some(GestureResult::LongPress {
                            origin: self.origin,
                            is_active: false,
                        })
                    }
                    _ => None,
                }
            }
            TrackerChange::Cancelled(touch) if Some(touch.id) == self.touch => self.fail("cancelled"),
            _ => None,
        }
    }

    fn poll(&mut self, now: Timestamp) -> Option<GestureResult> {
        let deadline = self.long_press_deadline()?;
        if now < deadline {
            return None;
        }
        self.state = RecognizerState::Qualifying;
        debug!(origin = ?self.origin, "long-press recognized");
        Some(GestureResult::LongPress {
            origin: self.origin,
            is_active: true,
        })
    }

    fn state(&self) -> RecognizerState {
        self.state
    }

    fn reset(&mut self) {
        self.state = RecognizerState::Idle;
        self.touch = None;
    }
}
