//! Gesture results and the recognizer contract.

use serde::{Deserialize, Serialize};

use crate::core::{Direction, Point, Timestamp};

use super::tracker::{TouchEvent, TouchTracker, TrackerChange};

/// How many fingers performed a swipe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwipeKind {
    Single,
    TwoFinger,
}

/// A classified gesture.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum GestureResult {
    /// A short press released in place.
    Tap { origin: Point },

    /// A press held in place. Reported with `is_active = true` when the
    /// hold is recognized and `is_active = false` when it ends.
    LongPress { origin: Point, is_active: bool },

    /// A swipe. For two-finger swipes `origin` is the midpoint of the two
    /// finger origins and `distance` the length of the averaged vector.
    Swipe {
        kind: SwipeKind,
        direction: Direction,
        origin: Point,
        distance: f32,
    },

    /// The sequence ended without any recognizer claiming it.
    None,
}

impl GestureResult {
    /// Is this the `None` result?
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, GestureResult::None)
    }
}

/// Lifecycle of a single recognizer attempt.
///
/// `Idle → Tracking → {Qualifying, Failed} → Recognized`, then `reset`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecognizerState {
    /// No touches seen.
    #[default]
    Idle,
    /// Touches are down but the gesture does not qualify yet.
    Tracking,
    /// The gesture currently meets its thresholds.
    Qualifying,
    /// The gesture was emitted; further input is absorbed until reset.
    Recognized,
    /// A precondition broke; further input is ignored until reset.
    Failed,
}

impl RecognizerState {
    /// Has the attempt reached a terminal state?
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, RecognizerState::Recognized | RecognizerState::Failed)
    }
}

/// Trait for gesture recognizers.
///
/// Recognizers are pure state machines fed by the classifier after the
/// tracker has applied each event. Failure is never an error: a failed
/// recognizer simply stops reporting until it is reset.
pub trait Recognizer {
    /// Feed one event. Returns a result only when this event completes
    /// (or, for long-presses, ends) the gesture.
    fn handle(
        &mut self,
        event: &TouchEvent,
        change: &TrackerChange,
        tracker: &TouchTracker,
    ) -> Option<GestureResult>;

    /// Time-driven recognition (long-press). Default: nothing.
    fn poll(&mut self, _now: Timestamp) -> Option<GestureResult> {
        None
    }

    /// Current state.
    fn state(&self) -> RecognizerState;

    /// Return to `Idle` for the next attempt.
    fn reset(&mut self);
}
