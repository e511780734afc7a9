//! Gesture classification for one interactive region.
//!
//! The classifier owns the region's [`TouchTracker`] and runs the press,
//! single-swipe and two-finger recognizers side by side over every event.
//!
//! ## Precedence
//!
//! Press and swipe classifications of one sequence are mutually exclusive:
//! - A press result (tap, or the start/end of a long-press) always wins.
//! - Once a long-press is active the sequence belongs to the press; swipe
//!   results that arrive later are discarded.
//! - Otherwise the first swipe recognized claims the sequence.
//! - A sequence that ends unclaimed yields [`GestureResult::None`].
//!
//! All recognizers reset when the last touch lifts.

use tracing::debug;

use crate::core::{Direction, GestureConfig, Timestamp};

use super::gesture::{GestureResult, RecognizerState, Recognizer};
use super::press::PressRecognizer;
use super::swipe::SwipeRecognizer;
use super::tracker::{TouchEvent, TouchTracker, TrackerChange};
use super::two_finger::TwoFingerSwipeRecognizer;

/// Which recognizer owns the current sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Claim {
    Press,
    Swipe,
}

/// Turns raw touch events into classified gestures.
#[derive(Clone, Debug)]
pub struct GestureClassifier {
    tracker: TouchTracker,
    press: PressRecognizer,
    swipe: SwipeRecognizer,
    two_finger: TwoFingerSwipeRecognizer,
    claim: Option<Claim>,
}

impl GestureClassifier {
    /// Create a classifier from gesture thresholds.
    #[must_use]
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            tracker: TouchTracker::new(),
            press: PressRecognizer::new(config),
            swipe: SwipeRecognizer::new(config),
            two_finger: TwoFingerSwipeRecognizer::new(config),
            claim: None,
        }
    }

    /// Restrict two-finger swipes to one direction.
    #[must_use]
    pub fn with_two_finger_direction(mut self, direction: Direction) -> Self {
        self.two_finger = self.two_finger.with_required_direction(direction);
        self
    }

    /// Feed one raw event.
    ///
    /// Returns a result when this event completes a gesture, ends a
    /// long-press, or closes a sequence nobody claimed.
    pub fn handle(&mut self, event: TouchEvent) -> Option<GestureResult> {
        let change = self.tracker.apply(&event);
        if change == TrackerChange::Ignored {
            return None;
        }

        let press = self.press.handle(&event, &change, &self.tracker);
        let swipe = self.swipe.handle(&event, &change, &self.tracker);
        let two_finger = self.two_finger.handle(&event, &change, &self.tracker);

        let mut result = None;
        if let Some(r) = press {
            self.claim = Some(Claim::Press);
            result = Some(r);
        } else if let Some(r) = two_finger.or(swipe) {
            if self.claim == Some(Claim::Press) {
                debug!(?r, "swipe discarded: sequence claimed by press");
            } else {
                self.claim = Some(Claim::Swipe);
                result = Some(r);
            }
        }

        if self.tracker.is_sequence_complete() {
            if result.is_none() && self.claim.is_none() {
                result = Some(GestureResult::None);
            }
            self.reset_recognizers();
        }

        if let Some(r) = &result {
            debug!(?r, "gesture classified");
        }
        result
    }

    /// Time-driven classification: reports a long-press once the press
    /// has been held past the threshold.
    pub fn poll(&mut self, now: Timestamp) -> Option<GestureResult> {
        if self.claim.is_some() {
            return None;
        }
        let result = self.press.poll(now)?;
        self.claim = Some(Claim::Press);
        debug!(?result, "gesture classified");
        Some(result)
    }

    /// When the current press would become a long-press.
    #[must_use]
    pub fn long_press_deadline(&self) -> Option<Timestamp> {
        if self.claim.is_some() {
            return None;
        }
        self.press.long_press_deadline()
    }

    /// Is a long-press being held right now?
    #[must_use]
    pub fn is_long_press_active(&self) -> bool {
        self.press.is_long_press_active()
    }

    /// The region's touch tracker.
    #[must_use]
    pub fn tracker(&self) -> &TouchTracker {
        &self.tracker
    }

    /// States of the press, single-swipe and two-finger recognizers.
    #[must_use]
    pub fn states(&self) -> [RecognizerState; 3] {
        [self.press.state(), self.swipe.state(), self.two_finger.state()]
    }

    /// Drop all touches and start fresh.
    pub fn reset(&mut self) {
        self.tracker.clear();
        self.reset_recognizers();
    }

    fn reset_recognizers(&mut self) {
        self.press.reset();
        self.swipe.reset();
        self.two_finger.reset();
        self.claim = None;
    }
}
