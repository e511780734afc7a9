//! Single-finger swipe recognition.

use tracing::debug;

use crate::core::{Direction, GestureConfig, Vector};

use super::gesture::{GestureResult, RecognizerState, Recognizer, SwipeKind};
use super::tracker::{TouchEvent, TouchId, TouchTracker, TrackerChange};

/// Recognizes a swipe made with exactly one finger.
///
/// The finger must travel at least `min_swipe_distance` from its origin.
/// While it does, the recognizer is `Qualifying`; the swipe is emitted when
/// the finger lifts. A second finger fails the attempt.
#[derive(Clone, Debug)]
pub struct SwipeRecognizer {
    min_distance: f32,
    state: RecognizerState,
    touch: Option<TouchId>,
    last_vector: Vector,
}

impl SwipeRecognizer {
    /// Create a recognizer from gesture thresholds.
    #[must_use]
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            min_distance: config.min_swipe_distance,
            state: RecognizerState::Idle,
            touch: None,
            last_vector: Vector::default(),
        }
    }

    /// Displacement computed at the last event.
    #[must_use]
    pub fn last_distance(&self) -> f32 {
        self.last_vector.length()
    }

    fn update(&mut self, displacement: Vector) {
        self.last_vector = displacement;
        self.state = if displacement.length() >= self.min_distance {
            RecognizerState::Qualifying
        } else {
            RecognizerState::Tracking
        };
    }
}

impl Recognizer for SwipeRecognizer {
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
                    debug!("single swipe failed: touch count != 1");
                    self.state = RecognizerState::Failed;
                } else {
                    self.touch = Some(id);
                    self.last_vector = Vector::default();
                    self.state = RecognizerState::Tracking;
                }
                None
            }
            TrackerChange::Moved(id) if Some(id) == self.touch => {
                if let Some(touch) = tracker.get(id) {
                    self.update(touch.displacement());
                }
                None
            }
            TrackerChange::Ended(touch) if Some(touch.id) == self.touch => {
                self.update(touch.displacement());
                if self.state == RecognizerState::Qualifying {
                    self.state = RecognizerState::Recognized;
                    let result = GestureResult::Swipe {
                        kind: SwipeKind::Single,
                        direction: Direction::from_vector(self.last_vector),
                        origin: touch.origin,
                        distance: self.last_vector.length(),
                    };
                    debug!(?result, "single swipe recognized");
                    Some(result)
                } else {
                    self.state = RecognizerState::Failed;
                    None
                }
            }
            TrackerChange::Cancelled(touch) if Some(touch.id) == self.touch => {
                self.state = RecognizerState::Failed;
                None
            }
            _ => None,
        }
    }

    fn state(&self) -> RecognizerState {
        self.state
    }

    fn reset(&mut self) {
        self.state = RecognizerState::Idle;
        self.touch = None;
        self.last_vector = Vector::default();
    }
}
