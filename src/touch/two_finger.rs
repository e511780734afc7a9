//! Two-finger parallel swipe recognition.
//!
//! Both fingers must travel at least the minimum distance, start close to
//! each other and move in roughly the same direction. The parallelism test
//! compares the cosine of the angle between the two finger vectors against
//! `min_parallel_cosine`, which rejects pinches and rotations that would
//! otherwise satisfy the distance checks.
//!
//! Both fingers must be down for the whole stroke. A first finger that
//! travels past the jitter tolerance before the second lands fails the
//! attempt, so a one-finger drag never turns into a two-finger swipe.
//!
//! The gesture completes when the first of the two fingers lifts. The
//! other finger's lift is absorbed.

use smallvec::SmallVec;

use tracing::debug;

use crate::core::{Direction, GestureConfig, Point, Vector};

use super::gesture::{GestureResult, RecognizerState, Recognizer, SwipeKind};
use super::tracker::{TouchEvent, TouchId, TouchPoint, TouchTracker, TrackerChange};

/// Outcome of checking two finger vectors against the thresholds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParallelCheck {
    /// All conditions hold.
    Valid { direction: Direction, average: Vector },
    /// A finger has not travelled far enough.
    TooShort,
    /// The finger origins are too far apart.
    TooFarApart,
    /// The fingers move in different directions.
    NotParallel,
    /// The fingers do not both move in the required direction.
    WrongDirection,
}

/// Two-finger swipe recognizer.
#[derive(Clone, Debug)]
pub struct TwoFingerSwipeRecognizer {
    min_distance: f32,
    max_separation: f32,
    min_cosine: f32,
    directional_threshold: f32,
    solo_tolerance: f32,
    required_direction: Option<Direction>,
    state: RecognizerState,
    fingers: SmallVec<[TouchId; 2]>,
}

impl TwoFingerSwipeRecognizer {
    /// Create a recognizer accepting any direction.
    #[must_use]
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            min_distance: config.min_swipe_distance,
            max_separation: config.max_finger_separation,
            min_cosine: config.min_parallel_cosine,
            directional_threshold: config.directional_threshold,
            solo_tolerance: config.tap_jitter_tolerance,
            required_direction: None,
            state: RecognizerState::Idle,
            fingers: SmallVec::new(),
        }
    }

    /// Only accept swipes where both fingers travel in `direction`.
    #[must_use]
    pub fn with_required_direction(mut self, direction: Direction) -> Self {
        self.required_direction = Some(direction);
        self
    }

    /// The direction this recognizer is restricted to, if any.
    #[must_use]
    pub fn required_direction(&self) -> Option<Direction> {
        self.required_direction
    }

    /// Check two finger states against all thresholds.
    #[must_use]
    pub fn check(&self, a: &TouchPoint, b: &TouchPoint) -> ParallelCheck {
        let v1 = a.displacement();
        let v2 = b.displacement();

        if a.origin.distance_to(b.origin) > self.max_separation {
            return ParallelCheck::TooFarApart;
        }
        if v1.length() < self.min_distance || v2.length() < self.min_distance {
            return ParallelCheck::TooShort;
        }
        match v1.cos_angle(v2) {
            Some(cos) if cos >= self.min_cosine => {}
            _ => return ParallelCheck::NotParallel,
        }

        let average = v1.average(v2);
        let direction = match self.required_direction {
            Some(required) => {
                let unit = required.unit();
                let threshold = self.directional_threshold;
                if v1.dot(unit) <= threshold || v2.dot(unit) <= threshold {
                    return ParallelCheck::WrongDirection;
                }
                required
            }
            None => Direction::from_vector(average),
        };

        ParallelCheck::Valid { direction, average }
    }

    fn fail(&mut self, reason: &'static str) {
        debug!(reason, "two-finger swipe failed");
        self.state = RecognizerState::Failed;
    }

    fn owns(&self, id: TouchId) -> bool {
        self.fingers.contains(&id)
    }

    fn other_finger<'a>(&self, id: TouchId, tracker: &'a TouchTracker) -> Option<&'a TouchPoint> {
        let other = self.fingers.iter().copied().find(|&f| f != id)?;
        tracker.get(other)
    }
}

impl Recognizer for TwoFingerSwipeRecognizer {
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
                if tracker.violates_arity(2) {
                    self.fail("touch count above 2");
                    return None;
                }
                let moved_alone = self
                    .fingers
                    .first()
                    .and_then(|&first| tracker.get(first))
                    .is_some_and(|first| first.distance() > self.solo_tolerance);
                if moved_alone {
                    self.fail("first finger moved before the second landed");
                    return None;
                }
                self.fingers.push(id);
                self.state = RecognizerState::Tracking;
                let too_far = match self.fingers.as_slice() {
                    [a, b] => match (tracker.get(*a), tracker.get(*b)) {
                        (Some(a), Some(b)) => a.origin.distance_to(b.origin) > self.max_separation,
                        _ => false,
                    },
                    _ => false,
                };
                if too_far {
                    self.fail("fingers too far apart");
                }
                None
            }
            TrackerChange::Moved(id) if self.owns(id) && self.fingers.len() == 2 => {
                if let (Some(a), Some(b)) = (tracker.get(id), self.other_finger(id, tracker)) {
                    self.state = match self.check(a, b) {
                        ParallelCheck::Valid { .. } => RecognizerState::Qualifying,
                        _ => RecognizerState::Tracking,
                    };
                }
                None
            }
            TrackerChange::Ended(touch) if self.owns(touch.id) => {
                let Some(other) = self.other_finger(touch.id, tracker) else {
                    self.fail("lifted before a second finger landed");
                    return None;
                };
                match self.check(&touch, other) {
                    ParallelCheck::Valid { direction, average } => {
                        self.state = RecognizerState::Recognized;
                        let result = GestureResult::Swipe {
                            kind: SwipeKind::TwoFinger,
                            direction,
                            origin: Point::midpoint(touch.origin, other.origin),
                            distance: average.length(),
                        };
                        debug!(?result, "two-finger swipe recognized");
                        Some(result)
                    }
                    check => {
                        debug!(?check, "two-finger swipe rejected");
                        self.state = RecognizerState::Failed;
                        None
                    }
                }
            }
            TrackerChange::Cancelled(touch) if self.owns(touch.id) => {
                self.fail("finger cancelled");
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
        self.fingers.clear();
    }
}
