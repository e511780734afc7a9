//! Active touch tracking.
//!
//! The tracker keeps the set of touches currently on the glass, in the
//! order they landed. A *sequence* runs from the first touch landing on an
//! empty region until the last touch lifts; the tracker remembers the
//! largest number of simultaneous touches seen during the sequence so that
//! recognizers with a fixed arity can fail fast.
//!
//! The tracker never mutates players or timers.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use tracing::trace;

use crate::core::{Point, Timestamp, Vector};

/// Identity of one physical contact, stable from touch-down to lift-off.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TouchId(pub u64);

impl TouchId {
    /// Create a new touch ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TouchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Touch({})", self.0)
    }
}

/// Lifecycle phase of a raw touch event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TouchPhase {
    Began,
    Moved,
    Ended,
    Cancelled,
}

/// A raw touch event as delivered by the host.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    pub id: TouchId,
    pub position: Point,
    pub timestamp: Timestamp,
}

impl TouchEvent {
    /// Create a new touch event.
    #[must_use]
    pub const fn new(phase: TouchPhase, id: TouchId, position: Point, timestamp: Timestamp) -> Self {
        Self {
            phase,
            id,
            position,
            timestamp,
        }
    }

    /// A touch landing.
    #[must_use]
    pub const fn began(id: u64, x: f32, y: f32, at_ms: u64) -> Self {
        Self::new(TouchPhase::Began, TouchId(id), Point::new(x, y), Timestamp(at_ms))
    }

    /// A touch moving.
    #[must_use]
    pub const fn moved(id: u64, x: f32, y: f32, at_ms: u64) -> Self {
        Self::new(TouchPhase::Moved, TouchId(id), Point::new(x, y), Timestamp(at_ms))
    }

    /// A touch lifting.
    #[must_use]
    pub const fn ended(id: u64, x: f32, y: f32, at_ms: u64) -> Self {
        Self::new(TouchPhase::Ended, TouchId(id), Point::new(x, y), Timestamp(at_ms))
    }

    /// A touch cancelled by the system.
    #[must_use]
    pub const fn cancelled(id: u64, x: f32, y: f32, at_ms: u64) -> Self {
        Self::new(TouchPhase::Cancelled, TouchId(id), Point::new(x, y), Timestamp(at_ms))
    }
}

/// One tracked contact.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub id: TouchId,
    pub origin: Point,
    pub current: Point,
    pub started_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TouchPoint {
    /// Displacement from origin to current position.
    #[must_use]
    pub fn displacement(&self) -> Vector {
        self.current - self.origin
    }

    /// Straight-line distance travelled from the origin.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.displacement().length()
    }
}

/// What a single event did to the tracked set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TrackerChange {
    /// A new touch was added; `count` is the size of the set afterwards.
    Began { id: TouchId, count: usize },
    /// A tracked touch moved.
    Moved(TouchId),
    /// A tracked touch lifted; carries its final state.
    Ended(TouchPoint),
    /// A tracked touch was cancelled; carries its last state.
    Cancelled(TouchPoint),
    /// The event did not apply (unknown id, duplicate begin).
    Ignored,
}

/// Set of active touches for one interactive region.
#[derive(Clone, Debug, Default)]
pub struct TouchTracker {
    /// Active touches in landing order.
    active: SmallVec<[TouchPoint; 4]>,

    /// Largest simultaneous count seen in the current sequence.
    peak_active: usize,

    /// Touches that have landed in the current sequence.
    began_in_sequence: usize,
}

impl TouchTracker {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a raw event.
    pub fn apply(&mut self, event: &TouchEvent) -> TrackerChange {
        match event.phase {
            TouchPhase::Began => self.begin(event.id, event.position, event.timestamp),
            TouchPhase::Moved => self.moved(event.id, event.position, event.timestamp),
            TouchPhase::Ended => self.end(event.id, event.position, event.timestamp),
            TouchPhase::Cancelled => self.cancel(event.id, event.timestamp),
        }
    }

    /// Start tracking a touch.
    pub fn begin(&mut self, id: TouchId, point: Point, t: Timestamp) -> TrackerChange {
        if self.get(id).is_some() {
            return TrackerChange::Ignored;
        }
        if self.active.is_empty() {
            self.peak_active = 0;
            self.began_in_sequence = 0;
        }

        self.active.push(TouchPoint {
            id,
            origin: point,
            current: point,
            started_at: t,
            updated_at: t,
        });
        self.began_in_sequence += 1;
        let count = self.active.len();
        self.peak_active = self.peak_active.max(count);

        trace!(%id, count, "touch began");
        TrackerChange::Began { id, count }
    }

    /// Update a tracked touch's position.
    pub fn moved(&mut self, id: TouchId, point: Point, t: Timestamp) -> TrackerChange {
        match self.active.iter_mut().find(|p| p.id == id) {
            Some(touch) => {
                touch.current = point;
                touch.updated_at = t;
                TrackerChange::Moved(id)
            }
            None => TrackerChange::Ignored,
        }
    }

    /// Stop tracking a touch that lifted at `point`.
    pub fn end(&mut self, id: TouchId, point: Point, t: Timestamp) -> TrackerChange {
        match self.remove(id) {
            Some(mut touch) => {
                touch.current = point;
                touch.updated_at = t;
                trace!(%id, remaining = self.active.len(), "touch ended");
                TrackerChange::Ended(touch)
            }
            None => TrackerChange::Ignored,
        }
    }

    /// Stop tracking a cancelled touch.
    pub fn cancel(&mut self, id: TouchId, t: Timestamp) -> TrackerChange {
        match self.remove(id) {
            Some(mut touch) => {
                touch.updated_at = t;
                trace!(%id, remaining = self.active.len(), "touch cancelled");
                TrackerChange::Cancelled(touch)
            }
            None => TrackerChange::Ignored,
        }
    }

    /// Active touches in landing order.
    #[must_use]
    pub fn active(&self) -> &[TouchPoint] {
        &self.active
    }

    /// Look up an active touch.
    #[must_use]
    pub fn get(&self, id: TouchId) -> Option<&TouchPoint> {
        self.active.iter().find(|p| p.id == id)
    }

    /// Number of active touches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Are no touches active?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Largest simultaneous touch count in the current (or last) sequence.
    #[must_use]
    pub fn peak_active(&self) -> usize {
        self.peak_active
    }

    /// Has the sequence exceeded what a recognizer of `arity` fingers tolerates?
    ///
    /// Fingers land one at a time, so a count below the arity is still
    /// pending; only a count above it is a violation.
    #[must_use]
    pub fn violates_arity(&self, arity: usize) -> bool {
        self.peak_active > arity
    }

    /// Has a sequence started and every touch lifted?
    #[must_use]
    pub fn is_sequence_complete(&self) -> bool {
        self.active.is_empty() && self.began_in_sequence > 0
    }

    /// Forget all touches and sequence statistics.
    pub fn clear(&mut self) {
        self.active.clear();
        self.peak_active = 0;
        self.began_in_sequence = 0;
    }

    fn remove(&mut self, id: TouchId) -> Option<TouchPoint> {
        let pos = self.active.iter().position(|p| p.id == id)?;
        Some(self.active.remove(pos))
    }
}
