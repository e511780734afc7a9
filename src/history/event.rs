//! Life change events.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, Timestamp};
use crate::life::LifeChange;

/// What caused a life change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeSource {
    Tap,
    LongPress,
    /// Edits a host makes outside the counter surface, such as a typed-in
    /// life total. Nothing in this crate records it.
    Manual,
    /// A game reset moving a player back to starting life.
    Reset,
    Tools,
}

/// One recorded life change. Immutable once recorded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifeChangeEvent {
    pub player_id: PlayerId,
    pub previous_life: i32,
    pub new_life: i32,
    /// Applied delta (`new_life - previous_life`).
    pub delta: i32,
    pub timestamp: Timestamp,
    pub source: ChangeSource,
}

impl LifeChangeEvent {
    /// Build an event from an engine result.
    #[must_use]
    pub fn from_change(
        player_id: PlayerId,
        change: &LifeChange,
        timestamp: Timestamp,
        source: ChangeSource,
    ) -> Self {
        Self {
            player_id,
            previous_life: change.previous,
            new_life: change.new,
            delta: change.applied,
            timestamp,
            source,
        }
    }
}
