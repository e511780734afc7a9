//! Bounds-checked mutation of a single player's state.
//!
//! ## Rules
//!
//! - Life is clamped into `[min_life, max_life]` after every change.
//!   Clamping is normal behaviour: the applied delta is reported back.
//! - A delta whose sum does not fit the integer range is rejected with
//!   [`LifeError::DeltaOverflow`] and the player is left untouched.
//! - Counters never drop below zero. Poison is additionally capped on the
//!   increment path only, so a value already above the cap is never raised
//!   further but is never pulled down by an increment either.
//! - Commander damage is clamped at zero with no upper bound; the lethal
//!   threshold is informational.
//!
//! The engine mutates one player at a time. Cross-player rules (one
//! monarch, one initiative holder) belong to the roster.

use serde::{Deserialize, Serialize};

use tracing::debug;

use crate::core::{LifeError, LifeResult, LifeRules, PlayerId};

use super::player::{CounterKind, Player, PlayerFlag};

/// Outcome of a life mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifeChange {
    /// Life before the change.
    pub previous: i32,
    /// Life after clamping.
    pub new: i32,
    /// Delta the caller asked for.
    pub requested: i32,
    /// Delta actually applied (`new - previous`).
    pub applied: i32,
}

impl LifeChange {
    /// Did clamping reduce the requested delta?
    #[must_use]
    pub fn was_clamped(&self) -> bool {
        self.requested != self.applied
    }

    /// Did the life total move at all?
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.applied == 0
    }
}

/// Outcome of a counter mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterChange {
    pub kind: CounterKind,
    pub previous: i32,
    pub new: i32,
}

impl CounterChange {
    /// Delta actually applied.
    #[must_use]
    pub fn applied(&self) -> i32 {
        self.new - self.previous
    }
}

/// Stateless rules engine for life, counters, flags and commander damage.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifeCounterEngine {
    rules: LifeRules,
}

impl LifeCounterEngine {
    /// Create an engine with the given rules.
    #[must_use]
    pub fn new(rules: LifeRules) -> Self {
        Self { rules }
    }

    /// The rules in force.
    #[must_use]
    pub fn rules(&self) -> &LifeRules {
        &self.rules
    }

    /// Add `delta` to the player's life, clamping the result.
    ///
    /// # Errors
    ///
    /// [`LifeError::DeltaOverflow`] when `life + delta` overflows; the
    /// player is not modified.
    pub fn apply_delta(&self, player: &mut Player, delta: i32) -> LifeResult<LifeChange> {
        let previous = player.life;
        let sum = previous.checked_add(delta).ok_or(LifeError::DeltaOverflow {
            life: previous,
            delta,
        })?;

        let new = self.rules.clamp_life(i64::from(sum));
        player.life = new;

        let change = LifeChange {
            previous,
            new,
            requested: delta,
            applied: new - previous,
        };
        if change.was_clamped() {
            debug!(player = %player.id, requested = delta, applied = change.applied, "life clamped");
        }
        Ok(change)
    }

    /// Set the player's life directly (clamped).
    pub fn reset_life(&self, player: &mut Player, new_life: i32) -> LifeChange {
        let previous = player.life;
        let new = self.rules.clamp_life(i64::from(new_life));
        player.life = new;
        LifeChange {
            previous,
            new,
            requested: new_life.saturating_sub(previous),
            applied: new - previous,
        }
    }

    /// Add `delta` to a counter, keeping it non-negative.
    pub fn adjust_counter(&self, player: &mut Player, kind: CounterKind, delta: i32) -> CounterChange {
        let counter = player.counter_mut(kind);
        let previous = *counter;
        let mut new = previous.saturating_add(delta).max(0);
        if kind == CounterKind::Poison && delta > 0 {
            new = new.min(self.rules.poison_cap.max(previous));
        }
        *counter = new;
        CounterChange { kind, previous, new }
    }

    /// Flip a flag on this player and return its new value.
    pub fn toggle_flag(&self, player: &mut Player, flag: PlayerFlag) -> bool {
        let value = player.flag_mut(flag);
        *value = !*value;
        *value
    }

    /// Set commander damage from `opponent`, clamped at zero.
    pub fn set_commander_damage(&self, player: &mut Player, opponent: PlayerId, value: i32) -> i32 {
        let stored = value.max(0);
        player.commander_damage.insert(opponent, stored);
        stored
    }

    /// Add `delta` to commander damage from `opponent`, clamped at zero.
    pub fn adjust_commander_damage(&self, player: &mut Player, opponent: PlayerId, delta: i32) -> i32 {
        let current = player.commander_damage_from(opponent);
        self.set_commander_damage(player, opponent, current.saturating_add(delta))
    }

    /// Has any single commander dealt lethal damage to this player?
    #[must_use]
    pub fn is_commander_lethal(&self, player: &Player) -> bool {
        player
            .commander_damage
            .values()
            .any(|&damage| damage >= self.rules.commander_lethal)
    }

    /// Has this player reached lethal poison?
    #[must_use]
    pub fn is_poison_lethal(&self, player: &Player) -> bool {
        player.poison >= self.rules.poison_lethal
    }
}
