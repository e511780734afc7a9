//! Per-player numeric state.
//!
//! A [`Player`] holds everything a life counter tracks for one seat: the
//! life total, commander damage received from each opponent, the auxiliary
//! counters and the game flags. Players are owned by the
//! [`PlayerRoster`](super::PlayerRoster); the engine borrows one mutably
//! per operation.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Auxiliary counters tracked per player. All are kept `>= 0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CounterKind {
    Poison,
    Energy,
    Experience,
    PlusOne,
    Storm,
}

impl CounterKind {
    /// All counter kinds, in display order.
    pub const ALL: [CounterKind; 5] = [
        CounterKind::Poison,
        CounterKind::Energy,
        CounterKind::Experience,
        CounterKind::PlusOne,
        CounterKind::Storm,
    ];
}

/// Boolean game flags tracked per player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerFlag {
    Monarch,
    Initiative,
    DayTime,
}

/// One player's life-counter state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,

    // === Life ===
    pub life: i32,

    /// Damage received from each opponent's commander.
    pub commander_damage: FxHashMap<PlayerId, i32>,

    // === Counters ===
    pub poison: i32,
    pub energy: i32,
    pub experience: i32,
    pub plus_one: i32,
    pub storm: i32,

    // === Flags ===
    pub is_monarch: bool,
    pub has_initiative: bool,
    pub is_day_time: bool,
}

impl Player {
    /// Create a player with `life` and every counter at zero.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>, life: i32) -> Self {
        Self {
            id,
            name: name.into(),
            life,
            commander_damage: FxHashMap::default(),
            poison: 0,
            energy: 0,
            experience: 0,
            plus_one: 0,
            storm: 0,
            is_monarch: false,
            has_initiative: false,
            is_day_time: true,
        }
    }

    /// Current value of a counter.
    #[must_use]
    pub fn counter(&self, kind: CounterKind) -> i32 {
        match kind {
            CounterKind::Poison => self.poison,
            CounterKind::Energy => self.energy,
            CounterKind::Experience => self.experience,
            CounterKind::PlusOne => self.plus_one,
            CounterKind::Storm => self.storm,
        }
    }

    /// Mutable access to a counter.
    pub(crate) fn counter_mut(&mut self, kind: CounterKind) -> &mut i32 {
        match kind {
            CounterKind::Poison => &mut self.poison,
            CounterKind::Energy => &mut self.energy,
            CounterKind::Experience => &mut self.experience,
            CounterKind::PlusOne => &mut self.plus_one,
            CounterKind::Storm => &mut self.storm,
        }
    }

    /// Current value of a flag.
    #[must_use]
    pub fn flag(&self, flag: PlayerFlag) -> bool {
        match flag {
            PlayerFlag::Monarch => self.is_monarch,
            PlayerFlag::Initiative => self.has_initiative,
            PlayerFlag::DayTime => self.is_day_time,
        }
    }

    pub(crate) fn flag_mut(&mut self, flag: PlayerFlag) -> &mut bool {
        match flag {
            PlayerFlag::Monarch => &mut self.is_monarch,
            PlayerFlag::Initiative => &mut self.has_initiative,
            PlayerFlag::DayTime => &mut self.is_day_time,
        }
    }

    /// Commander damage received from `opponent` (0 if none).
    #[must_use]
    pub fn commander_damage_from(&self, opponent: PlayerId) -> i32 {
        self.commander_damage.get(&opponent).copied().unwrap_or(0)
    }

    /// Clear counters, commander damage and flags for a new game.
    ///
    /// Life is left alone; the engine resets it through its clamp.
    pub fn reset(&mut self) {
        self.commander_damage.clear();
        for kind in CounterKind::ALL {
            *self.counter_mut(kind) = 0;
        }
        self.is_monarch = false;
        self.has_initiative = false;
        self.is_day_time = true;
    }
}
