//! Life-state: players, the mutation engine and the roster.

pub mod engine;
pub mod player;
pub mod roster;

pub use engine::{CounterChange, LifeChange, LifeCounterEngine};
pub use player::{CounterKind, Player, PlayerFlag};
pub use roster::PlayerRoster;
