//! Core engine types: player ids, time, geometry, configuration, errors, RNG.
//!
//! Everything here is a leaf: no module in `core` depends on the gesture,
//! life or scheduling layers built on top of it.

pub mod player;
pub mod time;
pub mod geometry;
pub mod config;
pub mod error;
pub mod rng;

pub use player::PlayerId;
pub use time::Timestamp;
pub use geometry::{Direction, Orientation, Point, Rect, Side, Vector};
pub use config::{DisplayConfig, EngineConfig, GestureConfig, HoldConfig, LifeRules};
pub use error::{ConfigError, LifeError, LifeResult};
pub use rng::{GameRng, GameRngState};
