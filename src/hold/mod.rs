//! Hold-to-repeat.

mod controller;

pub use controller::{HoldRepeatController, HoldSession, HoldTick, SessionId};
