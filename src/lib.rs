//! # lifetap
//!
//! Touch-gesture and life-state engine for multiplayer card game life
//! counters.
//!
//! ## Design Principles
//!
//! 1. **Input In, Mutations Out**: Raw touch events are classified into
//!    gestures; gestures become bounds-checked mutations of a player's state.
//!    Rendering and animation are the host's business.
//!
//! 2. **Explicit Time**: All waiting goes through the `Scheduler` trait.
//!    Hosts back it with their run loop; tests drive a virtual clock.
//!
//! 3. **Deterministic**: Same events, same timers, same seed, same result.
//!
//! ## Architecture
//!
//! - **Recognizers as State Machines**: Press, swipe and two-finger
//!   recognizers run side by side over a shared touch tracker.
//!
//! - **Clamping is Normal**: Life is clamped to `[-999, 999]`; callers get
//!   the applied delta back. Only overflowing input is an error.
//!
//! - **Persistent History**: The change ledger uses `im-rs` so snapshots
//!   are cheap to clone.
//!
//! ## Modules
//!
//! - `core`: Player ids, time, geometry, configuration, errors, RNG
//! - `schedule`: Timer port and the virtual-clock scheduler
//! - `touch`: Touch tracking and gesture classification
//! - `life`: Players, the life engine and the roster
//! - `hold`: Hold-to-repeat
//! - `display`: Debounced change indicator
//! - `history`: Change ledger and undo
//! - `tools`: Dice, coins and the tools overlay
//! - `view`: Per-player counter regions wiring it all together

pub mod core;
pub mod schedule;
pub mod touch;
pub mod life;
pub mod hold;
pub mod display;
pub mod history;
pub mod tools;
pub mod view;

// Re-export commonly used types
pub use crate::core::{
    PlayerId, Timestamp,
    Direction, Orientation, Point, Rect, Side, Vector,
    EngineConfig, GestureConfig, HoldConfig, DisplayConfig, LifeRules,
    ConfigError, LifeError, LifeResult,
    GameRng, GameRngState,
};

pub use crate::schedule::{Scheduler, TimerFire, TimerId, VirtualScheduler};

pub use crate::touch::{
    GestureClassifier, GestureResult, SwipeKind, RecognizerState, Recognizer,
    TouchEvent, TouchId, TouchPhase, TouchPoint, TouchTracker,
};

pub use crate::life::{
    CounterChange, CounterKind, LifeChange, LifeCounterEngine,
    Player, PlayerFlag, PlayerRoster,
};

pub use crate::hold::{HoldRepeatController, HoldTick, SessionId};

pub use crate::display::ChangeDisplayCoordinator;

pub use crate::history::{ChangeSource, HistoryLedger, LifeChangeEvent};

pub use crate::tools::{CoinFace, DiceRoller, ToolAction, ToolOutcome, ToolResult, ToolsOverlay};

pub use crate::view::{LifeCounterView, RegionLayout, ViewContext, ViewOutput};
