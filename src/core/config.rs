//! Engine configuration.
//!
//! Hosts configure the engine at startup by providing an [`EngineConfig`]:
//! - [`GestureConfig`]: swipe distances, parallelism tolerance, press timing
//! - [`HoldConfig`]: hold-to-repeat interval and step sizes
//! - [`DisplayConfig`]: change-indicator visibility windows
//! - [`LifeRules`]: life bounds, counter caps, lethal thresholds
//!
//! Every value has a default matching the standard commander table; the
//! `with_*` builders override single values.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::error::ConfigError;

/// Gesture recognition thresholds (logical pixels and durations).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GestureConfig {
    /// Minimum finger travel before a swipe qualifies.
    pub min_swipe_distance: f32,

    /// Maximum distance between the two finger origins of a two-finger swipe.
    pub max_finger_separation: f32,

    /// Minimum cosine between the two finger vectors (0.7 is roughly 45 degrees).
    pub min_parallel_cosine: f32,

    /// Minimum vertical travel per finger for the directional two-finger variant.
    pub directional_threshold: f32,

    /// Hold time after which a press becomes a long-press.
    pub long_press_duration: Duration,

    /// Movement a press may make and still count as a tap or long-press.
    pub tap_jitter_tolerance: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            min_swipe_distance: 30.0,
            max_finger_separation: 100.0,
            min_parallel_cosine: 0.7,
            directional_threshold: 5.0,
            long_press_duration: Duration::from_millis(200),
            tap_jitter_tolerance: 10.0,
        }
    }
}

/// Hold-to-repeat parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoldConfig {
    /// Time between repeat ticks while a hold is active.
    pub repeat_interval: Duration,

    /// Life change applied per repeat tick.
    pub step_amount: i32,

    /// Life change applied per tap.
    pub tap_step: i32,
}

impl Default for HoldConfig {
    fn default() -> Self {
        Self {
            repeat_interval: Duration::from_millis(800),
            step_amount: 10,
            tap_step: 1,
        }
    }
}

/// Visibility windows for transient displays.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Quiet period before the main "+N/-N" indicator hides.
    pub change_window: Duration,

    /// Quiet period before a tool result (dice roll, coin flip) hides.
    pub tool_result_window: Duration,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            change_window: Duration::from_secs(2),
            tool_result_window: Duration::from_secs(3),
        }
    }
}

/// Numeric rules for life and counters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifeRules {
    /// Lowest representable life total.
    pub min_life: i32,

    /// Highest representable life total.
    pub max_life: i32,

    /// Life each player starts a game with.
    pub starting_life: i32,

    /// Poison cap applied on the increment path.
    pub poison_cap: i32,

    /// Poison counters at which a player has lost (display only).
    pub poison_lethal: i32,

    /// Damage from a single commander at which a player has lost (display only).
    pub commander_lethal: i32,
}

impl Default for LifeRules {
    fn default() -> Self {
        Self {
            min_life: -999,
            max_life: 999,
            starting_life: 40,
            poison_cap: 99,
            poison_lethal: 10,
            commander_lethal: 21,
        }
    }
}

impl LifeRules {
    /// Clamp a life value into `[min_life, max_life]`.
    #[must_use]
    pub fn clamp_life(&self, life: i64) -> i32 {
        // Bounds are i32, so the clamped value always fits.
        life.clamp(i64::from(self.min_life), i64::from(self.max_life)) as i32
    }
}

/// Complete engine configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Gesture thresholds.
    pub gesture: GestureConfig,

    /// Hold-to-repeat parameters.
    pub hold: HoldConfig,

    /// Display windows.
    pub display: DisplayConfig,

    /// Life and counter rules.
    pub rules: LifeRules,

    /// Maximum number of entries kept in the change history.
    pub history_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            gesture: GestureConfig::default(),
            hold: HoldConfig::default(),
            display: DisplayConfig::default(),
            rules: LifeRules::default(),
            history_capacity: Self::DEFAULT_HISTORY_CAPACITY,
        }
    }
}

impl EngineConfig {
    /// Default history capacity.
    pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

    /// Create a config with all defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the starting life total.
    #[must_use]
    pub fn with_starting_life(mut self, life: i32) -> Self {
        self.rules.starting_life = life;
        self
    }

    /// Set the hold-to-repeat interval.
    #[must_use]
    pub fn with_repeat_interval(mut self, interval: Duration) -> Self {
        self.hold.repeat_interval = interval;
        self
    }

    /// Set the life change applied per repeat tick.
    #[must_use]
    pub fn with_hold_step(mut self, step: i32) -> Self {
        self.hold.step_amount = step;
        self
    }

    /// Set the main change-indicator window.
    #[must_use]
    pub fn with_change_window(mut self, window: Duration) -> Self {
        self.display.change_window = window;
        self
    }

    /// Set the long-press threshold.
    #[must_use]
    pub fn with_long_press_duration(mut self, duration: Duration) -> Self {
        self.gesture.long_press_duration = duration;
        self
    }

    /// Set the history capacity.
    #[must_use]
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Check that the configuration is internally consistent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let g = &self.gesture;
        if g.min_swipe_distance.is_nan() || g.min_swipe_distance <= 0.0 {
            return Err(ConfigError::NonPositive("gesture.min_swipe_distance"));
        }
        if g.max_finger_separation.is_nan() || g.max_finger_separation <= 0.0 {
            return Err(ConfigError::NonPositive("gesture.max_finger_separation"));
        }
        if !(-1.0..=1.0).contains(&g.min_parallel_cosine) {
            return Err(ConfigError::CosineOutOfRange(g.min_parallel_cosine));
        }
        if g.tap_jitter_tolerance < 0.0 || g.tap_jitter_tolerance.is_nan() {
            return Err(ConfigError::NonPositive("gesture.tap_jitter_tolerance"));
        }
        if g.long_press_duration.is_zero() {
            return Err(ConfigError::ZeroDuration("gesture.long_press_duration"));
        }
        if self.hold.repeat_interval.is_zero() {
            return Err(ConfigError::ZeroDuration("hold.repeat_interval"));
        }
        if self.display.change_window.is_zero() {
            return Err(ConfigError::ZeroDuration("display.change_window"));
        }
        if self.display.tool_result_window.is_zero() {
            return Err(ConfigError::ZeroDuration("display.tool_result_window"));
        }

        let r = &self.rules;
        if r.min_life > r.max_life {
            return Err(ConfigError::InvertedLifeBounds {
                min: r.min_life,
                max: r.max_life,
            });
        }
        if !(r.min_life..=r.max_life).contains(&r.starting_life) {
            return Err(ConfigError::StartingLifeOutOfBounds(r.starting_life));
        }
        if r.poison_cap < 0 {
            return Err(ConfigError::NonPositive("rules.poison_cap"));
        }
        if self.history_capacity == 0 {
            return Err(ConfigError::NonPositive("history_capacity"));
        }
        Ok(())
    }
}
