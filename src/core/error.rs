//! Error types.
//!
//! Only genuine rejections are errors. Gesture recognition failures resolve
//! to `GestureResult::None` and clamping reports the applied delta, so
//! neither appears here.

use thiserror::Error;

use super::player::PlayerId;

/// Rejected life or tool operations. The target state is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifeError {
    /// `life + delta` does not fit the integer range.
    #[error("life delta {delta} overflows life total {life}")]
    DeltaOverflow { life: i32, delta: i32 },

    /// The player collection has no player with this id.
    #[error("unknown player: {0}")]
    UnknownPlayer(PlayerId),

    /// Dice need between 2 and 100 sides.
    #[error("a die cannot have {0} sides")]
    InvalidDie(u32),

    /// No player is available to choose from.
    #[error("no players to choose from")]
    EmptyRoster,
}

/// Inconsistent engine configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A threshold that must be positive is not.
    #[error("{0} must be positive")]
    NonPositive(&'static str),

    /// A duration that must be non-zero is zero.
    #[error("{0} must be a non-zero duration")]
    ZeroDuration(&'static str),

    /// Cosine thresholds live in [-1, 1].
    #[error("parallel cosine {0} is outside [-1, 1]")]
    CosineOutOfRange(f32),

    /// `min_life` exceeds `max_life`.
    #[error("life bounds are inverted: min {min} > max {max}")]
    InvertedLifeBounds { min: i32, max: i32 },

    /// Starting life lies outside the life bounds.
    #[error("starting life {0} is outside the life bounds")]
    StartingLifeOutOfBounds(i32),
}

/// Result alias for life and tool operations.
pub type LifeResult<T> = Result<T, LifeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = LifeError::DeltaOverflow { life: 10, delta: i32::MAX };
        assert_eq!(
            err.to_string(),
            format!("life delta {} overflows life total 10", i32::MAX)
        );
        assert_eq!(
            LifeError::UnknownPlayer(PlayerId::new(3)).to_string(),
            "unknown player: Player 3"
        );
        assert_eq!(
            ConfigError::ZeroDuration("hold.repeat_interval").to_string(),
            "hold.repeat_interval must be a non-zero duration"
        );
    }
}
