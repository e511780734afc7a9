//! Dice, coins and starting player selection.

use serde::{Deserialize, Serialize};

use tracing::debug;

use crate::core::{GameRng, GameRngState, LifeError, LifeResult, PlayerId};
use crate::life::PlayerRoster;

/// Smallest and largest supported die.
pub const DIE_SIDES: std::ops::RangeInclusive<u32> = 2..=100;

/// Face of a flipped coin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoinFace {
    Heads,
    Tails,
}

/// Result of a random table tool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolResult {
    DieRoll { sides: u32, value: u32 },
    CoinFlip(CoinFace),
    StartingPlayer(PlayerId),
}

impl std::fmt::Display for ToolResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToolResult::DieRoll { sides, value } => write!(f, "d{}: {}", sides, value),
            ToolResult::CoinFlip(CoinFace::Heads) => write!(f, "Heads"),
            ToolResult::CoinFlip(CoinFace::Tails) => write!(f, "Tails"),
            ToolResult::StartingPlayer(id) => write!(f, "{} starts", id),
        }
    }
}

/// Seeded source of dice rolls and coin flips.
#[derive(Clone, Debug)]
pub struct DiceRoller {
    rng: GameRng,
}

impl DiceRoller {
    /// Create a roller from a seed. Equal seeds roll equal sequences.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self { rng: GameRng::new(seed) }
    }

    /// Resume a roller from saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        Self {
            rng: GameRng::from_state(state),
        }
    }

    /// Current RNG state.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        self.rng.state()
    }

    /// Roll a die with `sides` faces.
    ///
    /// # Errors
    ///
    /// [`LifeError::InvalidDie`] unless `sides` is in `2..=100`.
    pub fn roll_die(&mut self, sides: u32) -> LifeResult<ToolResult> {
        if !DIE_SIDES.contains(&sides) {
            return Err(LifeError::InvalidDie(sides));
        }
        let value = self.rng.gen_range_inclusive(1..=sides);
        debug!(sides, value, "die rolled");
        Ok(ToolResult::DieRoll { sides, value })
    }

    /// Flip a fair coin.
    pub fn flip_coin(&mut self) -> ToolResult {
        let face = if self.rng.gen_bool(0.5) {
            CoinFace::Heads
        } else {
            CoinFace::Tails
        };
        ToolResult::CoinFlip(face)
    }

    /// Choose who goes first.
    ///
    /// # Errors
    ///
    /// [`LifeError::EmptyRoster`] when nobody is seated.
    pub fn pick_starting_player(&mut self, roster: &PlayerRoster) -> LifeResult<ToolResult> {
        if roster.is_empty() {
            return Err(LifeError::EmptyRoster);
        }
        let index = self.rng.gen_index(roster.len());
        let id = roster.players()[index].id;
        debug!(player = %id, "starting player chosen");
        Ok(ToolResult::StartingPlayer(id))
    }
}
