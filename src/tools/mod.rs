//! Table tools: dice, coins, and the overlay that hosts them.

pub mod dice;
pub mod overlay;

pub use dice::{CoinFace, DiceRoller, ToolResult, DIE_SIDES};
pub use overlay::{ResultDisplay, ToolAction, ToolOutcome, ToolsOverlay};
