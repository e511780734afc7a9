//! The tools overlay.
//!
//! Opened with a two-finger swipe, the overlay exposes actions that do not
//! fit the tap/hold surface of a counter: auxiliary counters, flags,
//! commander damage, direct life adjustments and random table tools.
//! Counter, flag and damage actions go through the [`LifeCounterEngine`];
//! flags that span players go through the [`PlayerRoster`].
//!
//! Random results are shown in a [`ResultDisplay`] that hides after its
//! own quiet window.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use tracing::debug;

use crate::core::{EngineConfig, LifeResult, PlayerId};
use crate::display::Debouncer;
use crate::history::{ChangeSource, HistoryLedger, LifeChangeEvent};
use crate::life::{CounterChange, CounterKind, LifeChange, LifeCounterEngine, PlayerFlag, PlayerRoster};
use crate::schedule::{Scheduler, TimerId};

use super::dice::{DiceRoller, ToolResult};

/// An action requested from the overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolAction {
    AdjustCounter { player: PlayerId, kind: CounterKind, delta: i32 },
    ToggleFlag { player: PlayerId, flag: PlayerFlag },
    SetCommanderDamage { player: PlayerId, opponent: PlayerId, value: i32 },
    AdjustCommanderDamage { player: PlayerId, opponent: PlayerId, delta: i32 },
    AdjustLife { player: PlayerId, delta: i32 },
    RollDie { sides: u32 },
    FlipCoin,
    PickStartingPlayer,
    /// Reset every player and clear the history.
    ResetGame,
}

/// What an applied action did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolOutcome {
    Counter(CounterChange),
    Flag { player: PlayerId, flag: PlayerFlag, value: bool },
    CommanderDamage { player: PlayerId, opponent: PlayerId, value: i32 },
    /// A life change already recorded in the ledger. The host forwards it
    /// to the player's view with [`LifeCounterView::show_change`].
    ///
    /// [`LifeCounterView::show_change`]: crate::view::LifeCounterView::show_change
    Life { player: PlayerId, change: LifeChange },
    Random(ToolResult),
    GameReset,
}

/// Last random result with a debounced visibility window.
#[derive(Clone, Debug)]
pub struct ResultDisplay {
    current: Option<ToolResult>,
    debounce: Debouncer,
}

impl ResultDisplay {
    /// Create an empty display hiding after `window`.
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            current: None,
            debounce: Debouncer::new(window),
        }
    }

    /// The visible result, if any.
    #[must_use]
    pub fn current(&self) -> Option<&ToolResult> {
        self.current.as_ref()
    }

    /// Show `result`, replacing whatever was visible.
    pub fn show<S>(&mut self, result: ToolResult, scheduler: &mut S)
    where
        S: Scheduler + ?Sized,
    {
        self.current = Some(result);
        self.debounce.trigger(scheduler);
    }

    /// Handle a fired timer. Returns `true` if it hid the result.
    pub fn handle_timer(&mut self, timer: TimerId) -> bool {
        if self.debounce.handle_timer(timer).is_none() {
            return false;
        }
        self.current = None;
        true
    }
}

/// Overlay state plus the tools behind it.
#[derive(Clone, Debug)]
pub struct ToolsOverlay {
    engine: LifeCounterEngine,
    dice: DiceRoller,
    results: ResultDisplay,
    is_open: bool,
}

impl ToolsOverlay {
    /// Create a closed overlay.
    ///
    /// `config` is taken as given; check it with [`EngineConfig::validate`] first.
    #[must_use]
    pub fn new(config: &EngineConfig, seed: u64) -> Self {
        Self {
            engine: LifeCounterEngine::new(config.rules.clone()),
            dice: DiceRoller::new(seed),
            results: ResultDisplay::new(config.display.tool_result_window),
            is_open: false,
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn open(&mut self) {
        self.is_open = true;
    }

    pub fn close(&mut self) {
        self.is_open = false;
    }

    /// The random-result display.
    #[must_use]
    pub fn results(&self) -> &ResultDisplay {
        &self.results
    }

    /// The dice source.
    #[must_use]
    pub fn dice(&self) -> &DiceRoller {
        &self.dice
    }

    /// Apply one action.
    ///
    /// # Errors
    ///
    /// Unknown players, invalid dice and overflowing life deltas are
    /// rejected before anything is mutated.
    pub fn apply<S>(
        &mut self,
        action: ToolAction,
        roster: &mut PlayerRoster,
        ledger: &mut HistoryLedger,
        scheduler: &mut S,
    ) -> LifeResult<ToolOutcome>
    where
        S: Scheduler + ?Sized,
    {
        debug!(?action, "tool action");
        let outcome = match action {
            ToolAction::AdjustCounter { player, kind, delta } => {
                let p = roster.get_mut(player)?;
                ToolOutcome::Counter(self.engine.adjust_counter(p, kind, delta))
            }
            ToolAction::ToggleFlag { player, flag } => {
                let value = self.toggle_flag(roster, player, flag)?;
                ToolOutcome::Flag { player, flag, value }
            }
            ToolAction::SetCommanderDamage { player, opponent, value } => {
                roster.get(opponent)?;
                let p = roster.get_mut(player)?;
                let value = self.engine.set_commander_damage(p, opponent, value);
                ToolOutcome::CommanderDamage { player, opponent, value }
            }
            ToolAction::AdjustCommanderDamage { player, opponent, delta } => {
                roster.get(opponent)?;
                let p = roster.get_mut(player)?;
                let value = self.engine.adjust_commander_damage(p, opponent, delta);
                ToolOutcome::CommanderDamage { player, opponent, value }
            }
            ToolAction::AdjustLife { player, delta } => {
                let p = roster.get_mut(player)?;
                let change = self.engine.apply_delta(p, delta)?;
                if !change.is_noop() {
                    ledger.record(LifeChangeEvent::from_change(
                        player,
                        &change,
                        scheduler.now(),
                        ChangeSource::Tools,
                    ));
                }
                ToolOutcome::Life { player, change }
            }
            ToolAction::RollDie { sides } => {
                let result = self.dice.roll_die(sides)?;
                self.show(result, scheduler)
            }
            ToolAction::FlipCoin => {
                let result = self.dice.flip_coin();
                self.show(result, scheduler)
            }
            ToolAction::PickStartingPlayer => {
                let result = self.dice.pick_starting_player(roster)?;
                self.show(result, scheduler)
            }
            ToolAction::ResetGame => {
                let now = scheduler.now();
                ledger.clear();
                for (player, change) in roster.reset_game() {
                    if !change.is_noop() {
                        ledger.record(LifeChangeEvent::from_change(player, &change, now, ChangeSource::Reset));
                    }
                }
                ToolOutcome::GameReset
            }
        };
        Ok(outcome)
    }

    /// Handle a fired timer. Returns `true` if it hid the result display.
    pub fn handle_timer(&mut self, timer: TimerId) -> bool {
        self.results.handle_timer(timer)
    }

    fn show<S>(&mut self, result: ToolResult, scheduler: &mut S) -> ToolOutcome
    where
        S: Scheduler + ?Sized,
    {
        self.results.show(result, scheduler);
        ToolOutcome::Random(result)
    }

    /// Monarch and initiative are exclusive across the table; day/night is
    /// shared by it. Everything else is a plain per-player toggle.
    fn toggle_flag(&self, roster: &mut PlayerRoster, player: PlayerId, flag: PlayerFlag) -> LifeResult<bool> {
        let current = roster.get(player)?.flag(flag);
        match (flag, current) {
            (PlayerFlag::Monarch, false) => roster.grant_monarch(player).map(|()| true),
            (PlayerFlag::Initiative, false) => roster.grant_initiative(player).map(|()| true),
            (PlayerFlag::DayTime, _) => {
                roster.set_day_time(!current);
                Ok(!current)
            }
            _ => Ok(self.engine.toggle_flag(roster.get_mut(player)?, flag)),
        }
    }
}
