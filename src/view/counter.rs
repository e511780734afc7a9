//! One player's interactive counter region.
//!
//! The view wires the pipeline for a single player:
//!
//! ```text
//! TouchEvent -> GestureClassifier -> LifeCounterEngine / HoldRepeatController
//!                                 -> ChangeDisplayCoordinator + HistoryLedger
//! ```
//!
//! ## Gestures
//!
//! | Gesture                      | Effect                                   |
//! |------------------------------|------------------------------------------|
//! | Tap, left half               | life -1                                  |
//! | Tap, right half              | life +1                                  |
//! | Long-press                   | hold: ±10 per repeat tick until release  |
//! | Two-finger swipe up (local)  | open the tools overlay                   |
//! | Two-finger swipe down (local)| close the tools overlay                  |
//!
//! Halves and swipe directions are evaluated in the region's local frame,
//! so a player seated across the table gets the same gestures.
//!
//! The view owns no player state. Each call receives a [`ViewContext`]
//! borrowing the player, the engine, the ledger and the scheduler.

use serde::{Deserialize, Serialize};

use tracing::debug;

use crate::core::{Direction, EngineConfig, LifeError, LifeResult, Orientation, PlayerId, Rect, Side};
use crate::display::ChangeDisplayCoordinator;
use crate::history::{ChangeSource, HistoryLedger, LifeChangeEvent};
use crate::hold::HoldRepeatController;
use crate::life::{LifeChange, LifeCounterEngine, Player};
use crate::schedule::{Scheduler, TimerId};
use crate::touch::{GestureClassifier, GestureResult, SwipeKind, TouchEvent, TouchPhase};

/// Where a player's region sits on screen and which way it faces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionLayout {
    pub bounds: Rect,
    pub orientation: Orientation,
}

impl RegionLayout {
    #[must_use]
    pub const fn new(bounds: Rect, orientation: Orientation) -> Self {
        Self { bounds, orientation }
    }
}

/// Borrowed collaborators for one view call.
pub struct ViewContext<'a, S: ?Sized> {
    pub player: &'a mut Player,
    pub engine: &'a LifeCounterEngine,
    pub ledger: &'a mut HistoryLedger,
    pub scheduler: &'a mut S,
}

impl<'a, S: Scheduler + ?Sized> ViewContext<'a, S> {
    pub fn new(
        player: &'a mut Player,
        engine: &'a LifeCounterEngine,
        ledger: &'a mut HistoryLedger,
        scheduler: &'a mut S,
    ) -> Self {
        Self {
            player,
            engine,
            ledger,
            scheduler,
        }
    }
}

/// Something the view did in response to input or a timer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum ViewOutput {
    /// A life change was applied and recorded.
    LifeChanged(LifeChangeEvent),
    /// A hold started on this side.
    HoldStarted(Side),
    /// The active hold ended.
    HoldStopped,
    /// Open the tools overlay.
    OpenTools,
    /// Close the tools overlay.
    CloseTools,
    /// The change indicator hid.
    ChangeHidden,
    /// A gesture this view has no action for.
    Gesture(GestureResult),
}

/// Per-player interactive region.
#[derive(Clone, Debug)]
pub struct LifeCounterView {
    player_id: PlayerId,
    layout: RegionLayout,
    classifier: GestureClassifier,
    left_hold: HoldRepeatController,
    right_hold: HoldRepeatController,
    display: ChangeDisplayCoordinator,
    tap_step: i32,
    hold_step: i32,
    long_press_timer: Option<TimerId>,
}

impl LifeCounterView {
    /// Create a view for `player_id`.
    ///
    /// `config` is taken as given; check it with [`EngineConfig::validate`] first.
    #[must_use]
    pub fn new(player_id: PlayerId, layout: RegionLayout, config: &EngineConfig) -> Self {
        Self {
            player_id,
            layout,
            classifier: GestureClassifier::new(&config.gesture),
            left_hold: HoldRepeatController::new(&config.hold),
            right_hold: HoldRepeatController::new(&config.hold),
            display: ChangeDisplayCoordinator::new(config.display.change_window),
            tap_step: config.hold.tap_step,
            hold_step: config.hold.step_amount,
            long_press_timer: None,
        }
    }

    #[must_use]
    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }

    #[must_use]
    pub fn layout(&self) -> &RegionLayout {
        &self.layout
    }

    /// Move or rotate the region.
    pub fn set_layout(&mut self, layout: RegionLayout) {
        self.layout = layout;
    }

    /// Value shown by the change indicator.
    #[must_use]
    pub fn cumulative_change(&self) -> i32 {
        self.display.cumulative_change()
    }

    /// Is the change indicator visible?
    #[must_use]
    pub fn is_change_visible(&self) -> bool {
        self.display.is_visible()
    }

    /// Side of the active hold, if any.
    #[must_use]
    pub fn holding(&self) -> Option<Side> {
        [&self.left_hold, &self.right_hold]
            .into_iter()
            .find_map(|h| h.session().map(|s| s.side))
    }

    /// The region's gesture classifier.
    #[must_use]
    pub fn classifier(&self) -> &GestureClassifier {
        &self.classifier
    }

    /// Feed one touch event.
    ///
    /// Touches landing outside the region's bounds are ignored.
    pub fn handle_touch<S>(&mut self, event: TouchEvent, ctx: &mut ViewContext<'_, S>) -> LifeResult<Vec<ViewOutput>>
    where
        S: Scheduler + ?Sized,
    {
        self.check_player(ctx)?;
        if event.phase == TouchPhase::Began && !self.layout.bounds.contains(event.position) {
            return Ok(Vec::new());
        }

        let result = self.classifier.handle(event);
        self.sync_long_press_timer(ctx.scheduler);

        let mut outputs = Vec::new();
        if let Some(result) = result {
            self.dispatch(result, ctx, &mut outputs)?;
        }
        Ok(outputs)
    }

    /// Handle a fired timer. Timers the view does not own are ignored.
    pub fn handle_timer<S>(&mut self, timer: TimerId, ctx: &mut ViewContext<'_, S>) -> LifeResult<Vec<ViewOutput>>
    where
        S: Scheduler + ?Sized,
    {
        self.check_player(ctx)?;
        let mut outputs = Vec::new();

        if self.long_press_timer == Some(timer) {
            self.long_press_timer = None;
            if let Some(result) = self.classifier.poll(ctx.scheduler.now()) {
                self.dispatch(result, ctx, &mut outputs)?;
            }
        }

        let tick = self
            .left_hold
            .handle_timer(timer)
            .or_else(|| self.right_hold.handle_timer(timer));
        if let Some(tick) = tick {
            if let Some(output) = self.apply(tick.step, ChangeSource::LongPress, ctx)? {
                outputs.push(output);
            }
        }

        if self.display.handle_timer(timer) {
            outputs.push(ViewOutput::ChangeHidden);
        }
        Ok(outputs)
    }

    /// Undo the player's most recent change by applying its inverse.
    ///
    /// The undone entry is removed from the ledger; the inverse is shown on
    /// the change indicator but not recorded.
    pub fn undo<S>(&mut self, ctx: &mut ViewContext<'_, S>) -> LifeResult<Option<LifeChange>>
    where
        S: Scheduler + ?Sized,
    {
        self.check_player(ctx)?;
        let Some(event) = ctx.ledger.latest_for(self.player_id).copied() else {
            return Ok(None);
        };

        let change = ctx.engine.apply_delta(ctx.player, -event.delta)?;
        ctx.ledger.undo_last(self.player_id);
        self.show_change(&change, ctx.scheduler);
        debug!(player = %self.player_id, applied = change.applied, "change undone");
        Ok(Some(change))
    }

    /// Show a change applied elsewhere, such as from the tools overlay, on
    /// the change indicator. The caller has already recorded it.
    pub fn show_change<S>(&mut self, change: &LifeChange, scheduler: &mut S)
    where
        S: Scheduler + ?Sized,
    {
        if !change.is_noop() {
            self.display.record(change.applied, scheduler);
        }
    }

    /// Abandon any in-flight interaction: stop holds, cancel the long-press
    /// poll and forget tracked touches.
    pub fn cancel_interaction<S>(&mut self, scheduler: &mut S) -> bool
    where
        S: Scheduler + ?Sized,
    {
        if let Some(timer) = self.long_press_timer.take() {
            scheduler.cancel(timer);
        }
        self.classifier.reset();
        self.stop_holds(scheduler)
    }

    fn dispatch<S>(
        &mut self,
        result: GestureResult,
        ctx: &mut ViewContext<'_, S>,
        outputs: &mut Vec<ViewOutput>,
    ) -> LifeResult<()>
    where
        S: Scheduler + ?Sized,
    {
        match result {
            GestureResult::Tap { origin } => {
                let side = self.layout.bounds.side_of(origin, self.layout.orientation);
                if let Some(output) = self.apply(side.sign() * self.tap_step, ChangeSource::Tap, ctx)? {
                    outputs.push(output);
                }
            }
            GestureResult::LongPress { origin, is_active: true } => {
                let side = self.layout.bounds.side_of(origin, self.layout.orientation);
                let step = side.sign() * self.hold_step;
                let hold = match side {
                    Side::Left => &mut self.left_hold,
                    Side::Right => &mut self.right_hold,
                };
                if hold.start(side, step, ctx.scheduler).is_some() {
                    outputs.push(ViewOutput::HoldStarted(side));
                }
            }
            GestureResult::LongPress { is_active: false, .. } => {
                if self.stop_holds(ctx.scheduler) {
                    outputs.push(ViewOutput::HoldStopped);
                }
            }
            GestureResult::Swipe {
                kind: SwipeKind::TwoFinger,
                direction,
                ..
            } => match self.layout.orientation.local_direction(direction) {
                Direction::Up => outputs.push(ViewOutput::OpenTools),
                Direction::Down => outputs.push(ViewOutput::CloseTools),
                _ => outputs.push(ViewOutput::Gesture(result)),
            },
            other => outputs.push(ViewOutput::Gesture(other)),
        }
        Ok(())
    }

    /// Apply a life delta, then show and record whatever actually changed.
    fn apply<S>(&mut self, delta: i32, source: ChangeSource, ctx: &mut ViewContext<'_, S>) -> LifeResult<Option<ViewOutput>>
    where
        S: Scheduler + ?Sized,
    {
        let change = ctx.engine.apply_delta(ctx.player, delta)?;
        if change.is_noop() {
            return Ok(None);
        }

        self.display.record(change.applied, ctx.scheduler);
        let event = LifeChangeEvent::from_change(self.player_id, &change, ctx.scheduler.now(), source);
        ctx.ledger.record(event);
        Ok(Some(ViewOutput::LifeChanged(event)))
    }

    /// Keep exactly one poll timer armed while a long-press is pending.
    fn sync_long_press_timer<S>(&mut self, scheduler: &mut S)
    where
        S: Scheduler + ?Sized,
    {
        match (self.classifier.long_press_deadline(), self.long_press_timer) {
            (Some(deadline), None) => {
                let delay = deadline.saturating_since(scheduler.now());
                self.long_press_timer = Some(scheduler.schedule_once(delay));
            }
            (None, Some(timer)) => {
                scheduler.cancel(timer);
                self.long_press_timer = None;
            }
            _ => {}
        }
    }

    fn stop_holds<S>(&mut self, scheduler: &mut S) -> bool
    where
        S: Scheduler + ?Sized,
    {
        let left = self.left_hold.stop(scheduler).is_some();
        let right = self.right_hold.stop(scheduler).is_some();
        left || right
    }

    fn check_player<S: ?Sized>(&self, ctx: &ViewContext<'_, S>) -> LifeResult<()> {
        if ctx.player.id == self.player_id {
            Ok(())
        } else {
            Err(LifeError::UnknownPlayer(ctx.player.id))
        }
    }
}
