//! End-to-end table scenarios.
//!
//! These tests drive views with raw touch events and a virtual clock, the
//! way a host run loop would: timers due before an event fire first, then
//! the event is delivered.

use std::time::Duration;

use lifetap::{
    ChangeSource, EngineConfig, HistoryLedger, LifeCounterEngine, LifeCounterView, Orientation,
    PlayerId, PlayerRoster, Rect, RegionLayout, Side, Timestamp, ToolAction, ToolOutcome, ToolsOverlay,
    TouchEvent, ViewContext, ViewOutput, VirtualScheduler,
};

/// A four-player table: two regions facing up, two facing across.
struct Table {
    config: EngineConfig,
    roster: PlayerRoster,
    engine: LifeCounterEngine,
    ledger: HistoryLedger,
    clock: VirtualScheduler,
    views: Vec<LifeCounterView>,
    overlay: ToolsOverlay,
}

impl Table {
    fn new() -> Self {
        let config = EngineConfig::default();
        let roster = PlayerRoster::with_players(&config.rules, ["A", "B", "C", "D"]);
        let layouts = [
            RegionLayout::new(Rect::new(0.0, 400.0, 400.0, 400.0), Orientation::Upright),
            RegionLayout::new(Rect::new(400.0, 400.0, 400.0, 400.0), Orientation::Upright),
            RegionLayout::new(Rect::new(0.0, 0.0, 400.0, 400.0), Orientation::Inverted),
            RegionLayout::new(Rect::new(400.0, 0.0, 400.0, 400.0), Orientation::Inverted),
        ];
        let views = roster
            .ids()
            .zip(layouts)
            .map(|(id, layout)| LifeCounterView::new(id, layout, &config))
            .collect();
        Self {
            engine: LifeCounterEngine::new(config.rules.clone()),
            ledger: HistoryLedger::from_config(&config).unwrap(),
            clock: VirtualScheduler::new(),
            overlay: ToolsOverlay::new(&config, 2024),
            roster,
            views,
            config,
        }
    }

    fn life(&self, seat: usize) -> i32 {
        self.roster.players()[seat].life
    }

    /// Fire every timer due up to `deadline`, dispatching to all views.
    fn run_until(&mut self, deadline: Timestamp) -> Vec<(usize, ViewOutput)> {
        let mut outputs = Vec::new();
        let views = &mut self.views;
        let roster = &mut self.roster;
        let engine = &self.engine;
        let ledger = &mut self.ledger;
        let overlay = &mut self.overlay;
        self.clock.run_until(deadline, |sched, fire| {
            overlay.handle_timer(fire.timer);
            for (seat, view) in views.iter_mut().enumerate() {
                let player = roster.get_mut(view.player_id()).unwrap();
                let mut ctx = ViewContext::new(player, engine, &mut *ledger, &mut *sched);
                for output in view.handle_timer(fire.timer, &mut ctx).unwrap() {
                    outputs.push((seat, output));
                }
            }
        });
        outputs
    }

    /// Deliver a touch event to one seat's view.
    fn touch(&mut self, seat: usize, event: TouchEvent) -> Vec<ViewOutput> {
        self.run_until(event.timestamp);
        let view = &mut self.views[seat];
        let player = self.roster.get_mut(view.player_id()).unwrap();
        let mut ctx = ViewContext::new(player, &self.engine, &mut self.ledger, &mut self.clock);
        view.handle_touch(event, &mut ctx).unwrap()
    }

    fn tap(&mut self, seat: usize, x: f32, y: f32, at: u64) -> Vec<ViewOutput> {
        self.touch(seat, TouchEvent::began(1, x, y, at));
        self.touch(seat, TouchEvent::ended(1, x, y, at + 60))
    }
}

// =============================================================================
// Tap and hold
// =============================================================================

#[test]
fn test_tap_then_hold_then_dismiss() {
    let mut table = Table::new();
    assert_eq!(table.life(0), 40);

    // Tap the right half: 40 -> 41
    table.tap(0, 300.0, 600.0, 0);
    assert_eq!(table.life(0), 41);
    assert_eq!(table.views[0].cumulative_change(), 1);

    // Long-press the right half
    table.touch(0, TouchEvent::began(2, 300.0, 600.0, 200));
    let outputs = table.run_until(Timestamp(400));
    assert!(outputs.contains(&(0, ViewOutput::HoldStarted(Side::Right))));
    assert_eq!(table.life(0), 41, "no change when the hold starts");

    // First tick 0.8 s after activation: 41 -> 51
    table.run_until(Timestamp(1_199));
    assert_eq!(table.life(0), 41);
    table.run_until(Timestamp(1_200));
    assert_eq!(table.life(0), 51);
    assert_eq!(table.views[0].cumulative_change(), 11);

    // Release stops the hold
    let outputs = table.touch(0, TouchEvent::ended(2, 300.0, 600.0, 1_300));
    assert_eq!(outputs, vec![ViewOutput::HoldStopped]);
    table.run_until(Timestamp(3_000));
    assert_eq!(table.life(0), 51);
    assert!(table.views[0].is_change_visible());

    // 2 s after the last change the indicator hides and resets
    let outputs = table.run_until(Timestamp(3_200));
    assert_eq!(outputs, vec![(0, ViewOutput::ChangeHidden)]);
    assert!(!table.views[0].is_change_visible());
    assert_eq!(table.views[0].cumulative_change(), 0);

    let sources: Vec<_> = table
        .ledger
        .history_for(PlayerId::new(0))
        .iter()
        .map(|e| (e.delta, e.source))
        .collect();
    assert_eq!(sources, vec![(1, ChangeSource::Tap), (10, ChangeSource::LongPress)]);
}

#[test]
fn test_views_are_independent() {
    let mut table = Table::new();

    table.touch(1, TouchEvent::began(1, 450.0, 600.0, 0));
    table.tap(0, 300.0, 600.0, 10);
    table.run_until(Timestamp(2_000));
    table.touch(1, TouchEvent::ended(1, 450.0, 600.0, 2_000));

    assert_eq!(table.life(0), 41);
    // Two ticks at 1 000 and 1 800 on the left half
    assert_eq!(table.life(1), 20);
    assert_eq!(table.life(2), 40);
}

#[test]
fn test_inverted_seat_taps_in_local_frame() {
    let mut table = Table::new();

    // Screen-left of an inverted region is the player's right
    table.tap(2, 50.0, 200.0, 0);
    assert_eq!(table.life(2), 41);
}

#[test]
fn test_burst_of_taps_single_dismissal() {
    let mut table = Table::new();
    for i in 0..5 {
        table.tap(0, 50.0, 600.0, i * 300);
    }
    assert_eq!(table.life(0), 35);
    assert_eq!(table.views[0].cumulative_change(), -5);

    let outputs = table.run_until(Timestamp(10_000));
    let hides = outputs
        .iter()
        .filter(|(_, o)| *o == ViewOutput::ChangeHidden)
        .count();
    assert_eq!(hides, 1);
    assert_eq!(table.clock.pending_count(), 0);
}

#[test]
fn test_hold_clamps_at_lower_bound() {
    let mut table = Table::new();
    table.roster.get_mut(PlayerId::new(0)).unwrap().life = -985;

    table.touch(0, TouchEvent::began(1, 50.0, 600.0, 0));
    table.run_until(Timestamp(5_000));
    table.touch(0, TouchEvent::ended(1, 50.0, 600.0, 5_000));

    assert_eq!(table.life(0), -999);
    let deltas: Vec<_> = table.ledger.iter().map(|e| e.delta).collect();
    assert_eq!(deltas, vec![-10, -4]);
}

// =============================================================================
// Tools
// =============================================================================

#[test]
fn test_two_finger_swipe_opens_tools() {
    let mut table = Table::new();
    table.touch(0, TouchEvent::began(1, 150.0, 700.0, 0));
    table.touch(0, TouchEvent::began(2, 210.0, 700.0, 15));
    table.touch(0, TouchEvent::moved(1, 155.0, 640.0, 40));
    table.touch(0, TouchEvent::moved(2, 212.0, 635.0, 40));
    let outputs = table.touch(0, TouchEvent::ended(2, 212.0, 630.0, 70));
    assert_eq!(outputs, vec![ViewOutput::OpenTools]);
    table.overlay.open();

    let outputs = table.touch(0, TouchEvent::ended(1, 155.0, 630.0, 80));
    assert!(outputs.is_empty());
    assert_eq!(table.life(0), 40);
    assert!(table.overlay.is_open());
}

#[test]
fn test_overlay_actions_with_undo() {
    let mut table = Table::new();
    let outcome = table
        .overlay
        .apply(
            ToolAction::AdjustLife { player: PlayerId::new(3), delta: -7 },
            &mut table.roster,
            &mut table.ledger,
            &mut table.clock,
        )
        .unwrap();
    table
        .overlay
        .apply(ToolAction::RollDie { sides: 20 }, &mut table.roster, &mut table.ledger, &mut table.clock)
        .unwrap();
    assert!(table.overlay.results().current().is_some());
    assert_eq!(table.life(3), 33);

    // The host forwards the tools change to the seat's indicator
    let ToolOutcome::Life { player, change } = outcome else {
        panic!("expected a life outcome, got {:?}", outcome);
    };
    let seat = table.views.iter().position(|v| v.player_id() == player).unwrap();
    table.views[seat].show_change(&change, &mut table.clock);
    assert_eq!(table.views[3].cumulative_change(), -7);
    assert!(table.views[3].is_change_visible());

    table.clock.advance(Duration::from_secs(1));
    let view = &mut table.views[3];
    let player = table.roster.get_mut(PlayerId::new(3)).unwrap();
    let mut ctx = ViewContext::new(player, &table.engine, &mut table.ledger, &mut table.clock);
    let change = view.undo(&mut ctx).unwrap().unwrap();

    assert_eq!(change.applied, 7);
    assert_eq!(table.life(3), 40);
    assert_eq!(table.views[3].cumulative_change(), 0);
    assert!(table.ledger.is_empty());
    assert_eq!(table.config.display.tool_result_window, Duration::from_secs(3));
}

#[test]
fn test_reset_game_records_reset_entries() {
    let mut table = Table::new();
    table.tap(0, 50.0, 600.0, 0);
    table.tap(0, 50.0, 600.0, 200);
    assert_eq!(table.life(0), 38);

    table
        .overlay
        .apply(ToolAction::ResetGame, &mut table.roster, &mut table.ledger, &mut table.clock)
        .unwrap();

    assert_eq!(table.life(0), 40);
    let entries: Vec<_> = table.ledger.iter().map(|e| (e.player_id, e.delta, e.source)).collect();
    assert_eq!(entries, vec![(PlayerId::new(0), 2, ChangeSource::Reset)]);
}
