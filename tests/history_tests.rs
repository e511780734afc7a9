//! History ledger integration tests.

use lifetap::{
    ChangeSource, HistoryLedger, LifeChangeEvent, LifeCounterEngine, Player, PlayerId, Timestamp,
};

fn record_delta(
    engine: &LifeCounterEngine,
    ledger: &mut HistoryLedger,
    player: &mut Player,
    delta: i32,
    at: u64,
) {
    let change = engine.apply_delta(player, delta).unwrap();
    ledger.record(LifeChangeEvent::from_change(player.id, &change, Timestamp(at), ChangeSource::Manual));
}

#[test]
fn test_ledger_keeps_latest_hundred() {
    let engine = LifeCounterEngine::default();
    let mut ledger = HistoryLedger::default();
    let mut player = Player::new(PlayerId::new(0), "A", 40);

    for i in 0..150 {
        let delta = if i % 2 == 0 { 1 } else { -1 };
        record_delta(&engine, &mut ledger, &mut player, delta, i);
    }

    assert_eq!(ledger.len(), 100);
    let times: Vec<_> = ledger.iter().map(|e| e.timestamp.as_millis()).collect();
    let expected: Vec<_> = (50..150).collect();
    assert_eq!(times, expected);
}

#[test]
fn test_history_is_per_player() {
    let engine = LifeCounterEngine::default();
    let mut ledger = HistoryLedger::default();
    let mut a = Player::new(PlayerId::new(0), "A", 40);
    let mut b = Player::new(PlayerId::new(1), "B", 40);

    record_delta(&engine, &mut ledger, &mut a, -3, 0);
    record_delta(&engine, &mut ledger, &mut b, -4, 1);
    record_delta(&engine, &mut ledger, &mut a, 2, 2);

    let history: Vec<_> = ledger.history_for(a.id).iter().map(|e| e.delta).collect();
    assert_eq!(history, vec![-3, 2]);
    assert!(ledger.history_for(PlayerId::new(9)).is_empty());
}

#[test]
fn test_undo_then_inverse_restores_life() {
    let engine = LifeCounterEngine::default();
    let mut ledger = HistoryLedger::default();
    let mut player = Player::new(PlayerId::new(0), "A", 40);

    record_delta(&engine, &mut ledger, &mut player, -6, 0);
    record_delta(&engine, &mut ledger, &mut player, -2, 1);

    while let Some(event) = ledger.undo_last(player.id) {
        assert_eq!(player.life, event.new_life);
        engine.apply_delta(&mut player, -event.delta).unwrap();
        assert_eq!(player.life, event.previous_life);
    }
    assert_eq!(player.life, 40);
    assert!(ledger.is_empty());
}

#[test]
fn test_clamped_change_records_applied_delta() {
    let engine = LifeCounterEngine::default();
    let mut ledger = HistoryLedger::default();
    let mut player = Player::new(PlayerId::new(0), "A", 995);

    record_delta(&engine, &mut ledger, &mut player, 10, 0);
    let event = ledger.latest_for(player.id).unwrap();
    assert_eq!(event.delta, 4);
    assert_eq!(event.new_life, 999);
}

#[test]
fn test_ledger_snapshot_is_independent() {
    let engine = LifeCounterEngine::default();
    let mut ledger = HistoryLedger::default();
    let mut player = Player::new(PlayerId::new(0), "A", 40);
    record_delta(&engine, &mut ledger, &mut player, 1, 0);

    let snapshot = ledger.clone();
    ledger.clear();

    assert_eq!(snapshot.len(), 1);
    assert!(ledger.is_empty());
}
