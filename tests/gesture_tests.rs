//! Gesture classification integration tests.
//!
//! Sequences of raw touch events are fed through the public classifier and
//! the final classification is checked.

use lifetap::{
    Direction, GestureClassifier, GestureConfig, GestureResult, Point, SwipeKind, Timestamp,
    TouchEvent,
};

fn classify(events: &[TouchEvent]) -> Vec<GestureResult> {
    let mut classifier = GestureClassifier::new(&GestureConfig::default());
    events.iter().filter_map(|e| classifier.handle(*e)).collect()
}

// =============================================================================
// Single finger
// =============================================================================

#[test]
fn test_tap_is_not_a_swipe() {
    let results = classify(&[
        TouchEvent::began(1, 200.0, 200.0, 0),
        TouchEvent::moved(1, 204.0, 203.0, 40),
        TouchEvent::ended(1, 204.0, 203.0, 90),
    ]);
    assert_eq!(results, vec![GestureResult::Tap { origin: Point::new(200.0, 200.0) }]);
}

#[test]
fn test_swipe_directions() {
    let cases = [
        ((0.0, -60.0), Direction::Up),
        ((0.0, 60.0), Direction::Down),
        ((-60.0, 10.0), Direction::Left),
        ((60.0, -10.0), Direction::Right),
        // Equal axes resolve vertically
        ((40.0, 40.0), Direction::Down),
    ];
    for ((dx, dy), expected) in cases {
        let results = classify(&[
            TouchEvent::began(1, 200.0, 200.0, 0),
            TouchEvent::ended(1, 200.0 + dx, 200.0 + dy, 50),
        ]);
        match results[..] {
            [GestureResult::Swipe { kind: SwipeKind::Single, direction, .. }] => {
                assert_eq!(direction, expected, "displacement ({}, {})", dx, dy);
            }
            _ => panic!("expected one swipe for ({}, {}), got {:?}", dx, dy, results),
        }
    }
}

#[test]
fn test_short_drag_yields_none() {
    let results = classify(&[
        TouchEvent::began(1, 200.0, 200.0, 0),
        TouchEvent::ended(1, 220.0, 200.0, 50),
    ]);
    assert_eq!(results, vec![GestureResult::None]);
}

#[test]
fn test_long_press_requires_poll() {
    let mut classifier = GestureClassifier::new(&GestureConfig::default());
    classifier.handle(TouchEvent::began(1, 10.0, 10.0, 1_000));
    assert_eq!(classifier.long_press_deadline(), Some(Timestamp(1_200)));
    assert_eq!(classifier.poll(Timestamp(1_100)), None);
    assert_eq!(
        classifier.poll(Timestamp(1_200)),
        Some(GestureResult::LongPress { origin: Point::new(10.0, 10.0), is_active: true })
    );
    assert_eq!(
        classifier.handle(TouchEvent::cancelled(1, 10.0, 10.0, 1_500)),
        Some(GestureResult::LongPress { origin: Point::new(10.0, 10.0), is_active: false })
    );
}

// =============================================================================
// Two fingers
// =============================================================================

#[test]
fn test_two_finger_swipe_down() {
    let results = classify(&[
        TouchEvent::began(1, 100.0, 100.0, 0),
        TouchEvent::began(2, 160.0, 100.0, 20),
        TouchEvent::moved(1, 100.0, 150.0, 40),
        TouchEvent::moved(2, 160.0, 160.0, 40),
        TouchEvent::ended(1, 100.0, 150.0, 60),
        TouchEvent::ended(2, 160.0, 160.0, 65),
    ]);
    assert_eq!(
        results,
        vec![GestureResult::Swipe {
            kind: SwipeKind::TwoFinger,
            direction: Direction::Down,
            origin: Point::new(130.0, 100.0),
            distance: 55.0,
        }]
    );
}

#[test]
fn test_third_finger_fails_two_finger_swipe() {
    let results = classify(&[
        TouchEvent::began(1, 100.0, 300.0, 0),
        TouchEvent::began(2, 150.0, 300.0, 0),
        TouchEvent::moved(1, 100.0, 250.0, 20),
        TouchEvent::moved(2, 150.0, 250.0, 20),
        TouchEvent::began(3, 200.0, 300.0, 30),
        TouchEvent::moved(1, 100.0, 200.0, 40),
        TouchEvent::moved(2, 150.0, 200.0, 40),
        TouchEvent::ended(1, 100.0, 200.0, 50),
        TouchEvent::ended(2, 150.0, 200.0, 50),
        TouchEvent::ended(3, 200.0, 300.0, 50),
    ]);
    assert_eq!(results, vec![GestureResult::None]);
}

#[test]
fn test_perpendicular_vectors_rejected() {
    let results = classify(&[
        TouchEvent::began(1, 100.0, 300.0, 0),
        TouchEvent::began(2, 150.0, 300.0, 0),
        TouchEvent::moved(1, 100.0, 240.0, 20),
        TouchEvent::moved(2, 210.0, 300.0, 20),
        TouchEvent::ended(1, 100.0, 240.0, 30),
        TouchEvent::ended(2, 210.0, 300.0, 30),
    ]);
    assert_eq!(results, vec![GestureResult::None]);
}

#[test]
fn test_cancelled_finger_fails_two_finger_swipe() {
    let results = classify(&[
        TouchEvent::began(1, 100.0, 300.0, 0),
        TouchEvent::began(2, 150.0, 300.0, 0),
        TouchEvent::moved(1, 100.0, 240.0, 20),
        TouchEvent::moved(2, 150.0, 240.0, 20),
        TouchEvent::cancelled(2, 150.0, 240.0, 25),
        TouchEvent::ended(1, 100.0, 240.0, 30),
    ]);
    assert_eq!(results, vec![GestureResult::None]);
}

#[test]
fn test_one_finger_drag_then_second_finger_is_not_two_finger_swipe() {
    let results = classify(&[
        TouchEvent::began(1, 100.0, 300.0, 0),
        TouchEvent::moved(1, 100.0, 150.0, 20),
        TouchEvent::began(2, 140.0, 300.0, 30),
        TouchEvent::moved(2, 140.0, 260.0, 40),
        TouchEvent::ended(1, 100.0, 150.0, 50),
        TouchEvent::ended(2, 140.0, 260.0, 60),
    ]);
    assert_eq!(results, vec![GestureResult::None]);
}

#[test]
fn test_directional_variant_rejects_opposite_direction() {
    let mut up_only = GestureClassifier::new(&GestureConfig::default())
        .with_two_finger_direction(Direction::Up);
    let events = [
        TouchEvent::began(1, 100.0, 100.0, 0),
        TouchEvent::began(2, 150.0, 100.0, 0),
        TouchEvent::moved(1, 100.0, 170.0, 20),
        TouchEvent::moved(2, 150.0, 170.0, 20),
        TouchEvent::ended(1, 100.0, 170.0, 30),
        TouchEvent::ended(2, 150.0, 170.0, 30),
    ];
    let results: Vec<_> = events.iter().filter_map(|e| up_only.handle(*e)).collect();
    assert_eq!(results, vec![GestureResult::None]);
}

#[test]
fn test_classifier_resets_between_sequences() {
    let mut classifier = GestureClassifier::new(&GestureConfig::default());

    // Failed two-finger attempt
    for event in [
        TouchEvent::began(1, 100.0, 300.0, 0),
        TouchEvent::began(2, 150.0, 300.0, 0),
        TouchEvent::began(3, 200.0, 300.0, 0),
        TouchEvent::ended(1, 100.0, 300.0, 10),
        TouchEvent::ended(2, 150.0, 300.0, 10),
        TouchEvent::ended(3, 200.0, 300.0, 10),
    ] {
        classifier.handle(event);
    }

    // A plain tap right after is still recognized
    classifier.handle(TouchEvent::began(4, 50.0, 50.0, 100));
    assert_eq!(
        classifier.handle(TouchEvent::ended(4, 50.0, 50.0, 150)),
        Some(GestureResult::Tap { origin: Point::new(50.0, 50.0) })
    );
}
