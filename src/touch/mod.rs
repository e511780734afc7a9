//! Touch tracking and gesture recognition.
//!
//! Raw [`TouchEvent`]s flow into a [`GestureClassifier`], which updates its
//! [`TouchTracker`] and then offers the change to each recognizer:
//!
//! - [`PressRecognizer`]: tap and long-press
//! - [`SwipeRecognizer`]: one-finger swipe
//! - [`TwoFingerSwipeRecognizer`]: two parallel fingers
//!
//! Recognizers never touch game state. They only report [`GestureResult`]s.

pub mod classifier;
pub mod gesture;
pub mod press;
pub mod swipe;
pub mod tracker;
pub mod two_finger;

pub use classifier::GestureClassifier;
pub use gesture::{GestureResult, RecognizerState, Recognizer, SwipeKind};
pub use press::PressRecognizer;
pub use swipe::SwipeRecognizer;
pub use tracker::{TouchEvent, TouchId, TouchPhase, TouchPoint, TouchTracker, TrackerChange};
pub use two_finger::{ParallelCheck, TwoFingerSwipeRecognizer};
