//! Transient displays driven by debounced dismissal timers.

pub mod coordinator;
pub mod debounce;

pub use coordinator::ChangeDisplayCoordinator;
pub use debounce::{Debouncer, PendingDismissal};
