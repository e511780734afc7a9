//! Change history and undo.

pub mod event;
pub mod ledger;

pub use event::{ChangeSource, LifeChangeEvent};
pub use ledger::HistoryLedger;
