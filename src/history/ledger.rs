//! Size-bounded change history.
//!
//! The ledger is append-only apart from two removals: eviction of the
//! oldest entry when the capacity is exceeded, and `undo_last`, which
//! removes a player's most recent entry. Undo never touches life totals;
//! callers apply the inverse delta themselves.
//!
//! Entries live in an `im::Vector`, so snapshots of the ledger are cheap
//! to clone.

use im::Vector;
use serde::{Deserialize, Serialize};

use tracing::{debug, trace};

use crate::core::{ConfigError, EngineConfig, PlayerId};

use super::event::LifeChangeEvent;

/// Append-only, size-bounded log of life change events.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryLedger {
    entries: Vector<LifeChangeEvent>,
    capacity: usize,
}

impl HistoryLedger {
    /// Create an empty ledger holding at most `capacity` entries.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vector::new(),
            capacity: capacity.max(1),
        }
    }

    /// Create an empty ledger sized by a validated `config`.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency [`EngineConfig::validate`] finds.
    pub fn from_config(config: &EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config.history_capacity))
    }

    /// Maximum number of entries kept.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append an event, evicting the oldest entries beyond capacity.
    pub fn record(&mut self, event: LifeChangeEvent) {
        trace!(player = %event.player_id, delta = event.delta, source = ?event.source, "change recorded");
        self.entries.push_back(event);
        while self.entries.len() > self.capacity {
            if let Some(evicted) = self.entries.pop_front() {
                trace!(player = %evicted.player_id, "history entry evicted");
            }
        }
    }

    /// Every entry for `player`, oldest first.
    #[must_use]
    pub fn history_for(&self, player: PlayerId) -> Vec<LifeChangeEvent> {
        self.entries
            .iter()
            .filter(|e| e.player_id == player)
            .copied()
            .collect()
    }

    /// The most recent entry for `player`.
    #[must_use]
    pub fn latest_for(&self, player: PlayerId) -> Option<&LifeChangeEvent> {
        self.entries.iter().rev().find(|e| e.player_id == player)
    }

    /// Remove and return `player`'s most recent entry.
    pub fn undo_last(&mut self, player: PlayerId) -> Option<LifeChangeEvent> {
        let index = self
            .entries
            .iter()
            .rposition(|e| e.player_id == player)?;
        let event = self.entries.remove(index);
        debug!(%player, delta = event.delta, "history entry undone");
        Some(event)
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// All entries, oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &LifeChangeEvent> + '_ {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for HistoryLedger {
    fn default() -> Self {
        Self::new(EngineConfig::DEFAULT_HISTORY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Timestamp;
    use crate::history::ChangeSource;

    fn event(player: u32, delta: i32, at: u64) -> LifeChangeEvent {
        LifeChangeEvent {
            player_id: PlayerId::new(player),
            previous_life: 40,
            new_life: 40 + delta,
            delta,
            timestamp: Timestamp(at),
            source: ChangeSource::Tap,
        }
    }

    #[test]
    fn test_history_for_keeps_order() {
        let mut ledger = HistoryLedger::default();
        ledger.record(event(0, 1, 0));
        ledger.record(event(1, -1, 1));
        ledger.record(event(0, 2, 2));

        let history = ledger.history_for(PlayerId::new(0));
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].delta, 1);
        assert_eq!(history[1].delta, 2);
        assert_eq!(ledger.latest_for(PlayerId::new(1)).unwrap().delta, -1);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut ledger = HistoryLedger::new(3);
        for i in 0..5 {
            ledger.record(event(0, i, i as u64));
        }
        let deltas: Vec<_> = ledger.iter().map(|e| e.delta).collect();
        assert_eq!(deltas, vec![2, 3, 4]);
    }

    #[test]
    fn test_undo_last_removes_only_that_players_latest() {
        let mut ledger = HistoryLedger::default();
        ledger.record(event(0, 1, 0));
        ledger.record(event(1, 5, 1));
        ledger.record(event(0, 2, 2));
        ledger.record(event(1, 6, 3));

        let undone = ledger.undo_last(PlayerId::new(0)).unwrap();
        assert_eq!(undone.delta, 2);
        assert_eq!(ledger.len(), 3);
        assert_eq!(ledger.history_for(PlayerId::new(1)).len(), 2);

        assert_eq!(ledger.undo_last(PlayerId::new(7)), None);
    }

    #[test]
    fn test_clear() {
        let mut ledger = HistoryLedger::default();
        ledger.record(event(0, 1, 0));
        ledger.clear();
        assert!(ledger.is_empty());
        assert_eq!(ledger.capacity(), 100);
    }

    #[test]
    fn test_serialization() {
        let mut ledger = HistoryLedger::new(10);
        ledger.record(event(2, -4, 9));
        let json = serde_json::to_string(&ledger).unwrap();
        let deserialized: HistoryLedger = serde_json::from_str(&json).unwrap();
        assert_eq!(ledger, deserialized);
    }

    #[test]
    fn test_from_config() {
        let config = EngineConfig::new().with_history_capacity(5);
        let ledger = HistoryLedger::from_config(&config).unwrap();
        assert_eq!(ledger.capacity(), 5);

        let zero = EngineConfig::new().with_history_capacity(0);
        assert_eq!(
            HistoryLedger::from_config(&zero).unwrap_err(),
            ConfigError::NonPositive("history_capacity")
        );
    }
}
