//! The player collection.
//!
//! The roster owns every [`Player`] at the table and enforces the rules
//! that span players:
//! - at most one monarch
//! - at most one initiative holder
//! - day/night is shared by the whole table

use serde::{Deserialize, Serialize};

use tracing::debug;

use crate::core::{LifeError, LifeResult, LifeRules, PlayerId};

use super::engine::{LifeChange, LifeCounterEngine};
use super::player::Player;

/// All players in the current game, in seating order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRoster {
    players: Vec<Player>,
    engine: LifeCounterEngine,
    next_id: u32,
}

impl PlayerRoster {
    /// Create an empty roster playing by `rules`.
    #[must_use]
    pub fn new(rules: &LifeRules) -> Self {
        Self {
            players: Vec::new(),
            engine: LifeCounterEngine::new(rules.clone()),
            next_id: 0,
        }
    }

    /// Create a roster seating `names` in order.
    #[must_use]
    pub fn with_players<I, S>(rules: &LifeRules, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut roster = Self::new(rules);
        for name in names {
            roster.add_player(name);
        }
        roster
    }

    /// Seat a new player at the starting life total.
    pub fn add_player(&mut self, name: impl Into<String>) -> PlayerId {
        let id = PlayerId::new(self.next_id);
        self.next_id += 1;
        self.players.push(Player::new(id, name, self.starting_life()));
        id
    }

    /// Remove a player from the table.
    pub fn remove_player(&mut self, id: PlayerId) -> LifeResult<Player> {
        let pos = self.position(id)?;
        Ok(self.players.remove(pos))
    }

    /// Life each player starts with, clamped to the life bounds.
    #[must_use]
    pub fn starting_life(&self) -> i32 {
        let rules = self.engine.rules();
        rules.clamp_life(i64::from(rules.starting_life))
    }

    /// Look up a player.
    pub fn get(&self, id: PlayerId) -> LifeResult<&Player> {
        self.players
            .iter()
            .find(|p| p.id == id)
            .ok_or(LifeError::UnknownPlayer(id))
    }

    /// Look up a player for mutation.
    pub fn get_mut(&mut self, id: PlayerId) -> LifeResult<&mut Player> {
        self.players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(LifeError::UnknownPlayer(id))
    }

    /// Players in seating order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Ids in seating order.
    pub fn ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.players.iter().map(|p| p.id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Make `id` the monarch, taking the crown from whoever held it.
    pub fn grant_monarch(&mut self, id: PlayerId) -> LifeResult<()> {
        self.position(id)?;
        for player in &mut self.players {
            player.is_monarch = player.id == id;
        }
        debug!(player = %id, "monarch granted");
        Ok(())
    }

    /// Give `id` the initiative, taking it from whoever held it.
    pub fn grant_initiative(&mut self, id: PlayerId) -> LifeResult<()> {
        self.position(id)?;
        for player in &mut self.players {
            player.has_initiative = player.id == id;
        }
        debug!(player = %id, "initiative granted");
        Ok(())
    }

    /// The current monarch, if any.
    #[must_use]
    pub fn monarch(&self) -> Option<PlayerId> {
        self.players.iter().find(|p| p.is_monarch).map(|p| p.id)
    }

    /// The current initiative holder, if any.
    #[must_use]
    pub fn initiative_holder(&self) -> Option<PlayerId> {
        self.players.iter().find(|p| p.has_initiative).map(|p| p.id)
    }

    /// Set day or night for the whole table.
    pub fn set_day_time(&mut self, is_day: bool) {
        for player in &mut self.players {
            player.is_day_time = is_day;
        }
    }

    /// Start a new game with the same players.
    ///
    /// Returns each player's life change, in seating order.
    pub fn reset_game(&mut self) -> Vec<(PlayerId, LifeChange)> {
        let starting_life = self.starting_life();
        let changes = self
            .players
            .iter_mut()
            .map(|player| {
                player.reset();
                (player.id, self.engine.reset_life(player, starting_life))
            })
            .collect();
        debug!(players = self.players.len(), life = starting_life, "game reset");
        changes
    }

    fn position(&self, id: PlayerId) -> LifeResult<usize> {
        self.players
            .iter()
            .position(|p| p.id == id)
            .ok_or(LifeError::UnknownPlayer(id))
    }
}

impl Default for PlayerRoster {
    fn default() -> Self {
        Self::new(&LifeRules::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> PlayerRoster {
        PlayerRoster::with_players(&LifeRules::default(), ["Alice", "Bob", "Carol", "Dan"])
    }

    #[test]
    fn test_players_start_at_starting_life() {
        let roster = table();
        assert_eq!(roster.len(), 4);
        assert!(roster.players().iter().all(|p| p.life == 40));
        let ids: Vec<_> = roster.ids().collect();
        assert_eq!(ids, vec![PlayerId(0), PlayerId(1), PlayerId(2), PlayerId(3)]);
    }

    #[test]
    fn test_unknown_player() {
        let mut roster = table();
        assert_eq!(roster.get(PlayerId(9)).unwrap_err(), LifeError::UnknownPlayer(PlayerId(9)));
        assert!(roster.get_mut(PlayerId(9)).is_err());
        assert!(roster.grant_monarch(PlayerId(9)).is_err());
    }

    #[test]
    fn test_single_monarch() {
        let mut roster = table();
        roster.grant_monarch(PlayerId(1)).unwrap();
        roster.grant_monarch(PlayerId(3)).unwrap();

        assert_eq!(roster.monarch(), Some(PlayerId(3)));
        assert_eq!(roster.players().iter().filter(|p| p.is_monarch).count(), 1);
    }

    #[test]
    fn test_single_initiative_holder() {
        let mut roster = table();
        roster.grant_initiative(PlayerId(0)).unwrap();
        roster.grant_initiative(PlayerId(2)).unwrap();

        assert_eq!(roster.initiative_holder(), Some(PlayerId(2)));
        assert!(!roster.get(PlayerId(0)).unwrap().has_initiative);
    }

    #[test]
    fn test_day_time_is_table_wide() {
        let mut roster = table();
        roster.set_day_time(false);
        assert!(roster.players().iter().all(|p| !p.is_day_time));
    }

    #[test]
    fn test_reset_game() {
        let mut roster = table();
        roster.get_mut(PlayerId(1)).unwrap().life = 3;
        roster.get_mut(PlayerId(1)).unwrap().poison = 4;
        roster.grant_monarch(PlayerId(1)).unwrap();

        let changes = roster.reset_game();
        assert_eq!(changes.len(), 4);
        assert_eq!(changes[1].1.applied, 37);

        let bob = roster.get(PlayerId(1)).unwrap();
        assert_eq!(bob.life, 40);
        assert_eq!(bob.poison, 0);
        assert_eq!(roster.monarch(), None);
    }

    #[test]
    fn test_remove_player_keeps_ids_unique() {
        let mut roster = table();
        let removed = roster.remove_player(PlayerId(1)).unwrap();
        assert_eq!(removed.name, "Bob");

        let id = roster.add_player("Eve");
        assert_eq!(id, PlayerId(4));
        assert_eq!(roster.len(), 4);
    }

    #[test]
    fn test_starting_life_outside_bounds_is_clamped() {
        let rules = LifeRules {
            starting_life: 5_000,
            ..LifeRules::default()
        };
        let mut roster = PlayerRoster::with_players(&rules, ["A"]);
        assert_eq!(roster.starting_life(), 999);
        assert_eq!(roster.get(PlayerId(0)).unwrap().life, 999);

        roster.get_mut(PlayerId(0)).unwrap().life = 10;
        roster.reset_game();
        assert_eq!(roster.get(PlayerId(0)).unwrap().life, 999);

        let low = LifeRules {
            starting_life: -5_000,
            ..LifeRules::default()
        };
        let mut roster = PlayerRoster::new(&low);
        let id = roster.add_player("B");
        assert_eq!(roster.get(id).unwrap().life, -999);
    }
}
