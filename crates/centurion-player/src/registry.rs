// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;
use tokio::sync::RwLock;

use crate::model::{Player, Team};

/// Errors raised by [`PlayerRegistry`] operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlayerError {
    /// A player with this identifier already exists.
    #[error("player id {0} already registered")]
    DuplicateId(String),
    /// A player with this name (case-insensitive) already exists.
    #[error("player name {0} already registered")]
    DuplicateName(String),
    /// No player with this identifier is registered.
    #[error("player {0} not found")]
    NotFound(String),
}

/// Concurrency-safe mapping from player identifier to player record.
///
/// Mutations hold an exclusive lock; reads hold a shared lock. Iteration
/// order is insertion order (backed by a plain `Vec`, matching the
/// original's slice-based repository at this scale).
#[derive(Default)]
pub struct PlayerRegistry {
    players: RwLock<Vec<Player>>,
}

impl PlayerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new player. Fails if the id collides, or the name
    /// collides case-insensitively with an existing player.
    pub async fn add(&self, player: Player) -> Result<(), PlayerError> {
        let mut players = self.players.write().await;
        for existing in players.iter() {
            if existing.id == player.id {
                return Err(PlayerError::DuplicateId(player.id));
            }
            if existing.name.eq_ignore_ascii_case(&player.name) {
                return Err(PlayerError::DuplicateName(player.name));
            }
        }
        players.push(player);
        Ok(())
    }

    /// Finds a player by identifier.
    pub async fn find_by_id(&self, id: &str) -> Result<Player, PlayerError> {
        let players = self.players.read().await;
        players
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| PlayerError::NotFound(id.to_string()))
    }

    /// Atomically replaces the record for `id`.
    pub async fn update_by_id(&self, id: &str, updated: Player) -> Result<Player, PlayerError> {
        let mut players = self.players.write().await;
        let slot = players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| PlayerError::NotFound(id.to_string()))?;
        *slot = updated;
        Ok(slot.clone())
    }

    /// Sets the online flag for `id`, leaving every other field untouched.
    pub async fn set_online(&self, id: &str, online: bool) -> Result<Player, PlayerError> {
        let mut players = self.players.write().await;
        let slot = players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| PlayerError::NotFound(id.to_string()))?;
        slot.online = online;
        Ok(slot.clone())
    }

    /// Atomically increments a player's score. `n` may be any positive
    /// amount; the score is never decreased.
    pub async fn add_points(&self, id: &str, n: i64) -> Result<Player, PlayerError> {
        let mut players = self.players.write().await;
        let slot = players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| PlayerError::NotFound(id.to_string()))?;
        if n > 0 {
            slot.score += n;
        }
        Ok(slot.clone())
    }

    /// Returns a snapshot of every registered player, insertion order.
    pub async fn list_all(&self) -> Vec<Player> {
        self.players.read().await.clone()
    }

    /// Returns a snapshot of every player on `team`, insertion order.
    pub async fn filter_by_team(&self, team: Team) -> Vec<Player> {
        self.players
            .read()
            .await
            .iter()
            .filter(|p| p.team == team)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Player {
        Player::new("p1".into(), "Alice".into(), Team::Attacker)
    }

    #[tokio::test]
    async fn add_then_find_returns_same_record() {
        let registry = PlayerRegistry::new();
        registry.add(alice()).await.unwrap();
        let found = registry.find_by_id("p1").await.unwrap();
        assert_eq!(found.id, "p1");
        assert_eq!(found.name, "Alice");
        assert_eq!(found.team, Team::Attacker);
    }

    #[tokio::test]
    async fn duplicate_id_is_rejected() {
        let registry = PlayerRegistry::new();
        registry.add(alice()).await.unwrap();
        let err = registry.add(alice()).await.unwrap_err();
        assert_eq!(err, PlayerError::DuplicateId("p1".into()));
    }

    #[tokio::test]
    async fn duplicate_name_is_rejected_case_insensitively() {
        let registry = PlayerRegistry::new();
        registry.add(alice()).await.unwrap();
        let other = Player::new("p2".into(), "ALICE".into(), Team::Defender);
        let err = registry.add(other).await.unwrap_err();
        assert_eq!(err, PlayerError::DuplicateName("ALICE".into()));
    }

    #[tokio::test]
    async fn add_points_is_monotonic_non_decreasing() {
        let registry = PlayerRegistry::new();
        registry.add(alice()).await.unwrap();
        registry.add_points("p1", 2).await.unwrap();
        let p = registry.add_points("p1", 0).await.unwrap();
        assert_eq!(p.score, 2);
    }

    #[tokio::test]
    async fn filter_by_team_only_returns_matching_players() {
        let registry = PlayerRegistry::new();
        registry.add(alice()).await.unwrap();
        registry
            .add(Player::new("p2".into(), "Bob".into(), Team::Defender))
            .await
            .unwrap();
        let attackers = registry.filter_by_team(Team::Attacker).await;
        assert_eq!(attackers.len(), 1);
        assert_eq!(attackers[0].id, "p1");
    }

    #[tokio::test]
    async fn find_unknown_player_errors() {
        let registry = PlayerRegistry::new();
        let err = registry.find_by_id("missing").await.unwrap_err();
        assert_eq!(err, PlayerError::NotFound("missing".into()));
    }
}
