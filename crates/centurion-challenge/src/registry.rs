// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;
use tokio::sync::RwLock;

use crate::default_module::reverse_sorter_challenge;
use crate::model::Challenge;

/// Errors raised by [`ChallengeRegistry`] operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChallengeError {
    /// A challenge with this identifier already exists.
    #[error("challenge id {0} already registered")]
    DuplicateId(String),
    /// A challenge with this name (case-insensitive) already exists.
    #[error("challenge name {0} already registered")]
    DuplicateName(String),
    /// No challenge with this identifier is registered.
    #[error("challenge {0} not found")]
    NotFound(String),
}

/// Concurrency-safe mapping from challenge identifier to challenge record.
///
/// Same discipline as the player registry: mutations hold an exclusive
/// lock, reads a shared one, iteration order is insertion order.
#[derive(Default)]
pub struct ChallengeRegistry {
    challenges: RwLock<Vec<Challenge>>,
}

impl ChallengeRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the registry with the built-in reverse sorter, assigning it
    /// `id`. Called once at startup.
    pub async fn seed_defaults(&self, id: String) {
        let mut challenges = self.challenges.write().await;
        challenges.push(reverse_sorter_challenge(id));
    }

    /// Installs a challenge. Fails if the id collides, or the name collides
    /// case-insensitively with an existing challenge.
    ///
    /// Returns whether this is the creator's first installed challenge —
    /// counted over challenges with a matching `creator_id` before this one
    /// is added — so the caller may award a point for it.
    pub async fn add(&self, challenge: Challenge) -> Result<bool, ChallengeError> {
        let mut challenges = self.challenges.write().await;
        for existing in challenges.iter() {
            if existing.id == challenge.id {
                return Err(ChallengeError::DuplicateId(challenge.id));
            }
            if existing.name.eq_ignore_ascii_case(&challenge.name) {
                return Err(ChallengeError::DuplicateName(challenge.name));
            }
        }
        let is_first_for_creator = !challenge.creator_id.is_empty()
            && challenges
                .iter()
                .filter(|c| c.creator_id == challenge.creator_id)
                .count()
                == 0;
        challenges.push(challenge);
        Ok(is_first_for_creator)
    }

    /// Finds a challenge by identifier.
    pub async fn find_by_id(&self, id: &str) -> Result<Challenge, ChallengeError> {
        let challenges = self.challenges.read().await;
        challenges
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| ChallengeError::NotFound(id.to_string()))
    }

    /// Returns a snapshot of every installed challenge, insertion order.
    pub async fn get_challenges(&self) -> Vec<Challenge> {
        self.challenges.read().await.clone()
    }
}
