// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;
use time::OffsetDateTime;
use tokio::sync::RwLock;

use crate::model::Combat;
use crate::state::CombatState;

/// Errors raised by [`CombatStore`] operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CombatError {
    /// A combat with this identifier already exists.
    #[error("combat id {0} already exists")]
    DuplicateId(String),
    /// No active combat with this identifier exists.
    #[error("combat {0} not found")]
    NotFound(String),
}

#[derive(Default)]
struct Inner {
    active: Vec<Combat>,
    archive: Vec<Combat>,
}

/// Active combats plus a read-only archive of combats that reached a
/// terminal state.
///
/// The store validates transitions only insofar as rejecting unknown state
/// strings — it does not enforce the edge set between states; the session
/// mediator is the sole author of legal transitions. Both vectors live
/// behind one lock so that entering a terminal state and moving the combat
/// into the archive happens atomically.
#[derive(Default)]
pub struct CombatStore {
    inner: RwLock<Inner>,
}

impl CombatStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a new active combat. The id must be unique among active combats.
    pub async fn add(&self, combat: Combat) -> Result<(), CombatError> {
        let mut inner = self.inner.write().await;
        if inner.active.iter().any(|c| c.id == combat.id) {
            return Err(CombatError::DuplicateId(combat.id));
        }
        inner.active.push(combat);
        Ok(())
    }

    /// Finds an active combat by id. Archived combats are not visible here —
    /// use [`CombatStore::archive`] to inspect terminal records.
    pub async fn find(&self, id: &str) -> Result<Combat, CombatError> {
        let inner = self.inner.read().await;
        inner
            .active
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| CombatError::NotFound(id.to_string()))
    }

    /// Transitions a combat to `new_state`. Entering a terminal state moves
    /// the combat from the active set into the archive in the same
    /// operation.
    pub async fn update_state(&self, id: &str, new_state: CombatState) -> Result<Combat, CombatError> {
        let mut inner = self.inner.write().await;
        let index = inner
            .active
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| CombatError::NotFound(id.to_string()))?;

        let combat = &mut inner.active[index];
        combat.state = new_state;
        combat.last_updated_at = OffsetDateTime::now_utc();
        let updated = combat.clone();

        if new_state.is_terminal() {
            let terminal = inner.active.remove(index);
            inner.archive.push(terminal);
        }

        Ok(updated)
    }

    /// Finds the earliest-created active combat for `(attacker_id,
    /// challenge_id)`. Searches active combats only. If two combats match —
    /// not prevented by the store — the first in insertion order wins.
    pub async fn find_by_attacker_and_challenge(
        &self,
        attacker_id: &str,
        challenge_id: &str,
    ) -> Result<Combat, CombatError> {
        let inner = self.inner.read().await;
        inner
            .active
            .iter()
            .find(|c| c.attacker_id == attacker_id && c.challenge_id == challenge_id)
            .cloned()
            .ok_or_else(|| CombatError::NotFound(format!("{attacker_id}/{challenge_id}")))
    }

    /// Returns a snapshot of every combat that has reached a terminal state.
    pub async fn archive(&self) -> Vec<Combat> {
        self.inner.read().await.archive.clone()
    }
}
