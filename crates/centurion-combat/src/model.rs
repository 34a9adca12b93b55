// SPDX-License-Identifier: Apache-2.0
use time::OffsetDateTime;

use crate::state::CombatState;

/// A single attacker-vs-defender interaction around one challenge.
///
/// Carries identifiers, not references to the player or challenge records —
/// the session mediator looks those up fresh on every use, since the online
/// flag and the live connection can both have changed since the combat was
/// created.
#[derive(Debug, Clone)]
pub struct Combat {
    pub id: String,
    pub challenge_id: String,
    pub attacker_id: String,
    pub defender_id: String,
    pub state: CombatState,
    pub created_at: OffsetDateTime,
    pub last_updated_at: OffsetDateTime,
}

impl Combat {
    /// Builds a new combat in its initial state. `created_at`/`last_updated_at`
    /// are stamped by the store on insertion.
    #[must_use]
    pub fn new(id: String, challenge_id: String, attacker_id: String, defender_id: String) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            id,
            challenge_id,
            attacker_id,
            defender_id,
            state: CombatState::AttackInitiated,
            created_at: now,
            last_updated_at: now,
        }
    }
}
