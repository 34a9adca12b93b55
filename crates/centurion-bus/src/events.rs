// SPDX-License-Identifier: Apache-2.0
//! Event payloads carried on the bus.
//!
//! Each variant corresponds to one topic; [`BusEvent::topic`] returns the
//! case-folded topic string subscribers address with [`crate::EventBus::subscribe`].

use serde::{Deserialize, Serialize};

/// A single event published to the bus.
///
/// Tagged by variant; [`BusEvent::topic`] is the dispatch key (case-folded).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BusEvent {
    /// A new player registered.
    Registration {
        /// Player identifier.
        id: String,
        /// Display name.
        name: String,
        /// Team the player joined (as provided at registration, e.g. "attacker").
        team: String,
    },
    /// A player's session came online.
    PlayerJoined {
        /// Player identifier.
        id: String,
    },
    /// An attack began against a challenge.
    AttackInitiated {
        /// Attacker's identifier.
        attacker_id: String,
        /// Target challenge identifier.
        challenge_id: String,
        /// Combat identifier, when one was created (absent for default-challenge attacks).
        combat_id: Option<String>,
    },
    /// An attack reached a terminal outcome.
    AttackFinished {
        /// Combat identifier, when one exists (absent for default-challenge attacks).
        combat_id: Option<String>,
        /// Attacker's identifier.
        attacker_id: String,
        /// Target challenge identifier.
        challenge_id: String,
        /// Whether the attacker succeeded.
        success: bool,
    },
    /// A defender installed a new challenge module.
    DefenseModuleInstalled {
        /// Challenge identifier.
        challenge_id: String,
        /// Creator (defender) identifier.
        creator_id: String,
    },
    /// A combat resolved to a defense failure.
    DefenseFailed {
        /// Combat identifier.
        combat_id: String,
        /// Reason the defense failed.
        reason: String,
    },
}

impl BusEvent {
    /// Case-folded topic string this event dispatches on.
    #[must_use]
    pub fn topic(&self) -> &'static str {
        match self {
            BusEvent::Registration { .. } => "registration",
            BusEvent::PlayerJoined { .. } => "player-joined",
            BusEvent::AttackInitiated { .. } => "attack-initiated",
            BusEvent::AttackFinished { .. } => "attack-finished",
            BusEvent::DefenseModuleInstalled { .. } => "defense-module-installed",
            BusEvent::DefenseFailed { .. } => "defense-failed",
        }
    }
}
