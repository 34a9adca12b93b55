// SPDX-License-Identifier: Apache-2.0
use std::collections::HashSet;
use std::sync::Arc;

use centurion_bus::{BusEvent, EventBus};
use centurion_challenge::{is_valid_solution, ChallengeKind, ChallengeRegistry};
use centurion_combat::{Combat, CombatState, CombatStore};
use centurion_player::{Player, PlayerRegistry};
use centurion_proto::SocketMessage;
use centurion_scoreboard::ScoringEngine;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::warn;
use uuid::Uuid;

use crate::connection::ConnectionRegistry;
use crate::error::SessionError;

fn error(message: impl Into<String>) -> SocketMessage {
    SocketMessage::Error { message: message.into() }
}

/// Drives the combat state machine and fans messages between the attacker's
/// and defender's connections.
///
/// Holds references to every shared registry; never mutates them directly —
/// each operation goes through the owning registry's own locking.
pub struct SessionMediator {
    players: Arc<PlayerRegistry>,
    challenges: Arc<ChallengeRegistry>,
    combats: Arc<CombatStore>,
    scoring: Arc<ScoringEngine>,
    bus: Arc<EventBus>,
    connections: Arc<ConnectionRegistry>,
}

impl SessionMediator {
    #[must_use]
    pub fn new(
        players: Arc<PlayerRegistry>,
        challenges: Arc<ChallengeRegistry>,
        combats: Arc<CombatStore>,
        scoring: Arc<ScoringEngine>,
        bus: Arc<EventBus>,
        connections: Arc<ConnectionRegistry>,
    ) -> Self {
        Self { players, challenges, combats, scoring, bus, connections }
    }

    /// Handles the first message on an upgraded session: marks the player
    /// online, registers its outbound channel, and publishes `player-joined`.
    /// Returns the player's record so the caller can pick the attacker or
    /// defender loop.
    pub async fn handle_join(&self, id: &str, outbound: mpsc::Sender<SocketMessage>) -> Result<Player, SessionError> {
        let player = self
            .players
            .set_online(id, true)
            .await
            .map_err(|_| SessionError::UnknownPlayer(id.to_string()))?;
        self.connections.register(id.to_string(), outbound).await;
        let _ = self.bus.publish(BusEvent::PlayerJoined { id: id.to_string() }).await;
        Ok(player)
    }

    /// Called when a session's read loop exits, for any reason: clears the
    /// online flag and removes the connection.
    pub async fn handle_disconnect(&self, id: &str) {
        let _ = self.players.set_online(id, false).await;
        self.connections.remove(id).await;
    }

    /// Dispatches one message from an attacker's loop. Returns the reply to
    /// send back on the attacker's own connection, if any — cross-session
    /// delivery to the defender happens internally.
    pub async fn handle_attacker_message(&self, attacker_id: &str, msg: SocketMessage) -> Option<SocketMessage> {
        match msg {
            SocketMessage::Attack { target_id } => self.handle_attack(attacker_id, target_id).await,
            SocketMessage::AttackSolution { target_id, hints, solutions } => {
                self.handle_attack_solution(attacker_id, target_id, hints, solutions).await
            }
            other => Some(error(format!("unexpected message type {} from attacker", other.type_name()))),
        }
    }

    /// Dispatches one message from a defender's loop. Returns the reply to
    /// send back on the defender's own connection, if any.
    pub async fn handle_defender_message(&self, defender_id: &str, msg: SocketMessage) -> Option<SocketMessage> {
        match msg {
            SocketMessage::DefendAction { combat_id, hints } => {
                self.handle_defend_action(defender_id, combat_id, hints).await
            }
            SocketMessage::SolutionEvaluation { combat_id, target_id, success, message } => {
                self.handle_solution_evaluation(defender_id, combat_id, target_id, success, message).await
            }
            other => Some(error(format!("unexpected message type {} from defender", other.type_name()))),
        }
    }

    async fn handle_attack(&self, attacker_id: &str, target_id: String) -> Option<SocketMessage> {
        let Ok(challenge) = self.challenges.find_by_id(&target_id).await else {
            return Some(error(format!("challenge {target_id} not found")));
        };

        if challenge.kind == ChallengeKind::Default {
            let hint = centurion_challenge::generate_hint();
            let _ = self
                .bus
                .publish(BusEvent::AttackInitiated {
                    attacker_id: attacker_id.to_string(),
                    challenge_id: target_id.clone(),
                    combat_id: None,
                })
                .await;
            return Some(SocketMessage::AttackChallenge {
                target_id,
                hints: vec![Value::String(hint)],
            });
        }

        let creator_id = challenge.creator_id.clone();
        let combat_id = Uuid::new_v4().to_string();
        let combat = Combat::new(combat_id.clone(), target_id.clone(), attacker_id.to_string(), creator_id.clone());
        if self.combats.add(combat).await.is_err() {
            return Some(error("could not create combat"));
        }

        let creator_online = self.players.find_by_id(&creator_id).await.map(|p| p.online).unwrap_or(false);
        if !creator_online {
            let _ = self.combats.update_state(&combat_id, CombatState::DefenseFailed).await;
            let _ = self
                .bus
                .publish(BusEvent::DefenseFailed { combat_id, reason: "defender offline at attack initiation".into() })
                .await;
            return Some(SocketMessage::DefenderFailedToDefend { target_id });
        }

        let _ = self.combats.update_state(&combat_id, CombatState::DefenseRequested).await;
        let _ = self
            .bus
            .publish(BusEvent::AttackInitiated {
                attacker_id: attacker_id.to_string(),
                challenge_id: target_id.clone(),
                combat_id: Some(combat_id.clone()),
            })
            .await;
        self.deliver_or_mark_offline(&creator_id, SocketMessage::DefendActionRequest { target_id, combat_id }).await;
        // No direct reply: the attacker hears back asynchronously once the
        // defender answers the request just delivered.
        None
    }

    async fn handle_attack_solution(
        &self,
        attacker_id: &str,
        target_id: String,
        hints: Vec<Value>,
        solutions: Vec<Value>,
    ) -> Option<SocketMessage> {
        let Ok(challenge) = self.challenges.find_by_id(&target_id).await else {
            return Some(error(format!("challenge {target_id} not found")));
        };

        if challenge.kind == ChallengeKind::Default {
            let hint = centurion_challenge::first_string(&hints).unwrap_or_default();
            let solution = centurion_challenge::first_string(&solutions).unwrap_or_default();
            let success = is_valid_solution(hint, solution);
            if success {
                let _ = self
                    .bus
                    .publish(BusEvent::AttackFinished {
                        combat_id: None,
                        attacker_id: attacker_id.to_string(),
                        challenge_id: target_id.clone(),
                        success: true,
                    })
                    .await;
            }
            return Some(SocketMessage::AttackResult { target_id, success, message: None });
        }

        let Ok(combat) = self.combats.find_by_attacker_and_challenge(attacker_id, &target_id).await else {
            return Some(error("no ongoing combat for this challenge"));
        };

        let creator_online = self.players.find_by_id(&combat.defender_id).await.map(|p| p.online).unwrap_or(false);
        if !creator_online {
            let _ = self.combats.update_state(&combat.id, CombatState::DefenseFailed).await;
            let _ = self.scoring.award_player(attacker_id, 1).await;
            let _ = self
                .bus
                .publish(BusEvent::DefenseFailed { combat_id: combat.id, reason: "defender offline at solution time".into() })
                .await;
            return Some(SocketMessage::DefenderFailedToDefend { target_id });
        }

        let _ = self.combats.update_state(&combat.id, CombatState::SolutionValidationRequested).await;
        self.deliver_or_mark_offline(
            &combat.defender_id,
            SocketMessage::SolutionEvaluationRequest { target_id, combat_id: combat.id, hints, solutions },
        )
        .await;
        None
    }

    async fn handle_defend_action(&self, _defender_id: &str, combat_id: String, hints: Vec<Value>) -> Option<SocketMessage> {
        let Ok(combat) = self.combats.find(&combat_id).await else {
            return Some(error(format!("combat {combat_id} not found")));
        };
        if combat.state.is_terminal() {
            return Some(error("combat is already finished"));
        }

        let attacker_online = self.players.find_by_id(&combat.attacker_id).await.map(|p| p.online).unwrap_or(false);
        if !attacker_online {
            let _ = self.combats.update_state(&combat_id, CombatState::AttackFailed).await;
            return Some(SocketMessage::AttackerFailedToAttack { combat_id });
        }

        let _ = self.combats.update_state(&combat_id, CombatState::AttackerChallenged).await;
        self.deliver_or_mark_offline(
            &combat.attacker_id,
            SocketMessage::AttackChallenge { target_id: combat.challenge_id, hints },
        )
        .await;
        None
    }

    async fn handle_solution_evaluation(
        &self,
        defender_id: &str,
        combat_id: String,
        target_id: String,
        success: bool,
        message: String,
    ) -> Option<SocketMessage> {
        let Ok(combat) = self.combats.find(&combat_id).await else {
            return Some(error(format!("combat {combat_id} not found")));
        };
        if combat.state.is_terminal() {
            return Some(error("combat is already finished"));
        }

        let _ = self.scoring.award_player(defender_id, 1).await;

        if success {
            let had_prior_success = self.has_prior_success(&combat.attacker_id, &combat.challenge_id).await;
            let _ = self.combats.update_state(&combat_id, CombatState::AttackSucceeded).await;

            // Flow completion award, mirroring the defender's unconditional +1.
            let _ = self.scoring.award_player(&combat.attacker_id, 1).await;
            if !had_prior_success {
                let _ = self.scoring.award_player(&combat.attacker_id, 1).await;
            }
            let unique_successes = self.unique_successful_challenges(&combat.attacker_id).await;
            if unique_successes > 0 && unique_successes % 5 == 0 {
                let _ = self.scoring.award_player(&combat.attacker_id, 1).await;
            }
        } else {
            let _ = self.combats.update_state(&combat_id, CombatState::DefenseSucceeded).await;
        }

        let _ = self
            .bus
            .publish(BusEvent::AttackFinished {
                combat_id: Some(combat_id),
                attacker_id: combat.attacker_id.clone(),
                challenge_id: combat.challenge_id.clone(),
                success,
            })
            .await;

        let attacker_online = self.players.find_by_id(&combat.attacker_id).await.map(|p| p.online).unwrap_or(false);
        if attacker_online {
            self.deliver_or_mark_offline(
                &combat.attacker_id,
                SocketMessage::AttackResult { target_id, success, message: Some(message) },
            )
            .await;
        }
        None
    }

    async fn has_prior_success(&self, attacker_id: &str, challenge_id: &str) -> bool {
        self.combats
            .archive()
            .await
            .iter()
            .any(|c| c.attacker_id == attacker_id && c.challenge_id == challenge_id && c.state == CombatState::AttackSucceeded)
    }

    async fn unique_successful_challenges(&self, attacker_id: &str) -> usize {
        self.combats
            .archive()
            .await
            .iter()
            .filter(|c| c.attacker_id == attacker_id && c.state == CombatState::AttackSucceeded)
            .map(|c| c.challenge_id.clone())
            .collect::<HashSet<_>>()
            .len()
    }

    /// Writes directly to the peer's connection from the initiator's task.
    /// If the write fails, the peer is closed and marked offline, but the
    /// initiator's own loop is left untouched.
    async fn deliver_or_mark_offline(&self, peer_id: &str, message: SocketMessage) {
        if !self.connections.deliver(peer_id, message).await {
            warn!(peer_id, "peer unreachable, marking offline");
            self.connections.remove(peer_id).await;
            let _ = self.players.set_online(peer_id, false).await;
        }
    }
}
