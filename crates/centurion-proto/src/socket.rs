// SPDX-License-Identifier: Apache-2.0
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A message carried over an upgraded full-duplex session.
///
/// Tagged by `type`; every other field is camelCase on the wire. The first
/// message on a session must be [`SocketMessage::Join`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SocketMessage {
    /// Sent once, immediately after the full-duplex upgrade.
    Join {
        id: String,
    },
    /// Attacker → server: target a challenge.
    #[serde(rename_all = "camelCase")]
    Attack {
        target_id: String,
    },
    /// Server → attacker: hints for the targeted challenge.
    #[serde(rename_all = "camelCase")]
    AttackChallenge {
        target_id: String,
        hints: Vec<Value>,
    },
    /// Attacker → server: a solution for previously received hints.
    #[serde(rename_all = "camelCase")]
    AttackSolution {
        target_id: String,
        hints: Vec<Value>,
        solutions: Vec<Value>,
    },
    /// Server → attacker: the outcome of an attack.
    #[serde(rename_all = "camelCase")]
    AttackResult {
        target_id: String,
        success: bool,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        message: Option<String>,
    },
    /// Server → defender: an attacker is requesting hints for `combat_id`.
    #[serde(rename_all = "camelCase")]
    DefendActionRequest {
        target_id: String,
        combat_id: String,
    },
    /// Defender → server: hints for an open combat.
    #[serde(rename_all = "camelCase")]
    DefendAction {
        combat_id: String,
        hints: Vec<Value>,
    },
    /// Server → defender: an attacker submitted a solution for `combat_id`.
    #[serde(rename_all = "camelCase")]
    SolutionEvaluationRequest {
        target_id: String,
        combat_id: String,
        hints: Vec<Value>,
        solutions: Vec<Value>,
    },
    /// Defender → server: the evaluation outcome for `combat_id`.
    #[serde(rename_all = "camelCase")]
    SolutionEvaluation {
        combat_id: String,
        target_id: String,
        success: bool,
        #[serde(default)]
        message: String,
    },
    /// Server → attacker: the targeted defender was offline.
    #[serde(rename_all = "camelCase")]
    DefenderFailedToDefend {
        target_id: String,
    },
    /// Server → defender: the initiating attacker went offline.
    #[serde(rename_all = "camelCase")]
    AttackerFailedToAttack {
        combat_id: String,
    },
    /// Server → either party: malformed input or a protocol violation.
    Error {
        message: String,
    },
}

impl SocketMessage {
    /// The wire `type` string for this message.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Join { .. } => "join",
            Self::Attack { .. } => "attack",
            Self::AttackChallenge { .. } => "attack_challenge",
            Self::AttackSolution { .. } => "attack_solution",
            Self::AttackResult { .. } => "attack_result",
            Self::DefendActionRequest { .. } => "defend_action_request",
            Self::DefendAction { .. } => "defend_action",
            Self::SolutionEvaluationRequest { .. } => "solution_evaluation_request",
            Self::SolutionEvaluation { .. } => "solution_evaluation",
            Self::DefenderFailedToDefend { .. } => "defender_failed_to_defend",
            Self::AttackerFailedToAttack { .. } => "attacker_failed_to_attack",
            Self::Error { .. } => "error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_decodes_from_wire_shape() {
        let msg: SocketMessage = serde_json::from_str(r#"{"type":"join","id":"p1"}"#).unwrap();
        assert!(matches!(msg, SocketMessage::Join { id } if id == "p1"));
    }

    #[test]
    fn attack_uses_camel_case_target_id_on_the_wire() {
        let msg: SocketMessage = serde_json::from_str(r#"{"type":"attack","targetId":"ch1"}"#).unwrap();
        assert!(matches!(msg, SocketMessage::Attack { target_id } if target_id == "ch1"));
    }

    #[test]
    fn unknown_type_fails_to_decode() {
        let result: Result<SocketMessage, _> = serde_json::from_str(r#"{"type":"bogus"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn round_trips_defend_action_request() {
        let msg = SocketMessage::DefendActionRequest {
            target_id: "a1".to_string(),
            combat_id: "c1".to_string(),
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "defend_action_request");
        assert_eq!(json["combatId"], "c1");
    }
}
