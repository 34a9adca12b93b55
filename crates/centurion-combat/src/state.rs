// SPDX-License-Identifier: Apache-2.0
use std::fmt;

/// One of the ten combat states. The store accepts only these; authoring a
/// legal transition between them is the session mediator's job, not the
/// store's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombatState {
    AttackInitiated,
    DefenseRequested,
    AttackerChallenged,
    SolutionProvided,
    SolutionValidationRequested,
    SolutionValidated,
    DefenseFailed,
    AttackFailed,
    DefenseSucceeded,
    AttackSucceeded,
}

impl CombatState {
    /// Parses the wire/state-string form, rejecting anything not in the
    /// ten-state collection.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "attack_initiated" => Self::AttackInitiated,
            "defense_requested" => Self::DefenseRequested,
            "attacker_challenged" => Self::AttackerChallenged,
            "solution_provided" => Self::SolutionProvided,
            "solution_validation_requested" => Self::SolutionValidationRequested,
            "solution_validated" => Self::SolutionValidated,
            "defense_failed" => Self::DefenseFailed,
            "attack_failed" => Self::AttackFailed,
            "defense_succeeded" => Self::DefenseSucceeded,
            "attack_succeeded" => Self::AttackSucceeded,
            _ => return None,
        })
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AttackInitiated => "attack_initiated",
            Self::DefenseRequested => "defense_requested",
            Self::AttackerChallenged => "attacker_challenged",
            Self::SolutionProvided => "solution_provided",
            Self::SolutionValidationRequested => "solution_validation_requested",
            Self::SolutionValidated => "solution_validated",
            Self::DefenseFailed => "defense_failed",
            Self::AttackFailed => "attack_failed",
            Self::DefenseSucceeded => "defense_succeeded",
            Self::AttackSucceeded => "attack_succeeded",
        }
    }

    /// Terminal states move a combat from the active set to the archive.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::DefenseFailed | Self::AttackFailed | Self::DefenseSucceeded | Self::AttackSucceeded
        )
    }
}

impl fmt::Display for CombatState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_as_str() {
        for state in [
            CombatState::AttackInitiated,
            CombatState::DefenseRequested,
            CombatState::AttackerChallenged,
            CombatState::SolutionProvided,
            CombatState::SolutionValidationRequested,
            CombatState::SolutionValidated,
            CombatState::DefenseFailed,
            CombatState::AttackFailed,
            CombatState::DefenseSucceeded,
            CombatState::AttackSucceeded,
        ] {
            assert_eq!(CombatState::parse(state.as_str()), Some(state));
        }
    }

    #[test]
    fn unknown_state_string_does_not_parse() {
        assert_eq!(CombatState::parse("not_a_state"), None);
    }

    #[test]
    fn only_the_four_error_states_are_terminal() {
        assert!(CombatState::DefenseFailed.is_terminal());
        assert!(CombatState::AttackFailed.is_terminal());
        assert!(CombatState::DefenseSucceeded.is_terminal());
        assert!(CombatState::AttackSucceeded.is_terminal());
        assert!(!CombatState::AttackInitiated.is_terminal());
        assert!(!CombatState::SolutionValidated.is_terminal());
    }
}
