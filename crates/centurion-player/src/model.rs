// SPDX-License-Identifier: Apache-2.0
use serde::{Deserialize, Serialize};

/// Team side a player belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    /// Attacking team.
    Attacker,
    /// Defending team.
    Defender,
}

impl Team {
    /// Parses a team name case-insensitively, as registration requires.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "attacker" => Some(Team::Attacker),
            "defender" => Some(Team::Defender),
            _ => None,
        }
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Team::Attacker => write!(f, "attacker"),
            Team::Defender => write!(f, "defender"),
        }
    }
}

/// A registered participant.
///
/// Created at registration, mutated only through [`crate::PlayerRegistry`],
/// never destroyed before process exit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Opaque, unique, case-sensitive identifier.
    pub id: String,
    /// Display name, unique case-insensitively.
    pub name: String,
    /// Team the player joined.
    pub team: Team,
    /// Monotonic non-decreasing score.
    pub score: i64,
    /// True only while a session loop holds this player's connection.
    pub online: bool,
}

impl Player {
    /// Builds a freshly registered, offline player with zero score.
    #[must_use]
    pub fn new(id: String, name: String, team: Team) -> Self {
        Self {
            id,
            name,
            team,
            score: 0,
            online: false,
        }
    }
}
