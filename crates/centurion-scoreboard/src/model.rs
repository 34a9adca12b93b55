// SPDX-License-Identifier: Apache-2.0
use centurion_player::Team;

/// A team's cumulative point total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamScore {
    pub team: Team,
    pub overall_score: i64,
}

impl TeamScore {
    #[must_use]
    pub fn new(team: Team) -> Self {
        Self { team, overall_score: 0 }
    }
}

/// The two team records that make up the scoreboard.
#[derive(Debug, Clone, Copy)]
pub struct Boards {
    pub attacker: TeamScore,
    pub defender: TeamScore,
}

impl Default for Boards {
    fn default() -> Self {
        Self {
            attacker: TeamScore::new(Team::Attacker),
            defender: TeamScore::new(Team::Defender),
        }
    }
}
