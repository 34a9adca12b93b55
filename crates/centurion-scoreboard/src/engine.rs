// SPDX-License-Identifier: Apache-2.0
use std::collections::HashSet;
use std::sync::Arc;

use centurion_challenge::{Challenge, ChallengeKind};
use centurion_combat::{Combat, CombatState};
use centurion_player::{Player, PlayerError, PlayerRegistry, Team};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;

use crate::model::{Boards, TeamScore};

/// Errors raised by [`ScoringEngine`] operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScoreError {
    #[error(transparent)]
    Player(#[from] PlayerError),
}

/// Point awards computed at end-of-game, before they are applied to the
/// scoreboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndOfGameAward {
    pub attacker_points: i64,
    pub defender_points: i64,
}

/// Awards points per event as the session mediator drives combats, and
/// computes the end-of-game team bonuses from the finished archive.
pub struct ScoringEngine {
    player_registry: Arc<PlayerRegistry>,
    boards: RwLock<Boards>,
}

impl ScoringEngine {
    #[must_use]
    pub fn new(player_registry: Arc<PlayerRegistry>) -> Self {
        Self {
            player_registry,
            boards: RwLock::new(Boards::default()),
        }
    }

    /// Increments a player's score and the corresponding team's cumulative
    /// total. `n` must be positive; non-positive amounts are a no-op.
    pub async fn award_player(&self, player_id: &str, n: i64) -> Result<Player, ScoreError> {
        let player = self.player_registry.add_points(player_id, n).await?;
        if n > 0 {
            self.bump_team(player.team, n).await;
        }
        Ok(player)
    }

    /// Increments only a team's cumulative total, used for end-of-game
    /// bonuses. Non-positive amounts are a no-op, matching the original's
    /// guard against awarding zero or negative points.
    pub async fn award_team(&self, team: Team, points: i64, reason: &str) {
        if points < 1 {
            return;
        }
        self.bump_team(team, points).await;
        info!(%team, points, reason, "team awarded points");
    }

    /// Returns a snapshot of both team totals.
    pub async fn boards(&self) -> (TeamScore, TeamScore) {
        let boards = self.boards.read().await;
        (boards.attacker, boards.defender)
    }

    async fn bump_team(&self, team: Team, n: i64) {
        let mut boards = self.boards.write().await;
        match team {
            Team::Attacker => boards.attacker.overall_score += n,
            Team::Defender => boards.defender.overall_score += n,
        }
    }
}

/// Computes the end-of-game attacker/defender bonuses from a snapshot of the
/// finished archive, the installed player-created challenges, and the
/// attacker team's player ids. Pure and side-effect free; the caller applies
/// the result via [`ScoringEngine::award_team`].
#[must_use]
pub fn compute_end_of_game(archive: &[Combat], challenges: &[Challenge], attacker_ids: &[String]) -> EndOfGameAward {
    let player_created: Vec<&Challenge> = challenges.iter().filter(|c| c.kind == ChallengeKind::PlayerCreated).collect();

    let mut attacker_points = 0;

    let succeeded_challenges: HashSet<&str> = archive
        .iter()
        .filter(|c| c.state == CombatState::AttackSucceeded)
        .map(|c| c.challenge_id.as_str())
        .collect();

    let success_ratio = if archive.is_empty() || player_created.is_empty() {
        100.0
    } else {
        (succeeded_challenges.len() as f64 / player_created.len() as f64) * 100.0
    };
    if success_ratio >= 80.0 {
        attacker_points += 5;
    }

    if !attacker_ids.is_empty() {
        for challenge in &player_created {
            let every_attacker_succeeded = attacker_ids.iter().all(|attacker_id| {
                archive.iter().any(|c| {
                    c.challenge_id == challenge.id
                        && c.attacker_id == *attacker_id
                        && c.state == CombatState::AttackSucceeded
                })
            });
            if every_attacker_succeeded {
                attacker_points += 1;
            }
        }
    }

    let defender_failed = archive.iter().filter(|c| c.state == CombatState::DefenseFailed).count();
    let uptime = if archive.is_empty() {
        100.0
    } else {
        100.0 - (defender_failed as f64 / archive.len() as f64) * 100.0
    };
    let defender_points = defender_award_for_uptime(uptime);

    EndOfGameAward { attacker_points, defender_points }
}

fn defender_award_for_uptime(uptime: f64) -> i64 {
    if uptime >= 97.0 {
        10
    } else if uptime >= 93.0 {
        9
    } else if uptime >= 89.0 {
        8
    } else if uptime >= 85.0 {
        7
    } else if uptime >= 82.0 {
        6
    } else if uptime >= 79.0 {
        5
    } else if uptime >= 75.0 {
        4
    } else if uptime >= 70.0 {
        3
    } else if uptime >= 65.0 {
        2
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;

    use super::*;

    fn challenge(id: &str) -> Challenge {
        Challenge {
            id: id.to_string(),
            creator_id: "d1".to_string(),
            name: format!("challenge-{id}"),
            description: "desc".to_string(),
            kind: ChallengeKind::PlayerCreated,
            created_at: OffsetDateTime::now_utc(),
            example: centurion_challenge::Example::default(),
        }
    }

    fn succeeded_combat(attacker: &str, challenge_id: &str) -> Combat {
        let mut combat = Combat::new("c".to_string(), challenge_id.to_string(), attacker.to_string(), "d1".to_string());
        combat.state = CombatState::AttackSucceeded;
        combat
    }

    #[tokio::test]
    async fn award_player_bumps_team_total() {
        let registry = Arc::new(PlayerRegistry::new());
        registry.add(Player::new("a1".into(), "Alice".into(), Team::Attacker)).await.unwrap();
        let engine = ScoringEngine::new(registry);
        engine.award_player("a1", 2).await.unwrap();
        let (attacker, defender) = engine.boards().await;
        assert_eq!(attacker.overall_score, 2);
        assert_eq!(defender.overall_score, 0);
    }

    #[tokio::test]
    async fn award_team_ignores_non_positive_points() {
        let registry = Arc::new(PlayerRegistry::new());
        let engine = ScoringEngine::new(registry);
        engine.award_team(Team::Defender, 0, "noop").await;
        let (_, defender) = engine.boards().await;
        assert_eq!(defender.overall_score, 0);
    }

    #[test]
    fn empty_archive_yields_max_defender_award_and_full_success_ratio() {
        let award = compute_end_of_game(&[], &[], &[]);
        assert_eq!(award.defender_points, 10);
        assert_eq!(award.attacker_points, 0);
    }

    #[test]
    fn installed_challenges_with_no_successful_combat_still_get_full_success_ratio() {
        // Archive is empty even though a defender has installed a challenge:
        // the 100% convention keys on the archive, not on whether challenges
        // were installed.
        let challenges = vec![challenge("ch1")];
        let award = compute_end_of_game(&[], &challenges, &["a1".to_string()]);
        assert_eq!(award.attacker_points, 5);
    }

    #[test]
    fn high_success_ratio_awards_five_and_universal_success_awards_one_more() {
        let challenges = vec![challenge("ch1")];
        let archive = vec![succeeded_combat("a1", "ch1")];
        let award = compute_end_of_game(&archive, &challenges, &["a1".to_string()]);
        assert_eq!(award.attacker_points, 6);
    }

    #[test]
    fn uptime_bucket_picks_the_matching_tier() {
        assert_eq!(defender_award_for_uptime(100.0), 10);
        assert_eq!(defender_award_for_uptime(80.0), 5);
        assert_eq!(defender_award_for_uptime(50.0), 1);
    }
}
