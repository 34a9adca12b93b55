// SPDX-License-Identifier: Apache-2.0
//! Team scoreboard and the scoring engine: per-event awards plus the
//! end-of-game team bonus calculation.

mod engine;
mod model;

pub use engine::{compute_end_of_game, EndOfGameAward, ScoreError, ScoringEngine};
pub use model::{Boards, TeamScore};
