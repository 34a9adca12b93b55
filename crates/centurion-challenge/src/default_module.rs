// SPDX-License-Identifier: Apache-2.0
//! The built-in "reverse sorter" challenge, seeded at startup.
//!
//! Hint generation and solution validation are the server's own
//! responsibility for this module — no defender owns it.

use serde_json::Value;
use time::OffsetDateTime;

use crate::model::{Challenge, ChallengeKind, Example};

/// Display name of the built-in reverse sorter.
pub const REVERSE_SORTER_NAME: &str = "Reverse sorter";

/// Deterministic word list the hint generator draws from.
///
/// Indexed off a fixed seed (always `0`), mirroring the original's
/// `gofakeit.Seed(0)` call before generating the hint — the point isn't
/// variety, it's reproducibility.
const WORDS: &[&str] = &["photon", "ledger", "harbor"];
const HIPSTER_WORDS: &[&str] = &["artisan", "kombucha", "fixie"];
const BUZZ_WORDS: &[&str] = &["synergy", "pivot", "bandwidth"];

const FIXED_SEED: usize = 0;

/// Generates the deterministic hint for the reverse sorter: three
/// concatenated word-like tokens, always the same string for a given seed.
#[must_use]
pub fn generate_hint() -> String {
    format!(
        "{}{}{}",
        WORDS[FIXED_SEED % WORDS.len()],
        HIPSTER_WORDS[FIXED_SEED % HIPSTER_WORDS.len()],
        BUZZ_WORDS[FIXED_SEED % BUZZ_WORDS.len()]
    )
}

/// Validates a candidate solution against a hint: the solution must be the
/// same length as the hint and equal to its byte-reversed form, compared
/// case-insensitively.
#[must_use]
pub fn is_valid_solution(hint: &str, solution: &str) -> bool {
    if hint.len() != solution.len() {
        return false;
    }
    let hint_lower = hint.to_lowercase();
    let reversed_solution_lower: String = solution.chars().rev().collect::<String>().to_lowercase();
    hint_lower == reversed_solution_lower
}

/// Builds the seed record for the reverse sorter, installed by
/// [`crate::ChallengeRegistry::seed_defaults`] at startup.
#[must_use]
pub fn reverse_sorter_challenge(id: String) -> Challenge {
    Challenge {
        id,
        creator_id: String::new(),
        name: REVERSE_SORTER_NAME.to_string(),
        description: "You receive a random length string in the first hint. Reverse it and send \
                      it back as the first solution."
            .to_string(),
        kind: ChallengeKind::Default,
        created_at: OffsetDateTime::now_utc(),
        example: Example {
            hints: vec![Value::String("123456".to_string())],
            solutions: vec![Value::String("654321".to_string())],
        },
    }
}

/// Extracts the first string from a hints/solutions array, as the built-in
/// validator expects exactly one string argument in each.
#[must_use]
pub fn first_string(values: &[Value]) -> Option<&str> {
    values.first().and_then(Value::as_str)
}
