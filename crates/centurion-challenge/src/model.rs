// SPDX-License-Identifier: Apache-2.0
use serde_json::Value;
use time::OffsetDateTime;

/// Distinguishes built-in modules from defender-installed ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeKind {
    /// Shipped with the game at startup (e.g. the reverse sorter).
    Default,
    /// Installed by a defender at runtime.
    PlayerCreated,
}

/// Example hints/solutions a challenge exposes to attackers and defenders.
#[derive(Debug, Clone, Default)]
pub struct Example {
    /// Example hint values, in order.
    pub hints: Vec<Value>,
    /// Example solution values, in order.
    pub solutions: Vec<Value>,
}

/// A challenge module, built-in or defender-installed.
///
/// Immutable after creation: every field but membership in the registry is
/// fixed at construction time.
#[derive(Debug, Clone)]
pub struct Challenge {
    /// Unique identifier.
    pub id: String,
    /// Identifier of the defender who installed this; empty for built-ins.
    pub creator_id: String,
    /// Display name, unique case-insensitively across all challenges.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Built-in vs. player-created.
    pub kind: ChallengeKind,
    /// Creation timestamp.
    pub created_at: OffsetDateTime,
    /// Example hints/solutions.
    pub example: Example,
}
