// SPDX-License-Identifier: Apache-2.0
use std::sync::Arc;

use centurion_bus::EventBus;
use centurion_challenge::ChallengeRegistry;
use centurion_combat::CombatStore;
use centurion_player::PlayerRegistry;
use centurion_scoreboard::ScoringEngine;
use centurion_session::{ConnectionRegistry, SessionMediator};

/// Every shared registry/service, constructed once at startup and handed to
/// both the HTTP handlers and the session mediator by reference.
pub struct AppState {
    pub players: Arc<PlayerRegistry>,
    pub challenges: Arc<ChallengeRegistry>,
    pub combats: Arc<CombatStore>,
    pub scoring: Arc<ScoringEngine>,
    pub bus: Arc<EventBus>,
    pub connections: Arc<ConnectionRegistry>,
    pub mediator: Arc<SessionMediator>,
}
