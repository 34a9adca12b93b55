// SPDX-License-Identifier: Apache-2.0
//! The Centurion combat core: registration and challenge HTTP endpoints,
//! the `/team/join` full-duplex upgrade, and end-of-game scoring on
//! shutdown.
//!
//! Split into a library (this crate) and a thin `main.rs` binary so the
//! router can be exercised directly by integration tests without spawning
//! a separate process.

pub mod config;
pub mod http;
pub mod middleware;
pub mod state;
pub mod ws;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use centurion_bus::EventBus;
use centurion_challenge::ChallengeRegistry;
use centurion_combat::CombatStore;
use centurion_player::{PlayerRegistry, Team};
use centurion_scoreboard::{compute_end_of_game, ScoringEngine};
use centurion_session::{ConnectionRegistry, SessionMediator};
use tower_http::trace::TraceLayer;
use tracing::info;
use uuid::Uuid;

pub use config::Config;
pub use state::AppState;

/// Builds a fresh, empty `AppState` and seeds the built-in reverse sorter.
pub async fn build_state() -> Arc<AppState> {
    let players = Arc::new(PlayerRegistry::new());
    let challenges = Arc::new(ChallengeRegistry::new());
    let combats = Arc::new(CombatStore::new());
    let scoring = Arc::new(ScoringEngine::new(players.clone()));
    let bus = Arc::new(EventBus::new());
    let connections = Arc::new(ConnectionRegistry::new());

    challenges.seed_defaults(Uuid::new_v4().to_string()).await;

    let mediator = Arc::new(SessionMediator::new(
        players.clone(),
        challenges.clone(),
        combats.clone(),
        scoring.clone(),
        bus.clone(),
        connections.clone(),
    ));

    Arc::new(AppState { players, challenges, combats, scoring, bus, connections, mediator })
}

/// Builds the axum router for a given state. Shared by `main` and
/// integration tests.
#[must_use]
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(http::liveness))
        .route("/team/register", post(http::register))
        .route("/challenges", get(http::list_challenges).post(http::install_challenge))
        .route("/team/join", get(ws::ws_handler))
        .layer(middleware::panic_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Applies the end-of-game team bonuses from a snapshot of the finished
/// archive. Runs once, after the listener has stopped accepting new
/// connections but before the process exits.
pub async fn run_end_of_game(state: &AppState) {
    let archive = state.combats.archive().await;
    let challenges = state.challenges.get_challenges().await;
    let attacker_ids: Vec<String> =
        state.players.filter_by_team(Team::Attacker).await.into_iter().map(|p| p.id).collect();

    let award = compute_end_of_game(&archive, &challenges, &attacker_ids);
    state.scoring.award_team(Team::Attacker, award.attacker_points, "end of game").await;
    state.scoring.award_team(Team::Defender, award.defender_points, "end of game").await;
    info!(
        attacker_points = award.attacker_points,
        defender_points = award.defender_points,
        "end-of-game scoring applied"
    );
}
