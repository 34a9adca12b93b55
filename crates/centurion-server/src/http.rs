// SPDX-License-Identifier: Apache-2.0
use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use centurion_bus::BusEvent;
use centurion_challenge::{Challenge, ChallengeKind, Example};
use centurion_player::{Player, Team};
use centurion_proto::http::{
    CenturionResponse, ChallengeExample, ChallengeResponse, FetchChallengesResponse, InstallChallengeRequest,
    InstallChallengeResponse, RegisterRequest, RegisterResponse,
};
use serde_json::json;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::state::AppState;

/// `GET /` — liveness.
pub async fn liveness() -> Json<CenturionResponse> {
    Json(CenturionResponse::ok("centurion core is up"))
}

/// `POST /team/register`.
pub async fn register(State(state): State<Arc<AppState>>, Json(body): Json<RegisterRequest>) -> Json<CenturionResponse> {
    let Some(team) = Team::parse(&body.team) else {
        return Json(CenturionResponse::bad_request(format!("unknown team {}", body.team)));
    };

    let id = Uuid::new_v4().to_string();
    let player = Player::new(id.clone(), body.name.clone(), team);
    if let Err(err) = state.players.add(player).await {
        return Json(CenturionResponse::bad_request(err.to_string()));
    }

    let _ = state
        .bus
        .publish(BusEvent::Registration { id: id.clone(), name: body.name, team: team.to_string() })
        .await;

    Json(CenturionResponse::ok_with_meta("registered", json!(RegisterResponse { id })))
}

/// `GET /challenges`.
pub async fn list_challenges(State(state): State<Arc<AppState>>) -> Json<CenturionResponse> {
    let challenges = state
        .challenges
        .get_challenges()
        .await
        .into_iter()
        .map(|c| ChallengeResponse {
            id: c.id,
            name: c.name,
            description: c.description,
            example: ChallengeExample { hints: c.example.hints, solutions: c.example.solutions },
        })
        .collect();

    Json(CenturionResponse::ok_with_meta("challenges", json!(FetchChallengesResponse { challenges })))
}

/// `POST /challenges` — install a defender-authored module.
pub async fn install_challenge(
    State(state): State<Arc<AppState>>,
    Json(body): Json<InstallChallengeRequest>,
) -> Json<CenturionResponse> {
    let defender = match state.players.find_by_id(&body.defender_id).await {
        Ok(player) => player,
        Err(err) => return Json(CenturionResponse::bad_request(err.to_string())),
    };
    if defender.team != Team::Defender {
        return Json(CenturionResponse::bad_request("only a defender may install a challenge"));
    }

    let id = Uuid::new_v4().to_string();
    let challenge = Challenge {
        id: id.clone(),
        creator_id: body.defender_id.clone(),
        name: body.name,
        description: body.description,
        kind: ChallengeKind::PlayerCreated,
        created_at: OffsetDateTime::now_utc(),
        example: Example { hints: body.example.hints, solutions: body.example.solutions },
    };

    let first_install = match state.challenges.add(challenge).await {
        Ok(first) => first,
        Err(err) => return Json(CenturionResponse::bad_request(err.to_string())),
    };

    let _ = state
        .bus
        .publish(BusEvent::DefenseModuleInstalled { challenge_id: id.clone(), creator_id: body.defender_id.clone() })
        .await;
    if first_install {
        let _ = state.scoring.award_player(&body.defender_id, 1).await;
    }

    Json(CenturionResponse::ok_with_meta("installed", json!(InstallChallengeResponse { id })))
}
