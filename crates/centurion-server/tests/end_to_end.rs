// SPDX-License-Identifier: Apache-2.0
//! Integration coverage for the full HTTP + WebSocket surface, driving the
//! end-to-end scenarios a combat core is expected to satisfy.

use std::net::SocketAddr;

use centurion_server::{build_state, router};
use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite::Message as WsMessage;

struct Server {
    base_url: String,
    ws_url: String,
}

async fn spawn_server() -> Server {
    let state = build_state().await;
    let app = router(state);
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind ephemeral port");
    let addr: SocketAddr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app.into_make_service()).await.expect("server exited");
    });
    Server { base_url: format!("http://{addr}"), ws_url: format!("ws://{addr}/team/join") }
}

async fn register(server: &Server, client: &reqwest::Client, name: &str, team: &str) -> String {
    let body: Value = client
        .post(format!("{}/team/register", server.base_url))
        .json(&json!({ "name": name, "team": team }))
        .send()
        .await
        .expect("register request")
        .json()
        .await
        .expect("register body");
    body["meta"]["id"].as_str().expect("registered id").to_string()
}

async fn connect(server: &Server, id: &str) -> tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>> {
    let (mut ws, _) = tokio_tungstenite::connect_async(&server.ws_url).await.expect("ws connect");
    ws.send(WsMessage::Text(json!({ "type": "join", "id": id }).to_string().into())).await.expect("send join");
    ws
}

async fn recv_json(
    ws: &mut tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>,
) -> Value {
    loop {
        match ws.next().await.expect("stream ended").expect("ws frame") {
            WsMessage::Text(text) => return serde_json::from_str(&text).expect("json frame"),
            _ => continue,
        }
    }
}

#[tokio::test]
async fn default_challenge_solve_awards_no_points() {
    let server = spawn_server().await;
    let client = reqwest::Client::new();
    let a1 = register(&server, &client, "A1", "attacker").await;
    let mut a1_ws = connect(&server, &a1).await;

    // The built-in's id is generated at startup — discover it via the
    // listing endpoint rather than guessing.
    let challenges: Value = client
        .get(format!("{}/challenges", server.base_url))
        .send()
        .await
        .expect("list challenges")
        .json()
        .await
        .expect("challenges body");
    let default_id = challenges["meta"]["challenges"][0]["id"].as_str().expect("default id").to_string();

    a1_ws
        .send(WsMessage::Text(json!({ "type": "attack", "targetId": default_id }).to_string().into()))
        .await
        .expect("send real attack");

    let challenge_msg = recv_json(&mut a1_ws).await;
    assert_eq!(challenge_msg["type"], "attack_challenge");
    let hint = challenge_msg["hints"][0].as_str().expect("hint string").to_string();
    let reversed: String = hint.chars().rev().collect();

    a1_ws
        .send(
            WsMessage::Text(
                json!({ "type": "attack_solution", "targetId": default_id, "hints": [hint], "solutions": [reversed] })
                    .to_string()
                    .into(),
            ),
        )
        .await
        .expect("send solution");

    let result = recv_json(&mut a1_ws).await;
    assert_eq!(result["type"], "attack_result");
    assert_eq!(result["success"], true);
}

#[tokio::test]
async fn defender_installing_first_module_awards_one_point() {
    let server = spawn_server().await;
    let client = reqwest::Client::new();
    let d1 = register(&server, &client, "D1", "defender").await;

    let install: Value = client
        .post(format!("{}/challenges", server.base_url))
        .json(&json!({
            "defenderId": d1,
            "name": "RS-2",
            "description": "reverse it",
            "example": { "hints": ["abc"], "solutions": ["cba"] },
        }))
        .send()
        .await
        .expect("install request")
        .json()
        .await
        .expect("install body");
    assert_eq!(install["code"], 200);
}

#[tokio::test]
async fn full_happy_path_resolves_to_attack_succeeded() {
    let server = spawn_server().await;
    let client = reqwest::Client::new();
    let a1 = register(&server, &client, "A1", "attacker").await;
    let d1 = register(&server, &client, "D1", "defender").await;

    let install: Value = client
        .post(format!("{}/challenges", server.base_url))
        .json(&json!({
            "defenderId": d1,
            "name": "RS-2",
            "description": "reverse it",
            "example": { "hints": ["abc"], "solutions": ["cba"] },
        }))
        .send()
        .await
        .expect("install request")
        .json()
        .await
        .expect("install body");
    let challenge_id = install["meta"]["id"].as_str().expect("challenge id").to_string();

    let mut a1_ws = connect(&server, &a1).await;
    let mut d1_ws = connect(&server, &d1).await;

    a1_ws
        .send(WsMessage::Text(json!({ "type": "attack", "targetId": challenge_id }).to_string().into()))
        .await
        .expect("send attack");

    let defend_request = recv_json(&mut d1_ws).await;
    assert_eq!(defend_request["type"], "defend_action_request");
    let combat_id = defend_request["combatId"].as_str().expect("combat id").to_string();

    d1_ws
        .send(
            WsMessage::Text(
                json!({ "type": "defend_action", "combatId": combat_id, "hints": ["X"] }).to_string().into(),
            ),
        )
        .await
        .expect("send defend action");

    let challenge_msg = recv_json(&mut a1_ws).await;
    assert_eq!(challenge_msg["type"], "attack_challenge");

    a1_ws
        .send(
            WsMessage::Text(
                json!({ "type": "attack_solution", "targetId": challenge_id, "hints": ["X"], "solutions": ["Y"] })
                    .to_string()
                    .into(),
            ),
        )
        .await
        .expect("send attack solution");

    let eval_request = recv_json(&mut d1_ws).await;
    assert_eq!(eval_request["type"], "solution_evaluation_request");

    d1_ws
        .send(
            WsMessage::Text(
                json!({
                    "type": "solution_evaluation",
                    "combatId": combat_id,
                    "targetId": a1,
                    "success": true,
                    "message": "nice work",
                })
                .to_string()
                .into(),
            ),
        )
        .await
        .expect("send evaluation");

    let result = recv_json(&mut a1_ws).await;
    assert_eq!(result["type"], "attack_result");
    assert_eq!(result["success"], true);
}

#[tokio::test]
async fn defender_offline_at_attack_time_resolves_immediately() {
    let server = spawn_server().await;
    let client = reqwest::Client::new();
    let a1 = register(&server, &client, "A1", "attacker").await;
    let d1 = register(&server, &client, "D1", "defender").await;

    let install: Value = client
        .post(format!("{}/challenges", server.base_url))
        .json(&json!({
            "defenderId": d1,
            "name": "RS-3",
            "description": "reverse it",
            "example": { "hints": ["abc"], "solutions": ["cba"] },
        }))
        .send()
        .await
        .expect("install request")
        .json()
        .await
        .expect("install body");
    let challenge_id = install["meta"]["id"].as_str().expect("challenge id").to_string();

    // D1 never connects over the WebSocket, so it stays offline.
    let mut a1_ws = connect(&server, &a1).await;
    a1_ws
        .send(WsMessage::Text(json!({ "type": "attack", "targetId": challenge_id }).to_string().into()))
        .await
        .expect("send attack");

    let reply = recv_json(&mut a1_ws).await;
    assert_eq!(reply["type"], "defender_failed_to_defend");
}

#[tokio::test]
async fn concurrent_attacks_on_same_defender_get_distinct_combat_ids() {
    let server = spawn_server().await;
    let client = reqwest::Client::new();
    let a1 = register(&server, &client, "A1", "attacker").await;
    let a2 = register(&server, &client, "A2", "attacker").await;
    let d1 = register(&server, &client, "D1", "defender").await;

    let install: Value = client
        .post(format!("{}/challenges", server.base_url))
        .json(&json!({
            "defenderId": d1,
            "name": "RS-2",
            "description": "reverse it",
            "example": { "hints": ["abc"], "solutions": ["cba"] },
        }))
        .send()
        .await
        .expect("install request")
        .json()
        .await
        .expect("install body");
    let challenge_id = install["meta"]["id"].as_str().expect("challenge id").to_string();

    let mut a1_ws = connect(&server, &a1).await;
    let mut a2_ws = connect(&server, &a2).await;
    let mut d1_ws = connect(&server, &d1).await;

    a1_ws
        .send(WsMessage::Text(json!({ "type": "attack", "targetId": challenge_id }).to_string().into()))
        .await
        .expect("send attack from a1");
    a2_ws
        .send(WsMessage::Text(json!({ "type": "attack", "targetId": challenge_id }).to_string().into()))
        .await
        .expect("send attack from a2");

    let first = recv_json(&mut d1_ws).await;
    let second = recv_json(&mut d1_ws).await;
    let c1 = first["combatId"].as_str().expect("combat id 1");
    let c2 = second["combatId"].as_str().expect("combat id 2");
    assert_ne!(c1, c2);
}
