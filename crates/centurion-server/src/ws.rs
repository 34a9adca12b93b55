// SPDX-License-Identifier: Apache-2.0
use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use centurion_player::Team;
use centurion_proto::SocketMessage;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::warn;

use crate::state::AppState;

/// Outbound channel depth for a single session's writer task.
const OUTBOUND_CAPACITY: usize = 32;

/// `GET /team/join` — upgrades to the full-duplex session protocol.
pub async fn ws_handler(State(state): State<Arc<AppState>>, ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(mut socket: WebSocket, state: Arc<AppState>) {
    let Some(Ok(Message::Text(first))) = socket.recv().await else {
        return;
    };
    let Ok(SocketMessage::Join { id }) = serde_json::from_str::<SocketMessage>(&first) else {
        send_one(&mut socket, &SocketMessage::Error { message: "first message must be join".into() }).await;
        return;
    };

    let (tx, mut rx) = mpsc::channel::<SocketMessage>(OUTBOUND_CAPACITY);
    let player = match state.mediator.handle_join(&id, tx).await {
        Ok(player) => player,
        Err(err) => {
            send_one(&mut socket, &SocketMessage::Error { message: err.to_string() }).await;
            return;
        }
    };

    let (mut ws_tx, mut ws_rx) = socket.split();

    // Single writer per connection: every reply, whether addressed to this
    // session directly or delivered cross-session by the mediator, arrives
    // on `rx` and is serialized onto the socket by this one task.
    let writer = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let Ok(text) = serde_json::to_string(&msg) else {
                continue;
            };
            if ws_tx.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    while let Some(incoming) = ws_rx.next().await {
        let text = match incoming {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(_)) => break,
            Err(err) => {
                warn!(player_id = %id, error = %err, "read error on session socket, closing");
                break;
            }
            Ok(Message::Binary(_)) => {
                warn!(player_id = %id, "ignoring binary frame");
                continue;
            }
            Ok(Message::Ping(_) | Message::Pong(_)) => continue,
        };

        let reply = match serde_json::from_str::<SocketMessage>(&text) {
            Ok(msg) => match player.team {
                Team::Attacker => state.mediator.handle_attacker_message(&id, msg).await,
                Team::Defender => state.mediator.handle_defender_message(&id, msg).await,
            },
            Err(err) => Some(SocketMessage::Error { message: format!("malformed message: {err}") }),
        };

        if let Some(reply) = reply {
            state.connections.deliver(&id, reply).await;
        }
    }

    state.mediator.handle_disconnect(&id).await;
    writer.abort();
}

async fn send_one(socket: &mut WebSocket, message: &SocketMessage) {
    if let Ok(text) = serde_json::to_string(message) {
        let _ = socket.send(Message::Text(text.into())).await;
    }
}
