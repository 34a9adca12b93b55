// SPDX-License-Identifier: Apache-2.0
use std::collections::HashMap;

use centurion_proto::SocketMessage;
use tokio::sync::{mpsc, RwLock};

/// Process-wide mapping from player identifier to the live connection's
/// outbound channel.
///
/// The lock is held only across mapping operations, never across I/O: the
/// mediator copies the sender out, releases the lock, then awaits the send.
/// Each connection's actual writes are serialized by the single task
/// draining its channel, giving every connection exactly one writer.
#[derive(Default)]
pub struct ConnectionRegistry {
    connections: RwLock<HashMap<String, mpsc::Sender<SocketMessage>>>,
}

impl ConnectionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the outbound channel for `player_id`, replacing any prior
    /// connection for the same id.
    pub async fn register(&self, player_id: String, tx: mpsc::Sender<SocketMessage>) {
        self.connections.write().await.insert(player_id, tx);
    }

    /// Removes the connection for `player_id`, if present.
    pub async fn remove(&self, player_id: &str) {
        self.connections.write().await.remove(player_id);
    }

    /// Delivers `message` to `player_id`'s connection. Returns `false` when
    /// there is no live connection, or the connection's writer task has
    /// already gone away — either way, the caller should treat the peer as
    /// offline.
    pub async fn deliver(&self, player_id: &str, message: SocketMessage) -> bool {
        let tx = self.connections.read().await.get(player_id).cloned();
        match tx {
            Some(tx) => tx.send(message).await.is_ok(),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn deliver_to_unregistered_player_reports_offline() {
        let registry = ConnectionRegistry::new();
        let delivered = registry.deliver("nobody", SocketMessage::Error { message: "x".into() }).await;
        assert!(!delivered);
    }

    #[tokio::test]
    async fn deliver_to_registered_player_succeeds_and_is_received() {
        let registry = ConnectionRegistry::new();
        let (tx, mut rx) = mpsc::channel(4);
        registry.register("p1".to_string(), tx).await;
        let delivered = registry.deliver("p1", SocketMessage::Join { id: "p1".into() }).await;
        assert!(delivered);
        assert!(matches!(rx.recv().await, Some(SocketMessage::Join { .. })));
    }

    #[tokio::test]
    async fn removed_connection_is_reported_offline() {
        let registry = ConnectionRegistry::new();
        let (tx, _rx) = mpsc::channel(4);
        registry.register("p1".to_string(), tx).await;
        registry.remove("p1").await;
        let delivered = registry.deliver("p1", SocketMessage::Error { message: "x".into() }).await;
        assert!(!delivered);
    }
}
