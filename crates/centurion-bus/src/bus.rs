// SPDX-License-Identifier: Apache-2.0
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{mpsc, Mutex, Notify};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::events::BusEvent;

/// Capacity of the ingress queue the dispatcher drains.
///
/// Matches the original bus's buffered `main` channel; once full, `publish`
/// blocks the caller rather than dropping events.
const INGRESS_CAPACITY: usize = 25;

/// Capacity of each subscriber's own channel.
const SUBSCRIBER_CAPACITY: usize = 32;

/// Errors surfaced by [`EventBus::publish`].
#[derive(Debug, Error)]
pub enum BusError {
    /// The bus was stopped; no further events are accepted.
    #[error("event bus is stopped")]
    Stopped,
}

type SubscriberMap = HashMap<String, Vec<mpsc::Sender<BusEvent>>>;

/// In-process, topic-addressed, fan-out publisher.
///
/// A single background dispatcher task owns delivery; [`EventBus::publish`]
/// only ever touches the bounded ingress queue. Subscribers receive events
/// in publication order; a subscriber that can't keep up only ever blocks
/// the dispatcher, never other subscribers' history (each gets its own
/// channel).
pub struct EventBus {
    ingress: mpsc::Sender<BusEvent>,
    subscribers: Arc<Mutex<SubscriberMap>>,
    stopped: Arc<AtomicBool>,
    shutdown: Arc<Notify>,
    dispatcher: Mutex<Option<JoinHandle<()>>>,
}

impl EventBus {
    /// Starts the bus and its background dispatcher task.
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(INGRESS_CAPACITY);
        let subscribers: Arc<Mutex<SubscriberMap>> = Arc::new(Mutex::new(HashMap::new()));
        let shutdown = Arc::new(Notify::new());

        let dispatcher = tokio::spawn(Self::distribute(rx, subscribers.clone(), shutdown.clone()));

        Self {
            ingress: tx,
            subscribers,
            stopped: Arc::new(AtomicBool::new(false)),
            shutdown,
            dispatcher: Mutex::new(Some(dispatcher)),
        }
    }

    /// Returns a fresh, independent stream of events for `topic`.
    ///
    /// Subscribing the same topic twice yields two independent receivers;
    /// neither sees events published before it subscribed.
    pub async fn subscribe(&self, topic: &str) -> mpsc::Receiver<BusEvent> {
        let (tx, rx) = mpsc::channel(SUBSCRIBER_CAPACITY);
        let mut subs = self.subscribers.lock().await;
        subs.entry(topic.to_lowercase()).or_default().push(tx);
        rx
    }

    /// Publishes an event. Blocks the caller when the ingress queue is full;
    /// fails if the bus has been stopped.
    pub async fn publish(&self, event: BusEvent) -> Result<(), BusError> {
        if self.stopped.load(Ordering::SeqCst) {
            return Err(BusError::Stopped);
        }
        info!(topic = event.topic(), "publishing bus event");
        // The dispatcher only exits after `stop()` drops `ingress`'s sibling
        // receiver, so a send error here means a race with shutdown, not a bug.
        if self.ingress.send(event).await.is_err() {
            return Err(BusError::Stopped);
        }
        Ok(())
    }

    /// Idempotent graceful shutdown. After this returns, every subscriber
    /// stream has been closed and further `publish` calls fail.
    pub async fn stop(&self) {
        if self.stopped.swap(true, Ordering::SeqCst) {
            return;
        }
        self.shutdown.notify_waiters();
        let handle = self.dispatcher.lock().await.take();
        if let Some(handle) = handle {
            if let Err(err) = handle.await {
                warn!(?err, "bus dispatcher task did not shut down cleanly");
            }
        }
        info!("event bus stopped");
    }

    async fn distribute(
        mut ingress: mpsc::Receiver<BusEvent>,
        subscribers: Arc<Mutex<SubscriberMap>>,
        shutdown: Arc<Notify>,
    ) {
        loop {
            tokio::select! {
                biased;
                _ = shutdown.notified() => break,
                event = ingress.recv() => {
                    match event {
                        Some(event) => Self::deliver(&subscribers, event).await,
                        None => break,
                    }
                }
            }
        }
        // Close every subscriber stream by dropping their senders.
        subscribers.lock().await.clear();
    }

    async fn deliver(subscribers: &Arc<Mutex<SubscriberMap>>, event: BusEvent) {
        let mut subs = subscribers.lock().await;
        let Some(listeners) = subs.get_mut(event.topic()) else {
            return;
        };
        let mut alive = Vec::with_capacity(listeners.len());
        for tx in listeners.drain(..) {
            // A blocking send preserves in-order delivery per subscriber and
            // only ever backs up the dispatcher behind one slow listener,
            // never drops or reorders events for anyone else.
            if tx.send(event.clone()).await.is_ok() {
                alive.push(tx);
            }
        }
        *listeners = alive;
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribe_twice_yields_independent_streams() {
        let bus = EventBus::new();
        let mut a = bus.subscribe("registration").await;
        let mut b = bus.subscribe("registration").await;

        bus.publish(BusEvent::Registration {
            id: "p1".into(),
            name: "Alice".into(),
            team: "attacker".into(),
        })
        .await
        .unwrap();

        assert!(matches!(a.recv().await, Some(BusEvent::Registration { .. })));
        assert!(matches!(b.recv().await, Some(BusEvent::Registration { .. })));
    }

    #[tokio::test]
    async fn late_subscriber_does_not_see_past_events() {
        let bus = EventBus::new();
        bus.publish(BusEvent::PlayerJoined { id: "p1".into() })
            .await
            .unwrap();

        let mut late = bus.subscribe("player-joined").await;
        bus.publish(BusEvent::PlayerJoined { id: "p2".into() })
            .await
            .unwrap();

        let event = late.recv().await.unwrap();
        assert!(matches!(event, BusEvent::PlayerJoined { id } if id == "p2"));
    }

    #[tokio::test]
    async fn publish_with_no_subscribers_is_a_no_op() {
        let bus = EventBus::new();
        bus.publish(BusEvent::PlayerJoined { id: "p1".into() })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn ordering_is_preserved_per_subscriber() {
        let bus = EventBus::new();
        let mut sub = bus.subscribe("player-joined").await;
        for i in 0..5 {
            bus.publish(BusEvent::PlayerJoined {
                id: format!("p{i}"),
            })
            .await
            .unwrap();
        }
        for i in 0..5 {
            let event = sub.recv().await.unwrap();
            assert!(matches!(event, BusEvent::PlayerJoined { id } if id == format!("p{i}")));
        }
    }

    #[tokio::test]
    async fn stop_closes_subscriber_streams_and_rejects_publish() {
        let bus = EventBus::new();
        let mut sub = bus.subscribe("player-joined").await;
        bus.stop().await;
        bus.stop().await; // idempotent

        assert!(sub.recv().await.is_none());
        let err = bus
            .publish(BusEvent::PlayerJoined { id: "p1".into() })
            .await;
        assert!(matches!(err, Err(BusError::Stopped)));
    }
}
