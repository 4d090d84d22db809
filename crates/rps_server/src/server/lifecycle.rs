//! Connection lifecycle dispatch.
//!
//! Every connection task reports its session's events here over one channel.
//! A single dispatcher task owns the `LifecycleHandler` and applies the
//! events one at a time, so a registry update and the broadcast that
//! follows it are never interleaved with another event.

use crate::{
    connection::{ConnectionHandle, ConnectionId, ConnectionRegistry},
    game::{parse_choice, resolve, ChoiceSource, RoundResult},
    messaging::{broadcast, BroadcastReport, OutboundMessage},
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, trace, warn};

/// Events a connection task reports, in the order they happen.
#[derive(Debug)]
pub enum ConnectionEvent {
    /// The WebSocket handshake completed and the session is open
    Connected(ConnectionHandle),

    /// A text frame arrived on an open session
    Message {
        connection_id: ConnectionId,
        payload: String,
    },

    /// The session ended, cleanly or not
    Disconnected { connection_id: ConnectionId },
}

/// Applies connection events to the registry and produces the replies.
///
/// # Event handling
///
/// * **Connected**: register, then send `Connected clients: N` to everyone
///   including the newcomer
/// * **Message**: play a round and reply to the sender only
/// * **Disconnected**: deregister (idempotent), then send the new count to
///   everyone still connected
pub struct LifecycleHandler {
    registry: Arc<ConnectionRegistry>,
    choices: Box<dyn ChoiceSource>,
}

impl LifecycleHandler {
    pub fn new(registry: Arc<ConnectionRegistry>, choices: Box<dyn ChoiceSource>) -> Self {
        Self { registry, choices }
    }

    /// Processes events until every sender has been dropped.
    pub async fn run(mut self, mut events: mpsc::UnboundedReceiver<ConnectionEvent>) {
        debug!("🎮 Lifecycle dispatcher started");
        while let Some(event) = events.recv().await {
            self.handle(event).await;
        }
        debug!("🎮 Lifecycle dispatcher stopped");
    }

    pub async fn handle(&mut self, event: ConnectionEvent) {
        match event {
            ConnectionEvent::Connected(handle) => {
                self.on_connect(handle).await;
            }
            ConnectionEvent::Message {
                connection_id,
                payload,
            } => {
                self.on_message(connection_id, &payload).await;
            }
            ConnectionEvent::Disconnected { connection_id } => {
                self.on_disconnect(connection_id).await;
            }
        }
    }

    async fn on_connect(&mut self, handle: ConnectionHandle) -> BroadcastReport {
        self.registry.add(handle).await;
        let count = self.registry.count().await;
        info!("Client connected. Total clients: {}", count);

        let snapshot = self.registry.snapshot().await;
        broadcast(&snapshot, &OutboundMessage::connected_clients(count))
    }

    /// Plays a round for an open session.
    ///
    /// Frames from a session that is no longer registered are dropped.
    async fn on_message(&mut self, connection_id: ConnectionId, payload: &str) -> Option<RoundResult> {
        let Some(connection) = self.registry.get(connection_id).await else {
            debug!("Dropping message from closed connection {}", connection_id);
            return None;
        };

        let client_choice = parse_choice(payload);
        let result = resolve(client_choice, self.choices.as_mut());
        trace!(
            "🎲 Connection {} played {:?} -> {}",
            connection_id,
            payload,
            result.message
        );

        if let Err(e) = connection.send(&result.message) {
            warn!("Failed to send round result to connection {}: {}", connection_id, e);
        }
        Some(result)
    }

    async fn on_disconnect(&mut self, connection_id: ConnectionId) -> BroadcastReport {
        self.registry.remove(connection_id).await;
        let count = self.registry.count().await;
        info!("Client disconnected. Total clients: {}", count);

        let snapshot = self.registry.snapshot().await;
        broadcast(&snapshot, &OutboundMessage::connected_clients(count))
    }
}
