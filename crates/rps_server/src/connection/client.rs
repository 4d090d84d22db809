//! Client connection handle.
//!
//! A `ConnectionHandle` identifies one open WebSocket session and can queue
//! text frames for it. It is a back-reference: the connection task owns the
//! socket and the strong end of the outbound queue, the handle only keeps a
//! weak sender. Once the connection task finishes, sends through any
//! remaining handle fail instead of keeping the session alive.

use super::ConnectionId;
use crate::{error::ServerError, messaging::OutboundMessage};
use std::net::SocketAddr;
use axum::extract::ws::Message;
use std::time::{Duration, SystemTime};
use tokio::sync::mpsc::{UnboundedSender, WeakUnboundedSender};

/// Represents an individual client connection to the server.
///
/// Two handles are equal exactly when they refer to the same session,
/// regardless of any other field.
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    /// Unique identifier of the session
    id: ConnectionId,

    /// The remote network address of the client
    remote_addr: SocketAddr,

    /// When this connection was established
    connected_at: SystemTime,

    /// Weak end of the queue drained by the connection's writer task
    outbound: WeakUnboundedSender<Message>,
}

impl ConnectionHandle {
    /// Creates a handle for a freshly upgraded session.
    ///
    /// # Arguments
    ///
    /// * `id` - Identifier allocated by the registry
    /// * `remote_addr` - The network address of the connecting client
    /// * `outbound` - The writer queue owned by the connection task; only a
    ///   weak reference to it is kept
    pub fn new(id: ConnectionId, remote_addr: SocketAddr, outbound: &UnboundedSender<Message>) -> Self {
        Self {
            id,
            remote_addr,
            connected_at: SystemTime::now(),
            outbound: outbound.downgrade(),
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn remote_addr(&self) -> SocketAddr {
        self.remote_addr
    }

    /// How long the session has been open.
    pub fn session_duration(&self) -> Duration {
        self.connected_at.elapsed().unwrap_or_default()
    }

    /// Queues a text frame for this connection.
    ///
    /// Never blocks: the frame is handed to the connection's writer task.
    ///
    /// # Returns
    ///
    /// `Ok(())` if the frame was queued, or `ServerError::Network` if the
    /// connection task has already released its end of the queue.
    pub fn send(&self, message: &OutboundMessage) -> Result<(), ServerError> {
        let sender = self
            .outbound
            .upgrade()
            .ok_or_else(|| ServerError::Network(format!("Connection {} is closed", self.id)))?;

        sender
            .send(Message::Text(message.as_str().to_owned().into()))
            .map_err(|_| ServerError::Network(format!("Writer for connection {} has stopped", self.id)))
    }
}

impl PartialEq for ConnectionHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ConnectionHandle {}
