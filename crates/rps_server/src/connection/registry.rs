//! Registry of currently open client connections.
//!
//! This module provides the single piece of shared mutable state in the
//! server: the ordered list of sessions that are open right now.

use super::{client::ConnectionHandle, ConnectionId};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Central registry for all open client connections.
///
/// The registry tracks open sessions in connection order, assigns unique IDs
/// and hands out point-in-time snapshots for broadcasting. It never closes
/// a session itself; the connection task owns teardown.
///
/// # Architecture
///
/// * Uses `RwLock<Vec>` so add/remove/snapshot are safe under concurrent access
/// * Implements atomic connection ID generation
/// * Removal is by identity and tolerates unknown IDs
#[derive(Debug)]
pub struct ConnectionRegistry {
    /// Open sessions, in the order they connected
    connections: RwLock<Vec<ConnectionHandle>>,

    /// Atomic counter for generating unique connection IDs
    next_id: AtomicUsize,
}

impl ConnectionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(Vec::new()),
            next_id: AtomicUsize::new(1),
        }
    }

    /// Allocates a connection ID that has never been handed out before.
    pub fn next_connection_id(&self) -> ConnectionId {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Registers a newly connected session.
    ///
    /// # Returns
    ///
    /// `true` if the handle was inserted, `false` if a handle with the same
    /// identity was already registered (the registry never holds duplicates).
    pub async fn add(&self, handle: ConnectionHandle) -> bool {
        let mut connections = self.connections.write().await;
        if connections.iter().any(|existing| existing == &handle) {
            warn!("Connection {} is already registered", handle.id());
            return false;
        }

        info!("🔗 Connection {} from {}", handle.id(), handle.remote_addr());
        connections.push(handle);
        true
    }

    /// Deregisters a session by identity.
    ///
    /// Unknown IDs are ignored so that duplicate or late disconnect signals
    /// are harmless.
    ///
    /// # Returns
    ///
    /// The removed handle, or `None` if the connection was not registered.
    pub async fn remove(&self, connection_id: ConnectionId) -> Option<ConnectionHandle> {
        let mut connections = self.connections.write().await;
        let position = connections
            .iter()
            .position(|handle| handle.id() == connection_id)?;

        let handle = connections.remove(position);
        info!(
            "❌ Connection {} from {} disconnected after {:?}",
            connection_id,
            handle.remote_addr(),
            handle.session_duration()
        );
        Some(handle)
    }

    /// Looks up an open session by ID.
    pub async fn get(&self, connection_id: ConnectionId) -> Option<ConnectionHandle> {
        let connections = self.connections.read().await;
        connections
            .iter()
            .find(|handle| handle.id() == connection_id)
            .cloned()
    }

    /// Returns the number of open sessions.
    pub async fn count(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Returns a point-in-time copy of all open sessions.
    ///
    /// The copy can be iterated freely while the registry keeps changing.
    pub async fn snapshot(&self) -> Vec<ConnectionHandle> {
        self.connections.read().await.clone()
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
