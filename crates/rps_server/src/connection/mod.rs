//! Connection tracking for WebSocket clients.
//!
//! This module holds the handle the transport layer hands out for each open
//! WebSocket session and the registry that tracks which sessions are open.

pub mod client;
pub mod registry;

pub use client::ConnectionHandle;
pub use registry::ConnectionRegistry;

/// Type alias for connection identifiers.
///
/// Connection IDs are used to uniquely identify client connections
/// throughout their lifecycle on the server.
pub type ConnectionId = usize;
