//! Error types and handling for the game server.
//!
//! This module defines the error types that can occur during server operations,
//! providing clear categorization of different failure modes.

/// Enumeration of possible server errors.
///
/// Categorizes errors into network-related, I/O and internal server errors
/// to help with debugging and error handling.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Network-related errors such as binding failures, handshake failures
    /// or sends to a peer that has already gone away
    #[error("Network error: {0}")]
    Network(String),

    /// Internal server errors such as a stopped lifecycle dispatcher
    #[error("Internal error: {0}")]
    Internal(String),

    /// Raw socket or filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
