//! Outbound message types and fan-out.
//!
//! This module defines the bounded text frames the server sends and the
//! broadcast routine that delivers one frame to many connections.

pub mod broadcast;
pub mod types;

pub use broadcast::{broadcast, BroadcastReport};
pub use types::{OutboundMessage, MAX_MESSAGE_SIZE};
