//! Fan-out of a single message to many connections.

use crate::connection::ConnectionHandle;
use crate::messaging::OutboundMessage;
use tracing::{debug, warn};

/// Outcome of one broadcast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Connections the message was queued for
    pub delivered: usize,
    /// Connections whose session had already gone away
    pub failed: usize,
}

/// Broadcasts a message to every connection in a registry snapshot.
///
/// Each connection is attempted independently: a failed send is logged and
/// skipped, the remaining connections are still tried, and nothing is
/// reported to the caller as an error. Failed connections are left in the
/// registry; their own disconnect event removes them.
///
/// # Arguments
///
/// * `snapshot` - Point-in-time copy of the registry
/// * `message` - The frame to deliver
///
/// # Returns
///
/// How many deliveries were queued and how many failed.
pub fn broadcast(snapshot: &[ConnectionHandle], message: &OutboundMessage) -> BroadcastReport {
    let mut report = BroadcastReport::default();

    for connection in snapshot {
        match connection.send(message) {
            Ok(()) => report.delivered += 1,
            Err(e) => {
                warn!("Failed to broadcast to connection {}: {}", connection.id(), e);
                report.failed += 1;
            }
        }
    }

    debug!(
        "📡 Broadcasted '{}' to {} connections ({} failed)",
        message, report.delivered, report.failed
    );
    report
}
