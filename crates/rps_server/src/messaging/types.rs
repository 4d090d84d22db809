//! Message type definitions for server-to-client frames.

use std::fmt;

/// Largest payload, in bytes, the server will put in a single frame.
pub const MAX_MESSAGE_SIZE: usize = 256;

/// An immutable text frame bound for one or more clients.
///
/// The text is cut down to at most [`MAX_MESSAGE_SIZE`] bytes when the
/// message is built, always on a UTF-8 character boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    text: String,
}

impl OutboundMessage {
    pub fn new(text: impl Into<String>) -> Self {
        let mut text = text.into();
        if text.len() > MAX_MESSAGE_SIZE {
            let mut end = MAX_MESSAGE_SIZE;
            while !text.is_char_boundary(end) {
                end -= 1;
            }
            text.truncate(end);
        }
        Self { text }
    }

    /// The count update sent to everyone after a connect or disconnect.
    pub fn connected_clients(count: usize) -> Self {
        Self::new(format!("Connected clients: {count}"))
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for OutboundMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connected_clients_format() {
        assert_eq!(OutboundMessage::connected_clients(3).as_str(), "Connected clients: 3");
        assert_eq!(OutboundMessage::connected_clients(0).as_str(), "Connected clients: 0");
    }

    #[test]
    fn test_short_message_untouched() {
        let message = OutboundMessage::new("Result: You win! (You: 0, Server: 2)");
        assert_eq!(message.as_str(), "Result: You win! (You: 0, Server: 2)");
    }

    #[test]
    fn test_long_message_truncated() {
        let message = OutboundMessage::new("x".repeat(MAX_MESSAGE_SIZE + 50));
        assert_eq!(message.len(), MAX_MESSAGE_SIZE);

        let exact = OutboundMessage::new("y".repeat(MAX_MESSAGE_SIZE));
        assert_eq!(exact.len(), MAX_MESSAGE_SIZE);
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        // 255 ASCII bytes followed by a 4-byte character straddling the limit
        let text = format!("{}{}", "a".repeat(MAX_MESSAGE_SIZE - 1), "🎮");
        let message = OutboundMessage::new(text);
        assert_eq!(message.len(), MAX_MESSAGE_SIZE - 1);
        assert!(message.as_str().chars().all(|c| c == 'a'));
    }
}
