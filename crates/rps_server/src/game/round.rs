//! Round resolution.
//!
//! A round takes the client's choice, draws the server's counter-choice and
//! decides the outcome. Choices travel on the wire as the integers 0, 1 and 2;
//! the resolver compares the raw integers, so a value outside that range never
//! ties and never matches a winning pair.

use crate::messaging::OutboundMessage;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// One of the three hand shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Choice {
    Rock = 0,
    Paper = 1,
    Scissors = 2,
}

impl Choice {
    pub const ALL: [Choice; 3] = [Choice::Rock, Choice::Paper, Choice::Scissors];

    /// Maps a wire integer to a choice, if it names one.
    pub fn from_wire(value: i64) -> Option<Self> {
        match value {
            0 => Some(Choice::Rock),
            1 => Some(Choice::Paper),
            2 => Some(Choice::Scissors),
            _ => None,
        }
    }

    pub fn wire_value(self) -> i64 {
        self as i64
    }
}

/// Result of a round from the client's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    Tie,
    Win,
    Lose,
}

impl RoundOutcome {
    /// Human-readable label used in the result frame.
    pub fn label(self) -> &'static str {
        match self {
            RoundOutcome::Tie => "It's a tie!",
            RoundOutcome::Win => "You win!",
            RoundOutcome::Lose => "You lose!",
        }
    }
}

impl fmt::Display for RoundOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A resolved round, ready to be sent back to the client that played it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundResult {
    pub client_choice: i64,
    pub server_choice: Choice,
    pub outcome: RoundOutcome,
    pub message: OutboundMessage,
}

/// Source of the server's counter-choice.
pub trait ChoiceSource: Send {
    fn draw(&mut self) -> Choice;
}

/// Uniform random counter-choices from a generator seeded once at creation.
#[derive(Debug)]
pub struct SeededChoiceSource {
    rng: StdRng,
}

impl SeededChoiceSource {
    /// Seeds from the nanosecond part of the system clock.
    pub fn from_clock() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos() as u64)
            .unwrap_or_default();
        Self::with_seed(seed)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl ChoiceSource for SeededChoiceSource {
    fn draw(&mut self) -> Choice {
        Choice::ALL[self.rng.gen_range(0..Choice::ALL.len())]
    }
}

/// Parses a client payload into a choice integer.
///
/// Follows C `atoi` for the prefix (leading ASCII whitespace, optional sign,
/// then digits up to the first non-digit). Anything that yields no digits, or a
/// value outside 0..=2, becomes 0.
pub fn parse_choice(payload: &str) -> i64 {
    let trimmed = payload.trim_start_matches(|c: char| c.is_ascii_whitespace() || c == '\x0b');
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: &str = {
        let end = rest
            .bytes()
            .position(|b| !b.is_ascii_digit())
            .unwrap_or(rest.len());
        &rest[..end]
    };

    let value = match digits.parse::<i64>() {
        Ok(value) if negative => -value,
        Ok(value) => value,
        Err(_) => 0,
    };

    match Choice::from_wire(value) {
        Some(choice) => choice.wire_value(),
        None => 0,
    }
}

/// Decides a round from both raw choices.
///
/// Tie when equal; otherwise the client wins exactly for (0, 2), (1, 0) and
/// (2, 1) and loses every other pair.
pub fn outcome(client_choice: i64, server_choice: i64) -> RoundOutcome {
    if client_choice == server_choice {
        RoundOutcome::Tie
    } else if matches!((client_choice, server_choice), (0, 2) | (1, 0) | (2, 1)) {
        RoundOutcome::Win
    } else {
        RoundOutcome::Lose
    }
}

/// Plays one round against a counter-choice drawn from `source`.
pub fn resolve(client_choice: i64, source: &mut dyn ChoiceSource) -> RoundResult {
    let server_choice = source.draw();
    let outcome = outcome(client_choice, server_choice.wire_value());
    let message = OutboundMessage::new(format!(
        "Result: {} (You: {}, Server: {})",
        outcome.label(),
        client_choice,
        server_choice.wire_value()
    ));

    RoundResult {
        client_choice,
        server_choice,
        outcome,
        message,
    }
}
