//! Game rules: one rock-paper-scissors round per client message.

pub mod round;

pub use round::{
    outcome, parse_choice, resolve, Choice, ChoiceSource, RoundOutcome, RoundResult,
    SeededChoiceSource,
};
