//! Keystroke guard for the in-progress expression string.
//!
//! The guard is a Mealy machine: its state is derived from the class of the
//! last accepted character, and each incoming character yields a
//! [`GuardDecision`]. It keeps the candidate free of operator sequences that
//! could never parse, but leaves parenthesis balance to the parser.

use serde::{Deserialize, Serialize};
use strum_macros::AsRefStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GuardDecision {
    Append,
    ReplaceLast,
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Digit,
    Dot,
    Operator,
    OpenParen,
    CloseParen,
}

impl CharClass {
    pub fn of(c: char) -> Option<CharClass> {
        match c {
            '0'..='9' => Some(CharClass::Digit),
            '.' => Some(CharClass::Dot),
            '+' | '-' | '*' | '/' => Some(CharClass::Operator),
            '(' => Some(CharClass::OpenParen),
            ')' => Some(CharClass::CloseParen),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Empty,
    Digit,
    Dot,
    /// A binary operator, or a `-` following an operand
    Operator,
    /// A `-` in prefix position: at the start, after `(` or after an operator
    Sign,
    OpenParen,
    CloseParen,
}

impl GuardState {
    /// Derives the state from the trailing characters of `candidate`.
    ///
    /// Only the last two significant characters are inspected.
    pub fn of(candidate: &str) -> GuardState {
        let mut chars = candidate.chars().rev().filter(|c| !c.is_whitespace());

        let last = match chars.next() {
            Some(c) => c,
            None => return GuardState::Empty,
        };

        match CharClass::of(last) {
            Some(CharClass::Digit) => GuardState::Digit,
            Some(CharClass::Dot) => GuardState::Dot,
            Some(CharClass::OpenParen) => GuardState::OpenParen,
            Some(CharClass::CloseParen) => GuardState::CloseParen,
            Some(CharClass::Operator) if last == '-' => match chars.next().map(CharClass::of) {
                None | Some(Some(CharClass::Operator)) | Some(Some(CharClass::OpenParen)) => {
                    GuardState::Sign
                }
                _ => GuardState::Operator,
            },
            Some(CharClass::Operator) => GuardState::Operator,
            // Foreign characters only reach here if the candidate was not built
            // through the guard; the tokenizer reports them on evaluation
            None => GuardState::Digit,
        }
    }

    pub fn transition(self, incoming: char) -> GuardDecision {
        let class = match CharClass::of(incoming) {
            Some(class) => class,
            None => return GuardDecision::Reject,
        };

        match (self, class) {
            (GuardState::Empty, CharClass::Operator)
            | (GuardState::OpenParen, CharClass::Operator)
            | (GuardState::Sign, CharClass::Operator) => {
                if incoming == '-' {
                    GuardDecision::Append
                } else {
                    GuardDecision::Reject
                }
            }
            (GuardState::Operator, CharClass::Operator) => {
                if incoming == '-' {
                    GuardDecision::Append
                } else {
                    GuardDecision::ReplaceLast
                }
            }
            _ => GuardDecision::Append,
        }
    }
}

/// Decides what to do with `incoming` given the text typed so far.
pub fn guard_accept(candidate: &str, incoming: char) -> GuardDecision {
    GuardState::of(candidate).transition(incoming)
}

/// Runs the guard and applies its decision to `candidate` in place.
pub fn apply(candidate: &mut String, incoming: char) -> GuardDecision {
    let decision = guard_accept(candidate, incoming);
    match decision {
        GuardDecision::Append => candidate.push(incoming),
        GuardDecision::ReplaceLast => {
            candidate.truncate(candidate.trim_end().len());
            candidate.pop();
            candidate.push(incoming);
        }
        GuardDecision::Reject => {}
    }
    decision
}
