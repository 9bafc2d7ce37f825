use log::{debug, trace};
use serde::Serialize;

use crate::error::EvaluationError;
use crate::format::format_number;
use crate::guard::{self, GuardDecision};

/// A completed calculation, ready to be handed to a log sink.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Calculation {
    pub operation: String,
    pub result: String,
    pub value: f64,
}

/// Keypad session: the candidate string plus the last evaluation failure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    candidate: String,
    error: Option<EvaluationError>,
}

impl Session {
    pub fn new() -> Session {
        Default::default()
    }

    pub fn candidate(&self) -> &str {
        &self.candidate
    }

    pub fn error(&self) -> Option<&EvaluationError> {
        self.error.as_ref()
    }

    pub fn input(&mut self, c: char) -> GuardDecision {
        self.error = None;
        let decision = guard::apply(&mut self.candidate, c);
        trace!("Input '{}': {}", c, decision.as_ref());
        decision
    }

    pub fn delete(&mut self) {
        self.error = None;
        self.candidate.pop();
    }

    pub fn clear(&mut self) {
        self.error = None;
        self.candidate.clear();
    }

    /// Evaluates the candidate.
    ///
    /// Returns `None` without touching the session when there is nothing to
    /// evaluate. On success the candidate is replaced by the formatted result
    /// so the next keystrokes continue from it. On failure the candidate is
    /// kept for editing.
    pub fn equals(&mut self) -> Option<Result<Calculation, EvaluationError>> {
        if self.candidate.trim().is_empty() {
            return None;
        }

        match crate::evaluate(&self.candidate) {
            Ok(value) => {
                let result = format_number(value);
                let operation = std::mem::replace(&mut self.candidate, result.clone());
                self.error = None;
                Some(Ok(Calculation {
                    operation,
                    result,
                    value,
                }))
            }
            Err(e) => {
                debug!("Evaluation of \"{}\" failed: {}", self.candidate, e);
                self.error = Some(e.clone());
                Some(Err(e))
            }
        }
    }
}
