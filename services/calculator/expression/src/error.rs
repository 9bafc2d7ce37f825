use derive_more::Display;
use strum_macros::IntoStaticStr;

/// Failure classes for evaluating an expression string.
///
/// Every variant is recoverable: the caller keeps the unevaluated input so it
/// can be edited and resubmitted.
#[derive(Debug, Display, Clone, PartialEq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum EvaluationError {
    #[display(fmt = "Syntax Error: {}", _0)]
    SyntaxError(String),

    #[display(fmt = "Division By Zero")]
    DivisionByZero,

    #[display(fmt = "Overflow")]
    Overflow,
}

impl EvaluationError {
    pub(crate) fn syntax<S: Into<String>>(message: S) -> Self {
        EvaluationError::SyntaxError(message.into())
    }

    /// Stable machine-readable tag, e.g. `syntax_error`
    pub fn kind(&self) -> &'static str {
        self.into()
    }
}

impl std::error::Error for EvaluationError {}
