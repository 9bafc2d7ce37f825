//! Arithmetic expressions for a keypad calculator.
//!
//! [`evaluate`] runs the full tokenize, parse and evaluate pipeline over a
//! finished expression. [`guard_accept`] is consulted per keystroke while the
//! expression is still being typed, and [`Session`] ties both together.

use log::trace;

pub use error::EvaluationError;
pub use eval::evaluate_expr;
pub use format::format_number;
pub use guard::{guard_accept, CharClass, GuardDecision, GuardState};
pub use parser::{parse, BinaryOperator, Expr, MAX_DEPTH};
pub use session::{Calculation, Session};
pub use token::{tokenize, Token};

mod error;
mod eval;
mod format;
pub mod guard;
mod parser;
mod session;
mod token;

/// Evaluates a complete expression string such as `"(2+3)*4"`.
pub fn evaluate(expression: &str) -> Result<f64, EvaluationError> {
    let tokens = tokenize(expression)?;
    let expr = parse(tokens)?;
    trace!("Parsed \"{}\" as {:?}", expression, expr);

    let value = evaluate_expr(&expr)?;
    if !value.is_finite() {
        return Err(EvaluationError::Overflow);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eval() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!(evaluate("2+2")?, 4.0);
        assert_eq!(evaluate("2+3*4")?, 14.0);
        assert_eq!(evaluate("(2+3)*4")?, 20.0);
        assert_eq!(evaluate("1.5+2.5")?, 4.0);
        assert_eq!(evaluate("-5+3")?, -2.0);
        assert_eq!(evaluate("--5")?, 5.0);
        assert_eq!(evaluate("34 +6/ 2")?, 37.0);
        assert_eq!(evaluate("(34 +6)/ 2")?, 20.0);
        assert_eq!(evaluate("10-4-3")?, 3.0);
        assert_eq!(evaluate("8/4/2")?, 1.0);
        assert_eq!(evaluate("-(2+3)*2")?, -10.0);
        assert_eq!(evaluate("7/2")?, 3.5);
        Ok(())
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(evaluate("5/0"), Err(EvaluationError::DivisionByZero));
        assert_eq!(evaluate("5/(2-2)"), Err(EvaluationError::DivisionByZero));
        assert_eq!(evaluate("5/-0"), Err(EvaluationError::DivisionByZero));
    }

    #[test]
    fn test_syntax_errors() {
        assert!(matches!(evaluate(""), Err(EvaluationError::SyntaxError(_))));
        assert!(matches!(
            evaluate("(2+3"),
            Err(EvaluationError::SyntaxError(_))
        ));
        assert!(matches!(
            evaluate("2+x"),
            Err(EvaluationError::SyntaxError(_))
        ));
    }

    #[test]
    fn test_overflow() {
        let huge = format!("1{}", "0".repeat(300));
        let expression = format!("{}*{}", huge, huge);
        assert_eq!(evaluate(&expression), Err(EvaluationError::Overflow));
    }

    #[test]
    fn test_long_flat_sum() -> Result<(), Box<dyn std::error::Error>> {
        let at_limit = format!("1{}", "+1".repeat(MAX_DEPTH - 1));
        assert_eq!(evaluate(&at_limit)?, MAX_DEPTH as f64);

        for terms in [20_000, 300_000].iter() {
            let expression = format!("1{}", "+1".repeat(*terms));
            assert!(matches!(
                evaluate(&expression),
                Err(EvaluationError::SyntaxError(_))
            ));
        }
        Ok(())
    }

    #[test]
    fn test_deterministic() -> Result<(), Box<dyn std::error::Error>> {
        for expression in ["1/3", "0.1+0.2", "-7*(3-10)/4"].iter() {
            assert_eq!(evaluate(expression)?, evaluate(expression)?);
        }
        Ok(())
    }

    #[test]
    fn test_result_round_trip() -> Result<(), Box<dyn std::error::Error>> {
        let expressions = [
            "2+2", "1/3", "0.1+0.2", "-5+3", "2/3*-9", "1/7", "123456789*987654321", "0-0",
            "1/1024/1024/1024",
        ];
        for expression in expressions.iter() {
            let value = evaluate(expression)?;
            let chained = evaluate(&format_number(value))?;
            assert_eq!(value, chained, "{}", expression);
        }
        Ok(())
    }
}
