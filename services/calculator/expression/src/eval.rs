use crate::error::EvaluationError;
use crate::parser::{BinaryOperator, Expr};

impl BinaryOperator {
    /// Applies the operator to already evaluated operands.
    pub fn apply(self, left: f64, right: f64) -> Result<f64, EvaluationError> {
        match self {
            BinaryOperator::Add => Ok(left + right),
            BinaryOperator::Sub => Ok(left - right),
            BinaryOperator::Mul => Ok(left * right),
            // Also matches -0.0
            BinaryOperator::Div if right == 0.0 => Err(EvaluationError::DivisionByZero),
            BinaryOperator::Div => Ok(left / right),
        }
    }
}

/// Post-order walk of the tree.
///
/// Division by zero is detected on the evaluated divisor, so `5/(2-2)` fails
/// the same way `5/0` does.
pub fn evaluate_expr(expr: &Expr) -> Result<f64, EvaluationError> {
    match expr {
        Expr::Literal(v) => Ok(*v),
        Expr::UnaryMinus(inner) => Ok(-evaluate_expr(inner)?),
        Expr::BinaryOp(op, l, r) => {
            let left = evaluate_expr(l)?;
            let right = evaluate_expr(r)?;
            op.apply(left, right)
        }
    }
}
