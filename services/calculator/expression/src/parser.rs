use std::iter::Peekable;

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::error::EvaluationError;
use crate::token::Token;

/// Deepest expression accepted, counted two ways: the depth of the tree
/// (`1+1+1` is three levels, `--5` is three) and the nesting of groups and
/// signs while parsing (`((5))` is three). Both the evaluator and `Drop` for
/// `Expr` recurse once per tree level.
pub const MAX_DEPTH: usize = 512;

#[derive(Debug, Display, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOperator {
    #[display(fmt = "+")]
    Add,
    #[display(fmt = "-")]
    Sub,
    #[display(fmt = "*")]
    Mul,
    #[display(fmt = "/")]
    Div,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(f64),
    UnaryMinus(Box<Expr>),
    BinaryOp(BinaryOperator, Box<Expr>, Box<Expr>),
}

// A parsed subtree and its depth
type Node = (Expr, usize);

fn too_deep() -> EvaluationError {
    EvaluationError::syntax("expression nested too deeply")
}

fn checked(depth: usize) -> Result<usize, EvaluationError> {
    if depth > MAX_DEPTH {
        return Err(too_deep());
    }
    Ok(depth)
}

struct Parser {
    tokens: Peekable<std::vec::IntoIter<Token>>,
    nesting: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Parser {
        Parser {
            tokens: tokens.into_iter().peekable(),
            nesting: 0,
        }
    }

    fn binary(op: BinaryOperator, left: Node, right: Node) -> Result<Node, EvaluationError> {
        let depth = checked(1 + left.1.max(right.1))?;
        Ok((
            Expr::BinaryOp(op, Box::new(left.0), Box::new(right.0)),
            depth,
        ))
    }

    // expression := term (('+' | '-') term)*
    fn expression(&mut self) -> Result<Node, EvaluationError> {
        let mut left = self.term()?;
        loop {
            let op = match self.tokens.peek() {
                Some(Token::Plus) => BinaryOperator::Add,
                Some(Token::Minus) => BinaryOperator::Sub,
                _ => return Ok(left),
            };
            self.tokens.next();
            let right = self.term()?;
            left = Self::binary(op, left, right)?;
        }
    }

    // term := factor (('*' | '/') factor)*
    fn term(&mut self) -> Result<Node, EvaluationError> {
        let mut left = self.factor()?;
        loop {
            let op = match self.tokens.peek() {
                Some(Token::Star) => BinaryOperator::Mul,
                Some(Token::Slash) => BinaryOperator::Div,
                _ => return Ok(left),
            };
            self.tokens.next();
            let right = self.factor()?;
            left = Self::binary(op, left, right)?;
        }
    }

    // factor := '-' factor | NUMBER | '(' expression ')'
    fn factor(&mut self) -> Result<Node, EvaluationError> {
        self.nesting += 1;
        if self.nesting > MAX_DEPTH {
            return Err(too_deep());
        }

        let factor = match self.tokens.next() {
            Some(Token::Minus) => {
                let (inner, depth) = self.factor()?;
                (Expr::UnaryMinus(Box::new(inner)), checked(depth + 1)?)
            }
            Some(Token::Number(v)) => (Expr::Literal(v), 1),
            Some(Token::LParen) => {
                let inner = self.expression()?;
                match self.tokens.next() {
                    Some(Token::RParen) => inner,
                    Some(token) => {
                        return Err(EvaluationError::syntax(format!(
                            "unbalanced parentheses: expected ')' but found '{}'",
                            token
                        )))
                    }
                    None => {
                        return Err(EvaluationError::syntax(
                            "unbalanced parentheses: missing ')'",
                        ))
                    }
                }
            }
            Some(token) => {
                return Err(EvaluationError::syntax(format!(
                    "missing operand before '{}'",
                    token
                )))
            }
            None => {
                return Err(EvaluationError::syntax(
                    "missing operand at end of expression",
                ))
            }
        };
        self.nesting -= 1;
        Ok(factor)
    }
}

/// Builds an expression tree from `tokens`, honouring precedence and grouping.
///
/// The whole token sequence must form exactly one expression.
pub fn parse(tokens: Vec<Token>) -> Result<Expr, EvaluationError> {
    if tokens.is_empty() {
        return Err(EvaluationError::syntax("empty expression"));
    }

    let mut parser = Parser::new(tokens);
    let (expr, _) = parser.expression()?;

    match parser.tokens.next() {
        None => Ok(expr),
        Some(Token::RParen) => Err(EvaluationError::syntax(
            "unbalanced parentheses: unexpected ')'",
        )),
        Some(token) => Err(EvaluationError::syntax(format!(
            "unexpected '{}' after expression",
            token
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::tokenize;

    fn parse_str(i: &str) -> Result<Expr, EvaluationError> {
        parse(tokenize(i)?)
    }

    fn lit(v: f64) -> Box<Expr> {
        Box::new(Expr::Literal(v))
    }

    #[test]
    fn test_precedence() -> Result<(), Box<dyn std::error::Error>> {
        let expr = parse_str("2+3*4")?;
        assert_eq!(
            expr,
            Expr::BinaryOp(
                BinaryOperator::Add,
                lit(2.0),
                Box::new(Expr::BinaryOp(BinaryOperator::Mul, lit(3.0), lit(4.0)))
            )
        );
        Ok(())
    }

    #[test]
    fn test_left_associative() -> Result<(), Box<dyn std::error::Error>> {
        let expr = parse_str("332+23.0- 15")?;
        match expr {
            Expr::BinaryOp(BinaryOperator::Sub, l, r) => {
                assert_eq!(
                    *l,
                    Expr::BinaryOp(BinaryOperator::Add, lit(332.0), lit(23.0))
                );
                assert_eq!(r, lit(15.0));
            }
            _ => panic!("{:?} doesn't match", expr),
        }
        Ok(())
    }

    #[test]
    fn test_grouping() -> Result<(), Box<dyn std::error::Error>> {
        let expr = parse_str("(2+3)*4")?;
        assert_eq!(
            expr,
            Expr::BinaryOp(
                BinaryOperator::Mul,
                Box::new(Expr::BinaryOp(BinaryOperator::Add, lit(2.0), lit(3.0))),
                lit(4.0)
            )
        );
        Ok(())
    }

    #[test]
    fn test_unary_minus() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!(
            parse_str("--5")?,
            Expr::UnaryMinus(Box::new(Expr::UnaryMinus(lit(5.0))))
        );

        // Binds tighter than multiplication
        assert_eq!(
            parse_str("-2*3")?,
            Expr::BinaryOp(
                BinaryOperator::Mul,
                Box::new(Expr::UnaryMinus(lit(2.0))),
                lit(3.0)
            )
        );

        assert_eq!(
            parse_str("3*-(1)")?,
            Expr::BinaryOp(
                BinaryOperator::Mul,
                lit(3.0),
                Box::new(Expr::UnaryMinus(lit(1.0)))
            )
        );
        Ok(())
    }

    #[test]
    fn test_syntax_errors() {
        let cases = [
            "", "(2+3", "2+3)", "2+", "*2", "2*/3", "()", "1 2", "(", ")(",
        ];
        for case in cases.iter() {
            match parse_str(case) {
                Err(EvaluationError::SyntaxError(_)) => {}
                other => panic!("{:?} produced {:?}", case, other),
            }
        }
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            parse(vec![]).unwrap_err(),
            EvaluationError::syntax("empty expression")
        );
        assert_eq!(
            parse_str("(2+3").unwrap_err(),
            EvaluationError::syntax("unbalanced parentheses: missing ')'")
        );
        assert_eq!(
            parse_str("2+3)").unwrap_err(),
            EvaluationError::syntax("unbalanced parentheses: unexpected ')'")
        );
        assert_eq!(
            parse_str("2*").unwrap_err(),
            EvaluationError::syntax("missing operand at end of expression")
        );
    }

    fn assert_too_deep(i: &str) {
        assert_eq!(
            parse_str(i).unwrap_err(),
            EvaluationError::syntax("expression nested too deeply")
        );
    }

    #[test]
    fn test_group_nesting_limit() {
        let at_limit = format!(
            "{}1{}",
            "(".repeat(MAX_DEPTH - 1),
            ")".repeat(MAX_DEPTH - 1)
        );
        assert_eq!(parse_str(&at_limit), Ok(Expr::Literal(1.0)));

        assert_too_deep(&format!(
            "{}1{}",
            "(".repeat(MAX_DEPTH),
            ")".repeat(MAX_DEPTH)
        ));
    }

    #[test]
    fn test_sign_nesting_limit() -> Result<(), Box<dyn std::error::Error>> {
        // 300 signs are well inside the limit
        parse_str(&format!("{}5", "-".repeat(300)))?;
        parse_str(&format!("{}5", "-".repeat(MAX_DEPTH - 1)))?;

        assert_too_deep(&format!("{}5", "-".repeat(MAX_DEPTH)));
        Ok(())
    }

    #[test]
    fn test_flat_chain_limit() -> Result<(), Box<dyn std::error::Error>> {
        parse_str(&format!("1{}", "+1".repeat(MAX_DEPTH - 1)))?;
        parse_str(&format!("1{}", "*2".repeat(MAX_DEPTH - 1)))?;

        assert_too_deep(&format!("1{}", "+1".repeat(MAX_DEPTH)));
        assert_too_deep(&format!("1{}", "/1".repeat(MAX_DEPTH)));
        Ok(())
    }

    #[test]
    fn test_long_flat_sum_rejected() {
        assert_too_deep(&format!("1{}", "+1".repeat(300_000)));
    }
}
