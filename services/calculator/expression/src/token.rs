use derive_more::Display;
use nom::IResult;
use nom::{
    branch::alt,
    character::complete::{char, digit0, digit1},
    combinator::{map_res, opt, recognize},
    sequence::pair,
};

use crate::error::EvaluationError;

#[derive(Debug, Display, Clone, Copy, PartialEq)]
pub enum Token {
    #[display(fmt = "{}", _0)]
    Number(f64),
    #[display(fmt = "+")]
    Plus,
    #[display(fmt = "-")]
    Minus,
    #[display(fmt = "*")]
    Star,
    #[display(fmt = "/")]
    Slash,
    #[display(fmt = "(")]
    LParen,
    #[display(fmt = ")")]
    RParen,
}

impl Token {
    fn from_symbol(c: char) -> Option<Token> {
        match c {
            '+' => Some(Token::Plus),
            '-' => Some(Token::Minus),
            '*' => Some(Token::Star),
            '/' => Some(Token::Slash),
            '(' => Some(Token::LParen),
            ')' => Some(Token::RParen),
            _ => None,
        }
    }
}

// Accepts `12`, `12.`, `12.5` and `.5`
fn number_literal(i: &str) -> IResult<&str, &str> {
    recognize(alt((
        recognize(pair(digit1, opt(pair(char('.'), digit0)))),
        recognize(pair(char('.'), digit1)),
    )))(i)
}

fn parse_number(i: &str) -> IResult<&str, f64> {
    map_res(number_literal, |digit_str: &str| digit_str.parse::<f64>())(i)
}

/// Splits `input` into tokens in a single left-to-right scan.
///
/// Whitespace separates tokens but is never emitted.
pub fn tokenize(input: &str) -> Result<Vec<Token>, EvaluationError> {
    let mut tokens = Vec::new();
    let mut rest = input;

    while let Some(c) = rest.chars().next() {
        if c.is_whitespace() {
            rest = &rest[c.len_utf8()..];
            continue;
        }

        if let Some(token) = Token::from_symbol(c) {
            tokens.push(token);
            rest = &rest[1..];
            continue;
        }

        if c.is_ascii_digit() || c == '.' {
            let (remaining, value) = parse_number(rest).map_err(|_| {
                EvaluationError::syntax(format!("malformed number at \"{}\"", rest))
            })?;

            if remaining.starts_with('.') {
                return Err(EvaluationError::syntax(format!(
                    "multiple decimal points in number at \"{}\"",
                    rest
                )));
            }
            if !value.is_finite() {
                return Err(EvaluationError::syntax("number literal out of range"));
            }

            tokens.push(Token::Number(value));
            rest = remaining;
            continue;
        }

        return Err(EvaluationError::syntax(format!(
            "unexpected character '{}'",
            c
        )));
    }

    Ok(tokens)
}
