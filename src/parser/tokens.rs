//! Token definitions produced by the lexer

use std::fmt;

use crate::ast::{BinaryOp, TrigFn};

/// A lexical unit of an expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Numeric literal text, always of the form `digits[.digits]`
    Number(String),
    /// Single-letter variable name
    Name(char),
    /// `sin`, `cos` or `tan`
    Function(TrigFn),
    /// `+`, `-`, `*`, `/` or `**`
    Operator(BinaryOp),
    LeftParen,
    RightParen,
}

impl Token {
    pub(crate) fn number(text: impl Into<String>) -> Self {
        Token::Number(text.into())
    }

    pub fn is_operator(&self) -> bool {
        matches!(self, Token::Operator(_))
    }

    /// Tokens that can end an operand: `2`, `x`, `)`
    pub(crate) fn ends_operand(&self) -> bool {
        matches!(self, Token::Number(_) | Token::Name(_) | Token::RightParen)
    }

    /// Tokens that can begin an operand: `2`, `x`, `sin`, `(`
    pub(crate) fn starts_operand(&self) -> bool {
        matches!(
            self,
            Token::Number(_) | Token::Name(_) | Token::Function(_) | Token::LeftParen
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(text) => f.write_str(text),
            Token::Name(c) => write!(f, "{}", c),
            Token::Function(func) => write!(f, "{}", func),
            Token::Operator(op) => write!(f, "{}", op),
            Token::LeftParen => f.write_str("("),
            Token::RightParen => f.write_str(")"),
        }
    }
}

/// Render a token sequence with single spaces, e.g. `( 0 - 5 ) + x`
pub fn tokens_to_string(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(Token::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
