//! Structural validation of a token sequence before tree construction
//!
//! A sequence accepted here always reduces to exactly one tree in the
//! postfix and tree-building stages.

use crate::ast::BinaryOp;
use crate::parser::tokens::Token;
use crate::{ParseError, ValidationIssue};

/// Validate a token sequence (after implicit multiplication) in a single pass
///
/// Returns the bound variable: the first letter seen, or `None` for a
/// constant expression.
///
/// # Errors
/// `ParseError::Validation` naming the first broken rule and the index of the
/// offending token.
pub fn validate_tokens(tokens: &[Token]) -> Result<Option<char>, ParseError> {
    if tokens.is_empty() {
        return Err(ParseError::EmptyExpression);
    }

    let mut balance: usize = 0;
    let mut variable: Option<char> = None;

    for (index, token) in tokens.iter().enumerate() {
        let prev = index.checked_sub(1).and_then(|i| tokens.get(i));
        let next = tokens.get(index + 1);

        match token {
            Token::LeftParen => {
                balance += 1;
                match next {
                    Some(Token::RightParen) => {
                        return Err(ParseError::invalid(ValidationIssue::EmptyParens, index));
                    }
                    Some(Token::Operator(_)) => {
                        return Err(ParseError::invalid(
                            ValidationIssue::OperatorAtParenBoundary,
                            index + 1,
                        ));
                    }
                    _ => {}
                }
            }

            Token::RightParen => {
                balance = balance
                    .checked_sub(1)
                    .ok_or_else(|| ParseError::invalid(ValidationIssue::UnmatchedClose, index))?;
            }

            Token::Operator(op) => validate_operator(*op, prev, next, index)?,

            Token::Function(_) => {
                if next != Some(&Token::LeftParen) {
                    return Err(ParseError::invalid(
                        ValidationIssue::FunctionWithoutParen,
                        index,
                    ));
                }
            }

            Token::Name(name) => match variable {
                None => variable = Some(*name),
                Some(first) if first != *name => {
                    return Err(ParseError::invalid(
                        ValidationIssue::MultipleVariables {
                            first,
                            second: *name,
                        },
                        index,
                    ));
                }
                Some(_) => {}
            },

            Token::Number(_) => {}
        }
    }

    if balance != 0 {
        return Err(ParseError::invalid_at_end(ValidationIssue::UnclosedParen));
    }

    Ok(variable)
}

fn validate_operator(
    op: BinaryOp,
    prev: Option<&Token>,
    next: Option<&Token>,
    index: usize,
) -> Result<(), ParseError> {
    let Some(prev) = prev else {
        return Err(ParseError::invalid(ValidationIssue::LeadingOperator, index));
    };
    if prev.is_operator() {
        return Err(ParseError::invalid(
            ValidationIssue::AdjacentOperators,
            index,
        ));
    }
    let Some(next) = next else {
        return Err(ParseError::invalid(ValidationIssue::TrailingOperator, index));
    };
    if *next == Token::RightParen {
        return Err(ParseError::invalid(
            ValidationIssue::OperatorAtParenBoundary,
            index,
        ));
    }

    if op == BinaryOp::Pow {
        let base_ok = prev.ends_operand();
        let exponent_ok = matches!(
            next,
            Token::Number(_) | Token::Name(_) | Token::LeftParen
        );
        let self_power = matches!((prev, next), (Token::Name(a), Token::Name(b)) if a == b);
        if !base_ok || !exponent_ok || self_power {
            return Err(ParseError::invalid(ValidationIssue::MalformedPower, index));
        }
    } else if next.is_operator() {
        return Err(ParseError::invalid(
            ValidationIssue::AdjacentOperators,
            index + 1,
        ));
    }

    Ok(())
}
