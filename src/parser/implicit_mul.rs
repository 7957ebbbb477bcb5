//! Implicit multiplication insertion for natural notation
//!
//! Inserts `*` operators between tokens where multiplication is implied, e.g. `2x` → `2 * x`.

use crate::ast::BinaryOp;
use crate::parser::tokens::Token;

/// Check if implicit multiplication should be inserted between two tokens
///
/// Left side ends an operand (`2`, `x`, `)`), right side starts one
/// (`x`, `sin`, `(`, `2`).
fn should_insert_mul(current: &Token, next: &Token) -> bool {
    match (current, next) {
        // 2x, 2sin, 2(, x y, x sin, x(, x2, )x, )sin, )(, )2
        (
            Token::Number(_) | Token::Name(_) | Token::RightParen,
            Token::Name(_) | Token::Function(_) | Token::LeftParen | Token::Number(_),
        ) => true,

        // Function followed by ( is a call, never multiplication
        _ => false,
    }
}

/// Insert implicit multiplication operators between appropriate tokens
///
/// Single left-to-right pass; the output is never shorter than the input.
pub fn insert_implicit_multiplication(tokens: Vec<Token>) -> Vec<Token> {
    if tokens.is_empty() {
        return tokens;
    }

    // Skip the rebuild when nothing is implied
    let needs_insertion = tokens
        .windows(2)
        .any(|w| should_insert_mul(&w[0], &w[1]));

    if !needs_insertion {
        return tokens;
    }

    #[allow(
        clippy::integer_division,
        reason = "Integer division for capacity estimation in token vector"
    )]
    let mut result = Vec::with_capacity(tokens.len() * 3 / 2);
    let mut it = tokens.into_iter().peekable();

    while let Some(current) = it.next() {
        let needs_mul = it
            .peek()
            .is_some_and(|next| should_insert_mul(&current, next));

        result.push(current);
        if needs_mul {
            result.push(Token::Operator(BinaryOp::Mul));
        }
    }

    result
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Standard test relaxations")]
mod tests {
    use super::*;
    use crate::ast::TrigFn;
    use crate::parser::lexer::tokenize;

    fn mul() -> Token {
        Token::Operator(BinaryOp::Mul)
    }

    #[test]
    fn test_number_identifier() {
        let tokens = vec![Token::number("2"), Token::Name('x')];
        let result = insert_implicit_multiplication(tokens);
        assert_eq!(result, vec![Token::number("2"), mul(), Token::Name('x')]);
    }

    #[test]
    fn test_paren_function() {
        let tokens = vec![Token::RightParen, Token::Function(TrigFn::Sin)];
        let result = insert_implicit_multiplication(tokens);
        assert_eq!(result.len(), 3);
        assert_eq!(result[1], mul());
    }

    #[test]
    fn test_name_paren_and_paren_paren() {
        let result = insert_implicit_multiplication(tokenize("x(x+1)(x-1)").unwrap());
        let muls = result.iter().filter(|t| **t == mul()).count();
        assert_eq!(muls, 2);
    }

    #[test]
    fn test_function_no_multiplication() {
        let tokens = vec![Token::Function(TrigFn::Cos), Token::LeftParen];
        let result = insert_implicit_multiplication(tokens);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_implicit_matches_explicit() {
        let implicit = insert_implicit_multiplication(tokenize("2x").unwrap());
        let explicit = insert_implicit_multiplication(tokenize("2*x").unwrap());
        assert_eq!(implicit, explicit);
    }

    #[test]
    fn test_operator_neighbours_untouched() {
        let tokens = tokenize("x+2").unwrap();
        let result = insert_implicit_multiplication(tokens.clone());
        assert_eq!(result, tokens);
    }
}
