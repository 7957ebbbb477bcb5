//! Parser module - converts strings to AST
//!
//! Pipeline: lex → implicit multiplication → validate → postfix → tree.
mod implicit_mul;
mod lexer;
mod postfix;
mod tokens;
mod tree;
mod validate;

pub use implicit_mul::insert_implicit_multiplication;
pub use lexer::tokenize;
pub use postfix::to_postfix;
pub use tokens::{Token, tokens_to_string};
pub use validate::validate_tokens;

pub(crate) use tree::TreeLimits;

use crate::{Expr, ParseError};

/// A token sequence that passed validation, with its bound variable
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedExpression {
    pub tokens: Vec<Token>,
    /// `None` for a constant expression such as `2*3`
    pub variable: Option<char>,
}

/// Tokenize and validate a formula string
///
/// # Example
/// ```
/// use graph_morph::parse;
///
/// let parsed = parse("2x + 1").unwrap();
/// assert_eq!(parsed.variable, Some('x'));
/// assert_eq!(graph_morph::parser::tokens_to_string(&parsed.tokens), "2 * x + 1");
/// ```
///
/// # Errors
/// Returns `ParseError` if:
/// - The input is empty
/// - A character matches no token pattern
/// - The token order is structurally invalid
pub fn parse(input: &str) -> Result<ParsedExpression, ParseError> {
    let tokens = tokenize(input)?;
    tracing::trace!(count = tokens.len(), "expression tokenized");

    let tokens = insert_implicit_multiplication(tokens);
    tracing::trace!(tokens = %tokens_to_string(&tokens), "implicit multiplication inserted");

    let variable = validate_tokens(&tokens)?;
    tracing::debug!(input, ?variable, "expression validated");

    Ok(ParsedExpression { tokens, variable })
}

/// Build an expression tree from validated tokens using default limits
///
/// # Errors
/// `MaxDepthExceeded`/`MaxNodesExceeded` for oversized input; `MalformedPostfix`
/// only if the tokens skipped validation.
pub fn build_tree(tokens: Vec<Token>) -> Result<Expr, ParseError> {
    build_tree_with(tokens, TreeLimits::default())
}

pub(crate) fn build_tree_with(tokens: Vec<Token>, limits: TreeLimits) -> Result<Expr, ParseError> {
    let postfix = to_postfix(tokens);
    tracing::trace!(postfix = %tokens_to_string(&postfix), "converted to postfix");
    let tree = tree::build_tree(postfix, limits)?;
    tracing::debug!(tree = %tree, "tree built");
    Ok(tree)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::panic,
    reason = "Standard test relaxations"
)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOp, TrigFn};

    fn tree(input: &str) -> Expr {
        build_tree(parse(input).unwrap().tokens).unwrap()
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(tree("2.75"), Expr::number(2.75));
    }

    #[test]
    fn test_precedence() {
        // x + 2 * 3 should be x + (2 * 3)
        match tree("x+2*3") {
            Expr::Binary {
                op: BinaryOp::Add,
                left,
                right,
            } => {
                assert_eq!(*left, Expr::variable('x'));
                assert!(matches!(*right, Expr::Binary { op: BinaryOp::Mul, .. }));
            }
            other => panic!("Expected Add at top level, got {:?}", other),
        }
    }

    #[test]
    fn test_power_right_associative() {
        let expected = Expr::pow(
            Expr::number(2.0),
            Expr::pow(Expr::number(3.0), Expr::number(2.0)),
        );
        assert_eq!(tree("2**3**2"), expected);
        assert_eq!(tree("2^3^2"), expected);
    }

    #[test]
    fn test_implicit_product_with_function() {
        let expected = Expr::mul_expr(
            Expr::number(3.0),
            Expr::call(TrigFn::Sin, Expr::variable('x')),
        );
        assert_eq!(tree("3sin(x)"), expected);
    }

    #[test]
    fn test_unary_minus_binds_looser_than_power() {
        let expected = Expr::mul_expr(
            Expr::sub_expr(Expr::number(0.0), Expr::number(1.0)),
            Expr::pow(Expr::variable('x'), Expr::number(2.0)),
        );
        assert_eq!(tree("-x^2"), expected);
    }

    #[test]
    fn test_errors_propagate() {
        assert!(parse("x + y").is_err());
        assert!(parse("2 # 3").unwrap_err().is_lexical());
    }
}
