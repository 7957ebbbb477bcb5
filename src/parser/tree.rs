//! Postfix tokens to expression tree

use crate::ast::Expr;
use crate::parser::tokens::Token;
use crate::ParseError;

/// Safety limits checked while the tree is assembled
#[derive(Debug, Clone, Copy)]
pub(crate) struct TreeLimits {
    pub max_depth: usize,
    pub max_nodes: usize,
}

impl Default for TreeLimits {
    fn default() -> Self {
        TreeLimits {
            max_depth: crate::DEFAULT_MAX_DEPTH,
            max_nodes: crate::DEFAULT_MAX_NODES,
        }
    }
}

fn literal(text: &str) -> Result<Expr, ParseError> {
    text.parse::<f64>()
        .map(Expr::number)
        .map_err(|_| ParseError::InvalidNumber {
            value: text.to_string(),
        })
}

/// Consume postfix tokens into a single tree
///
/// Iterative: each stack entry carries the depth of its subtree so deep
/// input is rejected without recursing.
///
/// # Errors
/// `MalformedPostfix` if the sequence does not reduce to exactly one node;
/// validated input never triggers it. `MaxDepthExceeded`/`MaxNodesExceeded`
/// when the limits are hit.
pub(crate) fn build_tree(postfix: Vec<Token>, limits: TreeLimits) -> Result<Expr, ParseError> {
    if postfix.len() > limits.max_nodes {
        return Err(ParseError::MaxNodesExceeded);
    }

    let mut stack: Vec<(Expr, usize)> = Vec::with_capacity(postfix.len());

    for token in postfix {
        let entry = match token {
            Token::Number(text) => (literal(&text)?, 1),
            Token::Name(name) => (Expr::variable(name), 1),
            Token::Function(func) => {
                let (arg, depth) = stack.pop().ok_or(ParseError::MalformedPostfix)?;
                (Expr::call(func, arg), depth + 1)
            }
            Token::Operator(op) => {
                // Right operand sits on top
                let (right, right_depth) = stack.pop().ok_or(ParseError::MalformedPostfix)?;
                let (left, left_depth) = stack.pop().ok_or(ParseError::MalformedPostfix)?;
                (
                    Expr::binary(op, left, right),
                    left_depth.max(right_depth) + 1,
                )
            }
            Token::LeftParen | Token::RightParen => return Err(ParseError::MalformedPostfix),
        };

        if entry.1 > limits.max_depth {
            return Err(ParseError::MaxDepthExceeded);
        }
        stack.push(entry);
    }

    let root = stack.pop().ok_or(ParseError::MalformedPostfix)?;
    if !stack.is_empty() {
        tracing::error!(leftover = stack.len(), "postfix left extra operands");
        return Err(ParseError::MalformedPostfix);
    }
    Ok(root.0)
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

    fn num(text: &str) -> Token {
        Token::number(text)
    }

    #[test]
    fn test_operand_order() {
        // 8 2 -  →  8 - 2
        let postfix = vec![num("8"), num("2"), Token::Operator(BinaryOp::Sub)];
        let tree = build_tree(postfix, TreeLimits::default()).unwrap();
        assert_eq!(tree, Expr::sub_expr(Expr::number(8.0), Expr::number(2.0)));
    }

    #[test]
    fn test_function_wraps_single_operand() {
        let postfix = vec![Token::Name('x'), Token::Function(TrigFn::Cos)];
        let tree = build_tree(postfix, TreeLimits::default()).unwrap();
        assert_eq!(tree, Expr::call(TrigFn::Cos, Expr::variable('x')));
    }

    #[test]
    fn test_underflow_is_reported() {
        let postfix = vec![num("1"), Token::Operator(BinaryOp::Add)];
        assert_eq!(
            build_tree(postfix, TreeLimits::default()),
            Err(ParseError::MalformedPostfix)
        );
    }

    #[test]
    fn test_leftover_operands_are_reported() {
        let postfix = vec![num("1"), num("2")];
        assert_eq!(
            build_tree(postfix, TreeLimits::default()),
            Err(ParseError::MalformedPostfix)
        );
    }

    #[test]
    fn test_depth_limit() {
        let mut postfix = vec![Token::Name('x')];
        postfix.extend(std::iter::repeat_n(Token::Function(TrigFn::Sin), 10));
        let limits = TreeLimits {
            max_depth: 5,
            max_nodes: 100,
        };
        assert_eq!(
            build_tree(postfix, limits),
            Err(ParseError::MaxDepthExceeded)
        );
    }

    #[test]
    fn test_node_limit() {
        let postfix = vec![num("1"), num("2"), Token::Operator(BinaryOp::Add)];
        let limits = TreeLimits {
            max_depth: 10,
            max_nodes: 2,
        };
        assert_eq!(
            build_tree(postfix, limits),
            Err(ParseError::MaxNodesExceeded)
        );
    }
}
