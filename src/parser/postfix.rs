//! Shunting-yard conversion from infix to postfix token order

use crate::ast::BinaryOp;
use crate::parser::tokens::Token;

/// Should `top` (on the operator stack) be output before pushing `incoming`?
fn pops_before(top: BinaryOp, incoming: BinaryOp) -> bool {
    top.precedence() > incoming.precedence()
        || (top.precedence() == incoming.precedence() && !incoming.is_right_associative())
}

/// Reorder validated tokens into postfix (Reverse Polish) form
///
/// Functions sit on the operator stack until their closing parenthesis;
/// `**` is right associative, so `2**3**2` becomes `2 3 2 ** **`.
pub fn to_postfix(tokens: Vec<Token>) -> Vec<Token> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Token> = Vec::new();

    for token in tokens {
        match token {
            Token::Number(_) | Token::Name(_) => output.push(token),

            Token::Function(_) | Token::LeftParen => stack.push(token),

            Token::Operator(op) => {
                while let Some(Token::Operator(top)) = stack.last() {
                    if !pops_before(*top, op) {
                        break;
                    }
                    output.extend(stack.pop());
                }
                stack.push(token);
            }

            Token::RightParen => {
                while let Some(top) = stack.pop() {
                    if top == Token::LeftParen {
                        break;
                    }
                    output.push(top);
                }
                if matches!(stack.last(), Some(Token::Function(_))) {
                    output.extend(stack.pop());
                }
            }
        }
    }

    while let Some(top) = stack.pop() {
        output.push(top);
    }

    output
}
