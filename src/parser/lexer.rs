//! Lexer: raw text to a linear token sequence
//!
//! Whitespace is stripped and `^` becomes `**` before scanning. At each
//! position the patterns are tried in a fixed order: number, function name,
//! single letter, operator, parenthesis.

use crate::ast::{BinaryOp, TrigFn};
use crate::parser::tokens::Token;
use crate::{ParseError, Span};

/// Strip all whitespace and normalize `^` to `**`
pub(crate) fn normalize(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .replace('^', "**")
}

struct Lexer {
    chars: Vec<char>,
    pos: usize,
    tokens: Vec<Token>,
}

/// Tokenize an expression
///
/// A unary `-` never reaches later stages as a bare operator:
/// - followed by a number it becomes `( 0 - n )`
/// - followed by a letter, function or `(` it becomes `( 0 - 1 ) *`,
///   except directly after `**`, where it is left for validation to reject
/// - after `/` the division moves past the sign: `a / -u` becomes
///   `a * ( 0 - 1 ) / u`
///
/// # Errors
/// `ParseError::InvalidCharacter` when no pattern matches; no partial token
/// list is returned.
pub fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
    let normalized = normalize(input);
    if normalized.is_empty() {
        return Err(ParseError::EmptyExpression);
    }

    let chars: Vec<char> = normalized.chars().collect();
    let mut lexer = Lexer {
        tokens: Vec::with_capacity(chars.len()),
        chars,
        pos: 0,
    };

    while lexer.pos < lexer.chars.len() {
        lexer.next_token()?;
    }

    Ok(lexer.tokens)
}

impl Lexer {
    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn next_token(&mut self) -> Result<(), ParseError> {
        if let Some(text) = self.scan_number(self.pos) {
            self.pos += text.chars().count();
            self.tokens.push(Token::Number(normalize_number(&text)));
            return Ok(());
        }

        if let Some(func) = self.scan_function() {
            self.pos += func.name().len();
            self.tokens.push(Token::Function(func));
            return Ok(());
        }

        let Some(c) = self.peek(0) else {
            return Ok(());
        };

        if c.is_ascii_alphabetic() {
            self.pos += 1;
            self.tokens.push(Token::Name(c));
            return Ok(());
        }

        match c {
            '*' if self.peek(1) == Some('*') => {
                self.pos += 2;
                self.tokens.push(Token::Operator(BinaryOp::Pow));
            }
            '*' => self.push_op(BinaryOp::Mul),
            '/' => self.push_op(BinaryOp::Div),
            '+' => self.push_op(BinaryOp::Add),
            '-' => self.lex_minus(),
            '(' => {
                self.pos += 1;
                self.tokens.push(Token::LeftParen);
            }
            ')' => {
                self.pos += 1;
                self.tokens.push(Token::RightParen);
            }
            _ => {
                return Err(ParseError::InvalidCharacter {
                    ch: c,
                    span: Span::at(self.pos),
                });
            }
        }
        Ok(())
    }

    fn push_op(&mut self, op: BinaryOp) {
        self.pos += 1;
        self.tokens.push(Token::Operator(op));
    }

    /// `-` in unary position is rewritten, everywhere else it is subtraction
    fn lex_minus(&mut self) {
        let unary = matches!(
            self.tokens.last(),
            None | Some(Token::Operator(_)) | Some(Token::LeftParen)
        );
        if !unary {
            self.push_op(BinaryOp::Sub);
            return;
        }

        if let Some(text) = self.scan_number(self.pos + 1) {
            self.pos += 1 + text.chars().count();
            self.tokens.extend([
                Token::LeftParen,
                Token::number("0"),
                Token::Operator(BinaryOp::Sub),
                Token::Number(normalize_number(&text)),
                Token::RightParen,
            ]);
            return;
        }

        let after_pow = matches!(self.tokens.last(), Some(Token::Operator(BinaryOp::Pow)));
        let operand_follows = self
            .peek(1)
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '(');
        if operand_follows && !after_pow {
            self.pos += 1;
            // `a / -u` is `a * (0 - 1) / u`: the negation must not end up
            // in the divisor's place
            let divides = self.tokens.last() == Some(&Token::Operator(BinaryOp::Div));
            let (prefix_op, suffix_op) = if divides {
                self.tokens.pop();
                (Some(Token::Operator(BinaryOp::Mul)), BinaryOp::Div)
            } else {
                (None, BinaryOp::Mul)
            };
            self.tokens.extend(prefix_op);
            self.tokens.extend([
                Token::LeftParen,
                Token::number("0"),
                Token::Operator(BinaryOp::Sub),
                Token::number("1"),
                Token::RightParen,
                Token::Operator(suffix_op),
            ]);
            return;
        }

        self.push_op(BinaryOp::Sub);
    }

    /// Match `\d+(\.\d*)?|\.\d+` starting at `start`
    fn scan_number(&self, start: usize) -> Option<String> {
        let digits_from = |mut i: usize| {
            while self.chars.get(i).is_some_and(char::is_ascii_digit) {
                i += 1;
            }
            i
        };

        let first = *self.chars.get(start)?;
        let end = if first.is_ascii_digit() {
            let int_end = digits_from(start);
            if self.chars.get(int_end) == Some(&'.') {
                digits_from(int_end + 1)
            } else {
                int_end
            }
        } else if first == '.' && self.chars.get(start + 1).is_some_and(char::is_ascii_digit) {
            digits_from(start + 1)
        } else {
            return None;
        };

        Some(self.chars[start..end].iter().collect())
    }

    fn scan_function(&self) -> Option<TrigFn> {
        let rest = self.chars.get(self.pos..self.pos + 3)?;
        let word: String = rest.iter().collect();
        TrigFn::from_name(&word)
    }
}

/// `.5` becomes `0.5` and `2.` becomes `2.0` so every literal parses as `f64`
fn normalize_number(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    if text.starts_with('.') {
        out.push('0');
    }
    out.push_str(text);
    if text.ends_with('.') {
        out.push('0');
    }
    out
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::panic,
    reason = "Standard test relaxations"
)]
mod tests {
    use super::*;
    use crate::parser::tokens::tokens_to_string;

    fn lex(input: &str) -> String {
        tokens_to_string(&tokenize(input).unwrap())
    }

    #[test]
    fn test_numbers() {
        assert_eq!(lex("3.25"), "3.25");
        assert_eq!(lex(".5"), "0.5");
        assert_eq!(lex("2."), "2.0");
        assert_eq!(lex("2.3.4"), "2.3 0.4");
    }

    #[test]
    fn test_whitespace_and_caret() {
        assert_eq!(lex(" x ^ 2 "), "x ** 2");
        assert_eq!(lex("x**2"), "x ** 2");
    }

    #[test]
    fn test_function_before_letter() {
        let tokens = tokenize("sinx").unwrap();
        assert_eq!(tokens, vec![Token::Function(TrigFn::Sin), Token::Name('x')]);
        // "sec" is not a function: three separate letters
        assert_eq!(lex("sec"), "s e c");
    }

    #[test]
    fn test_unary_minus_number() {
        assert_eq!(lex("-5+x"), "( 0 - 5 ) + x");
        assert_eq!(lex("2*-3"), "2 * ( 0 - 3 )");
        assert_eq!(lex("(-2.5)"), "( ( 0 - 2.5 ) )");
        assert_eq!(lex("x**-2"), "x ** ( 0 - 2 )");
    }

    #[test]
    fn test_unary_minus_operand() {
        assert_eq!(lex("-x"), "( 0 - 1 ) * x");
        assert_eq!(lex("-sin(x)"), "( 0 - 1 ) * sin ( x )");
        assert_eq!(lex("3*-(x)"), "3 * ( 0 - 1 ) * ( x )");
    }

    #[test]
    fn test_unary_minus_operand_after_division() {
        assert_eq!(lex("1/-x"), "1 * ( 0 - 1 ) / x");
        assert_eq!(lex("x/-(x+1)"), "x * ( 0 - 1 ) / ( x + 1 )");
        assert_eq!(lex("x/-2"), "x / ( 0 - 2 )");
    }

    #[test]
    fn test_unary_minus_after_power_left_bare() {
        assert_eq!(lex("x**-x"), "x ** - x");
    }

    #[test]
    fn test_binary_minus() {
        assert_eq!(lex("x-5"), "x - 5");
        assert_eq!(lex("(x)-1"), "( x ) - 1");
    }

    #[test]
    fn test_invalid_character() {
        let err = tokenize("2x + $").unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidCharacter {
                ch: '$',
                span: Span::at(3)
            }
        );
        assert!(err.is_lexical());
    }

    #[test]
    fn test_span_counts_characters() {
        // 'é' is two bytes but one position
        let err = tokenize("x + é").unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidCharacter {
                ch: 'é',
                span: Span::new(2, 3)
            }
        );
        assert_eq!(err.to_string().matches("position 3").count(), 1);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(tokenize("   "), Err(ParseError::EmptyExpression));
    }
}
