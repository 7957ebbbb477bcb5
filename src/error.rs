use thiserror::Error;

use crate::ast::TrigFn;

/// Source location span for error reporting
///
/// Offsets are character positions in the whitespace-stripped,
/// caret-normalized input that the lexer actually scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Start position (0-indexed character offset)
    pub start: usize,
    /// End position (exclusive, 0-indexed character offset)
    pub end: usize,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// Create a span for a single position
    pub fn at(pos: usize) -> Self {
        Span {
            start: pos,
            end: pos + 1,
        }
    }

    /// Check if this span has valid location info
    pub fn is_valid(&self) -> bool {
        self.end > self.start
    }

    /// Format the span for display (1-indexed for users)
    pub fn display(&self) -> String {
        if !self.is_valid() {
            String::new()
        } else if self.end - self.start == 1 {
            format!(" at position {}", self.start + 1)
        } else {
            format!(" at positions {}-{}", self.start + 1, self.end)
        }
    }
}

fn token_suffix(token: &Option<usize>) -> String {
    token.map_or(String::new(), |i| format!(" at token {}", i + 1))
}

/// The structural rule a token sequence broke during validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationIssue {
    /// A `)` appeared with no open `(`
    UnmatchedClose,
    /// Input ended with `(` still open
    UnclosedParen,
    /// Two operators next to each other
    AdjacentOperators,
    /// Expression starts with a binary operator
    LeadingOperator,
    /// Expression ends with a binary operator
    TrailingOperator,
    /// `sin`/`cos`/`tan` not immediately followed by `(`
    FunctionWithoutParen,
    /// More than one distinct variable letter
    MultipleVariables { first: char, second: char },
    /// `**` with an invalid base or exponent start, or `x ** x`
    MalformedPower,
    /// `()`
    EmptyParens,
    /// An operator directly inside a parenthesis boundary, e.g. `(*x` or `x+)`
    OperatorAtParenBoundary,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationIssue::UnmatchedClose => write!(f, "unmatched ')'"),
            ValidationIssue::UnclosedParen => write!(f, "unclosed '('"),
            ValidationIssue::AdjacentOperators => write!(f, "two operators in a row"),
            ValidationIssue::LeadingOperator => write!(f, "expression starts with an operator"),
            ValidationIssue::TrailingOperator => write!(f, "expression ends with an operator"),
            ValidationIssue::FunctionWithoutParen => {
                write!(f, "function name must be followed by '('")
            }
            ValidationIssue::MultipleVariables { first, second } => write!(
                f,
                "only one variable is allowed, found '{}' and '{}'",
                first, second
            ),
            ValidationIssue::MalformedPower => write!(f, "malformed power expression"),
            ValidationIssue::EmptyParens => write!(f, "empty parentheses"),
            ValidationIssue::OperatorAtParenBoundary => {
                write!(f, "operator next to a parenthesis has no operand")
            }
        }
    }
}

/// Errors produced by the parse pipeline (lexing, validation, tree building)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("Expression cannot be empty")]
    EmptyExpression,

    #[error("Invalid character '{ch}'{}", .span.display())]
    InvalidCharacter { ch: char, span: Span },

    #[error("Invalid number format: '{value}'")]
    InvalidNumber { value: String },

    /// `token` is the 0-indexed position in the token sequence after
    /// implicit multiplication was inserted
    #[error("Invalid expression: {reason}{}", token_suffix(.token))]
    Validation {
        reason: ValidationIssue,
        token: Option<usize>,
    },

    /// Postfix sequence did not reduce to exactly one tree.
    /// Unreachable when validation accepted the tokens.
    #[error("Malformed postfix sequence")]
    MalformedPostfix,

    #[error("Expression nesting depth exceeds maximum limit")]
    MaxDepthExceeded,

    #[error("Expression size exceeds maximum node count limit")]
    MaxNodesExceeded,
}

impl ParseError {
    pub(crate) fn invalid(reason: ValidationIssue, index: usize) -> Self {
        ParseError::Validation {
            reason,
            token: Some(index),
        }
    }

    pub(crate) fn invalid_at_end(reason: ValidationIssue) -> Self {
        ParseError::Validation {
            reason,
            token: None,
        }
    }

    /// The validation rule that failed, if this is a validation error
    pub fn validation_issue(&self) -> Option<ValidationIssue> {
        match self {
            ParseError::Validation { reason, .. } => Some(*reason),
            _ => None,
        }
    }

    /// True for failures caused by the characters themselves rather than their order
    pub fn is_lexical(&self) -> bool {
        matches!(self, ParseError::InvalidCharacter { .. })
    }
}

/// The construct the differentiation engine refuses to handle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Unsupported {
    /// `tan(u)` is outside the supported rule set
    Tangent,
    /// `u ** c` where `c` is constant but not an integer
    NonIntegerExponent(f64),
    /// `u ** v` where `v` depends on the variable
    VariableExponent,
}

impl std::fmt::Display for Unsupported {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Unsupported::Tangent => write!(f, "derivative of {} is not supported", TrigFn::Tan),
            Unsupported::NonIntegerExponent(n) => {
                write!(f, "power rule needs an integer exponent, got {}", n)
            }
            Unsupported::VariableExponent => {
                write!(f, "exponent depends on the variable")
            }
        }
    }
}

/// Errors that can occur during differentiation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DiffError {
    #[error("Cannot differentiate: {0}")]
    Unsupported(Unsupported),
}

/// Errors raised while building or queueing transformations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    #[error("Invalid transformation amount: {0}")]
    InvalidAmount(#[source] ParseError),

    #[error("Transformation amount cannot contain the variable '{0}'")]
    AmountHasVariable(char),

    #[error("Transformation amount must be a finite number")]
    NonFiniteAmount,

    #[error("Stretch factor cannot be zero")]
    ZeroStretch,

    #[error("Transformation queue is full (capacity {capacity})")]
    QueueFull { capacity: usize },
}

/// Any failure of the string-in, string-out helpers
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Diff(#[from] DiffError),

    #[error(transparent)]
    Transform(#[from] TransformError),
}
