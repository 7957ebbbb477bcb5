//! Builder pattern API for parsing with custom limits
//!
//! # Example
//! ```
//! use graph_morph::Parser;
//!
//! let f = Parser::new()
//!     .max_depth(20)
//!     .parse_function("sin(2x) + x^2")
//!     .unwrap();
//! assert_eq!(f.variable(), Some('x'));
//! ```

use crate::parser::{self, Token, TreeLimits};
use crate::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_NODES, Expr, Function, ParseError};

/// Builder for parse operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parser {
    max_depth: usize,
    max_nodes: usize,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    /// Create a parser with [`DEFAULT_MAX_DEPTH`] and [`DEFAULT_MAX_NODES`]
    pub fn new() -> Self {
        Parser {
            max_depth: DEFAULT_MAX_DEPTH,
            max_nodes: DEFAULT_MAX_NODES,
        }
    }

    /// Set maximum AST depth
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set maximum AST node count
    pub fn max_nodes(mut self, nodes: usize) -> Self {
        self.max_nodes = nodes;
        self
    }

    fn limits(&self) -> TreeLimits {
        TreeLimits {
            max_depth: self.max_depth,
            max_nodes: self.max_nodes,
        }
    }

    /// Parse a formula into a bare tree
    ///
    /// # Errors
    /// Lexical and validation errors, or a limit error when the tree is too
    /// deep or too large.
    pub fn parse(&self, formula: &str) -> Result<Expr, ParseError> {
        let parsed = parser::parse(formula)?;
        self.build(parsed.tokens)
    }

    /// Parse a formula into a [`Function`] bound to its variable
    ///
    /// # Errors
    /// Same as [`Parser::parse`].
    pub fn parse_function(&self, formula: &str) -> Result<Function, ParseError> {
        let parsed = parser::parse(formula)?;
        let tree = self.build(parsed.tokens)?;
        Ok(Function::from_parts(tree, parsed.variable))
    }

    /// Tokens here passed validation: a malformed postfix is a validator bug
    fn build(&self, tokens: Vec<Token>) -> Result<Expr, ParseError> {
        let result = parser::build_tree_with(tokens, self.limits());
        debug_assert!(
            !matches!(result, Err(ParseError::MalformedPostfix)),
            "validated tokens did not reduce to one tree"
        );
        result
    }
}
