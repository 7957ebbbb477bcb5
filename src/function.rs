//! A plotted function: an expression tree bound to its variable

use std::fmt;

use crate::error::{DiffError, ParseError};
use crate::evaluator::{AngleMode, evaluate};
use crate::transform::{Transformation, apply_rewrite};
use crate::visitor::{VariableCollector, walk_expr};
use crate::Expr;

/// Display color of a curve; carried along, never computed with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }
}

/// An expression tree with its single bound variable
///
/// A `Function` is a value: transformations and differentiation return a
/// new `Function` and leave `self` as it was.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    tree: Expr,
    variable: Option<char>,
    color: Color,
}

impl Function {
    /// Parse `input` with default limits
    ///
    /// # Errors
    /// Any `ParseError` from the pipeline.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        crate::Parser::new().parse_function(input)
    }

    /// Wrap an existing tree; the variable is the first one found in it
    pub fn from_tree(tree: Expr) -> Self {
        let mut collector = VariableCollector::default();
        walk_expr(&tree, &mut collector);
        Function {
            variable: collector.names.first().copied(),
            tree,
            color: Color::default(),
        }
    }

    pub(crate) fn from_parts(tree: Expr, variable: Option<char>) -> Self {
        Function {
            tree,
            variable,
            color: Color::default(),
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn tree(&self) -> &Expr {
        &self.tree
    }

    /// Bound variable, `None` for a constant function
    pub fn variable(&self) -> Option<char> {
        self.variable
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn into_tree(self) -> Expr {
        self.tree
    }

    /// Value at `x`; see [`evaluate`]
    pub fn sample(&self, x: f64, mode: AngleMode) -> Option<f64> {
        evaluate(&self.tree, x, self.variable, mode)
    }

    /// Derivative with respect to the bound variable, same color
    ///
    /// # Errors
    /// `DiffError::Unsupported` for `tan`, variable exponents and non-integer
    /// exponents.
    pub fn derivative(&self) -> Result<Function, DiffError> {
        Ok(Function {
            tree: self.tree.derive()?,
            variable: self.variable,
            color: self.color,
        })
    }

    /// The function with `transformation` fully applied
    pub fn transformed(&self, transformation: &Transformation) -> Function {
        Function {
            tree: apply_rewrite(self.tree.clone(), transformation),
            variable: self.variable,
            color: self.color,
        }
    }

    pub fn contains_trig(&self) -> bool {
        self.tree.contains_trig()
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tree)
    }
}
