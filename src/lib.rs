//! Single-variable expression engine for animated graphing
//!
//! Parses formulas such as `3sin(2x) + x^2`, evaluates them per pixel
//! column, differentiates them symbolically and animates graph
//! transformations (shift, stretch, reflect) between successive functions.
//!
//! # Features
//! - Implicit multiplication (`2x`, `3sin(x)`, `(x+1)(x-1)`) and unary minus
//! - Degree or radian trig evaluation with per-term angle conversion
//! - Symbolic derivatives (sum, product, quotient, power and chain rules)
//! - Bounded transformation queue with animated, cancellable steps
//! - **Builder pattern API** for parse limits
//!
//! # Usage Examples
//!
//! ## String-based API
//! ```
//! let result = graph_morph::diff("x^3").unwrap();
//! assert_eq!(result, "3 * x^2");
//! ```
//!
//! ## Functions and transformations
//! ```
//! use graph_morph::{AngleMode, Axis, Function, Transformation, animate_step};
//!
//! let f = Function::parse("x^2").unwrap();
//! let shift = Transformation::shift(Axis::X, 2.0).unwrap();
//!
//! let halfway = animate_step(&f, &shift, 0.5);
//! assert_eq!(halfway.sample(1.0, AngleMode::Radians), Some(0.0));
//!
//! let done = f.transformed(&shift);
//! assert_eq!(done.sample(2.0, AngleMode::Radians), Some(0.0));
//! ```

mod ast;
mod builder;
mod differentiation;
mod display;
mod error;
mod evaluator;
mod function;
pub mod parser;
pub mod traits;
pub mod transform;
pub mod visitor;

#[cfg(feature = "parallel")]
pub mod parallel;

#[cfg(test)]
mod tests;

// Re-export key types for easier usage
pub use ast::{BinaryOp, Expr, TrigFn};
pub use builder::Parser;
pub use error::{
    DiffError, Error, ParseError, Span, TransformError, Unsupported, ValidationIssue,
};
pub use evaluator::{AngleMode, PixelGrid, evaluate, is_plottable, sample_points};
pub use function::{Color, Function};
pub use parser::{ParsedExpression, build_tree, parse};
pub use transform::{
    Axis, DEFAULT_QUEUE_CAPACITY, OverflowPolicy, Sequencer, StepState, TransformKind,
    TransformQueue, TransformRequest, Transformation, animate_step, apply_rewrite, parse_amount,
};

/// Default maximum AST depth
pub const DEFAULT_MAX_DEPTH: usize = 100;
/// Default maximum AST node count
pub const DEFAULT_MAX_NODES: usize = 10_000;

/// Parse a formula into a [`Function`] with default limits
///
/// # Errors
/// Any `ParseError` from the pipeline.
pub fn parse_function(formula: &str) -> Result<Function, ParseError> {
    Function::parse(formula)
}

/// Derivative of `function`; `function` itself is left untouched
///
/// # Errors
/// `DiffError::Unsupported` for `tan`, variable or non-integer exponents.
pub fn differentiate(function: &Function) -> Result<Function, DiffError> {
    function.derivative()
}

/// `function` with `transformation` fully applied
pub fn transform(function: &Function, transformation: &Transformation) -> Function {
    function.transformed(transformation)
}

/// True when `tree` calls `sin`, `cos` or `tan`
///
/// Controllers use this to choose degree or radian axis labels.
pub fn contains_trig(tree: &Expr) -> bool {
    tree.contains_trig()
}

/// Main API function for symbolic differentiation
///
/// # Returns
/// The derivative as a string, or an error if parsing/differentiation fails
///
/// # Example
/// ```
/// assert_eq!(graph_morph::diff("sin(x)").unwrap(), "cos(x)");
/// assert!(graph_morph::diff("tan(x)").is_err());
/// ```
///
/// # Note
/// For custom depth or node limits, parse with the [`Parser`] builder and
/// call [`Function::derivative`].
pub fn diff(formula: &str) -> Result<String, Error> {
    let function = Function::parse(formula)?;
    Ok(function.derivative()?.to_string())
}

/// Apply the transformation a controller form describes, in order
///
/// # Example
/// ```
/// use graph_morph::{AngleMode, Function, TransformRequest};
///
/// let f = Function::parse("x^2").unwrap();
/// let request = TransformRequest::from_text("2", "", "", "3", false, false).unwrap();
/// let g = graph_morph::transform_all(&f, &request).unwrap();
/// assert_eq!(g.sample(2.0, AngleMode::Radians), Some(4.0));
/// ```
///
/// # Errors
/// Amount validation errors from [`TransformRequest::transformations`].
pub fn transform_all(function: &Function, request: &TransformRequest) -> Result<Function, Error> {
    let steps = request.transformations()?;
    Ok(steps
        .iter()
        .fold(function.clone(), |f, t| f.transformed(t)))
}
