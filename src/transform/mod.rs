//! Graph transformations: shift, stretch and reflect on either axis
//!
//! A [`Transformation`] is an immutable value. Rewrites consume a tree and
//! return a new one ([`apply_rewrite`]); [`animate_step`] produces the
//! intermediate functions of an animated transition; [`Sequencer`] drives a
//! bounded [`TransformQueue`] of pending transformations against the current
//! function.

mod animation;
mod queue;
mod request;
mod rewrite;
mod sequencer;

pub use animation::animate_step;
pub use queue::{DEFAULT_QUEUE_CAPACITY, OverflowPolicy, TransformQueue};
pub use request::TransformRequest;
pub use rewrite::apply_rewrite;
pub use sequencer::{Sequencer, StepState};

use std::fmt;

use crate::error::TransformError;
use crate::evaluator::{AngleMode, evaluate};
use crate::parser::{build_tree, parse};

/// Axis a transformation acts along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Input axis for shift/stretch; reflect-X flips the output sign
    X,
    /// Output axis for shift/stretch; reflect-Y negates the input
    Y,
}

impl Axis {
    pub fn other(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => f.write_str("X"),
            Axis::Y => f.write_str("Y"),
        }
    }
}

/// What a transformation does, with its amount
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformKind {
    Shift(f64),
    Stretch(f64),
    Reflect,
}

/// A validated transformation along one axis
///
/// Build one with [`Transformation::shift`], [`Transformation::stretch`] or
/// [`Transformation::reflect`]; amounts are always finite and a stretch
/// factor is never zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transformation {
    kind: TransformKind,
    axis: Axis,
}

impl Transformation {
    /// Shift along `axis` by `amount`
    ///
    /// # Errors
    /// `NonFiniteAmount` for NaN or ±inf.
    pub fn shift(axis: Axis, amount: f64) -> Result<Self, TransformError> {
        if !amount.is_finite() {
            return Err(TransformError::NonFiniteAmount);
        }
        Ok(Transformation {
            kind: TransformKind::Shift(amount),
            axis,
        })
    }

    /// Stretch along `axis` by `factor`
    ///
    /// # Errors
    /// `NonFiniteAmount` for NaN or ±inf, `ZeroStretch` for a zero factor.
    pub fn stretch(axis: Axis, factor: f64) -> Result<Self, TransformError> {
        if !factor.is_finite() {
            return Err(TransformError::NonFiniteAmount);
        }
        if factor == 0.0 {
            return Err(TransformError::ZeroStretch);
        }
        Ok(Transformation {
            kind: TransformKind::Stretch(factor),
            axis,
        })
    }

    pub fn reflect(axis: Axis) -> Self {
        Transformation {
            kind: TransformKind::Reflect,
            axis,
        }
    }

    /// Unchecked constructor for animation frames, where a stretch factor
    /// may pass through zero
    pub(crate) fn frame(kind: TransformKind, axis: Axis) -> Self {
        Transformation { kind, axis }
    }

    pub fn kind(&self) -> TransformKind {
        self.kind
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Shift distance or stretch factor; `None` for a reflection
    pub fn amount(&self) -> Option<f64> {
        match self.kind {
            TransformKind::Shift(a) | TransformKind::Stretch(a) => Some(a),
            TransformKind::Reflect => None,
        }
    }

    /// Shift by 0 or stretch by 1
    pub fn is_identity(&self) -> bool {
        match self.kind {
            TransformKind::Shift(a) => a == 0.0,
            TransformKind::Stretch(f) => f == 1.0,
            TransformKind::Reflect => false,
        }
    }
}

impl fmt::Display for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TransformKind::Shift(a) => write!(f, "Shift-{}({})", self.axis, a),
            TransformKind::Stretch(s) => write!(f, "Stretch-{}({})", self.axis, s),
            TransformKind::Reflect => write!(f, "Reflect-{}", self.axis),
        }
    }
}

/// Parse a user-entered amount such as `"3"`, `"-1/2"` or `"2^3"`
///
/// The text goes through the full parse pipeline and is evaluated in
/// radians. Stretch-specific checks belong to [`Transformation::stretch`].
///
/// # Errors
/// - `InvalidAmount` if the text does not parse
/// - `AmountHasVariable` if it names a variable
/// - `NonFiniteAmount` if it is undefined or not finite (`1/0`, `10^400`)
pub fn parse_amount(text: &str) -> Result<f64, TransformError> {
    let parsed = parse(text).map_err(TransformError::InvalidAmount)?;
    if let Some(name) = parsed.variable {
        return Err(TransformError::AmountHasVariable(name));
    }
    let tree = build_tree(parsed.tokens).map_err(TransformError::InvalidAmount)?;
    evaluate::<f64>(&tree, 0.0, None, AngleMode::Radians)
        .filter(|value| value.is_finite())
        .ok_or(TransformError::NonFiniteAmount)
}
