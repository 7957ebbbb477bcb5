//! Batch sampling for renderers that evaluate one point per pixel column

use super::{AngleMode, evaluate};
use crate::Expr;

/// True when a sample can be drawn: defined and finite
///
/// Undefined points (`None`) and NaN/±inf both end the current curve segment.
#[inline]
pub fn is_plottable(sample: Option<f64>) -> bool {
    sample.is_some_and(f64::is_finite)
}

/// Evaluate `expr` at every x in `xs`, preserving order
pub fn sample_points(
    expr: &Expr,
    xs: &[f64],
    variable: Option<char>,
    mode: AngleMode,
) -> Vec<Option<f64>> {
    xs.iter()
        .map(|&x| evaluate(expr, x, variable, mode))
        .collect()
}

/// Maps pixel columns to x-values: `x = (column - center) / scale`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelGrid {
    /// First column of the plot area (inclusive)
    pub first_column: u32,
    /// End of the plot area (exclusive)
    pub end_column: u32,
    /// Column where x = 0
    pub center_column: u32,
    /// Pixels per unit
    pub scale: f64,
}

impl PixelGrid {
    pub fn new(first_column: u32, end_column: u32, scale: f64) -> Self {
        let center_column = first_column + (end_column.saturating_sub(first_column)) / 2;
        PixelGrid {
            first_column,
            end_column,
            center_column,
            scale,
        }
    }

    pub fn column_to_x(&self, column: u32) -> f64 {
        (f64::from(column) - f64::from(self.center_column)) / self.scale
    }

    /// x-value of every column, left to right
    pub fn x_values(&self) -> Vec<f64> {
        (self.first_column..self.end_column)
            .map(|c| self.column_to_x(c))
            .collect()
    }
}
