//! Parallel curve sampling using Rayon
//!
//! Trees are read-only during evaluation, so one tree can be shared across
//! worker threads without copying.
//!
//! Enable with the `parallel` feature:
//! ```toml
//! graph_morph = { version = "0.2", features = ["parallel"] }
//! ```

use crate::{AngleMode, Expr, Function, evaluate};
use rayon::prelude::*;

/// Parallel version of [`crate::sample_points`]; output order matches `xs`
pub fn sample_points_par(
    expr: &Expr,
    xs: &[f64],
    variable: Option<char>,
    mode: AngleMode,
) -> Vec<Option<f64>> {
    xs.par_iter()
        .map(|&x| evaluate(expr, x, variable, mode))
        .collect()
}

/// Sample several curves over the same x-values
///
/// Returns one row per function, in input order. Used for dual view, where
/// a function and its derivative are drawn every frame.
pub fn sample_functions_par(
    functions: &[&Function],
    xs: &[f64],
    mode: AngleMode,
) -> Vec<Vec<Option<f64>>> {
    functions
        .par_iter()
        .map(|f| sample_points_par(f.tree(), xs, f.variable(), mode))
        .collect()
}
