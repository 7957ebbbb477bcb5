//! Numeric evaluation of expression trees
//!
//! Evaluation is a read-only traversal: the tree is never mutated, so the
//! same tree can be sampled thousands of times per frame.
//!
//! # Angle handling
//! In [`AngleMode::Degrees`] numeric literals that act as angles inside a
//! trig argument are converted to radians; the variable itself is never
//! converted. A literal is treated as an angle when it sits in additive
//! position of the argument:
//! - a variable-free subtree in additive position is evaluated, then
//!   converted once (`sin(90)`, `sin(x + 45)`, `sin(60 + 30)`)
//! - a variable-free operand of `*` or `/` next to a variable-dependent one
//!   is a scale factor and stays as is (`sin(2x)`, `sin(x/2)`)
//! - additive constants inside a scaled term still convert
//!   (`sin(2(x + 30))` is `2x + 60°`)
//! - operands of `**` are never angles (`sin(x^2)`)
//! - a nested trig call restarts the rule for its own argument

mod sampling;

pub use sampling::{PixelGrid, is_plottable, sample_points};

use crate::ast::{BinaryOp, Expr, TrigFn};
use crate::traits::MathScalar;

/// How literal angles inside `sin`/`cos`/`tan` are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AngleMode {
    #[default]
    Degrees,
    Radians,
}

/// A subtree's value and whether it depends on the variable
///
/// Constants inside a trig argument stay in plain units until the caller
/// decides whether they are angles, so each node is visited once.
#[derive(Debug, Clone, Copy)]
enum Term<T> {
    Constant(T),
    Varying(T),
}

impl<T> Term<T> {
    fn value(self) -> T {
        match self {
            Term::Constant(v) | Term::Varying(v) => v,
        }
    }

    fn is_constant(&self) -> bool {
        matches!(self, Term::Constant(_))
    }
}

struct Evaluator<T> {
    x: T,
    variable: Option<char>,
    mode: AngleMode,
}

/// Evaluate `expr` at `x`
///
/// Returns `None` for an undefined point: division by zero, `0` raised to a
/// negative power, or a variable that is not `variable`. Domain failures of
/// `powf` come back as `Some(NaN)` and overflow as `Some(±inf)`; none of the
/// three should be plotted.
///
/// # Example
/// ```
/// use graph_morph::{AngleMode, Function, evaluate};
///
/// let f = Function::parse("sin(90) + x").unwrap();
/// let y = evaluate(f.tree(), 1.0_f64, Some('x'), AngleMode::Degrees).unwrap();
/// assert!((y - 2.0).abs() < 1e-12);
/// ```
pub fn evaluate<T: MathScalar>(
    expr: &Expr,
    x: T,
    variable: Option<char>,
    mode: AngleMode,
) -> Option<T> {
    Evaluator { x, variable, mode }
        .plain(expr)
        .map(Term::value)
}

impl<T: MathScalar> Evaluator<T> {
    /// Outside any trig argument, and for operands that are never angles
    fn plain(&self, expr: &Expr) -> Option<Term<T>> {
        match expr {
            Expr::Number(n) => T::from_f64(*n).map(Term::Constant),

            Expr::Variable(name) => {
                (self.variable == Some(*name)).then_some(Term::Varying(self.x))
            }

            Expr::Call { func, arg } => self.call(*func, arg),

            Expr::Binary { op, left, right } => {
                let l = self.plain(left)?;
                let r = self.plain(right)?;
                let value = combine(*op, l.value(), r.value())?;
                Some(if l.is_constant() && r.is_constant() {
                    Term::Constant(value)
                } else {
                    Term::Varying(value)
                })
            }
        }
    }

    fn call(&self, func: TrigFn, arg: &Expr) -> Option<Term<T>> {
        let arg = self.angle(arg)?;
        let value = apply_trig(func, self.as_angle(arg));
        Some(match arg {
            Term::Constant(_) => Term::Constant(value),
            Term::Varying(_) => Term::Varying(value),
        })
    }

    /// Inside a trig argument, in additive position
    ///
    /// A `Constant` result is still in plain units; a `Varying` one is final.
    fn angle(&self, expr: &Expr) -> Option<Term<T>> {
        let Expr::Binary { op, left, right } = expr else {
            return self.plain(expr);
        };
        if *op == BinaryOp::Pow {
            return self.plain(expr);
        }

        let l = self.angle(left)?;
        let r = self.angle(right)?;
        if l.is_constant() && r.is_constant() {
            return combine(*op, l.value(), r.value()).map(Term::Constant);
        }

        let value = match op {
            // Every additive constant is an angle
            BinaryOp::Add | BinaryOp::Sub => combine(*op, self.as_angle(l), self.as_angle(r)),
            // A constant next to a varying operand is a scale factor
            _ => combine(*op, l.value(), r.value()),
        }?;
        Some(Term::Varying(value))
    }

    /// Final angle in radians for a trig argument term
    fn as_angle(&self, term: Term<T>) -> T {
        match (term, self.mode) {
            (Term::Constant(v), AngleMode::Degrees) => v.to_radians(),
            (term, _) => term.value(),
        }
    }
}

fn combine<T: MathScalar>(op: BinaryOp, l: T, r: T) -> Option<T> {
    match op {
        BinaryOp::Add => Some(l + r),
        BinaryOp::Sub => Some(l - r),
        BinaryOp::Mul => Some(l * r),
        BinaryOp::Div => {
            if r.is_zero() {
                None
            } else {
                Some(l / r)
            }
        }
        BinaryOp::Pow => {
            if l.is_zero() && r < T::zero() {
                None
            } else {
                Some(l.powf(r))
            }
        }
    }
}

fn apply_trig<T: MathScalar>(func: TrigFn, arg: T) -> T {
    match func {
        TrigFn::Sin => arg.sin(),
        TrigFn::Cos => arg.cos(),
        TrigFn::Tan => arg.tan(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Standard test relaxations")]
mod tests {
    use super::*;
    use crate::parser::{build_tree, parse};
    use std::f64::consts::PI;

    fn eval_at(input: &str, x: f64, mode: AngleMode) -> Option<f64> {
        let parsed = parse(input).unwrap();
        let tree = build_tree(parsed.tokens).unwrap();
        evaluate(&tree, x, parsed.variable, mode)
    }

    fn approx(input: &str, x: f64, mode: AngleMode, expected: f64) {
        let got = eval_at(input, x, mode).unwrap();
        assert!(
            (got - expected).abs() < 1e-9,
            "{} at {}: expected {}, got {}",
            input,
            x,
            expected,
            got
        );
    }

    #[test]
    fn test_hand_computed_values() {
        approx("2x+1", 3.0, AngleMode::Radians, 7.0);
        approx("x**2", -2.0, AngleMode::Radians, 4.0);
        approx("sin(x)", 0.0, AngleMode::Radians, 0.0);
        approx("-5+x", 5.0, AngleMode::Radians, 0.0);
        approx("2**3**2", 0.0, AngleMode::Radians, 512.0);
        approx("8-3-2", 0.0, AngleMode::Radians, 3.0);
        approx("-x^2", 3.0, AngleMode::Radians, -9.0);
    }

    #[test]
    fn test_implicit_equals_explicit() {
        for x in [-2.5, 0.0, 1.0, 4.25] {
            assert_eq!(
                eval_at("2x", x, AngleMode::Radians),
                eval_at("2*x", x, AngleMode::Radians)
            );
        }
    }

    #[test]
    fn test_degree_literals() {
        approx("sin(90)", 0.0, AngleMode::Degrees, 1.0);
        approx("cos(60+120)", 0.0, AngleMode::Degrees, -1.0);
        approx("sin(-90)", 0.0, AngleMode::Degrees, -1.0);
        // Variable is never converted
        approx("sin(x)", PI / 2.0, AngleMode::Degrees, 1.0);
        approx("sin(x+90)", 0.0, AngleMode::Degrees, 1.0);
    }

    #[test]
    fn test_degree_scale_factors() {
        approx("sin(2x)", PI / 4.0, AngleMode::Degrees, 1.0);
        approx("sin(x/2)", PI, AngleMode::Degrees, 1.0);
        approx("sin(2(x+45))", 0.0, AngleMode::Degrees, 1.0);
        approx("sin(2*3*x)", PI / 12.0, AngleMode::Degrees, 1.0);
        approx("sin(x^2)", 0.0, AngleMode::Degrees, 0.0);
    }

    #[test]
    fn test_degree_terms_in_nested_arguments() {
        // Constant subtrees convert once, however they are grouped
        approx("sin(2*45)", 0.0, AngleMode::Degrees, 1.0);
        approx("cos(2(x+30) + 3(x-20))", 0.0, AngleMode::Degrees, 1.0);
        approx("sin((x - x)*2 + 90)", 7.0, AngleMode::Degrees, 1.0);
        // Deep argument: one conversion per constant term
        let deep = format!("sin({}x{} + 90)", "(".repeat(60), "+0)".repeat(60));
        approx(&deep, 0.0, AngleMode::Degrees, 1.0);
    }

    #[test]
    fn test_radians_never_convert() {
        approx("sin(90)", 0.0, AngleMode::Radians, 90f64.sin());
    }

    #[test]
    fn test_undefined_points() {
        assert_eq!(eval_at("1/x", 0.0, AngleMode::Radians), None);
        assert_eq!(eval_at("1/x + 3", 0.0, AngleMode::Radians), None);
        assert_eq!(eval_at("x**(0-1)", 0.0, AngleMode::Radians), None);
        assert!(eval_at("1/x", 2.0, AngleMode::Radians).is_some());
    }

    #[test]
    fn test_nan_and_infinity_are_values() {
        let nan = eval_at("x**0.5", -4.0, AngleMode::Radians).unwrap();
        assert!(nan.is_nan());
        let inf = eval_at("10**x", 400.0, AngleMode::Radians).unwrap();
        assert!(inf.is_infinite());
    }

    #[test]
    fn test_constant_expression() {
        let parsed = parse("2*3").unwrap();
        assert_eq!(parsed.variable, None);
        let tree = build_tree(parsed.tokens).unwrap();
        assert_eq!(evaluate(&tree, 100.0, None, AngleMode::Degrees), Some(6.0));
    }

    #[test]
    fn test_foreign_variable_is_undefined() {
        let tree = Expr::variable('t');
        assert_eq!(evaluate(&tree, 1.0, Some('x'), AngleMode::Radians), None);
    }

    #[test]
    fn test_f32_scalar() {
        let tree = Expr::mul_expr(Expr::number(2.0), Expr::variable('x'));
        assert_eq!(evaluate(&tree, 1.5f32, Some('x'), AngleMode::Radians), Some(3.0f32));
    }
}
