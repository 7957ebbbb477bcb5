//! Structural rewrites behind each transformation

use super::{Axis, TransformKind, Transformation};
use crate::Expr;

/// Rewrite `tree` according to `transformation`
///
/// Takes the tree by value; clone first if the pre-image must survive.
///
/// | kind    | X                    | Y                 |
/// |---------|----------------------|-------------------|
/// | shift   | `x` -> `(x - a)`     | `tree + a`        |
/// | stretch | `x` -> `(x / f)`     | `f * tree`        |
/// | reflect | `-1 * tree`          | `x` -> `-1 * x`   |
pub fn apply_rewrite(tree: Expr, transformation: &Transformation) -> Expr {
    match (transformation.kind(), transformation.axis()) {
        (TransformKind::Reflect, Axis::X) => Expr::mul_expr(Expr::number(-1.0), tree),
        (TransformKind::Reflect, Axis::Y) => map_variables(tree, &|name| {
            Expr::mul_expr(Expr::number(-1.0), Expr::variable(name))
        }),

        (TransformKind::Shift(a), Axis::X) => map_variables(tree, &|name| {
            Expr::sub_expr(Expr::variable(name), Expr::number(a))
        }),
        (TransformKind::Shift(a), Axis::Y) => Expr::add_expr(tree, Expr::number(a)),

        (TransformKind::Stretch(f), Axis::X) => map_variables(tree, &|name| {
            Expr::div_expr(Expr::variable(name), Expr::number(f))
        }),
        (TransformKind::Stretch(f), Axis::Y) => Expr::mul_expr(Expr::number(f), tree),
    }
}

/// Replace every variable leaf, leaving all other nodes in place
fn map_variables(tree: Expr, replace: &impl Fn(char) -> Expr) -> Expr {
    match tree {
        Expr::Variable(name) => replace(name),
        Expr::Number(_) => tree,
        Expr::Call { func, arg } => Expr::call(func, map_variables(*arg, replace)),
        Expr::Binary { op, left, right } => Expr::binary(
            op,
            map_variables(*left, replace),
            map_variables(*right, replace),
        ),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Standard test relaxations")]
mod tests {
    use super::*;
    use crate::evaluator::{AngleMode, evaluate};
    use crate::parser::{build_tree, parse};

    fn tree(input: &str) -> Expr {
        build_tree(parse(input).unwrap().tokens).unwrap()
    }

    fn at(expr: &Expr, x: f64) -> Option<f64> {
        evaluate(expr, x, Some('x'), AngleMode::Radians)
    }

    #[test]
    fn test_reflect_x_wraps_root() {
        let out = apply_rewrite(tree("x^2"), &Transformation::reflect(Axis::X));
        assert_eq!(out.to_string(), "-x^2");
        assert_eq!(at(&out, 3.0), Some(-9.0));
    }

    #[test]
    fn test_reflect_y_negates_every_variable() {
        let out = apply_rewrite(tree("x^3 + x"), &Transformation::reflect(Axis::Y));
        assert_eq!(at(&out, 2.0), Some(-10.0));
        assert_eq!(out.to_string(), "(-x)^3 - x");
    }

    #[test]
    fn test_shift() {
        let shift_x = Transformation::shift(Axis::X, 3.0).unwrap();
        let out = apply_rewrite(tree("x^2"), &shift_x);
        assert_eq!(out.to_string(), "(x - 3)^2");
        assert_eq!(at(&out, 3.0), Some(0.0));

        let shift_y = Transformation::shift(Axis::Y, -1.5).unwrap();
        let out = apply_rewrite(tree("x^2"), &shift_y);
        assert_eq!(at(&out, 2.0), Some(2.5));
    }

    #[test]
    fn test_stretch() {
        let stretch_x = Transformation::stretch(Axis::X, 2.0).unwrap();
        let out = apply_rewrite(tree("x^2"), &stretch_x);
        assert_eq!(at(&out, 4.0), Some(4.0));

        let stretch_y = Transformation::stretch(Axis::Y, 3.0).unwrap();
        let out = apply_rewrite(tree("x + 1"), &stretch_y);
        assert_eq!(out.to_string(), "3 * (x + 1)");
        assert_eq!(at(&out, 1.0), Some(6.0));
    }

    #[test]
    fn test_rewrites_nest() {
        let first = Transformation::shift(Axis::X, 1.0).unwrap();
        let second = Transformation::shift(Axis::X, 2.0).unwrap();
        let nested = apply_rewrite(apply_rewrite(tree("x^2"), &first), &second);
        let single = apply_rewrite(tree("x^2"), &Transformation::shift(Axis::X, 3.0).unwrap());
        for x in [-2.0, 0.0, 1.5, 4.0] {
            assert_eq!(at(&nested, x), at(&single, x));
        }
    }

    #[test]
    fn test_constant_tree_unaffected_by_input_rewrites() {
        let out = apply_rewrite(tree("5"), &Transformation::shift(Axis::X, 2.0).unwrap());
        assert_eq!(out, Expr::number(5.0));
    }
}
