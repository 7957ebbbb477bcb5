// Display formatting for AST
//
// Output is valid input: re-parsing a displayed parse tree reproduces it.
// Powers use `^`, parentheses are only emitted where precedence or grouping
// needs them, and `-1 * u` is shown as `-u`.
use crate::{BinaryOp, Expr};
use std::fmt;

/// Binding strength used for parenthesization; atoms bind tightest
const ATOM: u8 = 4;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// `-1 * u` returns `Some(u)`
fn negated(expr: &Expr) -> Option<&Expr> {
    match expr {
        Expr::Binary {
            op: BinaryOp::Mul,
            left,
            right,
        } if left.as_number() == Some(-1.0) => Some(right),
        _ => None,
    }
}

fn binding(expr: &Expr) -> u8 {
    match expr {
        Expr::Number(n) if *n < 0.0 => BinaryOp::Mul.precedence(),
        Expr::Number(_) | Expr::Variable(_) | Expr::Call { .. } => ATOM,
        Expr::Binary { op, .. } => op.precedence(),
    }
}

fn needs_parens(parent: BinaryOp, child: &Expr, side: Side) -> bool {
    let (p, c) = (parent.precedence(), binding(child));
    if c != p {
        return c < p;
    }
    // Equal precedence keeps the tree's grouping: parse regroups the other side
    match side {
        Side::Left => parent.is_right_associative(),
        Side::Right => !parent.is_right_associative(),
    }
}

/// Leftmost operand of a power chain written without parentheses
fn leading_operand(expr: &Expr) -> &Expr {
    match expr {
        Expr::Binary {
            op: BinaryOp::Pow,
            left,
            ..
        } => leading_operand(left),
        _ => expr,
    }
}

/// An exponent must start with a number, a different name or `(`
fn exponent_needs_parens(base: &Expr, exponent: &Expr) -> bool {
    match leading_operand(exponent) {
        Expr::Call { .. } => true,
        Expr::Variable(_) => matches!(base, Expr::Variable(_)),
        _ => false,
    }
}

fn write_operand(
    f: &mut fmt::Formatter<'_>,
    parent: BinaryOp,
    child: &Expr,
    side: Side,
) -> fmt::Result {
    if needs_parens(parent, child, side) {
        write!(f, "({})", child)
    } else {
        write!(f, "{}", child)
    }
}

fn write_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_nan() {
        write!(f, "NaN")
    } else if n.is_infinite() {
        if n > 0.0 {
            write!(f, "Infinity")
        } else {
            write!(f, "-Infinity")
        }
    } else if n.fract() == 0.0 && n.abs() < 1e10 {
        // Display as integer if no fractional part
        write!(f, "{}", n as i64)
    } else {
        write!(f, "{}", n)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(n) => write_number(f, *n),

            Expr::Variable(name) => write!(f, "{}", name),

            Expr::Call { func, arg } => write!(f, "{}({})", func, arg),

            Expr::Binary { op, left, right } => {
                if let Some(inner) = negated(self) {
                    // Unary minus binds like multiplication
                    f.write_str("-")?;
                    return write_operand(f, BinaryOp::Mul, inner, Side::Right);
                }

                // u + (-1 * v) reads better as u - v
                if *op == BinaryOp::Add
                    && let Some(inner) = negated(right)
                {
                    write_operand(f, BinaryOp::Sub, left, Side::Left)?;
                    f.write_str(" - ")?;
                    return write_operand(f, BinaryOp::Sub, inner, Side::Right);
                }

                write_operand(f, *op, left, Side::Left)?;
                match op {
                    BinaryOp::Pow => f.write_str("^")?,
                    _ => write!(f, " {} ", op)?,
                }
                // `x^x` and `2^sin(x)` do not re-parse
                if *op == BinaryOp::Pow && exponent_needs_parens(left, right) {
                    return write!(f, "({})", right);
                }
                write_operand(f, *op, right, Side::Right)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Standard test relaxations")]
mod tests {
    use crate::evaluator::{AngleMode, evaluate};
    use crate::parser::{build_tree, parse};
    use crate::{Expr, TrigFn};

    fn tree(input: &str) -> Expr {
        build_tree(parse(input).unwrap().tokens).unwrap()
    }

    #[test]
    fn test_display_number() {
        assert_eq!(format!("{}", Expr::number(3.0)), "3");
        assert_eq!(format!("{}", Expr::number(2.5)), "2.5");
        assert_eq!(format!("{}", Expr::number(-4.0)), "-4");
    }

    #[test]
    fn test_display_minimal_parens() {
        assert_eq!(tree("2x+1").to_string(), "2 * x + 1");
        assert_eq!(tree("2(x+1)").to_string(), "2 * (x + 1)");
        assert_eq!(tree("8-(3-2)").to_string(), "8 - (3 - 2)");
        assert_eq!(tree("8-3-2").to_string(), "8 - 3 - 2");
        assert_eq!(tree("(2^3)^2").to_string(), "(2^3)^2");
        assert_eq!(tree("2^3^2").to_string(), "2^3^2");
        assert_eq!(tree("x/(2x)").to_string(), "x / (2 * x)");
        assert_eq!(tree("x + (1 + x)").to_string(), "x + (1 + x)");
        assert_eq!(tree("(x + 1) + x").to_string(), "x + 1 + x");
    }

    #[test]
    fn test_display_self_power() {
        assert_eq!(tree("x^(x)").to_string(), "x^(x)");
        assert_eq!(tree("x^(x^2)").to_string(), "x^(x^2)");
        assert_eq!(tree("2^x^2").to_string(), "2^x^2");
    }

    #[test]
    fn test_display_call_exponent() {
        assert_eq!(tree("2^(sin(x))").to_string(), "2^(sin(x))");
        assert_eq!(tree("x^(cos(x)^2)").to_string(), "x^(cos(x)^2)");
        assert_eq!(tree("(x+1)^(tan(1/(1+x)))").to_string(), "(x + 1)^(tan(1 / (1 + x)))");
        for input in ["2^(sin(x))", "x^(cos(x)^2)", "(1 - tan(x))^(cos(1/(1+x)))"] {
            let original = tree(input);
            assert_eq!(tree(&original.to_string()), original, "{}", input);
        }
    }

    #[test]
    fn test_display_function() {
        assert_eq!(tree("3sin(x^2)").to_string(), "3 * sin(x^2)");
        let call = Expr::call(TrigFn::Tan, Expr::variable('t'));
        assert_eq!(call.to_string(), "tan(t)");
    }

    #[test]
    fn test_display_negation() {
        let neg = Expr::mul_expr(Expr::number(-1.0), Expr::variable('x'));
        assert_eq!(neg.to_string(), "-x");

        let neg_sum = Expr::mul_expr(
            Expr::number(-1.0),
            Expr::add_expr(Expr::variable('x'), Expr::number(1.0)),
        );
        assert_eq!(neg_sum.to_string(), "-(x + 1)");

        let minus = Expr::add_expr(Expr::variable('x'), neg);
        assert_eq!(minus.to_string(), "x - x");
    }

    #[test]
    fn test_display_negative_power_operands() {
        let expr = Expr::pow(Expr::variable('x'), Expr::number(-3.0));
        assert_eq!(expr.to_string(), "x^(-3)");
        let base = Expr::pow(
            Expr::mul_expr(Expr::number(-1.0), Expr::variable('x')),
            Expr::number(2.0),
        );
        assert_eq!(base.to_string(), "(-x)^2");
    }

    #[test]
    fn test_display_reparses_to_same_values() {
        for input in [
            "2x+1",
            "-x^2 + 3",
            "sin(2(x+30)) / (x - 4)",
            "x^-2 - cos(x)",
            "(1 - x)(x + 2)^3",
        ] {
            let original = tree(input);
            let reparsed = tree(&original.to_string());
            for x in [-1.5, 0.5, 2.0] {
                assert_eq!(
                    evaluate(&original, x, Some('x'), AngleMode::Degrees),
                    evaluate(&reparsed, x, Some('x'), AngleMode::Degrees),
                    "{} vs {}",
                    input,
                    original
                );
            }
        }
    }
}
