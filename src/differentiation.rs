// Differentiation engine - structural recursion over the tree
//
// Trivial identities (0 + u, 1 * u, u * 0, u^1) are removed inline while the
// derivative is assembled; no other simplification happens here.

use crate::error::{DiffError, Unsupported};
use crate::evaluator::{AngleMode, evaluate};
use crate::traits::as_exact_integer;
use crate::{BinaryOp, Expr, TrigFn};

/// u + v, dropping zero terms
fn sum(u: Expr, v: Expr) -> Expr {
    if u.is_zero_num() {
        v
    } else if v.is_zero_num() {
        u
    } else {
        Expr::add_expr(u, v)
    }
}

/// u - v, dropping a zero subtrahend
fn difference(u: Expr, v: Expr) -> Expr {
    if v.is_zero_num() {
        u
    } else if u.is_zero_num() {
        product(Expr::number(-1.0), v)
    } else {
        Expr::sub_expr(u, v)
    }
}

/// u * v, collapsing zero and one factors
fn product(u: Expr, v: Expr) -> Expr {
    if u.is_zero_num() || v.is_zero_num() {
        Expr::number(0.0)
    } else if u.is_one_num() {
        v
    } else if v.is_one_num() {
        u
    } else {
        Expr::mul_expr(u, v)
    }
}

/// u^n with n = 0 and n = 1 collapsed
fn power(u: &Expr, n: i64) -> Expr {
    match n {
        0 => Expr::number(1.0),
        1 => u.clone(),
        _ => Expr::pow(u.clone(), Expr::number(n as f64)),
    }
}

impl Expr {
    /// Differentiate this expression with respect to its variable
    ///
    /// The input is borrowed and never modified; subtrees reused in the
    /// result are deep copies.
    ///
    /// # Errors
    /// `DiffError::Unsupported` for `tan`, variable exponents and non-integer
    /// exponents. A zero derivative is `Ok(Expr::Number(0.0))`, never an error.
    pub fn derive(&self) -> Result<Expr, DiffError> {
        match self {
            // Base cases
            Expr::Number(_) => Ok(Expr::number(0.0)),
            Expr::Variable(_) => Ok(Expr::number(1.0)),

            Expr::Binary { op, left, right } => match op {
                // Sum rule: (u + v)' = u' + v'
                BinaryOp::Add => Ok(sum(left.derive()?, right.derive()?)),

                // Difference rule: (u - v)' = u' - v'
                BinaryOp::Sub => Ok(difference(left.derive()?, right.derive()?)),

                // Product rule: (u * v)' = u' * v + v' * u
                BinaryOp::Mul => {
                    let u_prime = left.derive()?;
                    let v_prime = right.derive()?;
                    Ok(sum(
                        product(u_prime, (**right).clone()),
                        product(v_prime, (**left).clone()),
                    ))
                }

                // Quotient rule: (u / v)' = (u' * v - u * v') / v^2
                BinaryOp::Div => {
                    let u_prime = left.derive()?;
                    let v_prime = right.derive()?;
                    let numerator = difference(
                        product(u_prime, (**right).clone()),
                        product((**left).clone(), v_prime),
                    );
                    if numerator.is_zero_num() {
                        Ok(Expr::number(0.0))
                    } else {
                        Ok(Expr::div_expr(numerator, power(right, 2)))
                    }
                }

                // Power rule: (u^n)' = n * u^(n-1) * u'
                BinaryOp::Pow => derive_power(left, right),
            },

            // Chain rule
            Expr::Call { func, arg } => match func {
                TrigFn::Sin => {
                    let arg_prime = arg.derive()?;
                    Ok(product(
                        Expr::call(TrigFn::Cos, (**arg).clone()),
                        arg_prime,
                    ))
                }
                TrigFn::Cos => {
                    let arg_prime = arg.derive()?;
                    let neg_sin =
                        Expr::mul_expr(Expr::number(-1.0), Expr::call(TrigFn::Sin, (**arg).clone()));
                    Ok(product(neg_sin, arg_prime))
                }
                TrigFn::Tan => Err(unsupported(Unsupported::Tangent)),
            },
        }
    }
}

fn derive_power(base: &Expr, exponent: &Expr) -> Result<Expr, DiffError> {
    if exponent.contains_variable() {
        return Err(unsupported(Unsupported::VariableExponent));
    }

    // Variable-free, so the point and angle mode are irrelevant
    let value = evaluate(exponent, 0.0, None, AngleMode::Radians).unwrap_or(f64::NAN);
    let n = as_exact_integer(value)
        .ok_or_else(|| unsupported(Unsupported::NonIntegerExponent(value)))?;

    if n == 0 {
        return Ok(Expr::number(0.0));
    }

    let base_prime = base.derive()?;
    Ok(product(
        product(Expr::number(n as f64), power(base, n - 1)),
        base_prime,
    ))
}

fn unsupported(reason: Unsupported) -> DiffError {
    tracing::debug!(%reason, "differentiation unsupported");
    DiffError::Unsupported(reason)
}
