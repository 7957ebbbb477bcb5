use num_traits::{Float, FloatConst, FromPrimitive};
use std::fmt::{Debug, Display};

/// Default tolerance for floating-point comparisons
pub(crate) const FLOAT_TOLERANCE: f64 = 1e-10;

/// Scalar types an expression tree can be sampled in.
///
/// `num_traits::Float` supplies `sin`, `cos`, `tan`, `powf` and `to_radians`;
/// `FromPrimitive` lifts `f64` literals into the scalar.
pub trait MathScalar: Float + FloatConst + FromPrimitive + Debug + Display + 'static {}

// Blanket implementation for any type that satisfies the bounds
impl<T> MathScalar for T where T: Float + FloatConst + FromPrimitive + Debug + Display + 'static {}

// ===== Float tolerance helpers =====

/// Check if a float is approximately zero (within tolerance)
#[inline]
pub(crate) fn is_zero(n: f64) -> bool {
    n.abs() < FLOAT_TOLERANCE
}

/// Check if a float is approximately one (within tolerance)
#[inline]
pub(crate) fn is_one(n: f64) -> bool {
    (n - 1.0).abs() < FLOAT_TOLERANCE
}

/// Return the integer a float represents exactly, if any
#[inline]
pub(crate) fn as_exact_integer(n: f64) -> Option<i64> {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 9.0e15 {
        Some(n as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_zero() {
        assert!(is_zero(0.0));
        assert!(is_zero(1e-11));
        assert!(is_zero(-1e-11));
        assert!(!is_zero(0.1));
    }

    #[test]
    fn test_is_one() {
        assert!(is_one(1.0));
        assert!(is_one(1.0 - 1e-11));
        assert!(!is_one(1.1));
    }

    #[test]
    fn test_as_exact_integer() {
        assert_eq!(as_exact_integer(3.0), Some(3));
        assert_eq!(as_exact_integer(-2.0), Some(-2));
        assert_eq!(as_exact_integer(2.5), None);
        assert_eq!(as_exact_integer(f64::NAN), None);
        assert_eq!(as_exact_integer(f64::INFINITY), None);
    }
}
