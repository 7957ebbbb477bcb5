//! Intermediate functions for animated transformations

use std::f64::consts::FRAC_PI_2;

use super::{TransformKind, Transformation};
use crate::Function;

/// The function shown `progress` of the way through `transformation`
///
/// `progress` is clamped to `[0, 1]`. At 0 (or NaN) the result is an exact
/// copy of `base`; at 1 it is exactly `base.transformed(transformation)`.
/// In between:
/// - shift moves linearly: offset `progress * amount`
/// - stretch scales linearly: factor `1 + (factor - 1) * progress`
/// - reflect eases as a stretch on the other axis with factor
///   `1 - 2 * sin(progress * pi / 2)`, going from 1 to -1
pub fn animate_step(base: &Function, transformation: &Transformation, progress: f64) -> Function {
    if progress.is_nan() || progress <= 0.0 {
        return base.clone();
    }
    if progress >= 1.0 {
        return base.transformed(transformation);
    }
    base.transformed(&frame_transformation(transformation, progress))
}

fn frame_transformation(transformation: &Transformation, progress: f64) -> Transformation {
    let axis = transformation.axis();
    match transformation.kind() {
        TransformKind::Shift(amount) => {
            Transformation::frame(TransformKind::Shift(amount * progress), axis)
        }
        TransformKind::Stretch(factor) => Transformation::frame(
            TransformKind::Stretch(1.0 + (factor - 1.0) * progress),
            axis,
        ),
        TransformKind::Reflect => {
            let eased = (progress * FRAC_PI_2).sin();
            Transformation::frame(TransformKind::Stretch(1.0 - 2.0 * eased), axis.other())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Standard test relaxations")]
mod tests {
    use super::*;
    use crate::AngleMode;
    use crate::transform::Axis;

    const XS: [f64; 6] = [-3.0, -1.25, 0.0, 0.5, 2.0, 7.5];

    fn assert_same_graph(a: &Function, b: &Function) {
        for x in XS {
            assert_eq!(
                a.sample(x, AngleMode::Radians),
                b.sample(x, AngleMode::Radians),
                "{} vs {} at {}",
                a,
                b,
                x
            );
        }
    }

    #[test]
    fn test_reflect_endpoints_are_exact() {
        let f = Function::parse("x^2 - 3x + 1").unwrap();
        let reflect = Transformation::reflect(Axis::X);

        let start = animate_step(&f, &reflect, 0.0);
        assert_eq!(start.tree(), f.tree());
        assert_same_graph(&start, &f);

        let end = animate_step(&f, &reflect, 1.0);
        assert_eq!(end, f.transformed(&reflect));
    }

    #[test]
    fn test_progress_is_clamped() {
        let f = Function::parse("sin(x)").unwrap();
        let shift = Transformation::shift(Axis::Y, 2.0).unwrap();
        assert_eq!(animate_step(&f, &shift, -0.5), f);
        assert_eq!(animate_step(&f, &shift, f64::NAN), f);
        assert_eq!(animate_step(&f, &shift, 3.0), f.transformed(&shift));
    }

    #[test]
    fn test_shift_is_linear() {
        let f = Function::parse("x^2").unwrap();
        let half = animate_step(&f, &Transformation::shift(Axis::X, 4.0).unwrap(), 0.5);
        let direct = f.transformed(&Transformation::shift(Axis::X, 2.0).unwrap());
        assert_same_graph(&half, &direct);
    }

    #[test]
    fn test_stretch_is_linear() {
        let f = Function::parse("x + 1").unwrap();
        let quarter = animate_step(&f, &Transformation::stretch(Axis::Y, 5.0).unwrap(), 0.25);
        let direct = f.transformed(&Transformation::stretch(Axis::Y, 2.0).unwrap());
        assert_same_graph(&quarter, &direct);
    }

    #[test]
    fn test_reflect_midway_uses_cross_axis_stretch() {
        let f = Function::parse("x + 1").unwrap();
        let frame = animate_step(&f, &Transformation::reflect(Axis::X), 0.5);
        let factor = 1.0 - 2.0 * (std::f64::consts::FRAC_PI_4).sin();
        let y = frame.sample(1.0, AngleMode::Radians).unwrap();
        assert!((y - 2.0 * factor).abs() < 1e-12);
    }

    #[test]
    fn test_base_untouched() {
        let f = Function::parse("cos(x)").unwrap();
        let snapshot = f.clone();
        let _ = animate_step(&f, &Transformation::reflect(Axis::Y), 0.7);
        assert_eq!(f, snapshot);
    }
}
