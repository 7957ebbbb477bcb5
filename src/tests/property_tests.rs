//! Property-Based and Fuzz Testing
//!
//! Uses quickcheck for property-based testing of:
//! - Parser robustness (fuzz testing)
//! - Display/parse consistency
//! - Evaluation determinism
//! - Linear animation progress

use quickcheck::{Arbitrary, Gen, QuickCheck, TestResult};

use crate::{AngleMode, Axis, Function, Transformation, animate_step, build_tree, parse};

// ============================================================
// PART 1: EXPRESSION GENERATORS FOR PROPERTY TESTS
// ============================================================

/// Generate random valid single-variable expression strings
fn random_expr_string(g: &mut Gen) -> String {
    let depth = g.size().min(4); // Limit depth to keep trees small
    gen_expr_string_recursive(g, depth)
}

fn gen_expr_string_recursive(g: &mut Gen, depth: usize) -> String {
    if depth == 0 {
        return match u8::arbitrary(g) % 3 {
            0 => {
                let n = f64::arbitrary(g);
                if n.is_finite() && n.abs() < 1e6 {
                    format!("{:.3}", n.abs())
                } else {
                    "1".to_string()
                }
            }
            _ => "x".to_string(),
        };
    }

    match u8::arbitrary(g) % 10 {
        0..=3 => {
            let ops = ["+", "-", "*", "/"];
            let op = ops[usize::arbitrary(g) % ops.len()];
            let left = gen_expr_string_recursive(g, depth - 1);
            let right = gen_expr_string_recursive(g, depth - 1);
            format!("({} {} {})", left, op, right)
        }
        4 => {
            // Exponent always parenthesized so `x ^ x` never forms
            let base = gen_expr_string_recursive(g, depth - 1);
            let exponent = gen_expr_string_recursive(g, depth - 1);
            format!("({})^({})", base, exponent)
        }
        5..=6 => {
            let fns = ["sin", "cos", "tan"];
            let f = fns[usize::arbitrary(g) % fns.len()];
            let arg = gen_expr_string_recursive(g, depth - 1);
            format!("{}({})", f, arg)
        }
        7 => {
            let arg = gen_expr_string_recursive(g, depth - 1);
            format!("(-({}))", arg)
        }
        8 => {
            // Implicit multiplication
            let arg = gen_expr_string_recursive(g, depth - 1);
            format!("{}({})", u8::arbitrary(g) % 9 + 1, arg)
        }
        _ => gen_expr_string_recursive(g, depth - 1),
    }
}

/// Equal as samples: both undefined, both NaN, or within relative tolerance
fn same_sample(a: Option<f64>, b: Option<f64>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) if a.is_nan() && b.is_nan() => true,
        (Some(a), Some(b)) if a.is_infinite() || b.is_infinite() => a == b,
        (Some(a), Some(b)) => (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0),
        _ => false,
    }
}

// ============================================================
// PART 2: PARSER FUZZ TESTS
// ============================================================

/// Property: no stage panics on arbitrary input
#[test]
fn test_pipeline_never_panics_on_random_input() {
    fn prop_no_panic(input: String) -> TestResult {
        if let Ok(parsed) = parse(&input)
            && let Ok(tree) = build_tree(parsed.tokens)
        {
            let _ = crate::evaluate(&tree, 1.5, parsed.variable, AngleMode::Degrees);
            let _ = tree.derive();
            let _ = tree.to_string();
        }
        // Validated input always reduces to one tree
        let _ = crate::Parser::new().parse(&input);
        TestResult::passed()
    }
    QuickCheck::new()
        .tests(1000)
        .max_tests(2000)
        .quickcheck(prop_no_panic as fn(String) -> TestResult);
}

/// Property: generated expressions are always accepted
#[test]
fn test_generated_expressions_parse() {
    let mut g = Gen::new(10);
    for _ in 0..300 {
        let expr_str = random_expr_string(&mut g);
        let result = Function::parse(&expr_str);
        assert!(result.is_ok(), "{} rejected: {:?}", expr_str, result);
    }
}

/// Fuzz test with specifically crafted edge cases
#[test]
fn test_parser_edge_cases() {
    let edge_cases = [
        "", "   ", "()", "((()))", "+++", "---x", "1+", "+1", "sin()", "sin(x,x)", "1..2",
        "99999999999999999999999999999999999999", "x^y^z", "((((x))))", ")(", "sin(cos(tan(x)))",
        "1/0", "0/0", "(-0)", "∞", "π", "x**-x", "-", "**", "2**", "tansin(x)",
    ];
    for case in &edge_cases {
        // Should not panic - may succeed or fail with error
        if let Ok(parsed) = parse(case) {
            let _ = build_tree(parsed.tokens);
        }
    }
}

// ============================================================
// PART 3: SEMANTIC PROPERTIES
// ============================================================

/// Property: displayed trees re-parse to the same tree
#[test]
fn test_display_round_trip() {
    let mut g = Gen::new(8);
    for _ in 0..200 {
        let expr_str = random_expr_string(&mut g);
        let original = Function::parse(&expr_str).unwrap();
        let displayed = original.to_string();
        let reparsed = Function::parse(&displayed)
            .unwrap_or_else(|e| panic!("{} displayed as {} fails: {}", expr_str, displayed, e));
        assert_eq!(reparsed.tree(), original.tree(), "{} vs {}", expr_str, displayed);
    }
}

/// Property: derivatives display as valid input with the same values
#[test]
fn test_derivative_display_reparses() {
    let mut g = Gen::new(6);
    for _ in 0..200 {
        let f = Function::parse(&random_expr_string(&mut g)).unwrap();
        let Ok(d) = f.derivative() else { continue };
        let reparsed = Function::parse(&d.to_string())
            .unwrap_or_else(|e| panic!("{} does not re-parse: {}", d, e));
        for x in [-2.5, 0.5, 3.25] {
            let a = d.sample(x, AngleMode::Radians);
            let b = reparsed.sample(x, AngleMode::Radians);
            assert!(same_sample(a, b), "{} at {}: {:?} vs {:?}", d, x, a, b);
        }
    }
}

/// Property: evaluation is deterministic for identical inputs
#[test]
fn test_evaluation_is_deterministic() {
    fn prop_deterministic(x: f64) -> TestResult {
        if !x.is_finite() {
            return TestResult::discard();
        }
        let mut g = Gen::new(6);
        let f = Function::parse(&random_expr_string(&mut g)).unwrap();
        let first = f.sample(x, AngleMode::Degrees);
        let second = f.sample(x, AngleMode::Degrees);
        let same = match (first, second) {
            (Some(a), Some(b)) => a.to_bits() == b.to_bits(),
            (None, None) => true,
            _ => false,
        };
        TestResult::from_bool(same)
    }
    QuickCheck::new()
        .tests(300)
        .quickcheck(prop_deterministic as fn(f64) -> TestResult);
}

/// Property: a shift at progress p is the shift by p times the amount
#[test]
fn test_shift_progress_is_linear() {
    fn prop_linear(amount: i16, step: u8, x: i8) -> TestResult {
        let progress = f64::from(step % 100) / 100.0;
        if progress == 0.0 {
            return TestResult::discard();
        }
        let amount = f64::from(amount) / 8.0;
        let x = f64::from(x) / 4.0;
        let f = Function::parse("x^2 - 3x + 1").unwrap();
        let Ok(shift) = Transformation::shift(Axis::X, amount) else {
            return TestResult::failed();
        };
        let frame = animate_step(&f, &shift, progress);
        let expected = f.sample(x - amount * progress, AngleMode::Radians);
        TestResult::from_bool(frame.sample(x, AngleMode::Radians) == expected)
    }
    QuickCheck::new()
        .tests(500)
        .quickcheck(prop_linear as fn(i16, u8, i8) -> TestResult);
}

/// Property: the source function survives any transformation or derivative
#[test]
fn test_operations_never_mutate_input() {
    let mut g = Gen::new(8);
    for _ in 0..100 {
        let f = Function::parse(&random_expr_string(&mut g)).unwrap();
        let snapshot = f.clone();
        let _ = f.derivative();
        let _ = f.transformed(&Transformation::reflect(Axis::Y));
        let _ = animate_step(&f, &Transformation::stretch(Axis::X, 3.0).unwrap(), 0.4);
        assert_eq!(f, snapshot);
    }
}
