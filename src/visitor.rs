//! Expression visitor pattern for AST traversal
//!
//! Provides a read-only walk over the expression tree without manually
//! handling the recursive structure.

use crate::ast::{BinaryOp, Expr, TrigFn};

/// Trait for visiting expression nodes in the AST
///
/// Each method returns a boolean indicating whether to continue visiting children.
///
/// # Example
/// ```
/// use graph_morph::{Expr, visitor::{ExprVisitor, walk_expr}};
/// use graph_morph::{BinaryOp, TrigFn};
///
/// struct LiteralSum(f64);
///
/// impl ExprVisitor for LiteralSum {
///     fn visit_number(&mut self, n: f64) -> bool { self.0 += n; true }
///     fn visit_variable(&mut self, _name: char) -> bool { true }
///     fn visit_call(&mut self, _func: TrigFn, _arg: &Expr) -> bool { true }
///     fn visit_binary(&mut self, _op: BinaryOp, _l: &Expr, _r: &Expr) -> bool { true }
/// }
///
/// let expr = Expr::add_expr(Expr::number(2.0), Expr::number(3.0));
/// let mut sum = LiteralSum(0.0);
/// walk_expr(&expr, &mut sum);
/// assert_eq!(sum.0, 5.0);
/// ```
pub trait ExprVisitor {
    /// Visit a number literal, returns true to continue visiting
    fn visit_number(&mut self, n: f64) -> bool;

    /// Visit the bound variable, returns true to continue visiting
    fn visit_variable(&mut self, name: char) -> bool;

    /// Visit a function call, returns true to visit its argument
    fn visit_call(&mut self, func: TrigFn, arg: &Expr) -> bool;

    /// Visit a binary operation (+, -, *, /, **), returns true to visit operands
    fn visit_binary(&mut self, op: BinaryOp, left: &Expr, right: &Expr) -> bool;
}

/// Walk an expression tree with a visitor
///
/// Visits nodes in pre-order (parent before children).
pub fn walk_expr<V: ExprVisitor>(expr: &Expr, visitor: &mut V) {
    match expr {
        Expr::Number(n) => {
            visitor.visit_number(*n);
        }
        Expr::Variable(name) => {
            visitor.visit_variable(*name);
        }
        Expr::Call { func, arg } => {
            if visitor.visit_call(*func, arg) {
                walk_expr(arg, visitor);
            }
        }
        Expr::Binary { op, left, right } => {
            if visitor.visit_binary(*op, left, right) {
                walk_expr(left, visitor);
                walk_expr(right, visitor);
            }
        }
    }
}

/// A simple visitor that counts nodes
#[derive(Default)]
pub struct NodeCounter {
    pub count: usize,
}

impl ExprVisitor for NodeCounter {
    fn visit_number(&mut self, _n: f64) -> bool {
        self.count += 1;
        true
    }

    fn visit_variable(&mut self, _name: char) -> bool {
        self.count += 1;
        true
    }

    fn visit_call(&mut self, _func: TrigFn, _arg: &Expr) -> bool {
        self.count += 1;
        true
    }

    fn visit_binary(&mut self, _op: BinaryOp, _left: &Expr, _right: &Expr) -> bool {
        self.count += 1;
        true
    }
}

/// Stops at the first trigonometric call
#[derive(Default)]
pub struct TrigFinder {
    pub found: bool,
}

impl ExprVisitor for TrigFinder {
    fn visit_number(&mut self, _n: f64) -> bool {
        false
    }

    fn visit_variable(&mut self, _name: char) -> bool {
        false
    }

    fn visit_call(&mut self, _func: TrigFn, _arg: &Expr) -> bool {
        self.found = true;
        false
    }

    fn visit_binary(&mut self, _op: BinaryOp, _left: &Expr, _right: &Expr) -> bool {
        !self.found
    }
}

/// Collects the distinct variable letters in first-seen order
#[derive(Default)]
pub struct VariableCollector {
    pub names: Vec<char>,
}

impl ExprVisitor for VariableCollector {
    fn visit_number(&mut self, _n: f64) -> bool {
        true
    }

    fn visit_variable(&mut self, name: char) -> bool {
        if !self.names.contains(&name) {
            self.names.push(name);
        }
        true
    }

    fn visit_call(&mut self, _func: TrigFn, _arg: &Expr) -> bool {
        true
    }

    fn visit_binary(&mut self, _op: BinaryOp, _left: &Expr, _right: &Expr) -> bool {
        true
    }
}
