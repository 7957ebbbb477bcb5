//! Abstract Syntax Tree for single-variable expressions
//!
//! Every node exclusively owns its children: the tree is never shared or
//! cyclic, so `Clone` is a deep copy that produces a disjoint tree.

use std::fmt;

/// Trigonometric functions understood by the lexer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrigFn {
    Sin,
    Cos,
    Tan,
}

impl TrigFn {
    pub const ALL: [TrigFn; 3] = [TrigFn::Sin, TrigFn::Cos, TrigFn::Tan];

    /// Canonical lowercase name (`sin`, `cos`, `tan`)
    pub fn name(self) -> &'static str {
        match self {
            TrigFn::Sin => "sin",
            TrigFn::Cos => "cos",
            TrigFn::Tan => "tan",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        TrigFn::ALL.into_iter().find(|f| f.name() == name)
    }
}

impl fmt::Display for TrigFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Binary operators with their BIDMAS precedence and associativity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    /// Source symbol (`**` for power)
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Pow => "**",
        }
    }

    pub fn precedence(self) -> u8 {
        match self {
            BinaryOp::Add | BinaryOp::Sub => 1,
            BinaryOp::Mul | BinaryOp::Div => 2,
            BinaryOp::Pow => 3,
        }
    }

    pub fn is_right_associative(self) -> bool {
        matches!(self, BinaryOp::Pow)
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal (e.g., 3, 2.5, .5)
    Number(f64),

    /// The bound variable of the expression (a single letter)
    Variable(char),

    /// Binary operation with exactly two owned operands
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Trigonometric function applied to a single owned argument
    Call { func: TrigFn, arg: Box<Expr> },
}

impl Expr {
    // Convenience constructors

    /// Create a number expression
    pub fn number(n: f64) -> Self {
        Expr::Number(n)
    }

    /// Create a variable expression
    pub fn variable(name: char) -> Self {
        Expr::Variable(name)
    }

    /// Create a binary expression
    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Create an addition expression
    pub fn add_expr(left: Expr, right: Expr) -> Self {
        Expr::binary(BinaryOp::Add, left, right)
    }

    /// Create a subtraction expression
    pub fn sub_expr(left: Expr, right: Expr) -> Self {
        Expr::binary(BinaryOp::Sub, left, right)
    }

    /// Create a multiplication expression
    pub fn mul_expr(left: Expr, right: Expr) -> Self {
        Expr::binary(BinaryOp::Mul, left, right)
    }

    /// Create a division expression
    pub fn div_expr(left: Expr, right: Expr) -> Self {
        Expr::binary(BinaryOp::Div, left, right)
    }

    /// Create a power expression
    pub fn pow(base: Expr, exponent: Expr) -> Self {
        Expr::binary(BinaryOp::Pow, base, exponent)
    }

    /// Create a function call expression
    pub fn call(func: TrigFn, arg: Expr) -> Self {
        Expr::Call {
            func,
            arg: Box::new(arg),
        }
    }

    // Accessor methods

    /// Return the literal value if this is a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Expr::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Check if this expression is the number zero (with tolerance)
    #[inline]
    pub fn is_zero_num(&self) -> bool {
        self.as_number().is_some_and(crate::traits::is_zero)
    }

    /// Check if this expression is the number one (with tolerance)
    #[inline]
    pub fn is_one_num(&self) -> bool {
        self.as_number().is_some_and(crate::traits::is_one)
    }

    // Analysis methods

    /// Count the total number of nodes in the AST
    pub fn node_count(&self) -> usize {
        let mut counter = crate::visitor::NodeCounter::default();
        crate::visitor::walk_expr(self, &mut counter);
        counter.count
    }

    /// Get the maximum nesting depth of the AST
    pub fn max_depth(&self) -> usize {
        match self {
            Expr::Number(_) | Expr::Variable(_) => 1,
            Expr::Call { arg, .. } => 1 + arg.max_depth(),
            Expr::Binary { left, right, .. } => 1 + left.max_depth().max(right.max_depth()),
        }
    }

    /// Check whether any `Variable` leaf appears in the tree
    pub fn contains_variable(&self) -> bool {
        match self {
            Expr::Number(_) => false,
            Expr::Variable(_) => true,
            Expr::Call { arg, .. } => arg.contains_variable(),
            Expr::Binary { left, right, .. } => {
                left.contains_variable() || right.contains_variable()
            }
        }
    }

    /// Check whether the tree contains `sin`, `cos` or `tan`
    ///
    /// Controllers use this to decide between degree and radian axis labels.
    pub fn contains_trig(&self) -> bool {
        let mut finder = crate::visitor::TrigFinder::default();
        crate::visitor::walk_expr(self, &mut finder);
        finder.found
    }
}
