//! Constraints: a linear expression compared against zero.

use crate::expr::core::{Expr, Term};

/// Relational operator of a constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelOp {
    Eq,
    Le,
    Ge,
}

impl RelOp {
    pub fn as_str(self) -> &'static str {
        match self {
            RelOp::Eq => "=",
            RelOp::Le => "<=",
            RelOp::Ge => ">=",
        }
    }
}

impl std::fmt::Display for RelOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A raw constraint with semantics `constant + Σ coeff·symbol  op  0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    op: RelOp,
    expr: Expr,
}

impl Constraint {
    /// Build a constraint from an operator, a constant, and terms.
    ///
    /// Duplicate symbols in `terms` coalesce.
    pub fn new(op: RelOp, constant: f64, terms: impl IntoIterator<Item = Term>) -> Self {
        Self {
            op,
            expr: Expr::with_terms(constant, terms),
        }
    }

    /// Constraint from an already-built expression.
    pub fn from_expr(op: RelOp, expr: Expr) -> Self {
        Self { op, expr }
    }

    pub fn op(&self) -> RelOp {
        self.op
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn into_parts(self) -> (RelOp, Expr) {
        (self.op, self.expr)
    }
}
