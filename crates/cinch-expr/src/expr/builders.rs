//! Convenience constructors for terms and single-variable constraints.

use crate::expr::constraint::{Constraint, RelOp};
use crate::expr::core::Term;
use crate::ids::SymbolId;

impl SymbolId {
    /// `coeff * self` as a term.
    pub fn term(self, coeff: f64) -> Term {
        Term::new(coeff, self)
    }

    /// `self = value`.
    pub fn eq_value(self, value: f64) -> Constraint {
        Constraint::new(RelOp::Eq, -value, [self.term(1.0)])
    }

    /// `self >= value`.
    pub fn ge_value(self, value: f64) -> Constraint {
        Constraint::new(RelOp::Ge, -value, [self.term(1.0)])
    }

    /// `self <= value`.
    pub fn le_value(self, value: f64) -> Constraint {
        Constraint::new(RelOp::Le, -value, [self.term(1.0)])
    }
}
