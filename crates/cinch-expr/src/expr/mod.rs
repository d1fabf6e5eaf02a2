//! Linear expression types for the simplex tableau.
//!
//! - `core`       — Term and Expr: the row-expression algebra
//! - `constraint` — Constraint: expression with a relational operator
//! - `builders`   — convenience constructors on `SymbolId`

pub mod builders;
pub mod constraint;
pub mod core;

pub use constraint::{Constraint, RelOp};
pub use core::{Expr, Term, approx_zero};
