pub mod expr;
pub mod ids;

pub use expr::{Constraint, Expr, RelOp, Term, approx_zero};
pub use ids::{SymbolId, SymbolKind};
