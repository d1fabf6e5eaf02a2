//! Solver error types.

use cinch_expr::SymbolId;

/// Errors surfaced by the solver's public operations.
#[derive(Debug, Clone, PartialEq)]
pub enum SolverError {
    /// A constraint term references a symbol this solver never issued.
    UnknownSymbol(SymbolId),
    /// A required constraint cannot be satisfied.
    Unsatisfiable,
    /// Priority is out of range for the operation.
    BadPriority { weight: f64 },
    /// `suggest` was called on a symbol with no edit binding.
    NotEditable(SymbolId),
    /// `remove_constraint` was given a marker with no registered tag.
    UnknownMarker(SymbolId),
    /// An internal invariant failed; the tableau was left untouched by the
    /// failed step.
    Internal(&'static str),
}

impl SolverError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            SolverError::UnknownSymbol(_) => "SYMBOL_UNKNOWN",
            SolverError::Unsatisfiable => "CONSTRAINT_UNSATISFIABLE",
            SolverError::BadPriority { .. } => "PRIORITY_INVALID",
            SolverError::NotEditable(_) => "EDIT_UNREGISTERED",
            SolverError::UnknownMarker(_) => "MARKER_UNREGISTERED",
            SolverError::Internal(_) => "SOLVER_INTERNAL",
        }
    }
}

impl std::fmt::Display for SolverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverError::UnknownSymbol(id) => write!(
                f,
                "[{}] Symbol {} was not issued by this solver",
                self.code(),
                id.inner()
            ),
            SolverError::Unsatisfiable => write!(
                f,
                "[{}] Constraint cannot be satisfied at required priority",
                self.code()
            ),
            SolverError::BadPriority { weight } => write!(
                f,
                "[{}] Priority weight {} is out of range for this operation",
                self.code(),
                weight
            ),
            SolverError::NotEditable(id) => write!(
                f,
                "[{}] Symbol {} is not registered as an edit variable",
                self.code(),
                id.inner()
            ),
            SolverError::UnknownMarker(id) => write!(
                f,
                "[{}] Marker {} does not refer to a constraint",
                self.code(),
                id.inner()
            ),
            SolverError::Internal(msg) => {
                write!(f, "[{}] Solver internal error: {}", self.code(), msg)
            }
        }
    }
}

impl std::error::Error for SolverError {}
