//! Incremental constraint solving over weighted linear constraints.
//!
//! The solver keeps a simplex tableau in parametric form and re-optimizes
//! incrementally as constraints are added, removed, or edited. Required
//! constraints are satisfied exactly; lower-priority constraints are
//! violated as cheaply as the weighted objective allows.
//!
//! # Overview
//!
//! - [`Solver`]: the tableau-owning state machine
//! - [`Priority`]: constraint strength ladder (weak through required)
//! - [`SolverError`]: error taxonomy for the public operations
//! - [`SolverSnapshot`]: structured inspection of the solver state

pub mod error;
pub mod priority;
pub mod registry;
pub mod solver;
pub mod tableau;

pub use error::SolverError;
pub use priority::Priority;
pub use solver::{ObjectiveView, RowView, SnapshotCounts, Solver, SolverSnapshot};
