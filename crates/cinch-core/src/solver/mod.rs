//! The incremental solver.
//!
//! # Module Organization
//!
//! - [`add`]: constraint normalization, subject selection, artificial phase
//! - [`optimize`]: primal and dual simplex pivots
//! - [`edit`]: edit-variable registration and suggestion
//! - [`remove`]: constraint removal
//! - [`metadata`]: external-variable naming
//! - [`inspect`]: structured snapshots and ASCII dumps

mod add;
mod edit;
mod inspect;
mod metadata;
mod optimize;
mod remove;

use std::collections::BTreeMap;

use cinch_expr::{Expr, SymbolId, SymbolKind};

use crate::priority::Priority;
use crate::registry::SymbolRegistry;
use crate::tableau::Tableau;

pub use inspect::{ObjectiveView, RowView, SnapshotCounts, SolverSnapshot};

/// Bookkeeping recorded for each installed constraint.
///
/// `marker` is the internal symbol that identifies the constraint (returned
/// to the caller for later removal); `other` is the second error symbol of a
/// non-required equality, or the paired error of a non-required inequality.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Tag {
    pub(crate) priority: Priority,
    pub(crate) marker: SymbolId,
    pub(crate) other: Option<SymbolId>,
}

/// Edit binding: the stay constraint's tag plus the last suggested value.
#[derive(Debug, Clone, Copy)]
pub(crate) struct EditRecord {
    pub(crate) tag: Tag,
    pub(crate) value: f64,
}

/// An incremental solver for weighted linear constraints.
///
/// Single-threaded and synchronous: every operation runs to completion, and
/// the observable state after a sequence of operations is deterministic for
/// that sequence.
#[derive(Debug, Clone, Default)]
pub struct Solver {
    pub(crate) registry: SymbolRegistry,
    pub(crate) tableau: Tableau,
    pub(crate) tags: BTreeMap<SymbolId, Tag>,
    pub(crate) edits: BTreeMap<SymbolId, EditRecord>,
    pub(crate) infeasible: Vec<SymbolId>,
    pub(crate) objective: Expr,
    pub(crate) artificial: Expr,
    pub(crate) variable_names: Option<BTreeMap<SymbolId, String>>,
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh external variable.
    pub fn new_variable(&mut self) -> SymbolId {
        let id = self.registry.allocate(SymbolKind::External);
        tracing::debug!(
            component = "solver",
            operation = "new_variable",
            status = "success",
            symbol = id.inner(),
            "Allocated external variable"
        );
        id
    }

    /// Current value of a symbol: its row constant if basic, otherwise 0.
    pub fn value_of(&self, symbol: SymbolId) -> f64 {
        self.tableau
            .get(symbol)
            .map(Expr::constant)
            .unwrap_or_default()
    }

    /// Whether `symbol` has an edit binding.
    pub fn has_edit(&self, symbol: SymbolId) -> bool {
        self.edits.contains_key(&symbol)
    }

    /// Kind of a live symbol, if this solver issued it and it has not been
    /// retired by a pivot.
    pub fn symbol_kind(&self, symbol: SymbolId) -> Option<SymbolKind> {
        self.registry.kind_of(symbol)
    }

    /// Number of live external variables.
    pub fn num_variables(&self) -> usize {
        self.registry.count_of(SymbolKind::External)
    }

    /// Number of installed constraints.
    pub fn num_constraints(&self) -> usize {
        self.tags.len()
    }

    /// External symbols, and symbols retired from the registry by past
    /// pivots, are unrestricted: they may take any sign and their rows are
    /// never queued for dual re-optimization.
    pub(crate) fn is_free(&self, symbol: SymbolId) -> bool {
        match self.registry.kind_of(symbol) {
            Some(kind) => kind == SymbolKind::External,
            None => true,
        }
    }

    /// Substitute `symbol := expr` through the tableau, the objective, and
    /// the artificial objective, queueing restricted rows whose constants
    /// turned negative.
    pub(crate) fn substitute(&mut self, symbol: SymbolId, expr: &Expr) {
        let negative = self.tableau.substitute(symbol, expr);
        for basic in negative {
            if !self.is_free(basic) {
                self.infeasible.push(basic);
            }
        }
        self.objective.substitute(symbol, expr);
        self.artificial.substitute(symbol, expr);
    }

    /// Remove every trace of `symbol` from row expressions and the
    /// objective. Used to drop the artificial variable after its phase.
    pub(crate) fn scrub_symbol(&mut self, symbol: SymbolId) {
        self.tableau.scrub(symbol);
        if let Some(coeff) = self.objective.coefficient_of(symbol) {
            self.objective.add_symbol(-coeff, symbol);
        }
    }
}
