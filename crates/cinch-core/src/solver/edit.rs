//! Edit variables: cheap runtime re-targeting of suggested values.
//!
//! `edit` installs a stay constraint for the variable and remembers its
//! tag; `suggest` then shifts the stay's constant by the value delta and
//! lets the dual pass repair any rows that went infeasible. Nothing else
//! in the tableau is touched, which is what makes repeated suggestions
//! cheap.

use cinch_expr::{Constraint, RelOp, SymbolId};

use crate::error::SolverError;
use crate::priority::Priority;
use crate::solver::{EditRecord, Solver, Tag};

impl Solver {
    /// Register `symbol` as editable at the given priority.
    ///
    /// The priority must be valid and strictly below required: a required
    /// edit would pin the variable and leave `suggest` nothing to trade
    /// off. Editing an already-editable symbol is a no-op.
    pub fn edit(&mut self, symbol: SymbolId, priority: Priority) -> Result<(), SolverError> {
        if !priority.is_valid_for_edit() {
            return Err(SolverError::BadPriority {
                weight: priority.weight(),
            });
        }
        if self.edits.contains_key(&symbol) {
            return Ok(());
        }

        let stay = Constraint::new(RelOp::Eq, 0.0, [symbol.term(1.0)]);
        let marker = self.add_constraint_with_priority(priority, stay)?;
        let Some(tag) = self.tags.get(&marker).copied() else {
            return Err(SolverError::Internal("edit stay constraint lost its tag"));
        };
        self.edits.insert(symbol, EditRecord { tag, value: 0.0 });

        tracing::debug!(
            component = "solver",
            operation = "edit",
            status = "success",
            symbol = symbol.inner(),
            priority = priority.label(),
            "Registered edit variable"
        );
        Ok(())
    }

    /// Suggest a new value for an edit variable.
    ///
    /// The delta against the previous suggestion is pushed into the stay
    /// constraint's row (or spread through the rows that mention its
    /// marker), then dual optimization restores feasibility.
    pub fn suggest(&mut self, symbol: SymbolId, value: f64) -> Result<(), SolverError> {
        let Some(record) = self.edits.get_mut(&symbol) else {
            return Err(SolverError::NotEditable(symbol));
        };

        let delta = value - record.value;
        record.value = value;
        let tag = record.tag;

        self.apply_delta(&tag, delta);

        tracing::debug!(
            component = "solver",
            operation = "suggest",
            status = "success",
            symbol = symbol.inner(),
            value,
            delta,
            infeasible = self.infeasible.len(),
            "Applied suggestion"
        );
        self.optimize_dual()
    }

    fn apply_delta(&mut self, tag: &Tag, delta: f64) {
        if let Some(row) = self.tableau.get_mut(tag.marker) {
            row.offset_constant(-delta);
            if row.constant() < 0.0 {
                self.infeasible.push(tag.marker);
            }
            return;
        }

        if let Some(other) = tag.other {
            if let Some(row) = self.tableau.get_mut(other) {
                row.offset_constant(-delta);
                if row.constant() < 0.0 {
                    self.infeasible.push(other);
                }
                return;
            }
        }

        // Marker is parametric: the delta flows through every row that
        // mentions it, scaled by its coefficient there.
        let mut newly_infeasible = Vec::new();
        for (basic, row) in self.tableau.iter_mut() {
            let Some(coeff) = row.coefficient_of(tag.marker) else {
                continue;
            };
            row.offset_constant(coeff * delta);
            if row.constant() < 0.0 {
                newly_infeasible.push(basic);
            }
        }
        for basic in newly_infeasible {
            if !self.is_free(basic) {
                self.infeasible.push(basic);
            }
        }
    }
}
