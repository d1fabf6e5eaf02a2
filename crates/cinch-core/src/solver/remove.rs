//! Constraint removal.

use cinch_expr::{SymbolId, SymbolKind};

use crate::error::SolverError;
use crate::priority::Priority;
use crate::solver::Solver;

impl Solver {
    /// Remove a constraint by the marker returned from `add_constraint`.
    ///
    /// The marker's objective contributions are reverted, its row (or a
    /// row it can be pivoted into) is dropped, and the objective is
    /// re-optimized. An edit binding whose stay constraint this was is
    /// dropped with it.
    pub fn remove_constraint(&mut self, marker: SymbolId) -> Result<(), SolverError> {
        let Some(tag) = self.tags.remove(&marker) else {
            return Err(SolverError::UnknownMarker(marker));
        };

        self.edits.retain(|_, record| record.tag.marker != marker);

        self.remove_error_weight(tag.priority, tag.marker);
        if let Some(other) = tag.other {
            self.remove_error_weight(tag.priority, other);
        }

        if self.tableau.remove(tag.marker).is_some() {
            self.registry.retire(tag.marker);
        } else if let Some(leaving) = self.exit_row_for(tag.marker) {
            // Pivot the marker in through the chosen row, then drop it:
            // substitution eliminates the marker from every expression and
            // the row itself is never reinstalled.
            let Some(mut row) = self.tableau.remove(leaving) else {
                return Err(SolverError::Internal("exit row vanished during removal"));
            };
            self.registry.retire(leaving);
            row.solve_for_symbols(leaving, tag.marker);
            self.substitute(tag.marker, &row);
            self.registry.retire(tag.marker);
        } else {
            // No row mentions the marker; it is already parametric at zero.
            self.registry.retire(tag.marker);
        }

        self.optimize_objective()?;

        tracing::debug!(
            component = "solver",
            operation = "remove_constraint",
            status = "success",
            marker = marker.inner(),
            rows = self.tableau.len(),
            "Removed constraint"
        );
        Ok(())
    }

    /// Subtract an error symbol's priority weight from the objective. If
    /// the symbol is basic its whole row is charged, mirroring what
    /// substitution would have spread there.
    fn remove_error_weight(&mut self, priority: Priority, symbol: SymbolId) {
        if self.registry.kind_of(symbol) != Some(SymbolKind::Error) {
            return;
        }
        let weight = priority.weight();
        match self.tableau.get(symbol) {
            Some(row) => self.objective.add_expr(-weight, row),
            None => self.objective.add_symbol(-weight, symbol),
        }
    }

    /// Choose the row to pivot a parametric marker into, preferring: a
    /// restricted row with a negative marker coefficient at minimal
    /// -constant/coeff; then a restricted row with a positive coefficient;
    /// then any unrestricted row mentioning the marker.
    fn exit_row_for(&self, marker: SymbolId) -> Option<SymbolId> {
        let mut negative_ratio = f64::MAX;
        let mut positive_ratio = f64::MAX;
        let mut negative: Option<SymbolId> = None;
        let mut positive: Option<SymbolId> = None;
        let mut unrestricted: Option<SymbolId> = None;

        for (basic, row) in self.tableau.iter() {
            let Some(coeff) = row.coefficient_of(marker) else {
                continue;
            };
            if self.is_free(basic) {
                unrestricted = Some(basic);
                continue;
            }
            let ratio = -row.constant() / coeff;
            if coeff < 0.0 {
                if ratio < negative_ratio {
                    negative_ratio = ratio;
                    negative = Some(basic);
                }
            } else if ratio < positive_ratio {
                positive_ratio = ratio;
                positive = Some(basic);
            }
        }

        negative.or(positive).or(unrestricted)
    }
}
