//! Constraint insertion: normalization to augmented simplex form, subject
//! selection, and the artificial-variable phase.

use cinch_expr::{Constraint, Expr, RelOp, SymbolId, SymbolKind, approx_zero};

use crate::error::SolverError;
use crate::priority::Priority;
use crate::registry::SymbolRegistry;
use crate::solver::{Solver, Tag};
use crate::tableau::Tableau;

/// Pre-pivot snapshot taken before the artificial phase, restored on
/// unsatisfiability so a failed insertion leaves no trace.
struct Staged {
    registry: SymbolRegistry,
    tableau: Tableau,
    objective: Expr,
    infeasible: Vec<SymbolId>,
}

impl Solver {
    /// Add a constraint at required priority. Returns the constraint's
    /// marker, used to remove it later.
    pub fn add_constraint(&mut self, constraint: Constraint) -> Result<SymbolId, SolverError> {
        self.add_constraint_with_priority(Priority::REQUIRED, constraint)
    }

    /// Add a constraint at the given priority.
    ///
    /// Non-required constraints may be violated; the solver minimizes the
    /// priority-weighted sum of violations. Weights at or above
    /// [`Priority::REQUIRED`] are treated as required.
    pub fn add_constraint_with_priority(
        &mut self,
        priority: Priority,
        constraint: Constraint,
    ) -> Result<SymbolId, SolverError> {
        if !priority.is_valid() {
            return Err(SolverError::BadPriority {
                weight: priority.weight(),
            });
        }

        let op = constraint.op();
        let mut row = self.resolve(&constraint)?;
        let tag = self.augment(&mut row, op, priority);

        if row.constant() < 0.0 {
            row.negate();
        }

        let subject = match self.find_subject(&row, &tag) {
            Ok(subject) => subject,
            Err(err) => {
                self.revert_augmentation(&tag);
                return Err(err);
            }
        };

        match subject {
            Some(subject) => {
                row.solve_for(subject);
                self.substitute(subject, &row);
                self.tableau.insert(subject, row);
            }
            None => {
                let staged = self.stage();
                if let Err(err) = self.add_with_artificial(row) {
                    self.restore(staged);
                    self.revert_augmentation(&tag);
                    return Err(err);
                }
            }
        }

        self.tags.insert(tag.marker, tag);
        self.optimize_objective()?;

        tracing::debug!(
            component = "solver",
            operation = "add_constraint",
            status = "success",
            marker = tag.marker.inner(),
            op = op.as_str(),
            priority = priority.label(),
            rows = self.tableau.len(),
            "Added constraint"
        );
        Ok(tag.marker)
    }

    /// Rebuild the constraint's expression against the current tableau:
    /// negligible terms are skipped, unknown symbols rejected, and terms
    /// over basic symbols replaced by that symbol's row.
    fn resolve(&self, constraint: &Constraint) -> Result<Expr, SolverError> {
        let mut resolved = Expr::from_constant(constraint.expr().constant());

        for term in constraint.expr().terms() {
            if approx_zero(term.coeff) {
                continue;
            }
            if !self.registry.contains(term.symbol) {
                return Err(SolverError::UnknownSymbol(term.symbol));
            }
            match self.tableau.get(term.symbol) {
                Some(row) => resolved.add_expr(term.coeff, row),
                None => resolved.add_symbol(term.coeff, term.symbol),
            }
        }

        Ok(resolved)
    }

    /// Convert the resolved expression to augmented simplex form by
    /// inserting slack/error/dummy symbols for the operator and priority,
    /// and charge error symbols to the objective.
    fn augment(&mut self, row: &mut Expr, op: RelOp, priority: Priority) -> Tag {
        let weight = priority.weight();

        match op {
            RelOp::Le | RelOp::Ge => {
                let coeff = if op == RelOp::Le { 1.0 } else { -1.0 };
                let marker = self.registry.allocate(SymbolKind::Slack);
                row.add_symbol(coeff, marker);

                let other = (!priority.is_required()).then(|| {
                    let error = self.registry.allocate(SymbolKind::Error);
                    row.add_symbol(-coeff, error);
                    self.objective.add_symbol(weight, error);
                    error
                });

                Tag {
                    priority,
                    marker,
                    other,
                }
            }
            RelOp::Eq => {
                if priority.is_required() {
                    let marker = self.registry.allocate(SymbolKind::Dummy);
                    row.add_symbol(1.0, marker);
                    Tag {
                        priority,
                        marker,
                        other: None,
                    }
                } else {
                    let marker = self.registry.allocate(SymbolKind::Error);
                    let other = self.registry.allocate(SymbolKind::Error);

                    row.add_symbol(-1.0, marker);
                    row.add_symbol(1.0, other);

                    self.objective.add_symbol(weight, marker);
                    self.objective.add_symbol(weight, other);

                    Tag {
                        priority,
                        marker,
                        other: Some(other),
                    }
                }
            }
        }
    }

    /// Pick the basic symbol for the new row. It must be an external
    /// variable, a restricted symbol with a negative coefficient, or — for
    /// a row of nothing but dummies — the marker itself.
    ///
    /// `Ok(None)` means no direct subject exists and the artificial phase
    /// is needed.
    fn find_subject(&self, row: &Expr, tag: &Tag) -> Result<Option<SymbolId>, SolverError> {
        for term in row.terms() {
            if self.is_free(term.symbol) {
                return Ok(Some(term.symbol));
            }
        }

        if self.registry.is_restricted(tag.marker)
            && row.coefficient_of(tag.marker).is_some_and(|c| c < 0.0)
        {
            return Ok(Some(tag.marker));
        }

        if let Some(other) = tag.other {
            if self.registry.is_restricted(other)
                && row.coefficient_of(other).is_some_and(|c| c < 0.0)
            {
                return Ok(Some(other));
            }
        }

        if row
            .terms()
            .iter()
            .any(|term| !self.registry.is_dummy(term.symbol))
        {
            return Ok(None);
        }

        // All-dummy row: satisfiable only as 0 = 0.
        if !approx_zero(row.constant()) {
            return Err(SolverError::Unsatisfiable);
        }
        Ok(Some(tag.marker))
    }

    /// Bootstrap a row with no natural subject: park it under a fresh
    /// artificial variable and minimize that variable to zero. A non-zero
    /// residual means the constraint contradicts the required system.
    fn add_with_artificial(&mut self, row: Expr) -> Result<(), SolverError> {
        let art = self.registry.allocate(SymbolKind::Slack);

        self.tableau.insert(art, row.clone());
        self.artificial = row;

        let optimized = self.optimize_artificial();
        let success = approx_zero(self.artificial.constant());
        self.artificial = Expr::new();
        optimized?;

        let mut outcome = Ok(());

        if let Some(mut art_row) = self.tableau.remove(art) {
            if !success {
                outcome = Err(SolverError::Unsatisfiable);
            } else if !art_row.is_constant() {
                // The artificial variable is still basic; swap any
                // restricted parameter of its row into the basis.
                let entry = art_row
                    .terms()
                    .iter()
                    .find(|term| self.registry.is_restricted(term.symbol))
                    .map(|term| term.symbol);

                match entry {
                    Some(entry) => {
                        art_row.solve_for_symbols(art, entry);
                        self.substitute(entry, &art_row);
                        self.tableau.insert(entry, art_row);
                    }
                    None => outcome = Err(SolverError::Unsatisfiable),
                }
            }
        } else if !success {
            outcome = Err(SolverError::Unsatisfiable);
        }

        self.registry.retire(art);
        self.scrub_symbol(art);
        outcome
    }

    /// Undo the symbol allocation and objective charges of `augment`.
    /// Valid only while the failed row was never installed.
    fn revert_augmentation(&mut self, tag: &Tag) {
        let weight = tag.priority.weight();

        if self.registry.kind_of(tag.marker) == Some(SymbolKind::Error) {
            self.objective.add_symbol(-weight, tag.marker);
        }
        self.registry.retire(tag.marker);

        if let Some(other) = tag.other {
            if self.registry.kind_of(other) == Some(SymbolKind::Error) {
                self.objective.add_symbol(-weight, other);
            }
            self.registry.retire(other);
        }
    }

    fn stage(&self) -> Staged {
        Staged {
            registry: self.registry.clone(),
            tableau: self.tableau.clone(),
            objective: self.objective.clone(),
            infeasible: self.infeasible.clone(),
        }
    }

    fn restore(&mut self, staged: Staged) {
        self.registry = staged.registry;
        self.tableau = staged.tableau;
        self.objective = staged.objective;
        self.infeasible = staged.infeasible;
        self.artificial = Expr::new();
    }
}
