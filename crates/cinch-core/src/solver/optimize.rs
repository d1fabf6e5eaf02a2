//! Primal and dual simplex pivots.
//!
//! The primal loop drives an objective toward its minimum while keeping
//! every restricted row feasible. The dual loop runs after an edit made
//! row constants negative: it restores feasibility while preserving the
//! optimality of the objective.

use cinch_expr::{Expr, SymbolId};

use crate::error::SolverError;
use crate::solver::Solver;

/// Which expression the primal loop minimizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Goal {
    Objective,
    Artificial,
}

impl Solver {
    pub(crate) fn optimize_objective(&mut self) -> Result<(), SolverError> {
        self.optimize_against(Goal::Objective)
    }

    pub(crate) fn optimize_artificial(&mut self) -> Result<(), SolverError> {
        self.optimize_against(Goal::Artificial)
    }

    fn goal_expr(&self, goal: Goal) -> &Expr {
        match goal {
            Goal::Objective => &self.objective,
            Goal::Artificial => &self.artificial,
        }
    }

    fn optimize_against(&mut self, goal: Goal) -> Result<(), SolverError> {
        loop {
            // Entering: first non-dummy goal term with a negative
            // coefficient, in term order.
            let entering = self
                .goal_expr(goal)
                .terms()
                .iter()
                .find(|term| term.coeff < 0.0 && !self.registry.is_dummy(term.symbol))
                .map(|term| term.symbol);

            let Some(entering) = entering else {
                return Ok(());
            };

            // Leaving: restricted row containing the entering symbol with a
            // negative coefficient, minimizing -constant/coeff. Strict
            // comparison keeps the first candidate on ties.
            let mut leaving = None;
            let mut min_ratio = f64::MAX;
            for (basic, row) in self.tableau.iter() {
                if self.is_free(basic) {
                    continue;
                }
                let Some(coeff) = row.coefficient_of(entering) else {
                    continue;
                };
                if coeff >= 0.0 {
                    continue;
                }
                let ratio = -row.constant() / coeff;
                if ratio < min_ratio {
                    min_ratio = ratio;
                    leaving = Some(basic);
                }
            }

            let Some(leaving) = leaving else {
                return Err(SolverError::Internal(
                    "primal pivot found no leaving row; objective is unbounded",
                ));
            };

            self.pivot(leaving, entering);
            tracing::trace!(
                component = "solver",
                operation = "primal_pivot",
                entering = entering.inner(),
                leaving = leaving.inner(),
                "Primal pivot"
            );
        }
    }

    /// Re-pivot rows whose constants went negative, restoring feasibility.
    pub(crate) fn optimize_dual(&mut self) -> Result<(), SolverError> {
        while let Some(leaving) = self.infeasible.pop() {
            let Some(row) = self.tableau.get(leaving) else {
                continue;
            };
            if row.constant() >= 0.0 {
                continue;
            }

            // Entering: positive-coefficient non-dummy term carried by the
            // objective, minimizing objective_coeff/row_coeff.
            let mut entering = None;
            let mut min_ratio = f64::MAX;
            for term in row.terms() {
                if term.coeff <= 0.0 || self.registry.is_dummy(term.symbol) {
                    continue;
                }
                let Some(objective_coeff) = self.objective.coefficient_of(term.symbol) else {
                    continue;
                };
                let ratio = objective_coeff / term.coeff;
                if ratio < min_ratio {
                    min_ratio = ratio;
                    entering = Some(term.symbol);
                }
            }

            let Some(entering) = entering else {
                return Err(SolverError::Internal(
                    "dual pivot found no entering symbol",
                ));
            };

            self.pivot(leaving, entering);
            tracing::trace!(
                component = "solver",
                operation = "dual_pivot",
                entering = entering.inner(),
                leaving = leaving.inner(),
                "Dual pivot"
            );
        }
        Ok(())
    }

    /// Swap `leaving` out of the basis for `entering`: solve the leaving
    /// row for the entering symbol, substitute it everywhere, and install
    /// the rewritten row. The leaving symbol is retired and behaves as
    /// unrestricted from here on.
    fn pivot(&mut self, leaving: SymbolId, entering: SymbolId) {
        let Some(mut row) = self.tableau.remove(leaving) else {
            return;
        };
        self.registry.retire(leaving);

        row.solve_for_symbols(leaving, entering);
        self.substitute(entering, &row);
        self.tableau.insert(entering, row);
    }
}
