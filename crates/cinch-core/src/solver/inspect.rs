//! Solver inspection: structured snapshots and ASCII dumps.

use std::fmt::Write as _;

use cinch_expr::{Expr, SymbolId, SymbolKind};

use crate::solver::Solver;

/// View of one tableau row.
#[derive(Debug, Clone)]
pub struct RowView {
    pub basic: SymbolId,
    pub kind: Option<SymbolKind>,
    pub constant: f64,
    pub terms: Vec<(SymbolId, f64)>,
}

/// View of the objective expression.
#[derive(Debug, Clone)]
pub struct ObjectiveView {
    pub constant: f64,
    pub terms: Vec<(SymbolId, f64)>,
}

/// Aggregate counts for a snapshot.
#[derive(Debug, Clone, Copy)]
pub struct SnapshotCounts {
    pub variables: usize,
    pub rows: usize,
    pub constraints: usize,
    pub edits: usize,
}

/// A complete structured view of the solver state.
#[derive(Debug, Clone)]
pub struct SolverSnapshot {
    pub rows: Vec<RowView>,
    pub objective: ObjectiveView,
    pub infeasible: Vec<SymbolId>,
    pub counts: SnapshotCounts,
}

fn view_terms(expr: &Expr) -> Vec<(SymbolId, f64)> {
    expr.terms()
        .iter()
        .map(|term| (term.symbol, term.coeff))
        .collect()
}

impl Solver {
    /// Capture a structured snapshot of the tableau and objective.
    pub fn inspect(&self) -> SolverSnapshot {
        let rows = self
            .tableau
            .iter()
            .map(|(basic, expr)| RowView {
                basic,
                kind: self.registry.kind_of(basic),
                constant: expr.constant(),
                terms: view_terms(expr),
            })
            .collect();

        SolverSnapshot {
            rows,
            objective: ObjectiveView {
                constant: self.objective.constant(),
                terms: view_terms(&self.objective),
            },
            infeasible: self.infeasible.clone(),
            counts: SnapshotCounts {
                variables: self.num_variables(),
                rows: self.tableau.len(),
                constraints: self.num_constraints(),
                edits: self.edits.len(),
            },
        }
    }

    /// Render the tableau and objective as ASCII, one row per line.
    pub fn format_ascii(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "tableau ({} rows, {} constraints)",
            self.tableau.len(),
            self.num_constraints()
        );
        for (basic, expr) in self.tableau.iter() {
            let _ = writeln!(
                out,
                "  {} = {}",
                self.symbol_label(basic),
                self.render_expr(expr)
            );
        }
        let _ = writeln!(out, "objective: {}", self.render_expr(&self.objective));
        out
    }

    fn render_expr(&self, expr: &Expr) -> String {
        let mut rendered = format!("{}", expr.constant());
        for term in expr.terms() {
            let sign = if term.coeff < 0.0 { '-' } else { '+' };
            let magnitude = term.coeff.abs();
            if (magnitude - 1.0).abs() < f64::EPSILON {
                let _ = write!(rendered, " {} {}", sign, self.symbol_label(term.symbol));
            } else {
                let _ = write!(
                    rendered,
                    " {} {}*{}",
                    sign,
                    magnitude,
                    self.symbol_label(term.symbol)
                );
            }
        }
        rendered
    }

    /// Display label for a symbol: its assigned name, or a kind-prefixed
    /// ID (`x3`, `s7`, `e9`, `d12`; `r` for symbols retired from the
    /// registry).
    fn symbol_label(&self, symbol: SymbolId) -> String {
        if let Some(name) = self.get_variable_name(symbol) {
            return name.to_string();
        }
        let prefix = match self.registry.kind_of(symbol) {
            Some(SymbolKind::External) => 'x',
            Some(SymbolKind::Slack) => 's',
            Some(SymbolKind::Error) => 'e',
            Some(SymbolKind::Dummy) => 'd',
            None => 'r',
        };
        format!("{}{}", prefix, symbol.inner())
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use crate::priority::Priority;
    use crate::solver::Solver;

    #[test]
    fn snapshot_counts_reflect_state() {
        let mut solver = Solver::new();
        let x = solver.new_variable();
        let y = solver.new_variable();
        solver.add_constraint(x.eq_value(4.0)).unwrap();
        solver.edit(y, Priority::STRONG).unwrap();

        let snapshot = solver.inspect();
        assert_eq!(snapshot.counts.variables, 2);
        assert_eq!(snapshot.counts.constraints, 2);
        assert_eq!(snapshot.counts.edits, 1);
        assert_eq!(snapshot.counts.rows, snapshot.rows.len());
        assert!(snapshot.infeasible.is_empty());
    }

    #[test]
    fn snapshot_rows_carry_constants() {
        let mut solver = Solver::new();
        let x = solver.new_variable();
        solver.add_constraint(x.eq_value(4.0)).unwrap();

        let snapshot = solver.inspect();
        let row = snapshot
            .rows
            .iter()
            .find(|row| row.basic == x)
            .expect("x should be basic");
        assert_eq!(row.constant, 4.0);
    }

    #[test]
    fn ascii_dump_uses_names() {
        let mut solver = Solver::new();
        let x = solver.new_variable();
        solver.set_variable_name(x, "width".to_string()).unwrap();
        solver.add_constraint(x.eq_value(4.0)).unwrap();

        let rendered = solver.format_ascii();
        assert!(rendered.contains("width = 4"));
        assert!(rendered.contains("objective:"));
    }
}
