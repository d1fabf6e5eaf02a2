//! Benchmark workloads exercising the solver's incremental paths.

use cinch_core::{Priority, Solver};
use cinch_expr::{Constraint, RelOp, SymbolId};

use crate::measure::StageRecorder;

/// A chain of equalities: `x_{i+1} = x_i + 1`, anchored by an edit variable
/// at the head. The `edit` stage drags the head and forces every row to
/// shift through dual re-optimization.
pub fn chain(recorder: &mut StageRecorder, links: usize, suggestions: usize) {
    let mut solver = Solver::new();

    let variables: Vec<SymbolId> = recorder.record("build", || {
        let variables: Vec<SymbolId> = (0..=links).map(|_| solver.new_variable()).collect();
        for pair in variables.windows(2) {
            let step = Constraint::new(RelOp::Eq, -1.0, [pair[1].term(1.0), pair[0].term(-1.0)]);
            solver.add_constraint(step).expect("chain step");
        }
        variables
    });

    let head = variables[0];
    recorder.record("edit", || {
        solver.edit(head, Priority::STRONG).expect("edit head");
        for round in 0..suggestions {
            solver
                .suggest(head, round as f64 * 10.0)
                .expect("suggest head");
        }
    });

    assert_eq!(solver.num_constraints(), links + 1);
}

/// Rows of padded boxes inside a shared container: every row adds four
/// inequality constraints against the container edits, so constraint
/// addition keeps resolving against an ever-larger tableau.
pub fn layout(recorder: &mut StageRecorder, rows: usize) {
    let mut solver = Solver::new();

    let container_width = solver.new_variable();
    let container_height = solver.new_variable();
    let pad = solver.new_variable();

    solver
        .edit(container_width, Priority::STRONG)
        .expect("edit width");
    solver
        .edit(container_height, Priority::STRONG)
        .expect("edit height");
    solver.edit(pad, Priority::STRONG).expect("edit pad");

    solver.suggest(container_width, 1920.0).expect("suggest");
    solver.suggest(container_height, 1080.0).expect("suggest");
    solver.suggest(pad, 8.0).expect("suggest");

    recorder.record("build", || {
        for _ in 0..rows {
            let x = solver.new_variable();
            let y = solver.new_variable();
            let w = solver.new_variable();
            let h = solver.new_variable();

            solver
                .add_constraint(Constraint::new(
                    RelOp::Ge,
                    0.0,
                    [x.term(1.0), pad.term(-1.0)],
                ))
                .expect("left edge");
            solver
                .add_constraint(Constraint::new(
                    RelOp::Le,
                    0.0,
                    [
                        x.term(1.0),
                        w.term(1.0),
                        pad.term(1.0),
                        container_width.term(-1.0),
                    ],
                ))
                .expect("right edge");
            solver
                .add_constraint(Constraint::new(
                    RelOp::Ge,
                    0.0,
                    [y.term(1.0), pad.term(-1.0)],
                ))
                .expect("top edge");
            solver
                .add_constraint(Constraint::new(
                    RelOp::Le,
                    0.0,
                    [
                        y.term(1.0),
                        h.term(1.0),
                        pad.term(1.0),
                        container_height.term(-1.0),
                    ],
                ))
                .expect("bottom edge");
        }
    });

    recorder.record("edit", || {
        solver.suggest(pad, 16.0).expect("grow padding");
        solver.suggest(container_width, 1280.0).expect("shrink");
    });
}

/// A fixed midpoint system under a storm of alternating suggestions:
/// measures the steady-state cost of `suggest` + dual re-optimization.
pub fn edit_storm(recorder: &mut StageRecorder, suggestions: usize) {
    let mut solver = Solver::new();
    let left = solver.new_variable();
    let mid = solver.new_variable();
    let right = solver.new_variable();

    recorder.record("build", || {
        solver
            .add_constraint(Constraint::new(
                RelOp::Eq,
                0.0,
                [right.term(1.0), left.term(1.0), mid.term(-2.0)],
            ))
            .expect("midpoint");
        solver
            .add_constraint(Constraint::new(
                RelOp::Ge,
                -100.0,
                [right.term(1.0), left.term(-1.0)],
            ))
            .expect("span");
        solver.add_constraint(left.ge_value(0.0)).expect("floor");
        solver.edit(left, Priority::STRONG).expect("edit left");
    });

    recorder.record("edit", || {
        for round in 0..suggestions {
            let target = if round % 2 == 0 { 50.0 } else { 200.0 };
            solver.suggest(left, target).expect("suggest left");
        }
    });
}
