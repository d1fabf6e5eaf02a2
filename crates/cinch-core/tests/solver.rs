#![allow(clippy::float_cmp)]

use cinch_core::{Priority, Solver, SolverError};
use cinch_expr::{Constraint, RelOp, SymbolId, SymbolKind};

const EPSILON: f64 = 1.0e-8;

/// Check the tableau invariants that must hold after every public
/// operation: rows never mention their own basic symbol, no negligible
/// coefficients survive, restricted rows are feasible, and the objective
/// carries no negative coefficient on a non-dummy symbol at rest.
fn assert_invariants(solver: &Solver) {
    let snapshot = solver.inspect();

    for row in &snapshot.rows {
        assert!(
            row.terms.iter().all(|(symbol, _)| *symbol != row.basic),
            "row {} mentions its own basic symbol",
            row.basic.inner()
        );
        for (symbol, coeff) in &row.terms {
            assert!(
                coeff.abs() >= EPSILON,
                "row {} keeps a negligible coefficient on {}",
                row.basic.inner(),
                symbol.inner()
            );
        }
        let restricted = row
            .kind
            .is_some_and(|kind| kind != SymbolKind::External);
        if restricted {
            assert!(
                row.constant >= -EPSILON,
                "restricted row {} has negative constant {}",
                row.basic.inner(),
                row.constant
            );
        }
    }

    for (symbol, coeff) in &snapshot.objective.terms {
        if solver.symbol_kind(*symbol) == Some(SymbolKind::Dummy) {
            continue;
        }
        assert!(
            *coeff >= -EPSILON,
            "objective coefficient {} on symbol {} is negative at rest",
            coeff,
            symbol.inner()
        );
    }
}

fn approx(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1.0e-6
}

fn assert_value(solver: &Solver, symbol: SymbolId, expected: f64) {
    let actual = solver.value_of(symbol);
    assert!(
        approx(actual, expected),
        "expected {} for symbol {}, got {}",
        expected,
        symbol.inner(),
        actual
    );
}

/// Builds the midpoint system: r + l - 2m = 0, r - l >= 100, l >= 0.
fn midpoint_solver() -> (Solver, SymbolId, SymbolId, SymbolId) {
    let mut solver = Solver::new();
    let l = solver.new_variable();
    let m = solver.new_variable();
    let r = solver.new_variable();

    solver
        .add_constraint(Constraint::new(
            RelOp::Eq,
            0.0,
            [r.term(1.0), l.term(1.0), m.term(-2.0)],
        ))
        .unwrap();
    solver
        .add_constraint(Constraint::new(
            RelOp::Ge,
            -100.0,
            [r.term(1.0), l.term(-1.0)],
        ))
        .unwrap();
    solver.add_constraint(l.ge_value(0.0)).unwrap();

    (solver, l, m, r)
}

/// Scenario 1: the midpoint sits halfway between its endpoints.
#[test]
fn midpoint() {
    let (solver, l, m, r) = midpoint_solver();
    assert_value(&solver, l, 0.0);
    assert_value(&solver, m, 50.0);
    assert_value(&solver, r, 100.0);
    assert_invariants(&solver);
}

/// Scenario 2: editing the left endpoint shifts the whole chain.
#[test]
fn edit_upstream() {
    let (mut solver, l, m, r) = midpoint_solver();

    solver.edit(l, Priority::STRONG).unwrap();
    solver.suggest(l, 100.0).unwrap();

    assert_value(&solver, l, 100.0);
    assert_value(&solver, m, 150.0);
    assert_value(&solver, r, 200.0);
    assert_invariants(&solver);
}

/// Scenario 3: a constraint with no natural subject goes through the
/// artificial-variable phase.
#[test]
fn artificial_variable_required() {
    let mut solver = Solver::new();
    let p1 = solver.new_variable();
    let p2 = solver.new_variable();
    let p3 = solver.new_variable();
    let container = solver.new_variable();

    solver.edit(container, Priority::STRONG).unwrap();
    solver.suggest(container, 100.0).unwrap();

    solver
        .add_constraint_with_priority(Priority::STRONG, p1.ge_value(30.0))
        .unwrap();
    solver
        .add_constraint_with_priority(
            Priority::MEDIUM,
            Constraint::new(RelOp::Eq, 0.0, [p1.term(1.0), p3.term(-1.0)]),
        )
        .unwrap();
    solver
        .add_constraint(Constraint::new(
            RelOp::Eq,
            0.0,
            [p2.term(1.0), p1.term(-2.0)],
        ))
        .unwrap();
    solver
        .add_constraint(Constraint::new(
            RelOp::Eq,
            0.0,
            [
                container.term(1.0),
                p1.term(-1.0),
                p2.term(-1.0),
                p3.term(-1.0),
            ],
        ))
        .unwrap();

    assert_value(&solver, p1, 30.0);
    assert_value(&solver, p2, 60.0);
    assert_value(&solver, p3, 10.0);
    assert_value(&solver, container, 100.0);
    assert_invariants(&solver);
}

/// Scenario 4: a padded rectangle tracks its container across re-suggested
/// padding.
#[test]
fn padded_ui() {
    let mut solver = Solver::new();

    let sw = solver.new_variable();
    let sh = solver.new_variable();
    let pad = solver.new_variable();

    solver.edit(sw, Priority::STRONG).unwrap();
    solver.edit(sh, Priority::STRONG).unwrap();
    solver.edit(pad, Priority::STRONG).unwrap();

    solver.suggest(sw, 800.0).unwrap();
    solver.suggest(sh, 600.0).unwrap();
    solver.suggest(pad, 30.0).unwrap();

    let x = solver.new_variable();
    let y = solver.new_variable();
    let w = solver.new_variable();
    let h = solver.new_variable();

    // x >= pad
    // x + w + pad <= sw - 1
    // y >= pad
    // y + h + pad <= sh - 1
    solver
        .add_constraint(Constraint::new(
            RelOp::Ge,
            0.0,
            [x.term(1.0), pad.term(-1.0)],
        ))
        .unwrap();
    solver
        .add_constraint(Constraint::new(
            RelOp::Le,
            1.0,
            [x.term(1.0), w.term(1.0), pad.term(1.0), sw.term(-1.0)],
        ))
        .unwrap();
    solver
        .add_constraint(Constraint::new(
            RelOp::Ge,
            0.0,
            [y.term(1.0), pad.term(-1.0)],
        ))
        .unwrap();
    solver
        .add_constraint(Constraint::new(
            RelOp::Le,
            1.0,
            [y.term(1.0), h.term(1.0), pad.term(1.0), sh.term(-1.0)],
        ))
        .unwrap();

    assert_value(&solver, x, 30.0);
    assert_value(&solver, y, 30.0);
    assert_value(&solver, w, 739.0);
    assert_value(&solver, h, 539.0);
    assert_invariants(&solver);

    solver.suggest(pad, 50.0).unwrap();

    assert_value(&solver, x, 50.0);
    assert_value(&solver, y, 50.0);
    assert_value(&solver, w, 699.0);
    assert_value(&solver, h, 499.0);
    assert_invariants(&solver);
}

/// Scenario 5: a strong floor overrides a weak proportional rule once the
/// container shrinks.
#[test]
fn priority_arbitration() {
    let mut solver = Solver::new();

    let cw = solver.new_variable();
    let cx = solver.new_variable();
    let ccw = solver.new_variable();
    let c2x = solver.new_variable();
    let c2cw = solver.new_variable();

    // cx = (50/1024) * cw
    let c1 = Constraint::new(RelOp::Eq, 0.0, [cx.term(1.0), cw.term(-50.0 / 1024.0)]);
    // ccw = (200/1024) * cw
    let c2 = Constraint::new(RelOp::Eq, 0.0, [ccw.term(1.0), cw.term(-200.0 / 1024.0)]);
    // ccw >= 200
    let c3 = ccw.ge_value(200.0);
    // c2x = cx + ccw + 50
    let c4 = Constraint::new(
        RelOp::Eq,
        -50.0,
        [c2x.term(1.0), cx.term(-1.0), ccw.term(-1.0)],
    );
    // c2cw = cw - c2x - 50
    let c5 = Constraint::new(
        RelOp::Eq,
        50.0,
        [c2cw.term(1.0), cw.term(-1.0), c2x.term(1.0)],
    );

    solver.edit(cw, Priority::STRONG).unwrap();
    solver.suggest(cw, 2048.0).unwrap();

    solver.add_constraint(c1).unwrap();
    solver
        .add_constraint_with_priority(Priority::WEAK, c2)
        .unwrap();
    solver
        .add_constraint_with_priority(Priority::STRONG, c3)
        .unwrap();
    solver.add_constraint(c4).unwrap();
    solver.add_constraint(c5).unwrap();

    assert_value(&solver, cw, 2048.0);
    assert_value(&solver, ccw, 400.0);
    assert_value(&solver, c2cw, 1448.0);
    assert_invariants(&solver);

    solver.suggest(cw, 500.0).unwrap();

    assert_value(&solver, cw, 500.0);
    assert_value(&solver, ccw, 200.0);
    assert_value(&solver, c2cw, 175.5859375);
    assert_invariants(&solver);
}

/// Scenario 6: removing a constraint restores the prior solution.
#[test]
fn removal_restores_prior_state() {
    let (mut solver, l, m, r) = midpoint_solver();

    let marker = solver
        .add_constraint_with_priority(Priority::WEAK, m.eq_value(40.0))
        .unwrap();
    assert_value(&solver, m, 40.0);
    assert_invariants(&solver);

    solver.remove_constraint(marker).unwrap();
    assert_value(&solver, l, 0.0);
    assert_value(&solver, m, 50.0);
    assert_value(&solver, r, 100.0);
    assert_invariants(&solver);
}

/// Law: the same operation sequence on a fresh solver yields identical
/// values for every external symbol.
#[test]
fn determinism() {
    let run = || {
        let mut solver = Solver::new();
        let a = solver.new_variable();
        let b = solver.new_variable();
        let c = solver.new_variable();
        solver
            .add_constraint(Constraint::new(
                RelOp::Eq,
                0.0,
                [c.term(1.0), a.term(-1.0), b.term(-1.0)],
            ))
            .unwrap();
        solver
            .add_constraint_with_priority(Priority::MEDIUM, a.eq_value(3.0))
            .unwrap();
        solver
            .add_constraint_with_priority(Priority::WEAK, b.eq_value(9.0))
            .unwrap();
        solver.edit(a, Priority::STRONG).unwrap();
        solver.suggest(a, 4.5).unwrap();
        (
            solver.value_of(a),
            solver.value_of(b),
            solver.value_of(c),
        )
    };

    assert_eq!(run(), run());
}

/// Law: re-suggesting the current value changes nothing visible.
#[test]
fn suggest_idempotence() {
    let (mut solver, l, m, r) = midpoint_solver();
    solver.edit(l, Priority::STRONG).unwrap();
    solver.suggest(l, 60.0).unwrap();

    let before = (
        solver.value_of(l),
        solver.value_of(m),
        solver.value_of(r),
    );
    solver.suggest(l, 60.0).unwrap();
    let after = (
        solver.value_of(l),
        solver.value_of(m),
        solver.value_of(r),
    );
    assert_eq!(before, after);
    assert_invariants(&solver);
}

/// Law: two required constraints land on the same solution in either
/// insertion order.
#[test]
fn required_constraints_commute() {
    let build = |flipped: bool| {
        let mut solver = Solver::new();
        let x = solver.new_variable();
        let y = solver.new_variable();
        let first = Constraint::new(RelOp::Eq, -10.0, [x.term(1.0), y.term(1.0)]);
        let second = Constraint::new(RelOp::Eq, -2.0, [x.term(1.0), y.term(-1.0)]);
        if flipped {
            solver.add_constraint(second.clone()).unwrap();
            solver.add_constraint(first.clone()).unwrap();
        } else {
            solver.add_constraint(first.clone()).unwrap();
            solver.add_constraint(second.clone()).unwrap();
        }
        (solver.value_of(x), solver.value_of(y))
    };

    let (x1, y1) = build(false);
    let (x2, y2) = build(true);
    assert!(approx(x1, x2));
    assert!(approx(y1, y2));
    assert!(approx(x1, 6.0));
    assert!(approx(y1, 4.0));
}

/// Errors surface synchronously and leave earlier state intact.
#[test]
fn error_paths() {
    let mut solver = Solver::new();
    let x = solver.new_variable();

    let ghost = SymbolId::new(9999);
    assert_eq!(
        solver.add_constraint(ghost.eq_value(1.0)).unwrap_err(),
        SolverError::UnknownSymbol(ghost)
    );
    assert_eq!(
        solver.edit(x, Priority::REQUIRED).unwrap_err(),
        SolverError::BadPriority { weight: 1.0e9 }
    );
    assert_eq!(
        solver.suggest(x, 1.0).unwrap_err(),
        SolverError::NotEditable(x)
    );
    assert_eq!(
        solver.remove_constraint(ghost).unwrap_err(),
        SolverError::UnknownMarker(ghost)
    );

    solver.add_constraint(x.eq_value(10.0)).unwrap();
    assert_eq!(
        solver.add_constraint(x.eq_value(11.0)).unwrap_err(),
        SolverError::Unsatisfiable
    );
    assert_value(&solver, x, 10.0);
    assert_invariants(&solver);
}

/// An unsatisfiable mix of inequalities is caught by the artificial phase
/// and rolled back without a trace.
#[test]
fn artificial_phase_rollback() {
    let mut solver = Solver::new();
    let x = solver.new_variable();
    solver.add_constraint(x.ge_value(10.0)).unwrap();

    let constraints_before = solver.num_constraints();
    assert_eq!(
        solver.add_constraint(x.le_value(5.0)).unwrap_err(),
        SolverError::Unsatisfiable
    );
    assert_eq!(solver.num_constraints(), constraints_before);
    assert_value(&solver, x, 10.0);
    assert_invariants(&solver);

    // the solver still accepts satisfiable constraints afterwards
    solver.add_constraint(x.le_value(20.0)).unwrap();
    assert_value(&solver, x, 10.0);
    assert_invariants(&solver);
}
