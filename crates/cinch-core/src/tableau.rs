//! The simplex tableau: basic symbol to row expression.
//!
//! A row `b -> e` states `b = e` where `e` mentions only non-basic symbols.
//! The map is a `BTreeMap` keyed by allocation-ordered IDs, so iteration is
//! deterministic and pivot tie-breaks are reproducible across runs.

use std::collections::BTreeMap;

use cinch_expr::{Expr, SymbolId};

#[derive(Debug, Clone, Default)]
pub struct Tableau {
    rows: BTreeMap<SymbolId, Expr>,
}

impl Tableau {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `expr` as the row for `basic`.
    ///
    /// The caller is responsible for having substituted `basic` out of every
    /// other expression first; the tableau only stores rows.
    pub fn insert(&mut self, basic: SymbolId, expr: Expr) {
        self.rows.insert(basic, expr);
    }

    pub fn remove(&mut self, basic: SymbolId) -> Option<Expr> {
        self.rows.remove(&basic)
    }

    pub fn get(&self, basic: SymbolId) -> Option<&Expr> {
        self.rows.get(&basic)
    }

    pub fn get_mut(&mut self, basic: SymbolId) -> Option<&mut Expr> {
        self.rows.get_mut(&basic)
    }

    pub fn contains(&self, basic: SymbolId) -> bool {
        self.rows.contains_key(&basic)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &Expr)> {
        self.rows.iter().map(|(basic, expr)| (*basic, expr))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (SymbolId, &mut Expr)> {
        self.rows.iter_mut().map(|(basic, expr)| (*basic, expr))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Substitute `symbol := expr` into every row and report the basic
    /// symbols whose constants are negative afterwards. The caller filters
    /// out rows whose basic symbol is unrestricted before queueing dual
    /// re-optimization.
    pub fn substitute(&mut self, symbol: SymbolId, expr: &Expr) -> Vec<SymbolId> {
        let mut negative = Vec::new();
        for (basic, row) in self.rows.iter_mut() {
            row.substitute(symbol, expr);
            if row.constant() < 0.0 {
                negative.push(*basic);
            }
        }
        negative
    }

    /// Delete every occurrence of `symbol` from row expressions.
    pub fn scrub(&mut self, symbol: SymbolId) {
        for row in self.rows.values_mut() {
            if let Some(coeff) = row.coefficient_of(symbol) {
                row.add_symbol(-coeff, symbol);
            }
        }
    }
}
