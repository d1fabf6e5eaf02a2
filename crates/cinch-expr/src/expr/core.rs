//! Core expression type: a constant plus linear terms over unique symbols.
//!
//! Every row in the tableau, the objective, and the artificial objective is
//! an `Expr`. The algebra here (coalescing insertion, substitution, solving
//! a row for one of its symbols) is what keeps the tableau in parametric
//! form across pivots.

use crate::ids::SymbolId;

/// Coefficients with magnitude below this are treated as zero.
pub const EPSILON: f64 = 1.0e-8;

/// Absolute near-zero test shared by every component that classifies
/// coefficients or residuals.
pub fn approx_zero(value: f64) -> bool {
    value.abs() < EPSILON
}

/// A single linear term: `coeff * symbol`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Term {
    pub coeff: f64,
    pub symbol: SymbolId,
}

impl Term {
    pub fn new(coeff: f64, symbol: SymbolId) -> Self {
        Self { coeff, symbol }
    }
}

/// A linear expression: `constant + Σ coeff·symbol`.
///
/// Symbols are unique within the term list; `add_symbol` coalesces
/// duplicates and drops terms whose coefficient falls below [`EPSILON`].
/// Term order is not part of the contract.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expr {
    constant: f64,
    terms: Vec<Term>,
}

impl Expr {
    /// Empty expression (zero constant, no terms).
    pub fn new() -> Self {
        Self::default()
    }

    /// Just a constant, no terms.
    pub fn from_constant(constant: f64) -> Self {
        Self {
            constant,
            terms: Vec::new(),
        }
    }

    /// Expression from a constant and raw terms.
    ///
    /// Terms are folded in through [`add_symbol`](Self::add_symbol), so
    /// duplicate symbols coalesce and negligible coefficients are dropped.
    pub fn with_terms(constant: f64, terms: impl IntoIterator<Item = Term>) -> Self {
        let mut expr = Self::from_constant(constant);
        for term in terms {
            expr.add_symbol(term.coeff, term.symbol);
        }
        expr
    }

    // ── Accessors ───────────────────────────────────────────

    pub fn constant(&self) -> f64 {
        self.constant
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn is_constant(&self) -> bool {
        self.terms.is_empty()
    }

    /// Coefficient of `symbol`, if present with a non-negligible value.
    pub fn coefficient_of(&self, symbol: SymbolId) -> Option<f64> {
        self.find(symbol).map(|idx| self.terms[idx].coeff)
    }

    pub fn mentions(&self, symbol: SymbolId) -> bool {
        self.find(symbol).is_some()
    }

    fn find(&self, symbol: SymbolId) -> Option<usize> {
        self.terms.iter().position(|term| term.symbol == symbol)
    }

    // Ordered removal: scans over terms (subject selection, entering-variable
    // search) observe insertion order, which keeps tie-breaking deterministic.
    fn remove(&mut self, idx: usize) -> Term {
        self.terms.remove(idx)
    }

    // ── Mutators ────────────────────────────────────────────

    /// Shift the constant by `delta`.
    pub fn offset_constant(&mut self, delta: f64) {
        self.constant += delta;
    }

    /// Add `coeff * symbol`, coalescing with an existing term for the same
    /// symbol. Terms whose coefficient ends up within [`EPSILON`] of zero
    /// are removed entirely.
    pub fn add_symbol(&mut self, coeff: f64, symbol: SymbolId) {
        match self.find(symbol) {
            Some(idx) => {
                self.terms[idx].coeff += coeff;
                if approx_zero(self.terms[idx].coeff) {
                    self.remove(idx);
                }
            }
            None => {
                if !approx_zero(coeff) {
                    self.terms.push(Term::new(coeff, symbol));
                }
            }
        }
    }

    /// Add `coeff * other` term-by-term, constant included.
    pub fn add_expr(&mut self, coeff: f64, other: &Expr) {
        self.constant += coeff * other.constant;
        for term in &other.terms {
            self.add_symbol(coeff * term.coeff, term.symbol);
        }
    }

    /// Flip the sign of the constant and every coefficient.
    pub fn negate(&mut self) {
        self.constant = -self.constant;
        for term in &mut self.terms {
            term.coeff = -term.coeff;
        }
    }

    /// Rearrange `0 = self` into `symbol = self'` given that `symbol`
    /// appears with coefficient `c`: the term is removed and everything
    /// else is scaled by `-1/c`. No-op if `symbol` is absent.
    pub fn solve_for(&mut self, symbol: SymbolId) {
        let Some(idx) = self.find(symbol) else {
            return;
        };

        let scale = -1.0 / self.terms[idx].coeff;
        self.remove(idx);

        if scale == 1.0 {
            return;
        }

        self.constant *= scale;
        for term in &mut self.terms {
            term.coeff *= scale;
        }
    }

    /// Pivot helper: treat `lhs` as entering the expression with
    /// coefficient −1, then solve for `rhs`. Turns the row of a leaving
    /// basic symbol into the row of the entering one.
    pub fn solve_for_symbols(&mut self, lhs: SymbolId, rhs: SymbolId) {
        self.add_symbol(-1.0, lhs);
        self.solve_for(rhs);
    }

    /// Replace `symbol` with `other`: if `symbol` appears with coefficient
    /// `c`, remove it and add `c * other`.
    pub fn substitute(&mut self, symbol: SymbolId, other: &Expr) {
        let Some(idx) = self.find(symbol) else {
            return;
        };
        let coeff = self.terms[idx].coeff;
        self.remove(idx);
        self.add_expr(coeff, other);
    }
}

impl std::ops::Neg for Expr {
    type Output = Expr;

    fn neg(mut self) -> Self::Output {
        self.negate();
        self
    }
}
