//! Naming for external variables.

use std::collections::BTreeMap;

use cinch_expr::SymbolId;

use crate::error::SolverError;
use crate::solver::Solver;

impl Solver {
    /// Set a display name for a variable.
    pub fn set_variable_name(
        &mut self,
        symbol: SymbolId,
        name: String,
    ) -> Result<(), SolverError> {
        if !self.registry.contains(symbol) {
            return Err(SolverError::UnknownSymbol(symbol));
        }
        self.variable_names
            .get_or_insert_with(BTreeMap::new)
            .insert(symbol, name);
        Ok(())
    }

    /// Get a variable's display name.
    pub fn get_variable_name(&self, symbol: SymbolId) -> Option<&str> {
        self.variable_names
            .as_ref()
            .and_then(|names| names.get(&symbol).map(|name| name.as_str()))
    }

    /// Look up a variable by display name.
    pub fn get_variable_by_name(&self, name: &str) -> Option<SymbolId> {
        self.variable_names.as_ref().and_then(|names| {
            names
                .iter()
                .find_map(|(id, value)| (value == name).then_some(*id))
        })
    }
}
