macro_rules! define_id_type {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Get the inner u64 value.
            pub fn inner(self) -> u64 {
                self.0
            }

            /// Create an ID from a u64 value.
            pub fn new(value: u64) -> Self {
                Self(value)
            }
        }
    };
}

define_id_type!(SymbolId);

/// What role a symbol plays in the tableau.
///
/// External symbols are the caller-visible variables. Slack, error, and
/// dummy symbols are allocated internally when constraints are converted
/// to augmented simplex form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    External,
    Slack,
    Error,
    Dummy,
}

impl SymbolKind {
    /// Restricted symbols must stay non-negative in any feasible solution.
    pub fn is_restricted(self) -> bool {
        matches!(self, SymbolKind::Slack | SymbolKind::Error)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SymbolKind::External => "external",
            SymbolKind::Slack => "slack",
            SymbolKind::Error => "error",
            SymbolKind::Dummy => "dummy",
        }
    }
}

impl std::fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
