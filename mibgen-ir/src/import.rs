use serde::Serialize;

/// Whether an import found its providing module in the current batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ResolutionState {
    /// No module with the declared name was loaded in this run.
    #[default]
    Unresolved,
    /// The providing module, by its canonical name in the loaded set.
    Resolved { module: String },
}

impl ResolutionState {
    pub fn is_resolved(&self) -> bool {
        matches!(self, ResolutionState::Resolved { .. })
    }

    /// Name of the providing module, if resolved.
    pub fn module(&self) -> Option<&str> {
        match self {
            ResolutionState::Resolved { module } => Some(module),
            ResolutionState::Unresolved => None,
        }
    }
}

/// One imported symbol (`IMPORTS symbol FROM MODULE`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Import {
    /// The imported symbol.
    pub symbol: String,
    /// The module the document claims provides the symbol.
    pub from_module: String,
    /// Computed during assembly; compilers always produce `Unresolved`.
    pub resolution: ResolutionState,
}

impl Import {
    /// Create an unresolved import.
    pub fn new(symbol: impl Into<String>, from_module: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            from_module: from_module.into(),
            resolution: ResolutionState::Unresolved,
        }
    }

    /// Whether this import names the same symbol and module as `other`,
    /// ignoring resolution state.
    pub fn same_reference(&self, other: &Import) -> bool {
        self.symbol == other.symbol && self.from_module.eq_ignore_ascii_case(&other.from_module)
    }
}
