use std::path::PathBuf;

use indexmap::IndexMap;
use serde::Serialize;

use crate::ModuleObject;

/// Outcome of adding a module to a [`LoadedModuleSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Insertion {
    /// The name was new; the module is now part of the set.
    Inserted,
    /// A module with the same name was already loaded and was kept.
    Duplicate {
        /// Source of the module that stays in the set.
        kept_source: PathBuf,
        /// Whether the rejected module carried identical definitions.
        same_content: bool,
    },
}

/// The assembled symbol space of one run.
///
/// Modules are keyed by case-insensitive name and iterate in discovery
/// order. At most one module per name is ever held: the first one inserted
/// wins and later duplicates are rejected.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadedModuleSet {
    modules: IndexMap<String, ModuleObject>,
}

impl LoadedModuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(name: &str) -> String {
        name.to_lowercase()
    }

    /// Insert a module unless its name is already present.
    pub fn insert(&mut self, module: ModuleObject) -> Insertion {
        let key = Self::key(&module.name);
        match self.modules.get(&key) {
            Some(existing) => Insertion::Duplicate {
                kept_source: existing.source_path.clone(),
                same_content: existing.same_content(&module),
            },
            None => {
                self.modules.insert(key, module);
                Insertion::Inserted
            }
        }
    }

    /// Look up a module by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&ModuleObject> {
        self.modules.get(&Self::key(name))
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ModuleObject> {
        self.modules.get_mut(&Self::key(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.modules.contains_key(&Self::key(name))
    }

    /// Iterate modules in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &ModuleObject> {
        self.modules.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ModuleObject> {
        self.modules.values_mut()
    }

    /// Canonical module names in discovery order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.modules.values().map(|m| m.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
