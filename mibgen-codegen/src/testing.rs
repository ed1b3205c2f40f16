//! In-memory collaborators for exercising the pipeline.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use eyre::{Result, bail};
use mibgen_core::path_key;
use mibgen_ir::{Entity, EntityKind, Import, InputDocument, ModuleObject, ResolutionState};

use crate::{CodeEmitter, DocumentCompiler, Variant, pipeline::Diagnostic};

/// An input document with empty content.
pub fn document(path: impl Into<PathBuf>) -> InputDocument {
    InputDocument::new(path, "")
}

/// Builder for module objects.
pub struct ModuleBuilder {
    module: ModuleObject,
}

impl ModuleBuilder {
    /// A module sourced from `/mibs/<name>.txt`.
    pub fn new(name: &str) -> Self {
        Self {
            module: ModuleObject::new(name, format!("/mibs/{name}.txt")),
        }
    }

    pub fn source(mut self, path: impl Into<PathBuf>) -> Self {
        self.module.source_path = path.into();
        self
    }

    /// Add an `OBJECT IDENTIFIER` definition.
    pub fn object(mut self, name: &str, parent: &str, sub_id: u32) -> Self {
        self.module
            .entities
            .push(Entity::new(name, EntityKind::ObjectIdentifier).under(parent, sub_id));
        self
    }

    /// Add an `OBJECT-TYPE` definition.
    pub fn object_type(mut self, name: &str, parent: &str, sub_id: u32, syntax: &str) -> Self {
        let mut entity = Entity::new(name, EntityKind::ObjectType).under(parent, sub_id);
        entity.syntax = Some(syntax.to_string());
        self.module.entities.push(entity);
        self
    }

    pub fn entity(mut self, entity: Entity) -> Self {
        self.module.entities.push(entity);
        self
    }

    pub fn import(mut self, symbol: &str, from_module: &str) -> Self {
        self.module.imports.push(Import::new(symbol, from_module));
        self
    }

    pub fn build(self) -> ModuleObject {
        self.module
    }
}

enum Outcome {
    Modules(Vec<ModuleObject>),
    Failure(String),
}

/// Compiler that returns canned results per document path.
///
/// Documents it knows nothing about compile to zero modules.
#[derive(Default)]
pub struct FakeCompiler {
    outcomes: HashMap<String, Outcome>,
    calls: Arc<AtomicUsize>,
}

impl FakeCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `path` yield `module` (in addition to any already registered).
    pub fn module(mut self, path: impl AsRef<Path>, module: ModuleObject) -> Self {
        match self
            .outcomes
            .entry(path_key(path.as_ref()))
            .or_insert_with(|| Outcome::Modules(Vec::new()))
        {
            Outcome::Modules(modules) => modules.push(module),
            Outcome::Failure(_) => {}
        }
        self
    }

    /// Make `path` fail to compile.
    pub fn failing(mut self, path: impl AsRef<Path>, message: &str) -> Self {
        self.outcomes
            .insert(path_key(path.as_ref()), Outcome::Failure(message.to_string()));
        self
    }

    /// Number of documents compiled so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Shared call counter that outlives moving the compiler into a pipeline.
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

impl DocumentCompiler for FakeCompiler {
    fn compile(
        &self,
        document: &InputDocument,
        _diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Vec<ModuleObject>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.outcomes.get(&path_key(document.path())) {
            Some(Outcome::Modules(modules)) => Ok(modules.clone()),
            Some(Outcome::Failure(message)) => bail!("{message}"),
            None => Ok(Vec::new()),
        }
    }
}

/// Emitter producing a plain-text listing of the module.
///
/// Output depends only on its inputs, so it can stand in for a real emitter
/// in determinism checks.
#[derive(Default)]
pub struct FakeEmitter {
    renders: Arc<AtomicUsize>,
    failing: Option<(String, Option<Variant>)>,
}

impl FakeEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every render of the named module.
    pub fn failing_on(mut self, module_name: &str) -> Self {
        self.failing = Some((module_name.to_string(), None));
        self
    }

    /// Fail only renders of one variant of the named module.
    pub fn failing_variant_on(mut self, module_name: &str, variant: Variant) -> Self {
        self.failing = Some((module_name.to_string(), Some(variant)));
        self
    }

    /// Shared render counter that outlives moving the emitter into a pipeline.
    pub fn render_counter(&self) -> Arc<AtomicUsize> {
        self.renders.clone()
    }
}

impl CodeEmitter for FakeEmitter {
    fn render(&self, module: &ModuleObject, banner: &str, variant: Variant) -> Result<String> {
        self.renders.fetch_add(1, Ordering::SeqCst);
        if self.failing.as_ref().is_some_and(|(name, only)| {
            name.eq_ignore_ascii_case(&module.name) && only.is_none_or(|v| v == variant)
        }) {
            bail!("template error in {}", module.name);
        }

        let mut out = format!("// {banner}\n// {variant:?} {}\n", module.name);
        for entity in &module.entities {
            out.push_str(&format!(
                "{} {} {:?} {:?}\n",
                entity.name, entity.kind, entity.parent, entity.sub_id
            ));
        }
        for import in &module.imports {
            let provider = match &import.resolution {
                ResolutionState::Resolved { module } => module.as_str(),
                ResolutionState::Unresolved => "?",
            };
            out.push_str(&format!("use {} from {}\n", import.symbol, provider));
        }
        Ok(out)
    }
}
