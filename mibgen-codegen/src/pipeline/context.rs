//! Run context passed through pipeline phases.

use std::path::{Path, PathBuf};

use eyre::{Result, bail};
use indexmap::IndexMap;
use mibgen_ir::{InputDocument, LoadedModuleSet, ModuleObject};
use mibgen_manifest::{GenerationDeclaration, SuppressionSet};

use super::{
    CancellationToken,
    diagnostic::{Diagnostic, DiagnosticSource},
    phases::GuardDecision,
};
use crate::generation::{ArtifactNaming, ArtifactRegistry, WriteStats};

/// Where artifacts end up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Artifacts are only returned to the host. Nothing on disk is consulted.
    #[default]
    InMemory,
    /// Artifacts are written under `dir`, and existing customizable files
    /// there are protected.
    Filesystem { dir: PathBuf },
}

impl OutputMode {
    pub fn filesystem(dir: impl Into<PathBuf>) -> Self {
        OutputMode::Filesystem { dir: dir.into() }
    }

    pub fn dir(&self) -> Option<&Path> {
        match self {
            OutputMode::InMemory => None,
            OutputMode::Filesystem { dir } => Some(dir),
        }
    }
}

/// Everything a run needs, supplied fresh by the host each time.
#[derive(Debug, Clone)]
pub struct RunInputs {
    pub documents: Vec<InputDocument>,
    pub generation: GenerationDeclaration,
    pub suppression: SuppressionSet,
    pub mode: OutputMode,
    pub banner: String,
    pub naming: ArtifactNaming,
}

impl RunInputs {
    pub fn new(documents: Vec<InputDocument>) -> Self {
        Self {
            documents,
            generation: GenerationDeclaration::new(),
            suppression: SuppressionSet::new(),
            mode: OutputMode::InMemory,
            banner: String::from("mibgen"),
            naming: ArtifactNaming::default(),
        }
    }

    pub fn generation(mut self, generation: GenerationDeclaration) -> Self {
        self.generation = generation;
        self
    }

    pub fn suppression(mut self, suppression: SuppressionSet) -> Self {
        self.suppression = suppression;
        self
    }

    pub fn mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn banner(mut self, banner: impl Into<String>) -> Self {
        self.banner = banner.into();
        self
    }

    pub fn naming(mut self, naming: ArtifactNaming) -> Self {
        self.naming = naming;
        self
    }
}

/// State of one run, accumulated phase by phase.
///
/// The context owns the diagnostics registry and the loaded module set; both
/// are dropped with it.
#[derive(Debug)]
pub struct RunContext {
    pub documents: Vec<InputDocument>,
    pub generation: GenerationDeclaration,
    pub suppression: SuppressionSet,
    pub mode: OutputMode,
    pub banner: String,
    pub naming: ArtifactNaming,
    /// Every module the compiler produced, in discovery order (compile phase).
    /// Drained by the assemble phase.
    pub batch: Vec<ModuleObject>,
    /// Deduplicated, import-resolved modules (assemble phase).
    pub modules: Option<LoadedModuleSet>,
    /// Names of modules selected for output (select phase).
    pub eligible: Vec<String>,
    /// Customizable-artifact decision per eligible module (guard phase).
    pub decisions: IndexMap<String, GuardDecision>,
    /// Rendered artifacts (emit phase).
    pub artifacts: ArtifactRegistry,
    /// What reached the disk (write phase, filesystem mode only).
    pub write_stats: WriteStats,
    /// Append-only diagnostics registry.
    pub diagnostics: Vec<Diagnostic>,
    halted: bool,
    cancel: CancellationToken,
}

impl RunContext {
    pub fn new(inputs: RunInputs, cancel: CancellationToken) -> Self {
        let RunInputs {
            documents,
            generation,
            suppression,
            mode,
            banner,
            naming,
        } = inputs;

        Self {
            documents,
            generation,
            suppression,
            mode,
            banner,
            naming,
            batch: Vec::new(),
            modules: None,
            eligible: Vec::new(),
            decisions: IndexMap::new(),
            artifacts: ArtifactRegistry::new(),
            write_stats: WriteStats::default(),
            diagnostics: Vec::new(),
            halted: false,
            cancel,
        }
    }

    /// Check if any error diagnostics have been recorded.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    /// Check if any warning diagnostics have been recorded.
    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_warning())
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    pub fn add_error(&mut self, source: DiagnosticSource, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::error(source, message));
    }

    pub fn add_warning(&mut self, source: DiagnosticSource, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::warning(source, message));
    }

    pub fn add_info(&mut self, source: DiagnosticSource, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::info(source, message));
    }

    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity.is_warning())
    }

    /// Stop the run after the current phase. Not an error.
    pub fn halt(&mut self) {
        self.halted = true;
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Fail if the host cancelled the run.
    pub fn check_cancelled(&self) -> Result<()> {
        if self.cancel.is_cancelled() {
            bail!("run cancelled");
        }
        Ok(())
    }

    /// Eligible modules in selection order.
    pub fn eligible_modules(&self) -> impl Iterator<Item = &ModuleObject> {
        let modules = self.modules.as_ref();
        self.eligible
            .iter()
            .filter_map(move |name| modules.and_then(|m| m.get(name)))
    }

    /// Hand the diagnostics registry to the host, consuming the run.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
