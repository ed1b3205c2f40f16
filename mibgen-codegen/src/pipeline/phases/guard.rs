//! Guard phase - protects hand-edited customizable artifacts.
//!
//! Two independent gates, combined with OR, can suppress a module's
//! customizable artifact:
//!
//! - the module is listed in the suppression set (declared intent)
//! - a customizable file for it already exists in the output directory
//!   (ground truth, filesystem mode only)
//!
//! The generated artifact is never affected by either gate.

use std::path::PathBuf;

use eyre::Result;
use mibgen_manifest::SuppressionSet;
use serde::Serialize;
use tracing::debug;

use crate::{
    generation::ArtifactKind,
    pipeline::{Diagnostic, DiagnosticSource, OutputMode, Phase, RunContext},
};

/// Answers whether an artifact file already exists at the output location.
pub trait OutputLookup {
    fn exists(&self, file_name: &str) -> bool;
}

/// Lookup for in-memory runs: nothing is ever on disk.
pub struct NoOutput;

impl OutputLookup for NoOutput {
    fn exists(&self, _file_name: &str) -> bool {
        false
    }
}

/// Lookup backed by an output directory.
pub struct OutputDirectory {
    dir: PathBuf,
}

impl OutputDirectory {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl OutputLookup for OutputDirectory {
    fn exists(&self, file_name: &str) -> bool {
        self.dir.join(file_name).exists()
    }
}

/// Declared-intent gate.
pub fn suppressed_by_declaration(suppression: &SuppressionSet, module_name: &str) -> bool {
    suppression.contains(module_name)
}

/// Ground-truth gate.
pub fn protected_on_disk(lookup: &dyn OutputLookup, file_name: &str) -> bool {
    lookup.exists(file_name)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuppressReason {
    /// Listed in a suppression document.
    Declared,
    /// A customizable file is already present in the output directory.
    ExistsOnDisk,
}

/// Outcome for one module's customizable artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum GuardDecision {
    Permit,
    Suppress { reason: SuppressReason },
}

impl GuardDecision {
    pub fn is_permitted(&self) -> bool {
        matches!(self, GuardDecision::Permit)
    }
}

/// Both gates bound to one run's inputs.
pub struct CustomizationGuard<'a> {
    suppression: &'a SuppressionSet,
    lookup: &'a dyn OutputLookup,
}

impl<'a> CustomizationGuard<'a> {
    pub fn new(suppression: &'a SuppressionSet, lookup: &'a dyn OutputLookup) -> Self {
        Self { suppression, lookup }
    }

    pub fn decide(&self, module_name: &str, customizable_file: &str) -> GuardDecision {
        if suppressed_by_declaration(self.suppression, module_name) {
            GuardDecision::Suppress {
                reason: SuppressReason::Declared,
            }
        } else if protected_on_disk(self.lookup, customizable_file) {
            GuardDecision::Suppress {
                reason: SuppressReason::ExistsOnDisk,
            }
        } else {
            GuardDecision::Permit
        }
    }
}

/// Phase that records a [`GuardDecision`] for every eligible module.
pub struct GuardPhase;

impl Phase for GuardPhase {
    fn name(&self) -> &'static str {
        "guard"
    }

    fn run(&self, ctx: &mut RunContext) -> Result<()> {
        if !ctx.suppression.is_empty() {
            let names: Vec<&str> = ctx.suppression.names().collect();
            let message = format!(
                "loaded {} customized module(s): {}",
                names.len(),
                names.join(", ")
            );
            ctx.add_info(DiagnosticSource::Pipeline, message);
        }

        let lookup: Box<dyn OutputLookup> = match &ctx.mode {
            OutputMode::InMemory => Box::new(NoOutput),
            OutputMode::Filesystem { dir } => Box::new(OutputDirectory::new(dir)),
        };
        let guard = CustomizationGuard::new(&ctx.suppression, lookup.as_ref());

        let mut decisions = Vec::with_capacity(ctx.eligible.len());
        for name in &ctx.eligible {
            let file_name = ctx.naming.file_name(name, ArtifactKind::Customizable);
            let decision = guard.decide(name, &file_name);
            debug!(module = %name, ?decision, "customization guard");
            decisions.push((name.clone(), file_name, decision));
        }

        for (name, file_name, decision) in decisions {
            if let GuardDecision::Suppress { reason } = decision {
                let why = match reason {
                    SuppressReason::Declared => "module is listed as customized".to_string(),
                    SuppressReason::ExistsOnDisk => format!("{file_name} already exists"),
                };
                ctx.add_diagnostic(
                    Diagnostic::info(
                        DiagnosticSource::Pipeline,
                        format!("customizable artifact for {name} not generated: {why}"),
                    )
                    .at(name.clone()),
                );
            }
            ctx.decisions.insert(name, decision);
        }

        Ok(())
    }
}
