//! Pipeline snapshot plugin for visualization and debugging.
//!
//! This module provides a plugin that captures the run state after each
//! phase, so `bake --visualize` can show how a batch was assembled and which
//! artifacts each module was granted.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::RwLock,
};

use eyre::{Result, eyre};
use indexmap::IndexMap;
use mibgen_ir::LoadedModuleSet;
use serde::Serialize;

use super::{Diagnostic, Plugin, RunContext, phases::GuardDecision};
use crate::generation::ArtifactEntry;

/// A snapshot of the run state at a specific phase.
#[derive(Debug, Clone, Serialize)]
pub struct PhaseSnapshot {
    /// The phase that just completed.
    pub phase: String,

    /// Names of compiled modules still waiting for assembly.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub batch: Vec<String>,

    /// The loaded module set (available after "assemble").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modules: Option<LoadedModuleSet>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub eligible: Vec<String>,

    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub decisions: IndexMap<String, GuardDecision>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub artifacts: Vec<ArtifactEntry>,

    /// Diagnostics collected so far.
    pub diagnostics: Vec<Diagnostic>,
}

impl PhaseSnapshot {
    fn capture(phase: &str, ctx: &RunContext) -> Self {
        Self {
            phase: phase.to_string(),
            batch: ctx.batch.iter().map(|m| m.name.clone()).collect(),
            modules: ctx.modules.clone(),
            eligible: ctx.eligible.clone(),
            decisions: ctx.decisions.clone(),
            artifacts: ctx.artifacts.entries().cloned().collect(),
            diagnostics: ctx.diagnostics.clone(),
        }
    }

    fn write(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)?;
        let json = serde_json::to_string_pretty(self)?;
        fs::write(dir.join(format!("{}.json", self.phase)), json)?;
        Ok(())
    }
}

/// A plugin that captures run state after each phase.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new(compiler, emitter)
///     .plugin(SnapshotPlugin::with_output_dir("generated/.mibgen"));
/// ```
pub struct SnapshotPlugin {
    snapshots: RwLock<Vec<PhaseSnapshot>>,
    output_dir: Option<PathBuf>,
}

impl SnapshotPlugin {
    pub fn new() -> Self {
        Self {
            snapshots: RwLock::new(Vec::new()),
            output_dir: None,
        }
    }

    /// Create a snapshot plugin that writes each snapshot as it is taken.
    pub fn with_output_dir(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            snapshots: RwLock::new(Vec::new()),
            output_dir: Some(output_dir.into()),
        }
    }

    /// Get all collected snapshots.
    pub fn snapshots(&self) -> Vec<PhaseSnapshot> {
        match self.snapshots.read() {
            Ok(snapshots) => snapshots.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Write all snapshots to a directory, one `<phase>.json` each.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<()> {
        for snapshot in self.snapshots() {
            snapshot.write(dir.as_ref())?;
        }
        Ok(())
    }
}

impl Default for SnapshotPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for SnapshotPlugin {
    fn name(&self) -> &'static str {
        "snapshot"
    }

    fn on_after_phase(&self, phase: &str, ctx: &mut RunContext) -> Result<()> {
        let snapshot = PhaseSnapshot::capture(phase, ctx);

        if let Some(dir) = &self.output_dir {
            snapshot.write(dir)?;
        }

        self.snapshots
            .write()
            .map_err(|_| eyre!("snapshot store poisoned"))?
            .push(snapshot);
        Ok(())
    }
}
