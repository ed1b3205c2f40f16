//! Collected artifacts for one run.
//!
//! Entries keep the order they were registered in, which is module discovery
//! order with the generated artifact ahead of the customizable one.

use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};
use mibgen_core::{WriteResult, write_file};
use serde::Serialize;

use super::ArtifactKind;

/// One rendered artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactEntry {
    /// Name of the module the artifact was rendered from.
    pub module: String,
    pub kind: ArtifactKind,
    /// File name relative to the output directory.
    pub file_name: String,
    #[serde(skip)]
    pub content: String,
}

impl ArtifactEntry {
    pub fn new(
        module: impl Into<String>,
        kind: ArtifactKind,
        file_name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            module: module.into(),
            kind,
            file_name: file_name.into(),
            content: content.into(),
        }
    }

    pub fn full_path(&self, base: &Path) -> PathBuf {
        base.join(&self.file_name)
    }

    /// Write this artifact under `base` using its kind's overwrite rule.
    pub fn write(&self, base: &Path) -> Result<WriteResult> {
        let path = self.full_path(base);
        write_file(&path, &self.content, self.kind.overwrite())
            .wrap_err_with(|| format!("failed to write artifact for module {}", self.module))
    }
}

/// Registry of the artifacts a run produced.
#[derive(Debug, Default, Clone)]
pub struct ArtifactRegistry {
    entries: Vec<ArtifactEntry>,
}

impl ArtifactRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, entry: ArtifactEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> impl Iterator<Item = &ArtifactEntry> {
        self.entries.iter()
    }

    pub fn entries_by_kind(&self, kind: ArtifactKind) -> impl Iterator<Item = &ArtifactEntry> {
        self.entries.iter().filter(move |e| e.kind == kind)
    }

    /// Look up the artifact of `kind` for a module, ignoring name case.
    pub fn find(&self, module: &str, kind: ArtifactKind) -> Option<&ArtifactEntry> {
        self.entries
            .iter()
            .find(|e| e.kind == kind && e.module.eq_ignore_ascii_case(module))
    }

    pub fn file_names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.file_name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Outcome of materializing a registry.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct WriteStats {
    pub written: Vec<PathBuf>,
    /// Customizable artifacts left alone because a file already existed.
    pub skipped: Vec<PathBuf>,
}

impl WriteStats {
    pub fn record(&mut self, path: PathBuf, result: WriteResult) {
        match result {
            WriteResult::Written => self.written.push(path),
            WriteResult::Skipped => self.skipped.push(path),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.written.is_empty() && self.skipped.is_empty()
    }
}
