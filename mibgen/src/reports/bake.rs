//! Bake command report data structures.

use std::path::PathBuf;

use mibgen_codegen::{Diagnostic, pipeline::phases::SuppressReason};

use super::{
    output::{Output, Report},
    render_diagnostics,
};

/// Report data from code generation.
#[derive(Debug)]
pub struct BakeReport {
    /// Input problems followed by the run's diagnostics, in order.
    pub diagnostics: Vec<Diagnostic>,

    /// Modules selected for generation.
    pub eligible: Vec<String>,

    /// Modules whose customizable file was not (re)generated.
    pub protected: Vec<ProtectedModule>,

    /// Generation result (files written or preview).
    pub result: GenerationResult,
}

impl BakeReport {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }
}

/// A customizable file the guard kept away from.
#[derive(Debug)]
pub struct ProtectedModule {
    pub module: String,
    pub file_name: String,
    pub reason: SuppressReason,
}

/// Result of code generation.
#[derive(Debug)]
pub enum GenerationResult {
    /// Files were written to disk.
    Written(WrittenResult),
    /// Dry-run preview.
    Preview(PreviewResult),
}

/// Result when files were written to disk.
#[derive(Debug)]
pub struct WrittenResult {
    /// Output directory.
    pub output_dir: PathBuf,
    /// Generated artifacts written this run.
    pub generated: Vec<String>,
    /// Customizable artifacts created this run.
    pub created: Vec<String>,
    /// Customizable artifacts that appeared on disk before they could be written.
    pub kept: Vec<String>,
    /// Path to debug snapshots, if visualization was enabled.
    pub debug_dir: Option<PathBuf>,
}

/// Result of a dry-run preview.
#[derive(Debug)]
pub struct PreviewResult {
    /// Files that would be generated.
    pub files: Vec<PreviewFile>,
}

/// A file in preview mode.
#[derive(Debug)]
pub struct PreviewFile {
    /// File name relative to the output directory.
    pub path: String,
    /// File content.
    pub content: String,
}

impl Report for BakeReport {
    fn render(&self, out: &mut dyn Output) {
        render_diagnostics(out, &self.diagnostics);
        if !self.diagnostics.is_empty() {
            out.newline();
        }

        match &self.result {
            GenerationResult::Written(written) => self.render_written(out, written),
            GenerationResult::Preview(preview) => self.render_preview(out, preview),
        }
    }
}

impl BakeReport {
    fn render_written(&self, out: &mut dyn Output, written: &WrittenResult) {
        if let Some(debug_dir) = &written.debug_dir {
            out.key_value(
                "Pipeline snapshots written to",
                &debug_dir.display().to_string(),
            );
            out.newline();
        }

        out.section(&format!("Modules ({})", self.eligible.len()));
        for module in &self.eligible {
            out.list_item(module);
        }
        out.newline();

        out.key_value(
            "Generated",
            &format!(
                "{} file{} in {}",
                written.generated.len(),
                if written.generated.len() == 1 { "" } else { "s" },
                written.output_dir.display()
            ),
        );

        if !written.created.is_empty() {
            out.newline();
            out.section("New customizable files");
            for file in &written.created {
                out.added_item(file);
            }
        }

        let kept: Vec<String> = self
            .protected
            .iter()
            .map(|p| format!("{} for {} ({})", p.file_name, p.module, reason_text(p.reason)))
            .chain(
                written
                    .kept
                    .iter()
                    .map(|file| format!("{} (already exists)", file)),
            )
            .collect();
        if !kept.is_empty() {
            out.newline();
            out.section("Preserved customizable files");
            for line in &kept {
                out.kept_item(line);
            }
        }
    }

    fn render_preview(&self, out: &mut dyn Output, preview: &PreviewResult) {
        for file in &preview.files {
            out.divider(&file.path);
            out.preformatted(&file.content);
        }

        out.divider("Summary");
        out.preformatted(&format!("{} files would be generated", preview.files.len()));
        for protected in &self.protected {
            out.kept_item(&format!(
                "{} for {} ({})",
                protected.file_name,
                protected.module,
                reason_text(protected.reason)
            ));
        }
    }
}

fn reason_text(reason: SuppressReason) -> &'static str {
    match reason {
        SuppressReason::Declared => "listed as customized",
        SuppressReason::ExistsOnDisk => "already exists",
    }
}
