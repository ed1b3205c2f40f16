//! Report data structures for commands.
//!
//! This module provides data structures that separate data collection from rendering.
//! Commands build reports, then render them to an Output target.

mod bake;
mod check;
mod customize;
mod output;

pub use bake::{
    BakeReport, GenerationResult, PreviewFile, PreviewResult, ProtectedModule, WrittenResult,
};
pub use check::CheckReport;
pub use customize::CustomizeReport;
pub use output::{Report, TerminalOutput};

use mibgen_codegen::{Diagnostic, Severity};
use output::Output;

/// Render diagnostics in registry order; errors and warnings go to stderr.
fn render_diagnostics(out: &mut dyn Output, diagnostics: &[Diagnostic]) {
    for diag in diagnostics {
        match diag.severity {
            Severity::Error | Severity::Warning => out.problem(&diag.to_string()),
            Severity::Info => out.preformatted(&diag.to_string()),
        }
    }
}
