//! Check command report data structures.

use std::path::PathBuf;

use mibgen_codegen::Diagnostic;

use super::{
    output::{Output, Report},
    render_diagnostics,
};

/// Report data from a compile-and-select run.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the config file, if one was read.
    pub config_path: Option<PathBuf>,
    /// Modules in the loaded set, in discovery order.
    pub loaded: Vec<String>,
    /// Modules that `bake` would generate.
    pub eligible: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        !self.diagnostics.iter().any(|d| d.severity.is_error())
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        render_diagnostics(out, &self.diagnostics);
        if !self.diagnostics.is_empty() {
            out.newline();
        }

        if let Some(path) = &self.config_path {
            out.key_value("Config", &path.display().to_string());
        }
        out.key_value("Loaded modules", &self.loaded.len().to_string());

        out.section(&format!("Eligible modules ({})", self.eligible.len()));
        for module in &self.eligible {
            out.list_item(module);
        }

        if self.is_valid() {
            out.newline();
            out.preformatted("✓ inputs are valid");
        }
    }
}
