//! Customize command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Outcome of appending a module to a suppression document.
#[derive(Debug)]
pub struct CustomizeReport {
    pub path: PathBuf,
    pub module: String,
    /// `false` when the module was already listed.
    pub added: bool,
}

impl Report for CustomizeReport {
    fn render(&self, out: &mut dyn Output) {
        if self.added {
            out.added_item(&format!("{} -> {}", self.module, self.path.display()));
            out.preformatted(&format!(
                "{}'s customizable file will no longer be generated",
                self.module
            ));
        } else {
            out.preformatted(&format!(
                "{} is already listed in {}",
                self.module,
                self.path.display()
            ));
        }
    }
}
