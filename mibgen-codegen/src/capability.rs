//! Capability contracts injected into the pipeline.
//!
//! The MIB grammar engine and the per-definition rendering templates live
//! outside this crate. The pipeline only sees them through these two traits,
//! which keeps every phase testable with in-memory fakes.

use eyre::Result;
use mibgen_ir::{InputDocument, ModuleObject};
use serde::Serialize;

use crate::pipeline::Diagnostic;

/// Which of the two per-module artifacts is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Always regenerated, never hand-edited.
    Generated,
    /// Generated once, then owned by the user.
    Customizable,
}

impl Variant {
    pub fn is_generated(&self) -> bool {
        matches!(self, Variant::Generated)
    }
}

/// Turns one input document into zero or more module objects.
pub trait DocumentCompiler: Send + Sync {
    /// Compile a document.
    ///
    /// Recoverable findings are pushed onto `diagnostics`. Returning `Err`
    /// marks the whole document as a compile failure; the pipeline records it
    /// and moves on to the next document.
    fn compile(
        &self,
        document: &InputDocument,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Vec<ModuleObject>>;
}

/// Renders a module object into artifact text.
///
/// Output must be a pure function of its arguments. `banner` only feeds a
/// header comment.
pub trait CodeEmitter: Send + Sync {
    fn render(&self, module: &ModuleObject, banner: &str, variant: Variant) -> Result<String>;
}
