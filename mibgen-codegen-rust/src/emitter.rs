use eyre::Result;
use mibgen_codegen::{CodeEmitter, Variant};
use mibgen_ir::ModuleObject;

use crate::files::{CustomizableFile, GeneratedFile};

/// [`CodeEmitter`] producing Rust source.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustEmitter;

impl RustEmitter {
    pub fn new() -> Self {
        Self
    }
}

impl CodeEmitter for RustEmitter {
    fn render(&self, module: &ModuleObject, banner: &str, variant: Variant) -> Result<String> {
        match variant {
            Variant::Generated => GeneratedFile::new(module, banner).render(),
            Variant::Customizable => CustomizableFile::new(module, banner).render(),
        }
    }
}
