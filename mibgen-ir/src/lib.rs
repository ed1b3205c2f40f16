//! Module object model for the mibgen code generator.
//!
//! These types are the currency of the generation pipeline:
//!
//! ```text
//! InputDocument → (document compiler) → ModuleObject → (assembler) → LoadedModuleSet
//! ```
//!
//! The model is deliberately small. It carries what cross-module assembly,
//! eligibility selection and rendering need, and nothing a full SMI
//! type-checker would.

mod document;
mod import;
mod loaded;
mod module;

pub use document::InputDocument;
pub use import::{Import, ResolutionState};
pub use loaded::{Insertion, LoadedModuleSet};
pub use module::{Entity, EntityKind, ModuleObject, Status};
