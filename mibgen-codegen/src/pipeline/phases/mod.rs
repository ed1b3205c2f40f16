//! Built-in pipeline phases, in execution order:
//!
//! - [`CompilePhase`] - compiles each input document, isolating failures
//! - [`AssemblePhase`] - deduplicates the batch and resolves imports
//! - [`SelectPhase`] - picks modules that have content and were nominated
//! - [`GuardPhase`] - decides which customizable artifacts may be produced
//! - [`EmitPhase`] - renders artifacts through the injected emitter
//! - [`WritePhase`] - materializes artifacts in filesystem mode

mod assemble;
mod compile;
mod emit;
mod guard;
mod select;
mod write;

pub use assemble::AssemblePhase;
pub use compile::CompilePhase;
pub use emit::EmitPhase;
pub use guard::{
    CustomizationGuard, GuardDecision, GuardPhase, NoOutput, OutputDirectory, OutputLookup,
    SuppressReason, protected_on_disk, suppressed_by_declaration,
};
pub use select::{SelectPhase, is_eligible};
pub use write::WritePhase;
