//! Generation pipeline.
//!
//! A [`Pipeline`] wires the injected compiler and emitter into one run:
//!
//! - compile every input document, converting per-document failures into
//!   diagnostics
//! - assemble the whole batch into a [`LoadedModuleSet`](mibgen_ir::LoadedModuleSet)
//!   and resolve imports
//! - select eligible modules, guard customizable artifacts, render and
//!   (in filesystem mode) write
//!
//! Each phase sees the complete output of its predecessor. Plugins observe
//! the [`RunContext`] before and after every phase.
//!
//! # Example
//!
//! ```ignore
//! let pipeline = Pipeline::new(OutlineCompiler::new(), RustEmitter::new());
//! let ctx = pipeline.run(RunInputs::new(documents).generation(declaration))?;
//!
//! for diag in &ctx.diagnostics {
//!     eprintln!("{diag}");
//! }
//! ```

mod cancel;
mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod plugin;
mod runner;
mod snapshot;

pub use cancel::CancellationToken;
pub use context::{OutputMode, RunContext, RunInputs};
pub use diagnostic::{Diagnostic, DiagnosticSource, Severity};
pub use phase::Phase;
pub use plugin::Plugin;
pub use runner::Pipeline;
pub use snapshot::{PhaseSnapshot, SnapshotPlugin};
