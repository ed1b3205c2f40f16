//! Pipeline phase trait.

use eyre::Result;

use super::RunContext;

/// A phase in the generation pipeline.
///
/// Built-in phases run in a fixed order: `compile`, `assemble`, `select`,
/// `guard`, `emit`, `write`. Custom phases added with
/// [`Pipeline::phase`](super::Pipeline::phase) run after them.
pub trait Phase: Send + Sync {
    /// The name of this phase (used in diagnostics and plugin hooks).
    fn name(&self) -> &'static str;

    /// Run this phase on the run context.
    ///
    /// # Errors
    ///
    /// Only cancellation and broken internal invariants are errors. Problems
    /// attributable to a document or a module are recorded as diagnostics.
    fn run(&self, ctx: &mut RunContext) -> Result<()>;
}
