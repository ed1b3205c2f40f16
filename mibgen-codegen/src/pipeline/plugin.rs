//! Pipeline plugin trait for extensibility.

use eyre::Result;

use super::RunContext;

/// A plugin that can hook into the generation pipeline.
///
/// Hooks run around every phase, including custom ones, and may read or
/// change the run context. An error from a hook ends the run.
///
/// # Example
///
/// ```ignore
/// struct DenyUnresolved;
///
/// impl Plugin for DenyUnresolved {
///     fn name(&self) -> &'static str { "deny-unresolved" }
///
///     fn on_after_phase(&self, phase: &str, ctx: &mut RunContext) -> Result<()> {
///         if phase == "assemble" && ctx.has_warnings() {
///             eyre::bail!("batch has unresolved imports");
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Plugin: Send + Sync {
    /// Name used in log events.
    fn name(&self) -> &'static str;

    /// Called before a phase runs.
    ///
    /// # Errors
    ///
    /// Return an error to abort the pipeline.
    #[allow(unused_variables)]
    fn on_before_phase(&self, phase: &str, ctx: &mut RunContext) -> Result<()> {
        Ok(())
    }

    /// Called after a phase completes successfully.
    ///
    /// # Errors
    ///
    /// Return an error to abort the pipeline.
    #[allow(unused_variables)]
    fn on_after_phase(&self, phase: &str, ctx: &mut RunContext) -> Result<()> {
        Ok(())
    }
}
