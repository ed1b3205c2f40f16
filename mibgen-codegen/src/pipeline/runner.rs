//! Pipeline orchestrator.

use eyre::{Result, WrapErr};
use tracing::{debug, info};

use super::{
    CancellationToken, Phase, Plugin, RunContext, RunInputs,
    phases::{AssemblePhase, CompilePhase, EmitPhase, GuardPhase, SelectPhase, WritePhase},
};
use crate::{CodeEmitter, DocumentCompiler};

/// The generation pipeline orchestrator.
///
/// The pipeline owns the injected compiler and emitter, runs the built-in
/// phases followed by any custom phases, and calls plugin hooks before and
/// after each phase.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new(OutlineCompiler::new(), RustEmitter::new())
///     .plugin(SnapshotPlugin::with_output_dir(".mibgen"))
///     .cancellation(token.clone());
///
/// let ctx = pipeline.run(inputs)?;
/// ```
pub struct Pipeline {
    compiler: Box<dyn DocumentCompiler>,
    emitter: Box<dyn CodeEmitter>,
    phases: Vec<Box<dyn Phase>>,
    plugins: Vec<Box<dyn Plugin>>,
    cancel: CancellationToken,
    stop_after: Option<&'static str>,
}

impl Pipeline {
    pub fn new(
        compiler: impl DocumentCompiler + 'static,
        emitter: impl CodeEmitter + 'static,
    ) -> Self {
        Self {
            compiler: Box::new(compiler),
            emitter: Box::new(emitter),
            phases: Vec::new(),
            plugins: Vec::new(),
            cancel: CancellationToken::new(),
            stop_after: None,
        }
    }

    /// Add a phase to run after the built-in phases.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// Add a plugin to receive phase lifecycle hooks.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Attach a token the host can use to abandon the run.
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// End the run after the named phase.
    pub fn stop_after(mut self, phase: &'static str) -> Self {
        self.stop_after = Some(phase);
        self
    }

    /// Run the pipeline once.
    ///
    /// Executes, in order: compile, assemble, select, guard, emit, write,
    /// then custom phases. A halted context (empty batch) skips the rest
    /// without error.
    ///
    /// # Errors
    ///
    /// Returns an error if the run was cancelled, or if a phase or plugin
    /// fails fatally. Nothing is written after a cancellation is observed.
    pub fn run(&self, inputs: RunInputs) -> Result<RunContext> {
        let mut ctx = RunContext::new(inputs, self.cancel.clone());

        let builtin: Vec<Box<dyn Phase + '_>> = vec![
            Box::new(CompilePhase::new(self.compiler.as_ref())),
            Box::new(AssemblePhase),
            Box::new(SelectPhase),
            Box::new(GuardPhase),
            Box::new(EmitPhase::new(self.emitter.as_ref())),
            Box::new(WritePhase),
        ];

        let mut order: Vec<&dyn Phase> = builtin.iter().map(|p| p.as_ref()).collect();
        order.extend(self.phases.iter().map(|p| p.as_ref() as &dyn Phase));

        for phase in order {
            ctx.check_cancelled()?;
            self.run_phase(phase, &mut ctx)?;

            if ctx.is_halted() {
                debug!(phase = phase.name(), "run halted");
                break;
            }
            if self.stop_after == Some(phase.name()) {
                break;
            }
        }

        info!(
            eligible = ctx.eligible.len(),
            artifacts = ctx.artifacts.len(),
            errors = ctx.error_count(),
            warnings = ctx.warning_count(),
            "run finished"
        );
        Ok(ctx)
    }

    /// Run a single phase with plugin hooks.
    fn run_phase(&self, phase: &dyn Phase, ctx: &mut RunContext) -> Result<()> {
        let phase_name = phase.name();

        for plugin in &self.plugins {
            plugin
                .on_before_phase(phase_name, ctx)
                .wrap_err_with(|| format!("plugin {} failed before {phase_name}", plugin.name()))?;
        }

        debug!(phase = phase_name, "running phase");
        phase.run(ctx)?;

        for plugin in &self.plugins {
            plugin
                .on_after_phase(phase_name, ctx)
                .wrap_err_with(|| format!("plugin {} failed after {phase_name}", plugin.name()))?;
        }

        Ok(())
    }
}
