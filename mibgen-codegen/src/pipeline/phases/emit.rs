//! Emit phase - renders artifacts for eligible modules.

use eyre::Result;
use tracing::{debug, info};

use crate::{
    CodeEmitter,
    generation::{ArtifactEntry, ArtifactKind},
    pipeline::{Diagnostic, DiagnosticSource, Phase, RunContext, phases::GuardDecision},
};

/// Phase that renders each eligible module through the injected emitter.
///
/// Every artifact is rendered in full before it is registered. A module
/// whose generated artifact fails to render is reported and produces nothing;
/// other modules are unaffected.
pub struct EmitPhase<'a> {
    emitter: &'a dyn CodeEmitter,
}

impl<'a> EmitPhase<'a> {
    pub fn new(emitter: &'a dyn CodeEmitter) -> Self {
        Self { emitter }
    }
}

impl Phase for EmitPhase<'_> {
    fn name(&self) -> &'static str {
        "emit"
    }

    fn run(&self, ctx: &mut RunContext) -> Result<()> {
        let mut entries = Vec::new();
        let mut failures = Vec::new();

        for module in ctx.eligible_modules() {
            ctx.check_cancelled()?;

            let permitted = ctx
                .decisions
                .get(&module.name)
                .is_none_or(GuardDecision::is_permitted);
            let kinds: &[ArtifactKind] = if permitted {
                &[ArtifactKind::Generated, ArtifactKind::Customizable]
            } else {
                &[ArtifactKind::Generated]
            };

            for &kind in kinds {
                match self.emitter.render(module, &ctx.banner, kind.variant()) {
                    Ok(content) => {
                        let file_name = ctx.naming.file_name(&module.name, kind);
                        debug!(module = %module.name, file = %file_name, "rendered artifact");
                        entries.push(ArtifactEntry::new(&module.name, kind, file_name, content));
                    }
                    Err(err) => {
                        failures.push(
                            Diagnostic::error(
                                DiagnosticSource::Pipeline,
                                format!("failed to render {} artifact: {err:#}", kind.as_str()),
                            )
                            .at(module.name.clone()),
                        );
                        if kind == ArtifactKind::Generated {
                            break;
                        }
                    }
                }
            }
        }

        info!(artifacts = entries.len(), "emitted artifacts");
        for entry in entries {
            ctx.artifacts.register(entry);
        }
        for failure in failures {
            ctx.add_diagnostic(failure);
        }
        Ok(())
    }
}
