//! Write phase - materializes artifacts in filesystem mode.

use eyre::Result;
use tracing::{debug, info};

use crate::pipeline::{Diagnostic, DiagnosticSource, OutputMode, Phase, RunContext};

/// Phase that writes registered artifacts into the output directory.
///
/// Generated artifacts replace existing files. Customizable artifacts are
/// only created, never replaced, even if a file appeared after the guard
/// phase looked. In-memory runs skip this phase entirely.
pub struct WritePhase;

impl Phase for WritePhase {
    fn name(&self) -> &'static str {
        "write"
    }

    fn run(&self, ctx: &mut RunContext) -> Result<()> {
        let OutputMode::Filesystem { dir } = &ctx.mode else {
            debug!("in-memory run, nothing to write");
            return Ok(());
        };
        ctx.check_cancelled()?;

        let mut failures = Vec::new();
        for entry in ctx.artifacts.entries() {
            let path = entry.full_path(dir);
            match entry.write(dir) {
                Ok(result) => {
                    debug!(path = %path.display(), ?result, "materialized artifact");
                    ctx.write_stats.record(path, result);
                }
                Err(err) => failures.push(
                    Diagnostic::error(DiagnosticSource::Pipeline, format!("{err:#}"))
                        .at(path.display().to_string()),
                ),
            }
        }

        info!(
            written = ctx.write_stats.written.len(),
            skipped = ctx.write_stats.skipped.len(),
            "wrote artifacts"
        );
        for failure in failures {
            ctx.add_diagnostic(failure);
        }
        Ok(())
    }
}
