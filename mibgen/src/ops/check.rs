//! Check operation - compile, assemble and select without generating.

use eyre::{Context, Result};
use mibgen_codegen::Pipeline;
use mibgen_codegen_rust::RustEmitter;
use mibgen_manifest::ConfigFile;
use mibgen_smi::OutlineCompiler;

use super::Discovery;
use crate::reports::CheckReport;

/// Execute the check operation.
///
/// Stops after the select phase, so nothing is rendered or written.
pub fn check(config: &ConfigFile, discovery: Discovery) -> Result<CheckReport> {
    let (inputs, mut diagnostics) = discovery.into_run_inputs();

    let ctx = Pipeline::new(OutlineCompiler::new(), RustEmitter::new())
        .stop_after("select")
        .run(inputs)
        .wrap_err("Validation failed")?;

    let loaded = ctx
        .modules
        .as_ref()
        .map(|modules| modules.names().map(str::to_string).collect())
        .unwrap_or_default();
    let eligible = ctx.eligible.clone();
    diagnostics.extend(ctx.into_diagnostics());

    Ok(CheckReport {
        config_path: config.path().map(|p| p.to_path_buf()),
        loaded,
        eligible,
        diagnostics,
    })
}
