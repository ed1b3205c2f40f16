//! Bake operation - code generation for the declared modules.

use std::path::Path;

use eyre::{Context, Result};
use mibgen_codegen::{
    ArtifactKind, ArtifactNaming, OutputMode, Pipeline,
    pipeline::{SnapshotPlugin, phases::GuardDecision},
};
use mibgen_codegen_rust::RustEmitter;
use mibgen_manifest::ConfigFile;
use mibgen_smi::OutlineCompiler;

use super::Discovery;
use crate::reports::{
    BakeReport, GenerationResult, PreviewFile, PreviewResult, ProtectedModule, WrittenResult,
};

/// Options for the bake operation.
pub struct BakeOptions<'a> {
    /// Output directory for generated code.
    pub output_dir: &'a Path,
    /// Whether to preview without writing files.
    pub dry_run: bool,
    /// Whether to output debug snapshots.
    pub visualize: bool,
}

/// Execute the bake operation.
///
/// Runs the full pipeline over the discovered inputs. A dry run renders in
/// memory, where only the suppression documents protect customizable files.
pub fn bake(config: &ConfigFile, discovery: Discovery, opts: BakeOptions) -> Result<BakeReport> {
    let debug_dir = opts.output_dir.join(".mibgen/debug");
    let mode = if opts.dry_run {
        OutputMode::InMemory
    } else {
        OutputMode::filesystem(opts.output_dir)
    };

    let output = &config.config().output;
    let (inputs, mut diagnostics) = discovery.into_run_inputs();
    let inputs = inputs
        .mode(mode)
        .banner(config.config().banner(env!("CARGO_PKG_VERSION")))
        .naming(ArtifactNaming::new(
            &output.generated_suffix,
            &output.customizable_suffix,
        ));

    let mut pipeline = Pipeline::new(OutlineCompiler::new(), RustEmitter::new());
    if opts.visualize {
        pipeline = pipeline.plugin(SnapshotPlugin::with_output_dir(&debug_dir));
    }
    let ctx = pipeline.run(inputs).wrap_err("Pipeline failed")?;

    let protected = ctx
        .decisions
        .iter()
        .filter_map(|(module, decision)| match decision {
            GuardDecision::Permit => None,
            GuardDecision::Suppress { reason } => Some(ProtectedModule {
                module: module.clone(),
                file_name: ctx.naming.file_name(module, ArtifactKind::Customizable),
                reason: *reason,
            }),
        })
        .collect();

    let result = if opts.dry_run {
        let files = ctx
            .artifacts
            .entries()
            .map(|entry| PreviewFile {
                path: entry.file_name.clone(),
                content: entry.content.clone(),
            })
            .collect();
        GenerationResult::Preview(PreviewResult { files })
    } else {
        let mut written = WrittenResult {
            output_dir: opts.output_dir.to_path_buf(),
            generated: Vec::new(),
            created: Vec::new(),
            kept: Vec::new(),
            debug_dir: opts.visualize.then(|| debug_dir.clone()),
        };
        for entry in ctx.artifacts.entries() {
            let path = entry.full_path(opts.output_dir);
            if ctx.write_stats.skipped.contains(&path) {
                written.kept.push(entry.file_name.clone());
            } else if ctx.write_stats.written.contains(&path) {
                match entry.kind {
                    ArtifactKind::Generated => written.generated.push(entry.file_name.clone()),
                    ArtifactKind::Customizable => written.created.push(entry.file_name.clone()),
                }
            }
        }
        GenerationResult::Written(written)
    };

    let eligible = ctx.eligible.clone();
    diagnostics.extend(ctx.into_diagnostics());

    Ok(BakeReport {
        diagnostics,
        eligible,
        protected,
        result,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::ops::discover;

    const DEMO_MIB: &str = r#"
DEMO-MIB DEFINITIONS ::= BEGIN
IMPORTS OBJECT-TYPE, Integer32, enterprises FROM SNMPv2-SMI;

demoCount OBJECT-TYPE
    SYNTAX      Integer32
    MAX-ACCESS  read-write
    STATUS      current
    DESCRIPTION "Number of demo things."
    ::= { enterprises 99999 }
END
"#;

    fn project() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("DEMO-MIB.txt"), DEMO_MIB).unwrap();
        fs::write(temp.path().join("project.mibs"), "DEMO-MIB.txt\n").unwrap();
        temp
    }

    fn run(temp: &TempDir, dry_run: bool, visualize: bool) -> BakeReport {
        let config = ConfigFile::defaults(temp.path());
        let discovery = discover(&config).unwrap();
        let output_dir = temp.path().join("out");

        bake(
            &config,
            discovery,
            BakeOptions {
                output_dir: &output_dir,
                dry_run,
                visualize,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_bake_writes_and_reports_new_files() {
        let temp = project();

        let report = run(&temp, false, false);

        let GenerationResult::Written(written) = &report.result else {
            panic!("expected a written result");
        };
        assert_eq!(written.generated, vec!["demo_mib.generated.rs"]);
        assert_eq!(written.created, vec!["demo_mib.rs"]);
        assert!(written.kept.is_empty());
        assert!(temp.path().join("out/demo_mib.rs").exists());
        assert_eq!(report.eligible, vec!["DEMO-MIB"]);
        assert!(!report.has_errors());
    }

    #[test]
    fn test_second_bake_reports_protected_file() {
        let temp = project();
        run(&temp, false, false);

        let report = run(&temp, false, false);

        let GenerationResult::Written(written) = &report.result else {
            panic!("expected a written result");
        };
        assert!(written.created.is_empty());
        assert_eq!(report.protected.len(), 1);
        assert_eq!(report.protected[0].file_name, "demo_mib.rs");
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let temp = project();

        let report = run(&temp, true, false);

        let GenerationResult::Preview(preview) = &report.result else {
            panic!("expected a preview");
        };
        let paths: Vec<_> = preview.files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["demo_mib.generated.rs", "demo_mib.rs"]);
        assert!(!temp.path().join("out").exists());
    }

    #[test]
    fn test_visualize_writes_phase_snapshots() {
        let temp = project();

        run(&temp, false, true);

        let debug_dir = temp.path().join("out/.mibgen/debug");
        assert!(debug_dir.join("compile.json").exists());
        assert!(debug_dir.join("guard.json").exists());
    }

    #[test]
    fn test_banner_carries_version() {
        let temp = project();

        run(&temp, false, false);

        let generated = fs::read_to_string(temp.path().join("out/demo_mib.generated.rs")).unwrap();
        assert!(generated.contains(concat!("mibgen ", env!("CARGO_PKG_VERSION"))));
    }
}
