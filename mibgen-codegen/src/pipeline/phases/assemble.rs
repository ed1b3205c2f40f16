//! Assemble phase - builds the loaded module set.

use std::collections::HashMap;

use eyre::Result;
use mibgen_ir::{Insertion, LoadedModuleSet, ResolutionState};
use tracing::{debug, info, warn};

use crate::pipeline::{Diagnostic, DiagnosticSource, Phase, RunContext};

/// Phase that merges the whole batch into one symbol space.
///
/// Modules are inserted in discovery order and the first module with a given
/// name wins. Imports are then resolved by looking their source module up in
/// the assembled set; misses are Warnings and never remove a module.
pub struct AssemblePhase;

impl Phase for AssemblePhase {
    fn name(&self) -> &'static str {
        "assemble"
    }

    fn run(&self, ctx: &mut RunContext) -> Result<()> {
        let mut modules = LoadedModuleSet::new();

        for module in std::mem::take(&mut ctx.batch) {
            let name = module.name.clone();
            let source = module.source_path.clone();

            match modules.insert(module) {
                Insertion::Inserted => {}
                Insertion::Duplicate {
                    kept_source,
                    same_content: true,
                } => {
                    debug!(
                        module = %name,
                        kept = %kept_source.display(),
                        dropped = %source.display(),
                        "dropped identical duplicate module"
                    );
                }
                Insertion::Duplicate {
                    kept_source,
                    same_content: false,
                } => {
                    warn!(module = %name, "conflicting duplicate module");
                    ctx.add_diagnostic(
                        Diagnostic::warning(
                            DiagnosticSource::Assembler,
                            format!(
                                "module {name} is defined differently in {} and {}; keeping the definition from {}",
                                kept_source.display(),
                                source.display(),
                                kept_source.display(),
                            ),
                        )
                        .at(source.display().to_string()),
                    );
                }
            }
        }

        let unresolved = resolve_imports(&mut modules);
        for (module, symbol, from_module) in unresolved {
            warn!(%module, %symbol, %from_module, "unresolved import");
            ctx.add_diagnostic(
                Diagnostic::warning(
                    DiagnosticSource::Assembler,
                    format!("unresolved import {symbol} from {from_module}: module {from_module} is not loaded"),
                )
                .at(module),
            );
        }

        info!(modules = modules.len(), "assembled module set");
        ctx.modules = Some(modules);
        Ok(())
    }
}

/// Resolve every import against the set, returning the misses as
/// `(importing module, symbol, declared source module)`.
fn resolve_imports(modules: &mut LoadedModuleSet) -> Vec<(String, String, String)> {
    let known: HashMap<String, String> = modules
        .names()
        .map(|name| (name.to_lowercase(), name.to_string()))
        .collect();

    let mut unresolved = Vec::new();
    for module in modules.iter_mut() {
        for import in &mut module.imports {
            import.resolution = match known.get(&import.from_module.to_lowercase()) {
                Some(provider) => ResolutionState::Resolved {
                    module: provider.clone(),
                },
                None => {
                    unresolved.push((
                        module.name.clone(),
                        import.symbol.clone(),
                        import.from_module.clone(),
                    ));
                    ResolutionState::Unresolved
                }
            };
        }
    }
    unresolved
}

#[cfg(test)]
mod tests {
    use mibgen_ir::ModuleObject;

    use super::*;
    use crate::{
        pipeline::{CancellationToken, RunInputs},
        testing::ModuleBuilder,
    };

    fn assemble(batch: Vec<ModuleObject>) -> RunContext {
        let mut ctx = RunContext::new(RunInputs::new(Vec::new()), CancellationToken::new());
        ctx.batch = batch;
        AssemblePhase.run(&mut ctx).unwrap();
        ctx
    }

    #[test]
    fn test_import_resolves_to_provider() {
        let a = ModuleBuilder::new("A-MIB")
            .object("a", "x", 1)
            .import("x", "B-MIB")
            .build();
        let b = ModuleBuilder::new("B-MIB").object("x", "enterprises", 9).build();

        let ctx = assemble(vec![a, b]);

        let modules = ctx.modules.as_ref().unwrap();
        let import = &modules.get("A-MIB").unwrap().imports[0];
        assert_eq!(import.resolution.module(), Some("B-MIB"));
        assert!(ctx.diagnostics.is_empty());
    }

    #[test]
    fn test_import_source_matches_case_insensitively() {
        let a = ModuleBuilder::new("A-MIB").import("x", "b-mib").build();
        let b = ModuleBuilder::new("B-MIB").object("x", "enterprises", 9).build();

        let ctx = assemble(vec![a, b]);

        let import = &ctx.modules.as_ref().unwrap().get("A-MIB").unwrap().imports[0];
        assert_eq!(import.resolution.module(), Some("B-MIB"));
    }

    #[test]
    fn test_missing_provider_is_warning() {
        let a = ModuleBuilder::new("A-MIB")
            .object("a", "x", 1)
            .import("x", "B-MIB")
            .build();

        let ctx = assemble(vec![a]);

        let modules = ctx.modules.as_ref().unwrap();
        assert!(!modules.get("A-MIB").unwrap().imports[0].resolution.is_resolved());
        assert_eq!(ctx.warning_count(), 1);
        let warning = ctx.warnings().next().unwrap();
        assert!(warning.message.contains("x"));
        assert!(warning.message.contains("B-MIB"));
        assert_eq!(warning.source, DiagnosticSource::Assembler);
    }

    #[test]
    fn test_cycles_resolve_both_ways() {
        let a = ModuleBuilder::new("A-MIB").import("b", "B-MIB").build();
        let b = ModuleBuilder::new("B-MIB").import("a", "A-MIB").build();

        let ctx = assemble(vec![a, b]);

        let modules = ctx.modules.as_ref().unwrap();
        assert!(modules.get("A-MIB").unwrap().imports[0].resolution.is_resolved());
        assert!(modules.get("B-MIB").unwrap().imports[0].resolution.is_resolved());
    }

    #[test]
    fn test_identical_duplicate_is_silent() {
        let first = ModuleBuilder::new("M").source("/one/m.txt").object("m", "enterprises", 1).build();
        let second = ModuleBuilder::new("M").source("/two/m.txt").object("m", "enterprises", 1).build();

        let ctx = assemble(vec![first, second]);

        let modules = ctx.modules.as_ref().unwrap();
        assert_eq!(modules.len(), 1);
        assert_eq!(modules.get("M").unwrap().source_path, std::path::PathBuf::from("/one/m.txt"));
        assert!(ctx.diagnostics.is_empty());
    }

    #[test]
    fn test_conflicting_duplicate_warns_and_keeps_first() {
        let first = ModuleBuilder::new("M").source("/one/m.txt").object("m", "enterprises", 1).build();
        let second = ModuleBuilder::new("M").source("/two/m.txt").object("m", "enterprises", 2).build();

        let ctx = assemble(vec![first, second]);

        let modules = ctx.modules.as_ref().unwrap();
        assert_eq!(modules.get("M").unwrap().entities[0].sub_id, Some(1));
        assert_eq!(ctx.warning_count(), 1);
        let message = &ctx.warnings().next().unwrap().message;
        assert!(message.contains("/one/m.txt"));
        assert!(message.contains("/two/m.txt"));
    }
}
