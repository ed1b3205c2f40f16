//! Select phase - decides which modules produce output.

use std::collections::HashMap;

use eyre::{Result, eyre};
use mibgen_ir::ModuleObject;
use mibgen_manifest::GenerationDeclaration;
use tracing::debug;

use crate::pipeline::{Diagnostic, DiagnosticSource, Phase, RunContext};

/// Whether a loaded module should produce artifacts.
///
/// Both conditions are required: the module defines at least one entity, and
/// its source document is nominated by the generation declaration.
pub fn is_eligible(module: &ModuleObject, declaration: &GenerationDeclaration) -> bool {
    module.has_content() && declaration.contains(&module.source_path)
}

/// Phase that filters the loaded module set down to eligible modules.
///
/// Ineligible modules stay in the loaded set so their definitions remain
/// importable. When two eligible modules map to the same artifact stem, the
/// first in load order keeps it and the later one is reported and skipped.
pub struct SelectPhase;

impl Phase for SelectPhase {
    fn name(&self) -> &'static str {
        "select"
    }

    fn run(&self, ctx: &mut RunContext) -> Result<()> {
        let modules = ctx
            .modules
            .as_ref()
            .ok_or_else(|| eyre!("select phase ran before modules were assembled"))?;

        let mut eligible = Vec::new();
        let mut stems: HashMap<String, String> = HashMap::new();
        let mut collisions = Vec::new();
        for module in modules.iter() {
            if is_eligible(module, &ctx.generation) {
                let stem = ctx.naming.stem(&module.name);
                if let Some(owner) = stems.get(&stem) {
                    collisions.push(
                        Diagnostic::error(
                            DiagnosticSource::Pipeline,
                            format!(
                                "module {} would be written to the same files as {owner}; skipping {}",
                                module.name, module.name
                            ),
                        )
                        .at(module.name.as_str()),
                    );
                    continue;
                }
                stems.insert(stem, module.name.clone());
                eligible.push(module.name.clone());
            } else if !module.has_content() {
                debug!(module = %module.name, "skipping module without definitions");
            } else {
                debug!(
                    module = %module.name,
                    source = %module.source_path.display(),
                    "skipping module not declared for generation"
                );
            }
        }

        for diagnostic in collisions {
            ctx.add_diagnostic(diagnostic);
        }

        if ctx.generation.is_empty() {
            ctx.add_info(
                DiagnosticSource::Pipeline,
                "no documents are declared for generation; nothing will be generated",
            );
        } else if eligible.is_empty() {
            ctx.add_info(
                DiagnosticSource::Pipeline,
                "no declared document defines a module with content; nothing will be generated",
            );
        }

        ctx.eligible = eligible;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use mibgen_ir::LoadedModuleSet;

    use super::*;
    use crate::{
        pipeline::{CancellationToken, RunInputs, Severity},
        testing::ModuleBuilder,
    };

    fn select(modules: Vec<ModuleObject>, declared: &str) -> RunContext {
        let generation = GenerationDeclaration::parse(declared, Path::new("/mibs"));
        let mut ctx = RunContext::new(
            RunInputs::new(Vec::new()).generation(generation),
            CancellationToken::new(),
        );
        let mut set = LoadedModuleSet::new();
        for module in modules {
            set.insert(module);
        }
        ctx.modules = Some(set);
        SelectPhase.run(&mut ctx).unwrap();
        ctx
    }

    #[test]
    fn test_declared_module_with_content_is_eligible() {
        let module = ModuleBuilder::new("A-MIB")
            .source("/mibs/A-MIB.txt")
            .object("a", "enterprises", 1)
            .build();

        let ctx = select(vec![module], "A-MIB.txt");

        assert_eq!(ctx.eligible, vec!["A-MIB"]);
    }

    #[test]
    fn test_declaration_match_ignores_case() {
        let module = ModuleBuilder::new("A-MIB")
            .source("/MIBS/a-mib.TXT")
            .object("a", "enterprises", 1)
            .build();

        let ctx = select(vec![module], "A-MIB.txt");

        assert_eq!(ctx.eligible, vec!["A-MIB"]);
    }

    #[test]
    fn test_module_without_entities_is_never_eligible() {
        let module = ModuleBuilder::new("TC-MIB").source("/mibs/TC-MIB.txt").build();

        let ctx = select(vec![module], "TC-MIB.txt");

        assert!(ctx.eligible.is_empty());
    }

    #[test]
    fn test_undeclared_module_stays_loaded() {
        let library = ModuleBuilder::new("LIB-MIB")
            .source("/mibs/LIB-MIB.txt")
            .object("lib", "enterprises", 1)
            .build();
        let app = ModuleBuilder::new("APP-MIB")
            .source("/mibs/APP-MIB.txt")
            .object("app", "lib", 1)
            .build();

        let ctx = select(vec![library, app], "APP-MIB.txt");

        assert_eq!(ctx.eligible, vec!["APP-MIB"]);
        assert!(ctx.modules.as_ref().unwrap().contains("LIB-MIB"));
    }

    #[test]
    fn test_modules_sharing_a_stem_keep_the_first() {
        let first = ModuleBuilder::new("IF-MIB")
            .source("/mibs/IF-MIB.txt")
            .object("a", "enterprises", 1)
            .build();
        let second = ModuleBuilder::new("IfMib")
            .source("/mibs/IfMib.txt")
            .object("b", "enterprises", 2)
            .build();

        let ctx = select(vec![first, second], "IF-MIB.txt\nIfMib.txt\n");

        assert_eq!(ctx.eligible, vec!["IF-MIB"]);
        assert_eq!(ctx.diagnostics.len(), 1);
        assert_eq!(ctx.diagnostics[0].severity, Severity::Error);
        assert_eq!(ctx.diagnostics[0].location.as_deref(), Some("IfMib"));
        assert!(ctx.diagnostics[0].message.contains("same files as IF-MIB"));
    }

    #[test]
    fn test_empty_declaration_reports_info() {
        let module = ModuleBuilder::new("A-MIB").object("a", "enterprises", 1).build();

        let ctx = select(vec![module], "// nothing yet\n");

        assert!(ctx.eligible.is_empty());
        assert_eq!(ctx.diagnostics.len(), 1);
        assert!(ctx.diagnostics[0].message.contains("no documents are declared"));
    }
}
