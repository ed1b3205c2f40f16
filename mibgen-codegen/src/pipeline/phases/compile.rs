//! Compile phase - turns input documents into module objects.

use eyre::Result;
use tracing::debug;

use crate::{
    DocumentCompiler,
    pipeline::{Diagnostic, DiagnosticSource, Phase, RunContext},
};

/// Phase that runs the injected compiler over every document.
///
/// A failing document contributes nothing and is reported as an Error; the
/// remaining documents are still compiled. When the whole batch yields no
/// modules the run ends here with a single Info diagnostic.
pub struct CompilePhase<'a> {
    compiler: &'a dyn DocumentCompiler,
}

impl<'a> CompilePhase<'a> {
    pub fn new(compiler: &'a dyn DocumentCompiler) -> Self {
        Self { compiler }
    }
}

impl Phase for CompilePhase<'_> {
    fn name(&self) -> &'static str {
        "compile"
    }

    fn run(&self, ctx: &mut RunContext) -> Result<()> {
        let documents = std::mem::take(&mut ctx.documents);

        for document in &documents {
            ctx.check_cancelled()?;

            let location = document.path().display().to_string();
            match self.compiler.compile(document, &mut ctx.diagnostics) {
                Ok(modules) => {
                    debug!(document = %location, modules = modules.len(), "compiled document");
                    for mut module in modules {
                        module.source_path = document.path().to_path_buf();
                        ctx.batch.push(module);
                    }
                }
                Err(err) => {
                    debug!(document = %location, error = %err, "document failed to compile");
                    ctx.add_diagnostic(
                        Diagnostic::error(
                            DiagnosticSource::Compiler,
                            format!("failed to compile document: {err:#}"),
                        )
                        .at(location),
                    );
                }
            }
        }

        let document_count = documents.len();
        ctx.documents = documents;

        if ctx.batch.is_empty() {
            ctx.add_info(
                DiagnosticSource::Pipeline,
                format!("no MIB modules found in {document_count} document(s)"),
            );
            ctx.halt();
        }

        Ok(())
    }
}
