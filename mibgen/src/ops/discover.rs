//! Input discovery - MIB documents and declaration files.

use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use mibgen_codegen::{Diagnostic, DiagnosticSource, RunInputs};
use mibgen_core::path_key;
use mibgen_ir::InputDocument;
use mibgen_manifest::{
    CUSTOMIZED_EXTENSION, ConfigFile, Error, GENERATE_EXTENSION, GenerationDeclaration, Result,
    SuppressionSet,
};
use tracing::debug;

/// Everything a run reads from its input locations.
#[derive(Debug, Default)]
pub struct Discovery {
    pub documents: Vec<InputDocument>,
    pub generation: GenerationDeclaration,
    pub suppression: SuppressionSet,
    /// Inputs that could not be used; the run continues without them.
    pub diagnostics: Vec<Diagnostic>,
    seen: HashSet<String>,
}

/// Collect documents and declarations for a configuration.
///
/// Input directories are scanned non-recursively in file name order. Files
/// ending in `.mibs` are generation declarations, files ending in
/// `.customized` are suppression documents, and files with a configured
/// document extension are MIB documents. A file named directly in
/// `[inputs] paths` is a document whatever its extension.
///
/// Unreadable documents and missing input paths become diagnostics; an
/// unreadable declaration document is an error, since running without it
/// could overwrite customized files.
pub fn discover(config: &ConfigFile) -> Result<Discovery> {
    let mut discovery = Discovery::default();

    for input in config.input_paths() {
        if input.is_dir() {
            for path in list_files(&input)? {
                discovery.add(config, &path, false)?;
            }
        } else if input.is_file() {
            discovery.add(config, &input, true)?;
        } else {
            discovery.diagnostics.push(
                Diagnostic::warning(DiagnosticSource::Pipeline, "input path does not exist")
                    .at(input.display().to_string()),
            );
        }
    }

    let inputs = &config.config().inputs;
    for path in &inputs.generate {
        discovery.add_generation(&config.resolve(path))?;
    }
    for path in &inputs.customized {
        discovery.add_suppression(&config.resolve(path))?;
    }

    debug!(
        documents = discovery.documents.len(),
        declared = discovery.generation.len(),
        customized = discovery.suppression.len(),
        "discovered inputs"
    );

    Ok(discovery)
}

impl Discovery {
    /// Split into pipeline inputs and the diagnostics raised while reading.
    pub fn into_run_inputs(self) -> (RunInputs, Vec<Diagnostic>) {
        let inputs = RunInputs::new(self.documents)
            .generation(self.generation)
            .suppression(self.suppression);
        (inputs, self.diagnostics)
    }

    fn first_visit(&mut self, path: &Path) -> bool {
        self.seen.insert(path_key(path))
    }

    fn add(&mut self, config: &ConfigFile, path: &Path, explicit: bool) -> Result<()> {
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        if extension.eq_ignore_ascii_case(GENERATE_EXTENSION) {
            self.add_generation(path)
        } else if extension.eq_ignore_ascii_case(CUSTOMIZED_EXTENSION) {
            self.add_suppression(path)
        } else if explicit || config.config().inputs.is_document_extension(extension) {
            self.add_document(path);
            Ok(())
        } else {
            Ok(())
        }
    }

    fn add_generation(&mut self, path: &Path) -> Result<()> {
        if self.first_visit(path) {
            debug!(path = %path.display(), "generation declaration");
            self.generation
                .extend(GenerationDeclaration::from_file(path)?);
        }
        Ok(())
    }

    fn add_suppression(&mut self, path: &Path) -> Result<()> {
        if self.first_visit(path) {
            debug!(path = %path.display(), "suppression document");
            self.suppression.extend(SuppressionSet::from_file(path)?);
        }
        Ok(())
    }

    fn add_document(&mut self, path: &Path) {
        if !self.first_visit(path) {
            return;
        }
        match InputDocument::read(path) {
            Ok(document) => self.documents.push(document),
            Err(err) => self.diagnostics.push(
                Diagnostic::error(
                    DiagnosticSource::Compiler,
                    format!("failed to read document: {err}"),
                )
                .at(path.display().to_string()),
            ),
        }
    }
}

fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let io_error = |source| {
        Box::new(Error::Io {
            path: dir.to_path_buf(),
            source,
        })
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
