use std::path::{Path, PathBuf};

use serde::Serialize;

/// A textual MIB document supplied by the host for one run.
///
/// Identity is the absolute path; the content is read once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputDocument {
    path: PathBuf,
    #[serde(skip)]
    content: String,
}

impl InputDocument {
    /// Create a document from a path and its text.
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Read a document from disk.
    pub fn read(path: impl Into<PathBuf>) -> std::io::Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)?;
        Ok(Self { path, content })
    }

    /// The document's path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The document's text.
    pub fn content(&self) -> &str {
        &self.content
    }
}
