//! Line-list declaration documents.
//!
//! Both document kinds share one format: one entry per line, blank lines and
//! lines starting with `//` ignored, surrounding whitespace trimmed.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use mibgen_core::path_key;

use crate::{Error, Result};

/// Extension of generation declaration documents.
pub const GENERATE_EXTENSION: &str = "mibs";

/// Extension of suppression documents.
pub const CUSTOMIZED_EXTENSION: &str = "customized";

/// Iterate the meaningful entries of a declaration document.
pub fn declaration_lines(content: &str) -> impl Iterator<Item = &str> {
    content
        .split(['\r', '\n'])
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("//"))
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// Document paths nominated to produce output.
///
/// Membership is tested case-insensitively on the full, lexically
/// normalized path.
#[derive(Debug, Clone, Default)]
pub struct GenerationDeclaration {
    entries: IndexMap<String, PathBuf>,
}

impl GenerationDeclaration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a declaration whose relative entries resolve against `base_dir`.
    pub fn parse(content: &str, base_dir: &Path) -> Self {
        let mut declaration = Self::new();
        for line in declaration_lines(content) {
            declaration.insert(base_dir.join(line));
        }
        declaration
    }

    /// Read a declaration document; entries resolve against its directory.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = read(path)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(Self::parse(&content, base_dir))
    }

    /// Nominate a document path.
    pub fn insert(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        self.entries.entry(path_key(&path)).or_insert(path);
    }

    /// Union another declaration into this one.
    pub fn extend(&mut self, other: GenerationDeclaration) {
        for (key, path) in other.entries {
            self.entries.entry(key).or_insert(path);
        }
    }

    /// Whether `path` was nominated.
    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(&path_key(path))
    }

    /// Nominated paths in declaration order.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.entries.values().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Module names whose customizable artifact must never be (re)generated.
///
/// Names compare case-insensitively; the first spelling seen is kept for
/// display.
#[derive(Debug, Clone, Default)]
pub struct SuppressionSet {
    names: IndexMap<String, String>,
}

impl SuppressionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a suppression document.
    pub fn parse(content: &str) -> Self {
        declaration_lines(content).collect()
    }

    /// Read a suppression document.
    pub fn from_file(path: &Path) -> Result<Self> {
        Ok(Self::parse(&read(path)?))
    }

    pub fn insert(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.names.entry(name.to_lowercase()).or_insert(name);
    }

    /// Union another set into this one.
    pub fn extend(&mut self, other: SuppressionSet) {
        for (key, name) in other.names {
            self.names.entry(key).or_insert(name);
        }
    }

    pub fn contains(&self, module_name: &str) -> bool {
        self.names.contains_key(&module_name.to_lowercase())
    }

    /// Names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.values().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for SuppressionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for name in iter {
            set.insert(name);
        }
        set
    }
}

/// Append a module name to a suppression document, creating it if needed.
///
/// Returns `false` when the module was already listed.
pub fn append_module(path: &Path, module_name: &str) -> Result<bool> {
    let existing = if path.exists() {
        read(path)?
    } else {
        String::new()
    };

    if SuppressionSet::parse(&existing).contains(module_name) {
        return Ok(false);
    }

    let mut content = existing;
    if !content.is_empty() && !content.ends_with('\n') {
        content.push('\n');
    }
    content.push_str(module_name.trim());
    content.push('\n');

    std::fs::write(path, content).map_err(|source| {
        Box::new(Error::Write {
            path: path.to_path_buf(),
            source,
        })
    })?;
    Ok(true)
}
