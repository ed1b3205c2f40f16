use std::{
    io::{self, Write},
    path::Path,
};

use eyre::{Context, Result};
use tempfile::NamedTempFile;

/// How to handle existing files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overwrite {
    /// Always overwrite (generated artifacts)
    Always,
    /// Only create if the file doesn't exist (customizable artifacts)
    IfMissing,
}

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written
    Written,
    /// File was skipped (already exists)
    Skipped,
}

/// Write `content` to `path` atomically.
///
/// The content lands in a temporary file next to the target and is then
/// renamed into place, so a reader never observes a half-written artifact.
/// With [`Overwrite::IfMissing`] the rename refuses to replace an existing
/// file, including one that appeared after the existence check.
pub fn write_file(path: &Path, content: &str, overwrite: Overwrite) -> Result<WriteResult> {
    if overwrite == Overwrite::IfMissing && path.exists() {
        tracing::debug!(path = %path.display(), "keeping existing file");
        return Ok(WriteResult::Skipped);
    }

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)
        .wrap_err_with(|| format!("failed to create directory '{}'", parent.display()))?;

    let mut temp = NamedTempFile::new_in(parent)
        .wrap_err_with(|| format!("failed to stage '{}'", path.display()))?;
    temp.write_all(content.as_bytes())?;
    temp.flush()?;

    match overwrite {
        Overwrite::Always => {
            temp.persist(path)
                .wrap_err_with(|| format!("failed to write '{}'", path.display()))?;
            Ok(WriteResult::Written)
        }
        Overwrite::IfMissing => match temp.persist_noclobber(path) {
            Ok(_) => Ok(WriteResult::Written),
            Err(err) if err.error.kind() == io::ErrorKind::AlreadyExists => {
                tracing::debug!(path = %path.display(), "file appeared before write, keeping it");
                Ok(WriteResult::Skipped)
            }
            Err(err) => Err(err.error)
                .wrap_err_with(|| format!("failed to write '{}'", path.display())),
        },
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_write_file_creates_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("test.txt");

        let result = write_file(&path, "hello", Overwrite::Always).unwrap();

        assert_eq!(result, WriteResult::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
    }

    #[test]
    fn test_write_file_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a").join("b").join("test.txt");

        write_file(&path, "nested", Overwrite::Always).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "nested");
    }

    #[test]
    fn test_write_file_leaves_no_staging_files() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("only.txt");

        write_file(&path, "content", Overwrite::Always).unwrap();

        let entries: Vec<_> = fs::read_dir(temp.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_always_overwrites() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("test.txt");
        fs::write(&path, "original").unwrap();

        let result = write_file(&path, "updated", Overwrite::Always).unwrap();

        assert_eq!(result, WriteResult::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "updated");
    }

    #[test]
    fn test_if_missing_creates_new() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("new.txt");

        let result = write_file(&path, "new content", Overwrite::IfMissing).unwrap();

        assert_eq!(result, WriteResult::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "new content");
    }

    #[test]
    fn test_if_missing_skips_existing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("existing.txt");
        fs::write(&path, "user edits").unwrap();

        let result = write_file(&path, "should not write", Overwrite::IfMissing).unwrap();

        assert_eq!(result, WriteResult::Skipped);
        assert_eq!(fs::read_to_string(&path).unwrap(), "user edits");
    }

    #[test]
    fn test_blocked_parent_is_an_error() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("out");
        fs::write(&blocker, "not a directory").unwrap();

        let err = write_file(&blocker.join("a.rs"), "x", Overwrite::Always).unwrap_err();

        assert!(format!("{err:#}").contains("failed to create directory"));
    }
}
