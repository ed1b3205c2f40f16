use std::path::{Path, PathBuf};

use super::Config;
use crate::{Error, Result};

/// Default configuration file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "mibgen.toml";

/// A loaded configuration together with the directory its relative paths
/// resolve against.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    path: Option<PathBuf>,
    base_dir: PathBuf,
    config: Config,
}

impl ConfigFile {
    /// Open and parse a configuration file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        let config = Config::from_str_with_filename(&content, &path.display().to_string())?;
        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let base_dir = std::path::absolute(parent).map_err(|e| Error::io(parent, e))?;

        Ok(Self {
            path: Some(path),
            base_dir,
            config,
        })
    }

    /// Load configuration for a run.
    ///
    /// An explicitly requested file must exist. Without one, `mibgen.toml`
    /// in `dir` is used when present, and defaults apply otherwise. The base
    /// directory is always absolute.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(Box::new(Error::ConfigNotFound {
                    path: path.to_path_buf(),
                }));
            }
            return Self::open(path);
        }

        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.exists() {
            Self::open(candidate)
        } else {
            let dir = std::path::absolute(dir).map_err(|e| Error::io(dir, e))?;
            Ok(Self::defaults(dir))
        }
    }

    /// Default configuration rooted at `dir`.
    pub fn defaults(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: None,
            base_dir: dir.into(),
            config: Config::default(),
        }
    }

    /// Path of the file, if one was read.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Directory relative paths resolve against.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// The parsed configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Resolve a configured path against the base directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// Input locations, resolved.
    pub fn input_paths(&self) -> Vec<PathBuf> {
        self.config
            .inputs
            .paths
            .iter()
            .map(|p| self.resolve(p))
            .collect()
    }

    /// Output directory, resolved.
    pub fn output_dir(&self) -> PathBuf {
        self.resolve(&self.config.output.dir)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_discover_without_file_uses_defaults() {
        let temp = TempDir::new().unwrap();

        let file = ConfigFile::discover(None, temp.path()).unwrap();

        assert!(file.path().is_none());
        assert_eq!(file.output_dir(), temp.path().join("generated"));
    }

    #[test]
    fn test_discover_explicit_missing_is_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.toml");

        let err = ConfigFile::discover(Some(&missing), temp.path()).unwrap_err();

        assert!(matches!(*err, Error::ConfigNotFound { .. }));
    }

    #[test]
    fn test_paths_resolve_against_config_dir() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[inputs]\npaths = [\"mibs\"]\n[output]\ndir = \"out\"\n").unwrap();

        let file = ConfigFile::discover(None, temp.path()).unwrap();

        assert_eq!(file.path(), Some(path.as_path()));
        assert_eq!(file.input_paths(), vec![temp.path().join("mibs")]);
        assert_eq!(file.output_dir(), temp.path().join("out"));
    }

    #[test]
    fn test_relative_dir_resolves_to_absolute_paths() {
        let temp = TempDir::new_in(".").unwrap();
        let relative = Path::new(".").join(temp.path().file_name().unwrap());

        let defaults = ConfigFile::discover(None, &relative).unwrap();
        std::fs::write(relative.join(CONFIG_FILE_NAME), "[output]\ndir = \"out\"\n").unwrap();
        let opened = ConfigFile::discover(None, &relative).unwrap();

        for file in [defaults, opened] {
            assert!(file.base_dir().is_absolute());
            assert!(file.output_dir().is_absolute());
            assert!(file.base_dir().ends_with(temp.path().file_name().unwrap()));
        }
    }
}
