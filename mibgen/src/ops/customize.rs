//! Customize operation - hand a module's customizable file to the user.

use std::path::{Path, PathBuf};

use eyre::{Result, bail};
use mibgen_manifest::{ConfigFile, append_module};

use crate::reports::CustomizeReport;

/// File name used when no suppression document is configured.
pub const DEFAULT_SUPPRESSION_FILE: &str = "project.customized";

/// Validate a module name given on the command line.
pub fn module_name(raw: &str) -> Result<&str> {
    let name = raw.trim();
    if name.is_empty() || name.contains(char::is_whitespace) || name.starts_with("//") {
        bail!("'{raw}' is not a module name");
    }
    Ok(name)
}

/// The suppression document `customize` updates by default.
///
/// The first configured `[inputs] customized` entry wins; otherwise
/// `project.customized` in the first input directory, where discovery will
/// find it.
pub fn default_suppression_file(config: &ConfigFile) -> PathBuf {
    if let Some(path) = config.config().inputs.customized.first() {
        return config.resolve(path);
    }

    config
        .input_paths()
        .into_iter()
        .find(|p| p.is_dir())
        .unwrap_or_else(|| config.base_dir().to_path_buf())
        .join(DEFAULT_SUPPRESSION_FILE)
}

/// Append `module` to the suppression document at `path`.
pub fn customize(path: &Path, module: &str) -> mibgen_manifest::Result<CustomizeReport> {
    let added = append_module(path, module)?;

    Ok(CustomizeReport {
        path: path.to_path_buf(),
        module: module.to_string(),
        added,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use mibgen_manifest::SuppressionSet;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_module_name_validation() {
        assert_eq!(module_name("  IF-MIB ").unwrap(), "IF-MIB");
        assert!(module_name("").is_err());
        assert!(module_name("IF MIB").is_err());
        assert!(module_name("// IF-MIB").is_err());
    }

    #[test]
    fn test_customize_appends_once() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("project.customized");

        let first = customize(&path, "IF-MIB").unwrap();
        let second = customize(&path, "if-mib").unwrap();

        assert!(first.added);
        assert!(!second.added);
        let set = SuppressionSet::from_file(&path).unwrap();
        assert_eq!(set.names().collect::<Vec<_>>(), vec!["IF-MIB"]);
    }

    #[test]
    fn test_default_file_prefers_configured_entry() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("mibgen.toml");
        fs::write(&config_path, "[inputs]\ncustomized = [\"owned.customized\"]\n").unwrap();

        let config = ConfigFile::open(&config_path).unwrap();

        assert_eq!(
            default_suppression_file(&config),
            temp.path().join("owned.customized")
        );
    }

    #[test]
    fn test_default_file_lands_in_first_input_directory() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("mibs")).unwrap();
        let config_path = temp.path().join("mibgen.toml");
        fs::write(&config_path, "[inputs]\npaths = [\"mibs\"]\n").unwrap();

        let config = ConfigFile::open(&config_path).unwrap();

        assert_eq!(
            default_suppression_file(&config),
            temp.path().join("mibs").join(DEFAULT_SUPPRESSION_FILE)
        );
    }
}
