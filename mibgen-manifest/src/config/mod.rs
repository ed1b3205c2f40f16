//! `mibgen.toml` project configuration.

mod file;

use std::{path::PathBuf, str::FromStr};

pub use file::{CONFIG_FILE_NAME, ConfigFile};
use serde::Deserialize;

use crate::{Error, Result, SourceContext};

/// Root configuration for mibgen.toml. Every table is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Where input documents and declarations come from
    pub inputs: InputsConfig,
    /// Where and how artifacts are named and written
    pub output: OutputConfig,
    /// Generator identity
    pub generator: GeneratorConfig,
}

/// `[inputs]`
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputsConfig {
    /// Directories (scanned non-recursively) or individual files
    pub paths: Vec<PathBuf>,
    /// Extensions that mark a file as a MIB document
    pub extensions: Vec<String>,
    /// Extra generation declaration documents
    pub generate: Vec<PathBuf>,
    /// Extra suppression documents
    pub customized: Vec<PathBuf>,
}

impl Default for InputsConfig {
    fn default() -> Self {
        Self {
            paths: vec![PathBuf::from(".")],
            extensions: vec!["txt".into(), "mib".into(), "my".into()],
            generate: Vec::new(),
            customized: Vec::new(),
        }
    }
}

impl InputsConfig {
    /// Whether `extension` marks a MIB document, ignoring case.
    pub fn is_document_extension(&self, extension: &str) -> bool {
        self.extensions
            .iter()
            .any(|e| e.trim_start_matches('.').eq_ignore_ascii_case(extension))
    }
}

/// `[output]`
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Target directory in filesystem mode
    pub dir: PathBuf,
    /// Appended to the module file stem for always-regenerated artifacts
    pub generated_suffix: String,
    /// Appended to the module file stem for user-owned artifacts
    pub customizable_suffix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("generated"),
            generated_suffix: ".generated.rs".into(),
            customizable_suffix: ".rs".into(),
        }
    }
}

/// `[generator]`
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Tool identity written into artifact headers; the version is appended
    pub banner: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            banner: "mibgen".into(),
        }
    }
}

impl FromStr for Config {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Config::from_str_with_filename(s, CONFIG_FILE_NAME)
    }
}

impl Config {
    /// Parse configuration with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let source_ctx = SourceContext::new(content, filename);
        let config: Config = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
        config.validate(&source_ctx)?;
        Ok(config)
    }

    /// Reject artifact names that could collide with each other or with the
    /// input documents.
    fn validate(&self, ctx: &SourceContext) -> Result<()> {
        let generated = &self.output.generated_suffix;
        let customizable = &self.output.customizable_suffix;

        if generated.is_empty() {
            return Err(ctx.validation_error("generated_suffix must not be empty", "generated_suffix"));
        }
        if customizable.is_empty() {
            return Err(ctx.validation_error(
                "customizable_suffix must not be empty",
                "customizable_suffix",
            ));
        }
        if generated.eq_ignore_ascii_case(customizable) {
            return Err(ctx.validation_error(
                "generated_suffix and customizable_suffix must differ",
                "customizable_suffix",
            ));
        }

        for (key, suffix) in [
            ("generated_suffix", generated),
            ("customizable_suffix", customizable),
        ] {
            let extension = suffix.rsplit('.').next().unwrap_or(suffix);
            if self.inputs.is_document_extension(extension) {
                return Err(ctx.validation_error(
                    format!("{key} '{suffix}' uses a MIB document extension"),
                    key,
                ));
            }
        }

        if self.generator.banner.trim().is_empty() {
            return Err(ctx.validation_error("banner must not be empty", "banner"));
        }

        Ok(())
    }

    /// Banner text including the tool version.
    pub fn banner(&self, version: &str) -> String {
        format!("{} {}", self.generator.banner.trim(), version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = "".parse().unwrap();

        assert_eq!(config.inputs.paths, vec![PathBuf::from(".")]);
        assert_eq!(config.output.generated_suffix, ".generated.rs");
        assert_eq!(config.output.customizable_suffix, ".rs");
        assert_eq!(config.generator.banner, "mibgen");
    }

    #[test]
    fn test_full_config() {
        let config: Config = r#"
            [inputs]
            paths = ["mibs", "vendor/IF-MIB.txt"]
            extensions = ["txt"]
            generate = ["project.mibs"]
            customized = ["project.customized"]

            [output]
            dir = "src/mibs"
            generated_suffix = "_gen.rs"
            customizable_suffix = ".rs"

            [generator]
            banner = "acme-mibgen"
        "#
        .parse()
        .unwrap();

        assert_eq!(config.inputs.paths.len(), 2);
        assert_eq!(config.inputs.generate, vec![PathBuf::from("project.mibs")]);
        assert_eq!(config.output.dir, PathBuf::from("src/mibs"));
        assert_eq!(config.banner("1.2.3"), "acme-mibgen 1.2.3");
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result: Result<Config> = "[output]\nfolder = \"x\"\n".parse();
        assert!(matches!(*result.unwrap_err(), Error::Parse { .. }));
    }

    #[test]
    fn test_identical_suffixes_rejected() {
        let result: Result<Config> = r#"
            [output]
            generated_suffix = ".rs"
            customizable_suffix = ".rs"
        "#
        .parse();

        assert!(matches!(*result.unwrap_err(), Error::Validation { .. }));
    }

    #[test]
    fn test_suffix_with_document_extension_rejected() {
        let result: Result<Config> = r#"
            [output]
            customizable_suffix = ".custom.txt"
        "#
        .parse();

        let err = result.unwrap_err();
        assert!(err.to_string().contains("customizable_suffix"));
    }

    #[test]
    fn test_document_extension_matching() {
        let inputs = InputsConfig::default();
        assert!(inputs.is_document_extension("TXT"));
        assert!(inputs.is_document_extension("mib"));
        assert!(!inputs.is_document_extension("mibs"));
    }
}
