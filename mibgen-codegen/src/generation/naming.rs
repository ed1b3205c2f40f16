use mibgen_core::{Overwrite, to_snake_case};
use serde::Serialize;

use crate::Variant;

/// The two artifact kinds every eligible module can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Generated,
    Customizable,
}

impl ArtifactKind {
    /// Write rule applied in filesystem mode.
    pub fn overwrite(&self) -> Overwrite {
        match self {
            ArtifactKind::Generated => Overwrite::Always,
            ArtifactKind::Customizable => Overwrite::IfMissing,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Generated => "generated",
            ArtifactKind::Customizable => "customizable",
        }
    }

    pub fn variant(&self) -> Variant {
        match self {
            ArtifactKind::Generated => Variant::Generated,
            ArtifactKind::Customizable => Variant::Customizable,
        }
    }
}

/// File naming convention for artifacts.
///
/// Both names share the snake_case module stem and differ only in suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactNaming {
    pub generated_suffix: String,
    pub customizable_suffix: String,
}

impl Default for ArtifactNaming {
    fn default() -> Self {
        Self {
            generated_suffix: ".generated.rs".into(),
            customizable_suffix: ".rs".into(),
        }
    }
}

impl ArtifactNaming {
    pub fn new(generated_suffix: impl Into<String>, customizable_suffix: impl Into<String>) -> Self {
        Self {
            generated_suffix: generated_suffix.into(),
            customizable_suffix: customizable_suffix.into(),
        }
    }

    /// File stem shared by a module's artifacts.
    pub fn stem(&self, module_name: &str) -> String {
        to_snake_case(module_name)
    }

    pub fn file_name(&self, module_name: &str, kind: ArtifactKind) -> String {
        let suffix = match kind {
            ArtifactKind::Generated => &self.generated_suffix,
            ArtifactKind::Customizable => &self.customizable_suffix,
        };
        format!("{}{}", self.stem(module_name), suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_file_names() {
        let naming = ArtifactNaming::default();

        assert_eq!(
            naming.file_name("IF-MIB", ArtifactKind::Generated),
            "if_mib.generated.rs"
        );
        assert_eq!(naming.file_name("IF-MIB", ArtifactKind::Customizable), "if_mib.rs");
    }

    #[test]
    fn test_names_never_collide_with_source_document() {
        let naming = ArtifactNaming::default();
        for kind in [ArtifactKind::Generated, ArtifactKind::Customizable] {
            let name = naming.file_name("SNMPv2-MIB", kind);
            assert_ne!(name, "SNMPv2-MIB.txt");
            assert!(!name.ends_with(".txt"));
        }
    }

    #[test]
    fn test_overwrite_rules() {
        assert_eq!(ArtifactKind::Generated.overwrite(), Overwrite::Always);
        assert_eq!(ArtifactKind::Customizable.overwrite(), Overwrite::IfMissing);
    }
}
