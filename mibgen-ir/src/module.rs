use std::{fmt, path::PathBuf};

use serde::Serialize;

use crate::Import;

/// Kind of an OID-bearing definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityKind {
    /// `name OBJECT IDENTIFIER ::= { ... }`
    ObjectIdentifier,
    ObjectType,
    ObjectIdentity,
    ModuleIdentity,
    NotificationType,
    ObjectGroup,
    NotificationGroup,
    ModuleCompliance,
    AgentCapabilities,
    /// SMIv1 `TRAP-TYPE` (`::= n` under an ENTERPRISE).
    TrapType,
}

impl EntityKind {
    /// Map a definition macro keyword to its entity kind.
    pub fn from_macro(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "OBJECT-TYPE" => Self::ObjectType,
            "OBJECT-IDENTITY" => Self::ObjectIdentity,
            "MODULE-IDENTITY" => Self::ModuleIdentity,
            "NOTIFICATION-TYPE" => Self::NotificationType,
            "OBJECT-GROUP" => Self::ObjectGroup,
            "NOTIFICATION-GROUP" => Self::NotificationGroup,
            "MODULE-COMPLIANCE" => Self::ModuleCompliance,
            "AGENT-CAPABILITIES" => Self::AgentCapabilities,
            "TRAP-TYPE" => Self::TrapType,
            _ => return None,
        })
    }

    /// The SMI spelling of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ObjectIdentifier => "OBJECT IDENTIFIER",
            Self::ObjectType => "OBJECT-TYPE",
            Self::ObjectIdentity => "OBJECT-IDENTITY",
            Self::ModuleIdentity => "MODULE-IDENTITY",
            Self::NotificationType => "NOTIFICATION-TYPE",
            Self::ObjectGroup => "OBJECT-GROUP",
            Self::NotificationGroup => "NOTIFICATION-GROUP",
            Self::ModuleCompliance => "MODULE-COMPLIANCE",
            Self::AgentCapabilities => "AGENT-CAPABILITIES",
            Self::TrapType => "TRAP-TYPE",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// STATUS clause value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Current,
    Deprecated,
    Obsolete,
    /// SMIv1
    Mandatory,
    /// SMIv1
    Optional,
}

impl Status {
    pub fn parse(value: &str) -> Option<Self> {
        Some(match value {
            "current" => Self::Current,
            "deprecated" => Self::Deprecated,
            "obsolete" => Self::Obsolete,
            "mandatory" => Self::Mandatory,
            "optional" => Self::Optional,
            _ => return None,
        })
    }

    /// Whether definitions with this status are retired.
    pub fn is_retired(&self) -> bool {
        matches!(self, Self::Deprecated | Self::Obsolete)
    }
}

/// One OID-bearing definition inside a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entity {
    pub name: String,
    pub kind: EntityKind,
    /// First symbol of the OID value (`{ parent 3 }`).
    pub parent: Option<String>,
    /// Last arc of the OID value.
    pub sub_id: Option<u32>,
    pub status: Option<Status>,
    /// MAX-ACCESS / ACCESS clause.
    pub access: Option<String>,
    /// First token of the SYNTAX clause (`SEQUENCE`, `Counter32`, ...).
    pub syntax: Option<String>,
}

impl Entity {
    /// Create an entity with only a name and kind.
    pub fn new(name: impl Into<String>, kind: EntityKind) -> Self {
        Self {
            name: name.into(),
            kind,
            parent: None,
            sub_id: None,
            status: None,
            access: None,
            syntax: None,
        }
    }

    /// Set the OID placement.
    pub fn under(mut self, parent: impl Into<String>, sub_id: u32) -> Self {
        self.parent = Some(parent.into());
        self.sub_id = Some(sub_id);
        self
    }

    /// Whether this is a table or row container rather than a value.
    pub fn is_container(&self) -> bool {
        self.kind == EntityKind::ObjectType
            && self
                .syntax
                .as_deref()
                .is_some_and(|s| s == "SEQUENCE" || s.ends_with("Entry"))
    }
}

/// A parsed MIB module, as produced by a document compiler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleObject {
    /// Module name, unique per run when compared case-insensitively.
    pub name: String,
    /// Path of the document this module was compiled from.
    pub source_path: PathBuf,
    /// OID-bearing definitions in declaration order.
    pub entities: Vec<Entity>,
    /// Imports in declaration order.
    pub imports: Vec<Import>,
}

impl ModuleObject {
    /// Create an empty module.
    pub fn new(name: impl Into<String>, source_path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            source_path: source_path.into(),
            entities: Vec::new(),
            imports: Vec::new(),
        }
    }

    /// A module without definitions only exists to be imported from.
    pub fn has_content(&self) -> bool {
        !self.entities.is_empty()
    }

    /// Whether `other` carries the same definitions and imports,
    /// regardless of where it was compiled from.
    pub fn same_content(&self, other: &ModuleObject) -> bool {
        self.entities == other.entities
            && self.imports.len() == other.imports.len()
            && self
                .imports
                .iter()
                .zip(&other.imports)
                .all(|(a, b)| a.same_reference(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_kind_from_macro() {
        assert_eq!(
            EntityKind::from_macro("OBJECT-TYPE"),
            Some(EntityKind::ObjectType)
        );
        assert_eq!(EntityKind::from_macro("TEXTUAL-CONVENTION"), None);
    }

    #[test]
    fn test_container_detection() {
        let mut table = Entity::new("ifTable", EntityKind::ObjectType);
        table.syntax = Some("SEQUENCE".into());
        let mut entry = Entity::new("ifEntry", EntityKind::ObjectType);
        entry.syntax = Some("IfEntry".into());
        let mut column = Entity::new("ifIndex", EntityKind::ObjectType);
        column.syntax = Some("InterfaceIndex".into());

        assert!(table.is_container());
        assert!(entry.is_container());
        assert!(!column.is_container());
    }

    #[test]
    fn test_same_content_ignores_source_path() {
        let mut a = ModuleObject::new("A-MIB", "/one/a.txt");
        a.entities.push(Entity::new("a", EntityKind::ObjectIdentifier).under("enterprises", 1));
        let mut b = a.clone();
        b.source_path = "/two/a.txt".into();

        assert!(a.same_content(&b));

        b.entities[0].sub_id = Some(2);
        assert!(!a.same_content(&b));
    }
}
