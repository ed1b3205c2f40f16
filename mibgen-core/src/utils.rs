//! Shared naming and path helpers.

use std::path::{Component, Path, PathBuf};

/// Convert a MIB identifier to snake_case (e.g., "ifInOctets" -> "if_in_octets").
///
/// Hyphens become underscores and a break is inserted before an uppercase
/// letter that follows a lowercase letter or digit, so acronyms stay whole
/// ("SNMPv2-MIB" -> "snmpv2_mib").
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev: Option<char> = None;

    for c in s.chars() {
        if c == '-' || c == '_' {
            if !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
        } else if c.is_uppercase() {
            if prev.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit()) {
                result.push('_');
            }
            result.extend(c.to_lowercase());
        } else {
            result.push(c);
        }
        prev = Some(c);
    }

    result
}

/// Convert a MIB identifier to SCREAMING_SNAKE_CASE (e.g., "sysDescr" -> "SYS_DESCR")
pub fn to_upper_snake_case(s: &str) -> String {
    to_snake_case(s).to_uppercase()
}

/// Convert a MIB identifier to PascalCase (e.g., "IF-MIB" -> "IfMib")
pub fn to_pascal_case(s: &str) -> String {
    to_snake_case(s)
        .split('_')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c.to_uppercase().chain(chars).collect(),
            }
        })
        .collect()
}

/// Build a case-insensitive comparison key for a document path.
///
/// `.` components are dropped and `..` pops the previous component, so two
/// spellings of the same location compare equal without touching the
/// filesystem.
pub fn path_key(path: &Path) -> String {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
        .to_string_lossy()
        .replace('\\', "/")
        .to_lowercase()
}
