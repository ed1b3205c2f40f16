//! One renderer per artifact variant.

mod customizable;
mod generated;

use std::collections::HashMap;

use eyre::{Result, bail};

pub use customizable::CustomizableFile;
pub use generated::GeneratedFile;

/// Tracks derived Rust identifiers so two definitions never map to the
/// same item name.
#[derive(Default)]
struct IdentSet<'a> {
    seen: HashMap<String, &'a str>,
}

impl<'a> IdentSet<'a> {
    fn claim(&mut self, ident: String, definition: &'a str) -> Result<String> {
        if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
            bail!("definition {definition} has no usable Rust name");
        }
        if let Some(previous) = self.seen.get(&ident) {
            bail!("definitions {previous} and {definition} both map to {ident}");
        }
        self.seen.insert(ident.clone(), definition);
        Ok(ident)
    }
}
