//! The always-regenerated definitions listing.

use eyre::Result;
use mibgen_core::{to_snake_case, to_upper_snake_case};
use mibgen_ir::{Entity, ModuleObject, ResolutionState};

use super::IdentSet;
use crate::CodeBuilder;

pub struct GeneratedFile<'a> {
    module: &'a ModuleObject,
    banner: &'a str,
}

impl<'a> GeneratedFile<'a> {
    pub fn new(module: &'a ModuleObject, banner: &'a str) -> Self {
        Self { module, banner }
    }

    pub fn render(&self) -> Result<String> {
        let module = self.module;
        let mut idents = IdentSet::default();
        let mut constants = Vec::with_capacity(module.entities.len());
        for entity in &module.entities {
            constants.push((idents.claim(to_upper_snake_case(&entity.name), &entity.name)?, entity));
        }

        let mut b = CodeBuilder::new();
        b.push_comment(&format!("Code generated by {}. DO NOT EDIT.", self.banner))
            .push_comment(&format!("Source module: {}", module.name))
            .push_blank()
            .push_doc(&format!("Definitions from the {} module.", module.name));

        b.push_block(&format!("pub mod {} {{", to_snake_case(&module.name)), "}", |b| {
            b.push_doc("Name of the module these definitions come from.")
                .push_line(&format!("pub const MODULE_NAME: &str = \"{}\";", module.name))
                .push_blank();
            object_info_struct(b);
            self.dependencies(b);
            for (ident, entity) in &constants {
                b.push_blank();
                object_constant(b, ident, entity);
            }
            b.push_blank()
                .push_doc("Every definition in declaration order.");
            b.push_block("pub const OBJECTS: &[ObjectInfo] = &[", "];", |b| {
                for (ident, _) in &constants {
                    b.push_line(&format!("{ident},"));
                }
            });
        });

        Ok(b.build())
    }

    /// Imports as comments, then the distinct providing modules.
    fn dependencies(&self, b: &mut CodeBuilder) {
        let mut providers: Vec<&str> = Vec::new();

        if !self.module.imports.is_empty() {
            b.push_blank().push_comment("Imports");
        }
        for import in &self.module.imports {
            match &import.resolution {
                ResolutionState::Resolved { module } => {
                    b.push_comment(&format!("{} from {}", import.symbol, module));
                    if !providers.contains(&module.as_str()) {
                        providers.push(module.as_str());
                    }
                }
                ResolutionState::Unresolved => {
                    b.push_comment(&format!(
                        "unresolved: {} from {}",
                        import.symbol, import.from_module
                    ));
                }
            }
        }

        let list = providers
            .iter()
            .map(|p| format!("\"{p}\""))
            .collect::<Vec<_>>()
            .join(", ");
        b.push_blank()
            .push_doc("Loaded modules this module imports from.")
            .push_line(&format!("pub const DEPENDENCIES: &[&str] = &[{list}];"));
    }
}

fn object_info_struct(b: &mut CodeBuilder) {
    b.push_doc("One OID-bearing definition.")
        .push_line("#[derive(Debug, Clone, Copy, PartialEq, Eq)]");
    b.push_block("pub struct ObjectInfo {", "}", |b| {
        b.push_line("pub name: &'static str,")
            .push_line("pub kind: &'static str,")
            .push_line("pub parent: Option<&'static str>,")
            .push_line("pub sub_id: Option<u32>,")
            .push_line("pub access: Option<&'static str>,");
    });
}

fn object_constant(b: &mut CodeBuilder, ident: &str, entity: &Entity) {
    let quoted = |value: Option<&str>| match value {
        Some(v) => format!("Some(\"{v}\")"),
        None => "None".to_string(),
    };
    let sub_id = match entity.sub_id {
        Some(n) => format!("Some({n})"),
        None => "None".to_string(),
    };

    b.push_doc(&format!("{} ({})", entity.name, entity.kind));
    b.push_block(&format!("pub const {ident}: ObjectInfo = ObjectInfo {{"), "};", |b| {
        b.push_line(&format!("name: \"{}\",", entity.name))
            .push_line(&format!("kind: \"{}\",", entity.kind))
            .push_line(&format!("parent: {},", quoted(entity.parent.as_deref())))
            .push_line(&format!("sub_id: {sub_id},"))
            .push_line(&format!("access: {},", quoted(entity.access.as_deref())));
    });
}
