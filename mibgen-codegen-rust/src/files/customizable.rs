//! The user-owned handler skeleton.
//!
//! Only current, accessible scalar and column objects get handlers. Retired
//! definitions and table/entry containers are left out.

use eyre::Result;
use mibgen_core::{to_pascal_case, to_snake_case};
use mibgen_ir::{Entity, EntityKind, ModuleObject};

use super::IdentSet;
use crate::CodeBuilder;

const WRITABLE: &[&str] = &["read-write", "read-create", "write-only"];

fn wants_handler(entity: &Entity) -> bool {
    entity.kind == EntityKind::ObjectType
        && !entity.status.is_some_and(|s| s.is_retired())
        && !entity.is_container()
        && entity.access.as_deref() != Some("not-accessible")
}

fn is_writable(entity: &Entity) -> bool {
    entity
        .access
        .as_deref()
        .is_some_and(|access| WRITABLE.contains(&access))
}

pub struct CustomizableFile<'a> {
    module: &'a ModuleObject,
    banner: &'a str,
}

impl<'a> CustomizableFile<'a> {
    pub fn new(module: &'a ModuleObject, banner: &'a str) -> Self {
        Self { module, banner }
    }

    pub fn render(&self) -> Result<String> {
        let module = self.module;
        let mut idents = IdentSet::default();
        let mut handlers = Vec::new();
        for entity in module.entities.iter().filter(|e| wants_handler(e)) {
            let stem = idents.claim(to_snake_case(&entity.name), &entity.name)?;
            handlers.push((stem, entity));
        }

        let type_name = format!("{}Handlers", to_pascal_case(&module.name));

        let mut b = CodeBuilder::new();
        b.push_comment(&format!("Generated once by {} from {}.", self.banner, module.name))
            .push_comment("This file is yours to edit; it will not be regenerated.")
            .push_blank()
            .push_doc(&format!("Hooks for serving {} objects.", module.name))
            .push_line("#[derive(Debug, Default)]")
            .push_line(&format!("pub struct {type_name};"));

        if handlers.is_empty() {
            return Ok(b.build());
        }

        b.push_blank();
        b.push_block(&format!("impl {type_name} {{"), "}", |b| {
            for (i, (stem, entity)) in handlers.iter().enumerate() {
                if i > 0 {
                    b.push_blank();
                }
                handler(b, stem, entity);
            }
        });

        Ok(b.build())
    }
}

fn handler(b: &mut CodeBuilder, stem: &str, entity: &Entity) {
    let syntax = entity.syntax.as_deref().unwrap_or("?");
    let access = entity.access.as_deref().unwrap_or("?");

    b.push_doc(&format!("{} ({syntax}, {access})", entity.name));
    b.push_block(&format!("pub fn get_{stem}(&self) -> Option<String> {{"), "}", |b| {
        b.push_line("None");
    });

    if is_writable(entity) {
        b.push_blank()
            .push_doc(&format!("Store a new value for {}.", entity.name));
        b.push_block(
            &format!("pub fn set_{stem}(&mut self, value: &str) -> Result<(), String> {{"),
            "}",
            |b| {
                b.push_line("let _ = value;").push_line(&format!(
                    "Err(\"{} is not writable yet\".to_string())",
                    entity.name
                ));
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use mibgen_ir::Status;

    use super::*;

    fn object(name: &str, syntax: &str, access: &str) -> Entity {
        let mut entity = Entity::new(name, EntityKind::ObjectType).under("parent", 1);
        entity.syntax = Some(syntax.into());
        entity.access = Some(access.into());
        entity.status = Some(Status::Current);
        entity
    }

    #[test]
    fn test_handler_selection() {
        let mut deprecated = object("old", "Integer32", "read-only");
        deprecated.status = Some(Status::Deprecated);

        assert!(wants_handler(&object("ifNumber", "Integer32", "read-only")));
        assert!(!wants_handler(&deprecated));
        assert!(!wants_handler(&object("ifTable", "SEQUENCE", "not-accessible")));
        assert!(!wants_handler(&object("ifEntry", "IfEntry", "not-accessible")));
        assert!(!wants_handler(&Entity::new("ifMIB", EntityKind::ModuleIdentity)));
    }

    #[test]
    fn test_writable_access() {
        assert!(is_writable(&object("a", "Integer32", "read-write")));
        assert!(is_writable(&object("a", "RowStatus", "read-create")));
        assert!(!is_writable(&object("a", "Integer32", "read-only")));
    }

    #[test]
    fn test_colliding_names_fail_render() {
        let mut module = ModuleObject::new("X-MIB", "/x.txt");
        module.entities.push(object("fooBar", "Integer32", "read-only"));
        module.entities.push(object("foo-bar", "Integer32", "read-only"));

        let err = CustomizableFile::new(&module, "mibgen").render().unwrap_err();

        assert!(err.to_string().contains("both map to foo_bar"));
    }
}
