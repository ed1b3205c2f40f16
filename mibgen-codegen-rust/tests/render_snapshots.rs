//! Snapshot tests for rendered Rust artifacts.
//!
//! Run `cargo insta review` to update snapshots when making intentional changes.

use mibgen_codegen::{CodeEmitter, Variant};
use mibgen_codegen_rust::RustEmitter;
use mibgen_ir::{Entity, EntityKind, Import, ModuleObject, ResolutionState, Status};

fn object_type(name: &str, sub_id: u32, syntax: &str, access: &str, status: Status) -> Entity {
    let mut entity = Entity::new(name, EntityKind::ObjectType).under("demo", sub_id);
    entity.syntax = Some(syntax.into());
    entity.access = Some(access.into());
    entity.status = Some(status);
    entity
}

fn demo_module() -> ModuleObject {
    let mut module = ModuleObject::new("DEMO-MIB", "/mibs/DEMO-MIB.txt");
    module
        .entities
        .push(Entity::new("demo", EntityKind::ObjectIdentifier).under("enterprises", 99999));
    module.entities.push(object_type(
        "demoCount",
        1,
        "Integer32",
        "read-only",
        Status::Current,
    ));

    let mut resolved = Import::new("enterprises", "SNMPv2-SMI");
    resolved.resolution = ResolutionState::Resolved {
        module: "SNMPv2-SMI".into(),
    };
    module.imports.push(resolved);
    module.imports.push(Import::new("DisplayString", "SNMPv2-TC"));
    module
}

fn render(module: &ModuleObject, variant: Variant) -> String {
    RustEmitter::new()
        .render(module, "mibgen test", variant)
        .expect("render should succeed")
}

#[test]
fn test_generated_listing() {
    let output = render(&demo_module(), Variant::Generated);

    insta::assert_snapshot!(output, @r#"
    // Code generated by mibgen test. DO NOT EDIT.
    // Source module: DEMO-MIB

    /// Definitions from the DEMO-MIB module.
    pub mod demo_mib {
        /// Name of the module these definitions come from.
        pub const MODULE_NAME: &str = "DEMO-MIB";

        /// One OID-bearing definition.
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct ObjectInfo {
            pub name: &'static str,
            pub kind: &'static str,
            pub parent: Option<&'static str>,
            pub sub_id: Option<u32>,
            pub access: Option<&'static str>,
        }

        // Imports
        // enterprises from SNMPv2-SMI
        // unresolved: DisplayString from SNMPv2-TC

        /// Loaded modules this module imports from.
        pub const DEPENDENCIES: &[&str] = &["SNMPv2-SMI"];

        /// demo (OBJECT IDENTIFIER)
        pub const DEMO: ObjectInfo = ObjectInfo {
            name: "demo",
            kind: "OBJECT IDENTIFIER",
            parent: Some("enterprises"),
            sub_id: Some(99999),
            access: None,
        };

        /// demoCount (OBJECT-TYPE)
        pub const DEMO_COUNT: ObjectInfo = ObjectInfo {
            name: "demoCount",
            kind: "OBJECT-TYPE",
            parent: Some("demo"),
            sub_id: Some(1),
            access: Some("read-only"),
        };

        /// Every definition in declaration order.
        pub const OBJECTS: &[ObjectInfo] = &[
            DEMO,
            DEMO_COUNT,
        ];
    }
    "#);
}

#[test]
fn test_customizable_skeleton() {
    let mut module = demo_module();
    module.entities.push(object_type(
        "demoLabel",
        2,
        "DisplayString",
        "read-write",
        Status::Current,
    ));
    module.entities.push(object_type(
        "demoOld",
        3,
        "Counter32",
        "read-only",
        Status::Deprecated,
    ));

    let output = render(&module, Variant::Customizable);

    insta::assert_snapshot!(output, @r#"
    // Generated once by mibgen test from DEMO-MIB.
    // This file is yours to edit; it will not be regenerated.

    /// Hooks for serving DEMO-MIB objects.
    #[derive(Debug, Default)]
    pub struct DemoMibHandlers;

    impl DemoMibHandlers {
        /// demoCount (Integer32, read-only)
        pub fn get_demo_count(&self) -> Option<String> {
            None
        }

        /// demoLabel (DisplayString, read-write)
        pub fn get_demo_label(&self) -> Option<String> {
            None
        }

        /// Store a new value for demoLabel.
        pub fn set_demo_label(&mut self, value: &str) -> Result<(), String> {
            let _ = value;
            Err("demoLabel is not writable yet".to_string())
        }
    }
    "#);
}

#[test]
fn test_customizable_without_handlers() {
    let mut module = ModuleObject::new("DEMO-REG", "/mibs/DEMO-REG.txt");
    module
        .entities
        .push(Entity::new("demoReg", EntityKind::ObjectIdentity).under("enterprises", 7));

    let output = render(&module, Variant::Customizable);

    assert!(output.contains("pub struct DemoRegHandlers;"));
    assert!(!output.contains("impl"));
}

#[test]
fn test_rendering_is_deterministic() {
    let module = demo_module();

    for variant in [Variant::Generated, Variant::Customizable] {
        assert_eq!(render(&module, variant), render(&module, variant));
    }
}

#[test]
fn test_banner_only_changes_header() {
    let module = demo_module();
    let emitter = RustEmitter::new();

    let a = emitter.render(&module, "mibgen 1.0.0", Variant::Generated).unwrap();
    let b = emitter.render(&module, "mibgen 2.0.0", Variant::Generated).unwrap();

    let body = |s: &str| s.lines().skip(1).collect::<Vec<_>>().join("\n");
    assert_ne!(a, b);
    assert_eq!(body(&a), body(&b));
}

#[test]
fn test_colliding_constant_names_fail() {
    let mut module = ModuleObject::new("X-MIB", "/mibs/X-MIB.txt");
    module
        .entities
        .push(Entity::new("fooBar", EntityKind::ObjectIdentifier).under("x", 1));
    module
        .entities
        .push(Entity::new("foo-bar", EntityKind::ObjectIdentifier).under("x", 2));

    let result = RustEmitter::new().render(&module, "mibgen", Variant::Generated);

    assert!(result.is_err());
}
