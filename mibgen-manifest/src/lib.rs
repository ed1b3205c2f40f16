//! Configuration and declaration documents for mibgen.
//!
//! Two kinds of input are handled here:
//!
//! - `mibgen.toml`, the project configuration ([`Config`], [`ConfigFile`])
//! - line-list declaration documents: `.mibs` files nominating documents for
//!   generation ([`GenerationDeclaration`]) and `.customized` files listing
//!   modules whose customizable artifact is user-owned ([`SuppressionSet`])

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod config;
mod declaration;
mod error;

pub use config::{
    CONFIG_FILE_NAME, Config, ConfigFile, GeneratorConfig, InputsConfig, OutputConfig,
};
pub use declaration::{
    CUSTOMIZED_EXTENSION, GENERATE_EXTENSION, GenerationDeclaration, SuppressionSet,
    append_module, declaration_lines,
};
pub use error::{Error, Result, SourceContext};
