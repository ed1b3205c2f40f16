//! Rust code emitter for mibgen.
//!
//! Renders each module twice: a `*.generated.rs` listing of its definitions
//! that is refreshed on every run, and a handler skeleton the user owns once
//! it exists.

mod builder;
mod emitter;
mod files;

pub use builder::CodeBuilder;
pub use emitter::RustEmitter;
