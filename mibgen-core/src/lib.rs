//! Core utilities and types for the mibgen code generator.
//!
//! This crate provides the file-writing rules and naming helpers shared by
//! the pipeline, the emitters and the CLI.

mod file;
mod utils;

// File operations
pub use file::{Overwrite, WriteResult, write_file};
// String and path utilities
pub use utils::{path_key, to_pascal_case, to_snake_case, to_upper_snake_case};
