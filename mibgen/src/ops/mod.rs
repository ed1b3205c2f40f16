//! Core operations.
//!
//! This module contains the business logic for mibgen commands,
//! separated from CLI argument parsing and output rendering.

pub mod bake;
pub mod check;
pub mod customize;
pub mod discover;

pub use bake::{BakeOptions, bake};
pub use check::check;
pub use customize::{customize, default_suppression_file, module_name};
pub use discover::{Discovery, discover};
