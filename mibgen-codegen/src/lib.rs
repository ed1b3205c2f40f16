//! Generation pipeline for mibgen.
//!
//! This crate turns a batch of compiled MIB modules into generated artifacts
//! while protecting hand-edited customizable files.
//!
//! # Module Organization
//!
//! - [`capability`] - Contracts for the injected document compiler and code emitter
//! - [`pipeline`] - The run driver, its phases and the diagnostics registry
//! - [`generation`] - Artifact naming, registry and materialization
//! - [`testing`] - In-memory compiler and emitter fakes (feature-gated)

pub mod capability;
pub mod generation;
pub mod pipeline;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use capability::{CodeEmitter, DocumentCompiler, Variant};
pub use generation::{ArtifactEntry, ArtifactKind, ArtifactNaming, ArtifactRegistry, WriteStats};
pub use pipeline::{
    CancellationToken, Diagnostic, DiagnosticSource, OutputMode, Pipeline, RunContext, RunInputs,
    Severity,
};
