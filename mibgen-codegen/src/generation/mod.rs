//! Artifact naming, collection and materialization.

mod naming;
mod registry;

pub use naming::{ArtifactKind, ArtifactNaming};
pub use registry::{ArtifactEntry, ArtifactRegistry, WriteStats};
