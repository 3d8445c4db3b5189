//! Built-in pipeline phases.
//!
//! - [`ValidatePhase`] - runs lints and collects diagnostics
//! - [`RenderPhase`] - assembles the provisioning script

mod render;
mod validate;

pub use render::RenderPhase;
pub use validate::{
    ArchiveFormatLint, EmptyGroupLint, Lint, LintInfo, MissingHookLint, MissingUrlLint,
    SkippedSectionLint, UnresolvedVersionLint, ValidatePhase,
};
