//! Core operations.
//!
//! This module contains the business logic for langs commands,
//! separated from CLI argument parsing and output rendering.

pub mod build;
pub mod check;
pub mod generate;
pub mod list;

pub use build::{BuildOptions, build};
pub use check::check;
pub use generate::{GenerateOptions, generate};
pub use list::list;

use eyre::{Context, Result};
use langs_codegen::pipeline::{CompilationContext, Pipeline};
use langs_manifest::{Group, Manifest};

/// Group selection and overrides applied before the pipeline runs.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Requested groups in order; empty selects every group.
    pub groups: Vec<Group>,
    /// Overrides `[generator].mirror`.
    pub mirror: Option<String>,
    pub strict: bool,
}

impl RenderOptions {
    /// The manifest with command-line overrides applied.
    pub fn apply(&self, manifest: &Manifest) -> Manifest {
        let mut manifest = manifest.clone();
        if let Some(mirror) = &self.mirror {
            manifest.generator.mirror = Some(mirror.clone());
        }
        manifest
    }

    pub fn pipeline(&self) -> Pipeline {
        Pipeline::new()
            .select(self.groups.clone())
            .strict(self.strict)
    }
}

/// Run validation and rendering over `manifest`.
pub fn render(manifest: &Manifest, opts: &RenderOptions) -> Result<CompilationContext> {
    opts.pipeline()
        .run(opts.apply(manifest))
        .wrap_err("Pipeline failed")
}
