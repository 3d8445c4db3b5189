//! Check operation - manifest validation.

use std::path::Path;

use eyre::Result;
use langs_codegen::pipeline::Pipeline;
use langs_manifest::Manifest;

use crate::reports::CheckReport;

/// Execute the check operation.
///
/// Runs the validate phase only and returns its diagnostics.
pub fn check(manifest: &Manifest, config_path: &Path, strict: bool) -> Result<CheckReport> {
    let ctx = Pipeline::new()
        .validate_only()
        .strict(strict)
        .run(manifest.clone())?;

    Ok(CheckReport {
        config_path: config_path.to_path_buf(),
        package_count: ctx.registry.len(),
        group_count: ctx.registry.groups().count(),
        diagnostics: ctx.diagnostics,
    })
}
