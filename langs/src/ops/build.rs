//! Build operation - generate both artifacts and hand them to the image build tool.

use std::path::Path;

use eyre::{Context, Result};
use langs_codegen::{Generator, SCRIPT_FILE_NAME};
use langs_core::ImageBuild;
use langs_manifest::Manifest;
use tracing::debug;

use super::{RenderOptions, render};
use crate::reports::{BuildReport, BuildStatus, GroupSummary};

/// Options for the build operation.
pub struct BuildOptions {
    /// Build tool program (`docker`, `podman`).
    pub tool: String,
    /// Overrides the `name:tag` from `[image]`.
    pub image: Option<String>,
    pub pull: bool,
    /// Show the command without running it.
    pub dry_run: bool,
}

/// Artifacts ready to be handed to the build tool.
pub struct BuildJob {
    build: ImageBuild,
    descriptor: String,
    script: String,
}

impl BuildJob {
    /// Run the build tool. Blocks until it exits.
    pub fn run(&self) -> Result<()> {
        self.build
            .invoke(&self.descriptor, &self.script)
            .wrap_err_with(|| format!("Failed to build image '{}'", self.build.image()))
    }
}

/// A prepared build: the report to show first, and the job to run, if any.
pub struct BuildPlan {
    pub report: BuildReport,
    pub job: Option<BuildJob>,
}

/// Prepare the build.
///
/// No job is returned when the manifest has errors or for a dry run.
pub fn build(
    manifest: &Manifest,
    render_opts: &RenderOptions,
    opts: BuildOptions,
) -> Result<BuildPlan> {
    let ctx = render(manifest, render_opts)?;
    let groups = GroupSummary::from_context(&ctx);
    let image = opts
        .image
        .clone()
        .unwrap_or_else(|| manifest.image.reference());

    if ctx.has_errors() {
        return Ok(BuildPlan {
            report: BuildReport {
                image,
                groups,
                diagnostics: ctx.diagnostics,
                command: None,
                status: BuildStatus::Aborted,
            },
            job: None,
        });
    }

    let generator = Generator::from_context(ctx)?;
    let build = ImageBuild::new(&image)
        .program(&opts.tool)
        .pull(opts.pull)
        .proxies_from_env();

    let preview = build.command(
        Path::new("<workspace>"),
        Path::new("<workspace>/Dockerfile"),
        SCRIPT_FILE_NAME,
    );
    let command = ImageBuild::command_line(&preview);
    debug!(%command, "prepared image build");

    let (status, job) = if opts.dry_run {
        (BuildStatus::DryRun, None)
    } else {
        let job = BuildJob {
            build,
            descriptor: generator.descriptor_text(SCRIPT_FILE_NAME),
            script: generator.script_text(),
        };
        (BuildStatus::Ready, Some(job))
    };

    Ok(BuildPlan {
        report: BuildReport {
            image,
            groups,
            diagnostics: generator.diagnostics().to_vec(),
            command: Some(command),
            status,
        },
        job,
    })
}
