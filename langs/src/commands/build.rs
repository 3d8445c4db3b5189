use clap::Args;
use eyre::Result;

use super::SelectionArgs;
use crate::{
    ops::{self, BuildOptions},
    reports::{BuildStatus, Output, Report, TerminalOutput},
};

#[derive(Args)]
pub struct BuildCommand {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Image reference to tag the result with (defaults to [image] name:tag)
    #[arg(short = 't', long = "tag", value_name = "IMAGE")]
    pub image: Option<String>,

    /// Container build tool
    #[arg(long, default_value = "docker")]
    pub tool: String,

    /// Always pull a newer base image
    #[arg(long)]
    pub pull: bool,

    /// Show what would be built without running the tool
    #[arg(long)]
    pub dry_run: bool,
}

impl BuildCommand {
    pub fn run(&self) -> Result<()> {
        let langs_toml = self.selection.open();

        let plan = ops::build(
            langs_toml.manifest(),
            &self.selection.options(),
            BuildOptions {
                tool: self.tool.clone(),
                image: self.image.clone(),
                pull: self.pull,
                dry_run: self.dry_run,
            },
        )?;
        let mut out = TerminalOutput::new();
        plan.report.render(&mut out);

        if plan.report.status == BuildStatus::Aborted {
            std::process::exit(1);
        }

        if let Some(job) = &plan.job {
            out.newline();
            job.run()?;
            out.newline();
            out.preformatted(&format!("✓ Built {}", plan.report.image));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn command(config: PathBuf, tool: &str, dry_run: bool) -> BuildCommand {
        BuildCommand {
            selection: SelectionArgs {
                config,
                groups: Vec::new(),
                mirror: None,
                strict: false,
            },
            image: Some("devbox:test".to_string()),
            tool: tool.to_string(),
            pull: false,
            dry_run,
        }
    }

    fn write_config(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("langs.toml");
        std::fs::write(
            &path,
            "[packages.vim]\ngroup = \"common\"\ninstall = \"package-manager\"\n",
        )
        .unwrap();
        path
    }

    #[test]
    fn test_dry_run_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(&dir);

        command(config, "docker", true).run().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_successful_tool_run() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(&dir);

        command(config, "true", false).run().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_tool_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(&dir);

        assert!(command(config, "false", false).run().is_err());
    }
}
