use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use super::SelectionArgs;
use crate::{
    ops::{self, GenerateOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Output directory for build.sh and Dockerfile
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Print the generated files without writing them
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    pub fn run(&self) -> Result<()> {
        let langs_toml = self.selection.open();

        let report = ops::generate(
            langs_toml.manifest(),
            &self.selection.options(),
            GenerateOptions {
                output_dir: &self.output,
                dry_run: self.dry_run,
            },
        )?;
        report.render(&mut TerminalOutput::new());

        if !report.is_success() {
            std::process::exit(1);
        }
        Ok(())
    }
}
