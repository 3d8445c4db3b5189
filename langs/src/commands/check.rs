use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use langs_manifest::LangsToml;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to langs.toml (defaults to ./langs.toml)
    #[arg(short, long, default_value = "langs.toml")]
    pub config: PathBuf,

    /// Treat sections with a missing or unknown group as errors
    #[arg(long)]
    pub strict: bool,
}

impl CheckCommand {
    pub fn run(&self) -> Result<()> {
        let langs_toml = LangsToml::open(&self.config).unwrap_or_exit();

        let report = ops::check(langs_toml.manifest(), &self.config, self.strict)?;
        report.render(&mut TerminalOutput::new());

        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
