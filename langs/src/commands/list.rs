use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};
use langs_manifest::LangsToml;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct ListCommand {
    /// Path to langs.toml (defaults to ./langs.toml)
    #[arg(short, long, default_value = "langs.toml")]
    pub config: PathBuf,

    /// Print the registry as JSON
    #[arg(long)]
    pub json: bool,
}

impl ListCommand {
    pub fn run(&self) -> Result<()> {
        let langs_toml = LangsToml::open(&self.config).unwrap_or_exit();
        let report = ops::list(langs_toml.manifest(), langs_toml.path());

        if self.json {
            let json = serde_json::to_string_pretty(&report).wrap_err("Failed to serialize")?;
            println!("{}", json);
        } else {
            report.render(&mut TerminalOutput::new());
        }
        Ok(())
    }
}
