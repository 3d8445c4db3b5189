mod build;
mod check;
mod completions;
mod generate;
mod init;
mod list;

use std::path::PathBuf;

use build::BuildCommand;
use check::CheckCommand;
use clap::{Args, Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use generate::GenerateCommand;
use init::InitCommand;
use langs_manifest::{Group, LangsToml};
use list::ListCommand;

use crate::ops::RenderOptions;

/// Extension trait for exiting on manifest errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for langs_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "langs")]
#[command(version)]
#[command(about = "Generate and build development toolchain images from langs.toml")]
pub(crate) struct Cli {
    /// Show debug logs (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Build(cmd) => cmd.run(),
            Commands::Generate(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::List(cmd) => cmd.run(),
            Commands::Init(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the script and descriptor, then build the image
    Build(BuildCommand),

    /// Write build.sh and Dockerfile without building
    Generate(GenerateCommand),

    /// Validate langs.toml without generating anything
    Check(CheckCommand),

    /// List package groups and their packages
    List(ListCommand),

    /// Create a starter langs.toml
    Init(InitCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

/// Config path and group selection shared by `build` and `generate`.
#[derive(Args)]
pub(crate) struct SelectionArgs {
    /// Path to langs.toml (defaults to ./langs.toml)
    #[arg(short, long, default_value = "langs.toml")]
    pub config: PathBuf,

    /// Only install these groups, in this order (repeatable)
    #[arg(short, long = "group", value_name = "GROUP")]
    pub groups: Vec<Group>,

    /// Rewrite download urls to this mirror host
    #[arg(long, value_name = "URL")]
    pub mirror: Option<String>,

    /// Treat sections with a missing or unknown group as errors
    #[arg(long)]
    pub strict: bool,
}

impl SelectionArgs {
    /// Open the config, failing with a source-annotated report.
    pub fn open(&self) -> LangsToml {
        let langs_toml = LangsToml::open(&self.config).unwrap_or_exit();
        if self.strict {
            langs_toml.registry(true).unwrap_or_exit();
        }
        langs_toml
    }

    pub fn options(&self) -> RenderOptions {
        RenderOptions {
            groups: self.groups.clone(),
            mirror: self.mirror.clone(),
            strict: self.strict,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_groups_keep_their_order() {
        let cli = Cli::try_parse_from([
            "langs", "generate", "-g", "ssh", "-g", "common", "--group", "c++",
        ])
        .unwrap();
        let Commands::Generate(cmd) = cli.command else {
            panic!("expected generate");
        };

        assert_eq!(
            cmd.selection.groups,
            [Group::Ssh, Group::Common, Group::Cpp]
        );
    }

    #[test]
    fn test_unknown_group_is_rejected() {
        assert!(Cli::try_parse_from(["langs", "generate", "-g", "cobol"]).is_err());
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from(["langs", "check", "-v"]).unwrap();
        assert!(cli.verbose);
    }
}
