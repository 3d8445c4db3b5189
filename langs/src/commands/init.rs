use std::path::{Path, PathBuf};

use clap::Args;
use eyre::{Context, Result};
use langs_core::{File, FileRules, WriteResult};

/// Starter configuration with the full default toolchain set.
const DEFAULT_CONFIG: &str = include_str!("../../assets/langs.toml");

#[derive(Args)]
pub struct InitCommand {
    /// Where to create langs.toml (a directory or a file path)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

impl InitCommand {
    pub fn run(&self) -> Result<()> {
        let target = Self::resolve_path(&self.path);
        let rules = if self.force {
            FileRules::always_overwrite()
        } else {
            FileRules::if_missing()
        };

        let result = File::new(&target, DEFAULT_CONFIG)
            .with_rules(rules)
            .write()
            .wrap_err_with(|| format!("Failed to write {}", target.display()))?;

        match result {
            WriteResult::Written => {
                println!("Created {}", target.display());
                println!();
                println!("Next steps:");
                println!("  langs check -c {}", target.display());
                println!("  langs build -c {}", target.display());
            }
            WriteResult::Skipped => {
                eprintln!(
                    "warning: {} already exists (use --force to overwrite)",
                    target.display()
                );
            }
        }
        Ok(())
    }

    /// A directory (existing, or without a `.toml` extension) gets `langs.toml` inside it.
    fn resolve_path(path: &Path) -> PathBuf {
        let is_file = path.extension().is_some_and(|ext| ext == "toml") && !path.is_dir();
        if is_file {
            path.to_path_buf()
        } else {
            path.join("langs.toml")
        }
    }
}
