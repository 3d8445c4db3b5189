//! Check command report data structures.

use std::path::PathBuf;

use langs_codegen::pipeline::Diagnostic;

use super::{
    output::{Output, Report},
    render_diagnostics,
};

/// Report data from manifest validation.
#[derive(Debug)]
pub struct CheckReport {
    pub config_path: PathBuf,
    /// Packages in recognized groups.
    pub package_count: usize,
    pub group_count: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        !self.diagnostics.iter().any(|d| d.severity.is_error())
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        render_diagnostics(out, &self.diagnostics);

        if self.is_valid() {
            out.preformatted(&format!("✓ {} is valid", self.config_path.display()));
            out.preformatted(&format!(
                "  {} package{} in {} group{}",
                self.package_count,
                if self.package_count == 1 { "" } else { "s" },
                self.group_count,
                if self.group_count == 1 { "" } else { "s" }
            ));
        }
    }
}
