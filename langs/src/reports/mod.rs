//! Report data structures for commands.
//!
//! This module provides data structures that separate data collection from rendering.
//! Commands build reports, then render them to an Output target.

mod build;
mod check;
mod generate;
mod list;
mod output;

pub use build::{BuildReport, BuildStatus};
pub use check::CheckReport;
pub use generate::{GenerateReport, GenerationResult, PreviewFile, WrittenResult};
pub use list::{GroupListing, ListReport, SkippedListing};
pub use output::{Output, Report, TerminalOutput};

use langs_codegen::pipeline::{CompilationContext, Diagnostic, Severity};
use langs_manifest::Group;

/// A selected group and how many packages it installs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSummary {
    pub group: Group,
    pub packages: usize,
}

impl GroupSummary {
    /// Selected groups of a pipeline context, in render order.
    pub fn from_context(ctx: &CompilationContext) -> Vec<Self> {
        ctx.selection()
            .into_iter()
            .map(|(group, packages)| Self {
                group,
                packages: packages.len(),
            })
            .collect()
    }
}

fn render_diagnostics(out: &mut dyn Output, diagnostics: &[Diagnostic]) {
    for diag in diagnostics {
        let message = match &diag.location {
            Some(loc) => format!("{}\n  --> {}", diag.message, loc),
            None => diag.message.clone(),
        };
        match diag.severity {
            Severity::Error => out.error(&message),
            Severity::Warning => out.warning(&message),
            Severity::Info => out.preformatted(&format!("info: {}", message)),
        }
    }
    if diagnostics.iter().any(|d| !matches!(d.severity, Severity::Info)) {
        out.newline();
    }
}

fn render_groups(out: &mut dyn Output, groups: &[GroupSummary]) {
    let total: usize = groups.iter().map(|g| g.packages).sum();
    out.section(&format!("Groups ({}, {} packages)", groups.len(), total));
    for (i, summary) in groups.iter().enumerate() {
        out.numbered_item(
            i + 1,
            &format!(
                "{} ({} package{})",
                summary.group,
                summary.packages,
                if summary.packages == 1 { "" } else { "s" }
            ),
        );
    }
}
