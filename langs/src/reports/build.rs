//! Build command report data structures.

use langs_codegen::pipeline::Diagnostic;

use super::{
    GroupSummary,
    output::{Output, Report},
    render_diagnostics, render_groups,
};

/// What happens after the report is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStatus {
    /// The build tool runs next.
    Ready,
    DryRun,
    /// The manifest has errors; nothing is built.
    Aborted,
}

/// Report shown before the image build starts.
#[derive(Debug)]
pub struct BuildReport {
    /// Image reference the result is tagged with.
    pub image: String,
    pub groups: Vec<GroupSummary>,
    pub diagnostics: Vec<Diagnostic>,
    /// The build command line, with the workspace shown as a placeholder.
    pub command: Option<String>,
    pub status: BuildStatus,
}

impl Report for BuildReport {
    fn render(&self, out: &mut dyn Output) {
        render_diagnostics(out, &self.diagnostics);

        if self.status == BuildStatus::Aborted {
            out.preformatted("Nothing built: fix the errors above and retry");
            return;
        }

        out.key_value("Image", &self.image);
        render_groups(out, &self.groups);
        if let Some(command) = &self.command {
            out.newline();
            out.key_value("Command", command);
        }
        if self.status == BuildStatus::DryRun {
            out.preformatted("(dry run, nothing built)");
        }
    }
}
