//! Lint for package sections left out of the registry.

use super::super::Lint;
use crate::pipeline::{CompilationContext, Diagnostic, Severity};

/// Reports sections with a missing or unknown `group`.
///
/// Warning by default; an error when the pipeline runs strict.
pub struct SkippedSectionLint;

impl Lint for SkippedSectionLint {
    fn name(&self) -> &'static str {
        "skipped-section"
    }

    fn description(&self) -> &'static str {
        "Report package sections skipped for a missing or unknown group"
    }

    fn check(&self, ctx: &CompilationContext, diagnostics: &mut Vec<Diagnostic>) {
        let severity = Severity::warning_unless(ctx.strict);
        for skipped in ctx.registry.skipped() {
            diagnostics.push(
                Diagnostic::new(
                    severity,
                    "validate",
                    format!("{}, section skipped", skipped.reason()),
                )
                .at_package(&skipped.name)
                .from_lint(self.name()),
            );
        }
    }
}
