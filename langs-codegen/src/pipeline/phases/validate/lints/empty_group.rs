//! Lint for requested groups with nothing in them.

use super::super::Lint;
use crate::pipeline::{CompilationContext, Diagnostic};

/// Warns when an explicitly requested group has no packages.
pub struct EmptyGroupLint;

impl Lint for EmptyGroupLint {
    fn name(&self) -> &'static str {
        "empty-group"
    }

    fn description(&self) -> &'static str {
        "Warn about requested groups without packages"
    }

    fn check(&self, ctx: &CompilationContext, diagnostics: &mut Vec<Diagnostic>) {
        for group in &ctx.groups {
            if ctx.registry.packages(*group).is_empty() {
                diagnostics.push(
                    Diagnostic::warning(
                        "validate",
                        format!("group '{}' was requested but has no packages", group),
                    )
                    .from_lint(self.name()),
                );
            }
        }
    }
}
