//! Lint for packages that cannot be fetched.

use super::super::Lint;
use crate::pipeline::{CompilationContext, Diagnostic};

/// Errors on http-archive, filesystem-copy and binary-package records without a `url`.
pub struct MissingUrlLint;

impl Lint for MissingUrlLint {
    fn name(&self) -> &'static str {
        "missing-url"
    }

    fn description(&self) -> &'static str {
        "Require a url for packages that are downloaded or copied"
    }

    fn check(&self, ctx: &CompilationContext, diagnostics: &mut Vec<Diagnostic>) {
        for package in ctx.selected_packages() {
            if package.install.requires_url() && package.url.is_none() {
                diagnostics.push(
                    Diagnostic::error(
                        "validate",
                        format!(
                            "package '{}' is installed with {} but has no 'url'",
                            package.name, package.install
                        ),
                    )
                    .at_package(&package.name)
                    .from_lint(self.name()),
                );
            }
        }
    }
}
