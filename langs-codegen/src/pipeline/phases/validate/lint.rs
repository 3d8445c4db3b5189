//! Lint trait for manifest validation.

use crate::pipeline::{CompilationContext, Diagnostic};

/// Information about a lint.
#[derive(Debug, Clone)]
pub struct LintInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// A check over the registry and the current selection.
pub trait Lint: Send + Sync {
    /// The name of this lint, as shown in diagnostics.
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Inspect the context and push any findings.
    fn check(&self, ctx: &CompilationContext, diagnostics: &mut Vec<Diagnostic>);

    fn info(&self) -> LintInfo {
        LintInfo {
            name: self.name(),
            description: self.description(),
        }
    }
}
