//! Validate phase - runs lints over the registry.

mod lint;
pub mod lints;

use eyre::Result;
pub use lint::{Lint, LintInfo};
pub use lints::{
    ArchiveFormatLint, EmptyGroupLint, MissingHookLint, MissingUrlLint, SkippedSectionLint,
    UnresolvedVersionLint,
};
use tracing::debug;

use crate::pipeline::{CompilationContext, Phase};

/// Phase that validates the registry using configurable lints.
pub struct ValidatePhase {
    lints: Vec<Box<dyn Lint>>,
}

impl ValidatePhase {
    /// Create a new validate phase with default lints.
    pub fn new() -> Self {
        Self {
            lints: vec![
                Box::new(SkippedSectionLint),
                Box::new(MissingUrlLint),
                Box::new(UnresolvedVersionLint),
                Box::new(ArchiveFormatLint),
                Box::new(MissingHookLint),
                Box::new(EmptyGroupLint),
            ],
        }
    }

    /// Create a validate phase with no lints.
    pub fn empty() -> Self {
        Self { lints: Vec::new() }
    }

    /// Add a custom lint to the validation phase.
    pub fn with_lint(mut self, lint: impl Lint + 'static) -> Self {
        self.lints.push(Box::new(lint));
        self
    }

    pub fn lint_names(&self) -> Vec<&'static str> {
        self.lints.iter().map(|l| l.name()).collect()
    }

    pub fn lint_info(&self) -> Vec<LintInfo> {
        self.lints.iter().map(|l| l.info()).collect()
    }
}

impl Default for ValidatePhase {
    fn default() -> Self {
        Self::new()
    }
}

impl Phase for ValidatePhase {
    fn name(&self) -> &'static str {
        "validate"
    }

    fn description(&self) -> &'static str {
        "Check package records and collect diagnostics"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let mut diagnostics = Vec::new();
        for lint in &self.lints {
            let before = diagnostics.len();
            lint.check(ctx, &mut diagnostics);
            debug!(
                lint = lint.name(),
                findings = diagnostics.len() - before,
                "lint finished"
            );
        }
        ctx.diagnostics.extend(diagnostics);

        // Errors are reported through diagnostics; the pipeline stops on them.
        Ok(())
    }
}
