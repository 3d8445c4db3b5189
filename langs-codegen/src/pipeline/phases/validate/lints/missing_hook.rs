//! Lint for custom packages nothing knows how to install.

use langs_manifest::InstallMethod;

use super::super::Lint;
use crate::pipeline::{CompilationContext, Diagnostic};

/// Warns on custom packages without a registered install hook.
pub struct MissingHookLint;

impl Lint for MissingHookLint {
    fn name(&self) -> &'static str {
        "missing-hook"
    }

    fn description(&self) -> &'static str {
        "Warn about custom packages that will render nothing"
    }

    fn check(&self, ctx: &CompilationContext, diagnostics: &mut Vec<Diagnostic>) {
        for package in ctx.selected_packages() {
            if package.install == InstallMethod::Custom && !ctx.hooks.has_install(&package.name) {
                let known: Vec<_> = ctx.hooks.install_names().collect();
                diagnostics.push(
                    Diagnostic::warning(
                        "validate",
                        format!(
                            "no install hook for custom package '{}' (hooks: {})",
                            package.name,
                            known.join(", ")
                        ),
                    )
                    .at_package(&package.name)
                    .from_lint(self.name()),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::phases::validate::lints::test_support::{context, run};

    #[test]
    fn test_missing_hook() {
        let ctx = context(
            r#"
            [packages.rustup]
            group = "rust"
            install = "custom"

            [packages.sdkman]
            group = "java"
            install = "custom-procedure"
        "#,
        );
        let diagnostics = run(&MissingHookLint, &ctx);

        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].severity.is_warning());
        assert!(diagnostics[0].message.contains("'sdkman'"));
        assert!(diagnostics[0].message.contains("python, rustup"));
    }
}
