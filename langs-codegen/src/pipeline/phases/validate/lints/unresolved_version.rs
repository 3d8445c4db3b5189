//! Lint for url templates that need a version.

use super::super::Lint;
use crate::{
    pipeline::{CompilationContext, Diagnostic},
    url,
};

/// Errors when a url uses `{version}` and the package has none.
pub struct UnresolvedVersionLint;

impl Lint for UnresolvedVersionLint {
    fn name(&self) -> &'static str {
        "unresolved-version"
    }

    fn description(&self) -> &'static str {
        "Require a version when the url template uses {version}"
    }

    fn check(&self, ctx: &CompilationContext, diagnostics: &mut Vec<Diagnostic>) {
        for package in ctx.selected_packages() {
            let Some(template) = package.url.as_deref() else {
                continue;
            };
            if package.version.is_none() && url::uses_version(template) {
                diagnostics.push(
                    Diagnostic::error(
                        "validate",
                        format!(
                            "url of package '{}' uses {{version}} but no version is set",
                            package.name
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
    fn test_unresolved_version() {
        let ctx = context(
            r#"
            [packages.golang]
            group = "golang"
            install = "http-archive"
            url = "https://example.org/go{version}.tar.gz"

            [packages.node]
            group = "node"
            install = "http-archive"
            version = "10.1.0"
            url = "https://nodejs.org/dist/v{version}/node-v{version}-linux-x64.tar.xz"
        "#,
        );
        let diagnostics = run(&UnresolvedVersionLint, &ctx);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].location.as_deref(), Some("packages.golang"));
    }
}
