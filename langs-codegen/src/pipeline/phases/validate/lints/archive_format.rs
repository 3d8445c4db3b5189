//! Lint for archives the renderer cannot unpack.

use super::super::Lint;
use crate::{
    archive::ArchiveFormat,
    pipeline::{CompilationContext, Diagnostic},
    url,
};
use langs_manifest::InstallMethod;

/// Errors on http-archive urls without a recognized archive suffix.
pub struct ArchiveFormatLint;

impl Lint for ArchiveFormatLint {
    fn name(&self) -> &'static str {
        "archive-format"
    }

    fn description(&self) -> &'static str {
        "Require a known archive suffix on http-archive urls"
    }

    fn check(&self, ctx: &CompilationContext, diagnostics: &mut Vec<Diagnostic>) {
        for package in ctx.selected_packages() {
            if package.install != InstallMethod::HttpArchive {
                continue;
            }
            let Some(template) = package.url.as_deref() else {
                continue;
            };
            // Unresolvable templates are reported by unresolved-version.
            let Ok(location) = url::substitute(template, &package.name, package.version.as_deref())
            else {
                continue;
            };
            if ArchiveFormat::from_url(&location).is_none() {
                let known: Vec<_> = ArchiveFormat::ALL.iter().map(|f| f.suffix()).collect();
                diagnostics.push(
                    Diagnostic::error(
                        "validate",
                        format!(
                            "cannot tell the archive format of '{}' (expected one of {})",
                            location,
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
    fn test_unknown_suffix() {
        let ctx = context(
            r#"
            [packages.tool]
            group = "common"
            install = "http-archive"
            url = "https://h.org/tool.tgz"

            [packages.node]
            group = "node"
            install = "http-archive"
            url = "https://h.org/node.tar.xz?mirror=1"
        "#,
        );
        let diagnostics = run(&ArchiveFormatLint, &ctx);

        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("'https://h.org/tool.tgz'"));
        assert!(diagnostics[0].message.contains(".tar.Z"));
    }

    #[test]
    fn test_other_methods_are_ignored() {
        let ctx = context(
            r#"
            [packages.fvs]
            group = "common"
            install = "binary-package"
            url = "https://h.org/fvs.rpm"
        "#,
        );

        assert!(run(&ArchiveFormatLint, &ctx).is_empty());
    }
}
