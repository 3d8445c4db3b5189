//! Generate operation - script and descriptor from a manifest.

use std::path::Path;

use eyre::{Context, Result};
use langs_codegen::Generator;
use langs_manifest::Manifest;

use super::{RenderOptions, render};
use crate::reports::{GenerateReport, GenerationResult, GroupSummary, PreviewFile, WrittenResult};

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    /// Directory that receives build.sh and Dockerfile.
    pub output_dir: &'a Path,
    /// Preview the files without writing them.
    pub dry_run: bool,
}

/// Execute the generate operation.
///
/// A manifest with errors yields a report with [`GenerationResult::Aborted`]
/// and nothing on disk.
pub fn generate(
    manifest: &Manifest,
    render_opts: &RenderOptions,
    opts: GenerateOptions,
) -> Result<GenerateReport> {
    let ctx = render(manifest, render_opts)?;
    let groups = GroupSummary::from_context(&ctx);

    if ctx.has_errors() {
        return Ok(GenerateReport {
            image: manifest.image.reference(),
            groups,
            diagnostics: ctx.diagnostics,
            result: GenerationResult::Aborted,
        });
    }

    let generator = Generator::from_context(ctx)?;
    let result = if opts.dry_run {
        let files = generator
            .preview()
            .into_iter()
            .map(|f| PreviewFile {
                path: f.path,
                content: f.content,
            })
            .collect();
        GenerationResult::Preview(files)
    } else {
        let written = generator
            .generate(opts.output_dir)
            .wrap_err("Failed to write generated files")?;
        GenerationResult::Written(WrittenResult {
            output_dir: opts.output_dir.to_path_buf(),
            files: written.files,
        })
    };

    Ok(GenerateReport {
        image: generator.image().reference(),
        groups,
        diagnostics: generator.diagnostics().to_vec(),
        result,
    })
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use langs_manifest::Group;
    use tempfile::TempDir;

    use super::*;

    const CONFIG: &str = r#"
        [packages.vim]
        group = "common"
        install = "package-manager"

        [packages.gcc]
        group = "cpp"
        install = "package-manager"
    "#;

    #[test]
    fn test_generate_writes_files() {
        let temp = TempDir::new().unwrap();
        let manifest = Manifest::from_str(CONFIG).unwrap();

        let report = generate(
            &manifest,
            &RenderOptions::default(),
            GenerateOptions {
                output_dir: temp.path(),
                dry_run: false,
            },
        )
        .unwrap();

        assert!(matches!(report.result, GenerationResult::Written(_)));
        assert!(temp.path().join("build.sh").exists());
        assert!(temp.path().join("Dockerfile").exists());
        assert_eq!(report.groups.len(), 2);
    }

    #[test]
    fn test_dry_run_touches_nothing() {
        let temp = TempDir::new().unwrap();
        let manifest = Manifest::from_str(CONFIG).unwrap();
        let render_opts = RenderOptions {
            groups: vec![Group::Cpp],
            ..Default::default()
        };

        let report = generate(
            &manifest,
            &render_opts,
            GenerateOptions {
                output_dir: temp.path(),
                dry_run: true,
            },
        )
        .unwrap();

        let GenerationResult::Preview(files) = &report.result else {
            panic!("expected a preview");
        };
        assert_eq!(files.len(), 2);
        assert!(files[0].content.contains("yum install -y gcc\n"));
        assert!(!files[0].content.contains("vim"));
        assert!(!temp.path().join("build.sh").exists());
    }

    #[test]
    fn test_errors_abort() {
        let temp = TempDir::new().unwrap();
        let manifest = Manifest::from_str(
            r#"
            [packages.cmake]
            group = "cpp"
            install = "http-archive"
        "#,
        )
        .unwrap();

        let report = generate(
            &manifest,
            &RenderOptions::default(),
            GenerateOptions {
                output_dir: temp.path(),
                dry_run: false,
            },
        )
        .unwrap();

        assert!(matches!(report.result, GenerationResult::Aborted));
        assert!(!report.is_success());
        assert!(!temp.path().join("build.sh").exists());
    }
}
