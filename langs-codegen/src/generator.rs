//! Output of a successful pipeline run.

use std::path::{Path, PathBuf};

use eyre::{Result, bail};
use langs_core::{GeneratedFile, WriteResult};
use langs_manifest::ImageConfig;
use tracing::info;

use crate::{
    descriptor::ImageDescriptor,
    pipeline::{CompilationContext, Diagnostic},
    script::{ProvisionScript, SCRIPT_FILE_NAME},
};

/// A file that would be generated, without touching disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewFile {
    /// Path relative to the output directory
    pub path: String,
    pub content: String,
}

/// Files written by [`Generator::generate`].
#[derive(Debug, Default)]
pub struct GenerateResult {
    pub files: Vec<(PathBuf, WriteResult)>,
}

impl GenerateResult {
    pub fn written(&self) -> impl Iterator<Item = &Path> {
        self.files
            .iter()
            .filter(|(_, result)| *result == WriteResult::Written)
            .map(|(path, _)| path.as_path())
    }
}

/// Produces the script and descriptor from a rendered context.
#[derive(Debug)]
pub struct Generator {
    ctx: CompilationContext,
    script: ProvisionScript,
}

impl Generator {
    /// Take a context the pipeline finished with.
    ///
    /// Fails when the context carries errors or nothing was rendered.
    pub fn from_context(mut ctx: CompilationContext) -> Result<Self> {
        if ctx.has_errors() {
            bail!(
                "cannot generate with {} error(s) in the manifest",
                ctx.error_count()
            );
        }
        let Some(script) = ctx.script.take() else {
            bail!("the pipeline did not render a provisioning script");
        };
        Ok(Self { ctx, script })
    }

    pub fn script(&self) -> &ProvisionScript {
        &self.script
    }

    pub fn script_text(&self) -> String {
        self.script.text()
    }

    pub fn image(&self) -> &ImageConfig {
        &self.ctx.manifest.image
    }

    /// Descriptor whose script argument defaults to `script_name`.
    pub fn descriptor(&self, script_name: &str) -> ImageDescriptor<'_> {
        ImageDescriptor::new(&self.ctx.manifest.image, &self.ctx.manifest.generator.locale)
            .script(script_name)
    }

    pub fn descriptor_text(&self, script_name: &str) -> String {
        self.descriptor(script_name).text()
    }

    /// Warnings and notes left by the pipeline.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.ctx.diagnostics
    }

    /// Both files as they would be written by [`Generator::generate`].
    pub fn preview(&self) -> Vec<PreviewFile> {
        vec![
            PreviewFile {
                path: SCRIPT_FILE_NAME.to_string(),
                content: self.script_text(),
            },
            PreviewFile {
                path: "Dockerfile".to_string(),
                content: self.descriptor_text(SCRIPT_FILE_NAME),
            },
        ]
    }

    /// Write `build.sh` and `Dockerfile` into `output_dir`.
    pub fn generate(&self, output_dir: &Path) -> Result<GenerateResult> {
        let descriptor = self.descriptor(SCRIPT_FILE_NAME);
        let outputs: [&dyn GeneratedFile; 2] = [&self.script, &descriptor];

        let mut result = GenerateResult::default();
        for file in outputs {
            let path = file.path(output_dir);
            let written = file.write(output_dir)?;
            info!(path = %path.display(), ?written, "generated file");
            result.files.push((path, written));
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, str::FromStr};

    use langs_manifest::Manifest;
    use tempfile::TempDir;

    use super::*;
    use crate::pipeline::Pipeline;

    const CONFIG: &str = r#"
        [image]
        name = "devbox"

        [packages.vim]
        group = "common"
        install = "package-manager"
    "#;

    fn generator(content: &str) -> Result<Generator> {
        let manifest = Manifest::from_str(content).unwrap();
        Generator::from_context(Pipeline::new().run(manifest)?)
    }

    #[test]
    fn test_preview() {
        let generator = generator(CONFIG).unwrap();
        let files = generator.preview();

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].path, "build.sh");
        assert!(files[0].content.starts_with("#!/bin/sh\n"));
        assert!(files[0].content.contains("yum install -y vim"));
        assert_eq!(files[1].path, "Dockerfile");
        assert!(files[1].content.contains("ARG builder_sh=build.sh\n"));
        assert_eq!(generator.image().reference(), "devbox:latest");
    }

    #[test]
    fn test_generate_writes_both_files() {
        let temp = TempDir::new().unwrap();
        let generator = generator(CONFIG).unwrap();

        let result = generator.generate(temp.path()).unwrap();

        assert_eq!(result.written().count(), 2);
        assert_eq!(
            fs::read_to_string(temp.path().join("build.sh")).unwrap(),
            generator.script_text()
        );
        assert!(temp.path().join("Dockerfile").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_script_is_executable() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        generator(CONFIG).unwrap().generate(temp.path()).unwrap();

        let mode = fs::metadata(temp.path().join("build.sh"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o111, 0o111);
    }

    #[test]
    fn test_errors_block_generation() {
        let err = generator(
            r#"
            [packages.cmake]
            group = "cpp"
            install = "http-archive"
        "#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("1 error(s)"));
    }

    #[test]
    fn test_validate_only_has_no_script() {
        let manifest = Manifest::from_str(CONFIG).unwrap();
        let ctx = Pipeline::new().validate_only().run(manifest).unwrap();

        assert!(Generator::from_context(ctx).is_err());
    }
}
