//! Generate command report data structures.

use std::path::PathBuf;

use langs_codegen::pipeline::Diagnostic;
use langs_core::WriteResult;

use super::{
    GroupSummary,
    output::{Output, Report},
    render_diagnostics, render_groups,
};

/// Report data from script and descriptor generation.
#[derive(Debug)]
pub struct GenerateReport {
    /// Image reference from `[image]`.
    pub image: String,
    pub groups: Vec<GroupSummary>,
    pub diagnostics: Vec<Diagnostic>,
    pub result: GenerationResult,
}

#[derive(Debug)]
pub enum GenerationResult {
    /// Files were written to disk.
    Written(WrittenResult),
    /// Dry-run preview.
    Preview(Vec<PreviewFile>),
    /// The manifest has errors; nothing was generated.
    Aborted,
}

#[derive(Debug)]
pub struct WrittenResult {
    pub output_dir: PathBuf,
    pub files: Vec<(PathBuf, WriteResult)>,
}

/// A file in preview mode.
#[derive(Debug)]
pub struct PreviewFile {
    pub path: String,
    pub content: String,
}

impl GenerateReport {
    pub fn is_success(&self) -> bool {
        !matches!(self.result, GenerationResult::Aborted)
    }
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        render_diagnostics(out, &self.diagnostics);

        match &self.result {
            GenerationResult::Written(written) => {
                out.key_value("Image", &self.image);
                render_groups(out, &self.groups);
                out.newline();
                out.key_value("Generated", &written.output_dir.display().to_string());
                for (path, result) in &written.files {
                    match result {
                        WriteResult::Written => out.added_item(&path.display().to_string()),
                        WriteResult::Skipped => {
                            out.list_item(&format!("{} (unchanged)", path.display()))
                        }
                    }
                }
            }
            GenerationResult::Preview(files) => {
                for file in files {
                    out.divider(&file.path);
                    out.preformatted(&file.content);
                }
                out.divider("Summary");
                out.preformatted(&format!("{} files would be generated", files.len()));
            }
            GenerationResult::Aborted => {
                out.preformatted("Nothing generated: fix the errors above and retry");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use langs_manifest::Group;

    use super::*;
    use crate::reports::testing::RecordingOutput;

    #[test]
    fn test_render_written() {
        let report = GenerateReport {
            image: "langs:latest".to_string(),
            groups: vec![
                GroupSummary {
                    group: Group::Common,
                    packages: 2,
                },
                GroupSummary {
                    group: Group::Golang,
                    packages: 1,
                },
            ],
            diagnostics: Vec::new(),
            result: GenerationResult::Written(WrittenResult {
                output_dir: PathBuf::from("out"),
                files: vec![(PathBuf::from("out/build.sh"), WriteResult::Written)],
            }),
        };
        let mut out = RecordingOutput::default();
        report.render(&mut out);

        assert_eq!(
            out.lines,
            [
                "Image: langs:latest",
                "Groups (2, 3 packages):",
                "1. common (2 packages)",
                "2. golang (1 package)",
                "",
                "Generated: out",
                "+ out/build.sh",
            ]
        );
    }

    #[test]
    fn test_render_preview() {
        let report = GenerateReport {
            image: "langs:latest".to_string(),
            groups: Vec::new(),
            diagnostics: Vec::new(),
            result: GenerationResult::Preview(vec![PreviewFile {
                path: "build.sh".to_string(),
                content: "#!/bin/sh\n".to_string(),
            }]),
        };
        let mut out = RecordingOutput::default();
        report.render(&mut out);

        assert_eq!(out.lines[0], "-- build.sh --");
        assert_eq!(out.lines.last().unwrap(), "1 files would be generated");
    }
}
