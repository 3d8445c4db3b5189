//! Snapshot tests for script and descriptor generation.
//!
//! Run `cargo insta review` to update snapshots when making intentional changes.

use std::str::FromStr;

use langs_codegen::{Generator, pipeline::Pipeline};
use langs_manifest::Manifest;

/// Run the full pipeline and return the previewed files by path.
fn generate_files(config: &str) -> Vec<(String, String)> {
    let manifest = Manifest::from_str(config).expect("Failed to parse manifest");
    let ctx = Pipeline::new().run(manifest).expect("Pipeline failed");
    let generator = Generator::from_context(ctx).expect("Manifest has errors");

    generator
        .preview()
        .into_iter()
        .map(|f| (f.path, f.content))
        .collect()
}

fn get_file<'a>(files: &'a [(String, String)], path: &str) -> Option<&'a str> {
    files
        .iter()
        .find(|(p, _)| p == path)
        .map(|(_, c)| c.as_str())
}

const COMMON_ONLY: &str = r#"
    [packages.vim]
    group = "common"
    install = "package-manager"

    [packages.git]
    group = "common"
    install = "package-manager"
"#;

#[test]
fn test_common_only_script() {
    let files = generate_files(COMMON_ONLY);
    let script = get_file(&files, "build.sh").expect("build.sh not found");
    insta::assert_snapshot!("common_only_script", script);
}

#[test]
fn test_default_descriptor() {
    let files = generate_files(COMMON_ONLY);
    let descriptor = get_file(&files, "Dockerfile").expect("Dockerfile not found");
    insta::assert_snapshot!("default_descriptor", descriptor);
}

#[test]
fn test_descriptor_with_maintainer_and_locale() {
    let files = generate_files(
        r#"
        [image]
        base = "centos:centos8"
        maintainer = "ops@example.org"
        ports = [22]
        volumes = []
        prune_systemd = false
        motd = false

        [generator]
        locale = "zh_CN.UTF-8"
        "#,
    );
    let descriptor = get_file(&files, "Dockerfile").expect("Dockerfile not found");
    insta::assert_snapshot!("descriptor_with_maintainer_and_locale", descriptor);
}
