//! End-to-end generation from langs.toml content.

use std::str::FromStr;

use langs_codegen::{Generator, pipeline::Pipeline};
use langs_manifest::{Group, Manifest};

const CONFIG: &str = r#"
    [generator]
    install_root = "/opt"

    [packages.gcc]
    group = "cpp"
    install = "package-manager"

    [packages.openssh-server]
    group = "ssh"
    install = "package-manager"

    [packages.golang]
    group = "golang"
    install = "http-archive"
    version = "1.14"
    url = "https://example.org/go{version}.tar.gz"
    home = "go"

    [packages.vim]
    group = "common"
    install = "package-manager"
"#;

fn script(config: &str, pipeline: Pipeline) -> String {
    let manifest = Manifest::from_str(config).expect("Failed to parse manifest");
    let ctx = pipeline.run(manifest).expect("Pipeline failed");
    Generator::from_context(ctx)
        .expect("Manifest has errors")
        .script_text()
}

fn position(text: &str, needle: &str) -> usize {
    text.find(needle)
        .unwrap_or_else(|| panic!("{:?} not found in script", needle))
}

#[test]
fn test_golang_archive_install() {
    let text = script(CONFIG, Pipeline::new());

    assert!(text.contains("\"https://example.org/go1.14.tar.gz\""));
    assert!(text.contains(
        "tar -zxf ${ARCHIVES_ROOT}go1.14.tar.gz -C ${BUILD_ROOT}golang.extract\n"
    ));
    assert!(text.contains("mv ${BUILD_ROOT}golang.extract/* /opt/go/1.14\n"));
    assert!(text.contains("export PATH=${PATH}:/opt/go/1.14/bin\n"));
    assert!(text.contains("export GOPATH=${HOME}/gowork\n"));
}

#[test]
fn test_groups_render_in_requested_order() {
    let pipeline = Pipeline::new().select(vec![Group::Ssh, Group::Common, Group::Cpp]);
    let text = script(CONFIG, pipeline);

    let ssh = position(&text, "# ssh packages");
    let common = position(&text, "# common packages");
    let cpp = position(&text, "# cpp packages");
    assert!(ssh < common && common < cpp);
    assert!(!text.contains("golang"));
}

#[test]
fn test_generation_is_deterministic() {
    let first = script(CONFIG, Pipeline::new());
    let second = script(CONFIG, Pipeline::new());

    assert_eq!(first, second);
}

#[test]
fn test_header_and_trailer_surround_groups() {
    let text = script(CONFIG, Pipeline::new());

    assert!(text.starts_with("#!/bin/sh\n"));
    assert!(position(&text, "# locale") < position(&text, "# common packages"));
    assert!(position(&text, "# golang 1.14") < position(&text, "# cleanup"));
    assert!(text.ends_with("echo \"Finish all\"\n"));
}

#[test]
fn test_mirror_rewrites_downloads() {
    let config = CONFIG.replace(
        "install_root = \"/opt\"",
        "install_root = \"/opt\"\nmirror = \"http://mirror.local\"",
    );
    let text = script(&config, Pipeline::new());

    assert!(text.contains("\"http://mirror.local/golang/go1.14.tar.gz\""));
    assert!(!text.contains("example.org"));
}

#[test]
fn test_unknown_group_is_skipped_unless_strict() {
    let config = format!(
        "{}\n[packages.cobol]\ngroup = \"mainframe\"\ninstall = \"package-manager\"\n",
        CONFIG
    );

    let manifest = Manifest::from_str(&config).unwrap();
    let ctx = Pipeline::new().run(manifest).unwrap();
    assert!(!ctx.has_errors());
    assert_eq!(ctx.warning_count(), 1);
    assert!(!ctx.script.as_ref().unwrap().text().contains("cobol"));

    let manifest = Manifest::from_str(&config).unwrap();
    let ctx = Pipeline::new().strict(true).run(manifest).unwrap();
    assert!(ctx.has_errors());
    assert!(ctx.script.is_none());
}

#[test]
fn test_unknown_archive_format_stops_before_render() {
    let config = r#"
        [packages.tool]
        group = "common"
        install = "http-archive"
        url = "https://h.org/tool.tgz"
    "#;

    let manifest = Manifest::from_str(config).unwrap();
    let ctx = Pipeline::new().run(manifest).unwrap();

    let lints: Vec<_> = ctx.errors().filter_map(|d| d.lint).collect();
    assert_eq!(lints, ["archive-format"]);
    assert!(ctx.script.is_none());
}
