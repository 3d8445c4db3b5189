//! Provisioning script assembly.

use std::path::{Path, PathBuf};

use langs_core::{FileRules, GeneratedFile};
use langs_manifest::{Group, ImageConfig, Package, PackageManager, Settings};
use tracing::debug;

use crate::{
    builder::{Fragment, ScriptBuilder, join_fragments},
    error::Result,
    hooks::HookRegistry,
    render::Renderer,
    shell::{self, BUILD_ROOT},
};

/// Default file name of the script when written to disk.
pub const SCRIPT_FILE_NAME: &str = "build.sh";

/// The full provisioning script as an ordered list of fragments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionScript {
    fragments: Vec<Fragment>,
}

impl ProvisionScript {
    /// Assemble header, group blocks in the given order and trailer.
    pub fn assemble(
        settings: &Settings,
        image: &ImageConfig,
        hooks: &HookRegistry,
        groups: &[(Group, &[Package])],
    ) -> Result<Self> {
        let renderer = Renderer::new(settings, hooks);
        let mut fragments = header(settings);

        for (group, packages) in groups {
            let rendered = renderer.render_group(*group, packages)?;
            debug!(%group, fragments = rendered.len(), "rendered group");
            fragments.extend(rendered);
        }

        fragments.extend(trailer(settings, image));
        Ok(Self { fragments })
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// The script text.
    pub fn text(&self) -> String {
        join_fragments(&self.fragments)
    }
}

impl GeneratedFile for ProvisionScript {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(SCRIPT_FILE_NAME)
    }

    fn rules(&self) -> FileRules {
        FileRules::executable()
    }

    fn render(&self) -> String {
        self.text()
    }
}

/// Assemble the provisioning script text for the selected groups.
pub fn assemble_script(
    settings: &Settings,
    image: &ImageConfig,
    hooks: &HookRegistry,
    groups: &[(Group, &[Package])],
) -> Result<String> {
    Ok(ProvisionScript::assemble(settings, image, hooks, groups)?.text())
}

fn header(settings: &Settings) -> Vec<Fragment> {
    let package_manager = settings.package_manager;

    let prelude = ScriptBuilder::new()
        .line("#!/bin/sh")
        .blank()
        .line("BASH_PROFILE=\"${HOME}/.bashrc\"")
        .line(&format!("BUILD_ROOT=\"{}\"", settings.build_root()))
        .line(&format!("ARCHIVES_ROOT=\"{}archives/\"", BUILD_ROOT))
        .blank()
        .line("mkdir -p ${ARCHIVES_ROOT}")
        .line("cd ${BUILD_ROOT}")
        .build();

    let repository = ScriptBuilder::new()
        .comment("package repository")
        .when_some(settings.repo_file.as_deref(), |b, repo| {
            b.line(&repo_file_command(package_manager, repo))
        })
        .line(package_manager.refresh_command())
        .build();

    let locale = settings.locale.clone();
    let locale_setup = ScriptBuilder::new()
        .comment("locale")
        .line(package_manager.locale_data_command())
        .line(&format!(
            "localedef -c -f {} -i {} {}",
            locale.charset(),
            locale.territory(),
            locale.name()
        ))
        .line(&format!("echo \"LANG={}\" >> /etc/locale.conf", locale.name()));
    let locale_setup = shell::append_profile(
        locale_setup,
        "locale",
        [
            format!("export LANG={}", locale.name()),
            format!("export LANGUAGE={}", locale.language()),
            format!("export LC_ALL={}", locale.name()),
        ],
    )
    .build();

    vec![
        Fragment::new("prelude", prelude),
        Fragment::new("repository", repository),
        Fragment::new("locale", locale_setup),
    ]
}

fn repo_file_command(package_manager: PackageManager, repo: &str) -> String {
    match package_manager {
        PackageManager::Yum | PackageManager::Dnf => format!(
            "rm -rf /etc/yum.repos.d/* && curl -ks -o /etc/yum.repos.d/langs.repo {}",
            shell::quote(repo)
        ),
        PackageManager::Apt => format!("curl -ks -o /etc/apt/sources.list {}", shell::quote(repo)),
    }
}

fn trailer(settings: &Settings, image: &ImageConfig) -> Vec<Fragment> {
    let entrypoint = ScriptBuilder::new()
        .comment("entry point")
        .heredoc(
            &format!("cat > {}", image.entrypoint),
            true,
            ScriptBuilder::new()
                .line("#!/bin/sh")
                .when(image.motd, |b| b.line("cat /etc/motd"))
                .line("exec /usr/sbin/init")
                .build()
                .lines(),
        )
        .line(&format!("chmod +x {}", image.entrypoint))
        .build();

    let cleanup = ScriptBuilder::new()
        .comment("cleanup")
        .line("cd /")
        .line(&format!("rm -rf {}", BUILD_ROOT))
        .line(settings.package_manager.clean_command())
        .build();

    vec![
        Fragment::new("entry point", entrypoint),
        Fragment::new("cleanup", cleanup),
        Fragment::new("status", "echo \"Finish all\"\n"),
    ]
}
