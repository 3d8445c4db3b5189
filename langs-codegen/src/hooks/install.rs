//! Built-in install hooks for toolchains that need more than an unpack.

use langs_manifest::Package;
use tracing::debug;

use super::HookContext;
use crate::{
    archive::ArchiveFormat,
    builder::ScriptBuilder,
    error::{GenerateError, Result},
    shell::{self, ARCHIVES_ROOT, BUILD_ROOT},
    url,
};

const RUSTUP_INSTALLER: &str = "https://sh.rustup.rs";

/// Build an interpreter from a source tarball with `configure && make install`.
pub(super) fn python_source_build(ctx: &HookContext<'_>, package: &Package) -> Result<String> {
    let location = ctx.resolve_url(package)?;
    let format =
        ArchiveFormat::from_url(&location).ok_or_else(|| GenerateError::UnknownArchiveFormat {
            package: package.name.clone(),
            url: location.clone(),
        })?;
    let file = url::file_name(&location)
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}{}", package.name, format.suffix()));
    let source_dir = format!("{}{}", BUILD_ROOT, format.strip_suffix(&file));
    let prefix = ctx.install_home(package);
    let archive = format!("{}{}", ARCHIVES_ROOT, file);

    debug!(package = %package.name, %prefix, "rendering source build");

    let builder = ScriptBuilder::new().comment(&format!("{} (source build)", package.name));
    let builder = shell::download(builder, &location, &file)
        .each(format.extract_commands(&archive, BUILD_ROOT), |b, cmd| {
            b.line(&cmd)
        })
        .line(&format!("cd {}", source_dir))
        .line(&format!(
            "./configure --prefix={} --enable-shared --with-ssl",
            prefix
        ))
        .line("make")
        .line("make install")
        .line("cd - > /dev/null");

    let title = match &package.version {
        Some(version) => format!("{} {}", package.name, version),
        None => package.name.clone(),
    };
    let builder = shell::append_profile(builder, &title, shell::prefix_exports(&prefix)).line(
        &format!(
            "LD_LIBRARY_PATH={prefix}/lib {prefix}/bin/python3 -m pip install wheel",
            prefix = prefix
        ),
    );

    Ok(builder.build())
}

/// Install a Rust toolchain with the rustup installer.
///
/// `version` selects the default toolchain. With `rustup_mirror` set, both
/// rustup and cargo are pointed at the mirror.
pub(super) fn rustup(ctx: &HookContext<'_>, package: &Package) -> Result<String> {
    let settings = ctx.settings();
    let installer = match &package.url {
        Some(_) => ctx.resolve_url(package)?,
        None => RUSTUP_INSTALLER.to_string(),
    };
    let toolchain = package
        .version
        .as_deref()
        .map(|v| format!(" --default-toolchain {}", v))
        .unwrap_or_default();
    let mirror = settings.rustup_mirror.as_deref().filter(|m| !m.is_empty());

    let mut exports = vec!["export PATH=${PATH}:${HOME}/.cargo/bin".to_string()];
    let builder = ScriptBuilder::new()
        .comment(&package.name)
        .when_some(mirror, |b, host| {
            b.line(&format!(
                "export RUSTUP_DIST_SERVER=https://{}/rust-static",
                host
            ))
            .line("export RUSTUP_UPDATE_ROOT=${RUSTUP_DIST_SERVER}/rustup")
        })
        .line(&format!(
            "curl -sSf {} | sh -s -- -y{}",
            shell::quote(&installer),
            toolchain
        ));

    if let Some(host) = mirror {
        exports.push(format!(
            "export RUSTUP_DIST_SERVER=https://{}/rust-static",
            host
        ));
        exports.push("export RUSTUP_UPDATE_ROOT=${RUSTUP_DIST_SERVER}/rustup".to_string());
    }
    let builder = shell::append_profile(builder, "rust", exports).when_some(mirror, |b, host| {
        b.line("mkdir -p ${HOME}/.cargo").heredoc(
            "cat >> ${HOME}/.cargo/config",
            true,
            [
                "[source.crates-io]".to_string(),
                "replace-with = 'mirror'".to_string(),
                String::new(),
                "[source.mirror]".to_string(),
                format!("registry = \"https://{}/crates.io-index\"", host),
            ],
        )
    });

    Ok(builder.build())
}
