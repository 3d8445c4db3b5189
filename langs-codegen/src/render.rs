//! Package and group rendering.

use langs_manifest::{Group, InstallMethod, Package, Settings};
use tracing::debug;

use crate::{
    archive::ArchiveFormat,
    builder::{Fragment, ScriptBuilder},
    error::{GenerateError, Result},
    hooks::{HookContext, HookRegistry},
    shell::{self, ARCHIVES_ROOT, BUILD_ROOT},
    url,
};

/// Renders packages and group epilogues into script fragments.
///
/// Settings and hooks are fixed at construction; rendering is a pure
/// function of the packages passed in.
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'a> {
    ctx: HookContext<'a>,
    hooks: &'a HookRegistry,
}

impl<'a> Renderer<'a> {
    pub fn new(settings: &'a Settings, hooks: &'a HookRegistry) -> Self {
        Self {
            ctx: HookContext::new(settings),
            hooks,
        }
    }

    pub fn settings(&self) -> &'a Settings {
        self.ctx.settings()
    }

    /// Render one group: its install steps in order, then its epilogue.
    ///
    /// All package-manager records of the group are installed by a single
    /// batch placed where the first of them appears.
    pub fn render_group(&self, group: Group, packages: &[Package]) -> Result<Vec<Fragment>> {
        let mut fragments = Vec::new();
        let mut batched = false;

        for package in packages {
            if package.install == InstallMethod::PackageManager {
                if !batched {
                    let batch: Vec<&Package> = packages
                        .iter()
                        .filter(|p| p.install == InstallMethod::PackageManager)
                        .collect();
                    fragments.extend(self.render_package_batch(group, &batch)?);
                    batched = true;
                }
                continue;
            }
            fragments.extend(self.render_install_step(package)?);
        }

        fragments.extend(self.render_group_epilogue(group, packages));
        Ok(fragments)
    }

    /// Render the install step for a single package.
    ///
    /// A package-manager record renders as a batch of one; use
    /// [`Renderer::render_group`] to batch a whole group. Returns `None`
    /// for a custom package with no registered hook.
    pub fn render_install_step(&self, package: &Package) -> Result<Option<Fragment>> {
        let text = match package.install {
            InstallMethod::PackageManager => {
                return self.render_package_batch(package.group, &[package]);
            }
            InstallMethod::HttpArchive => self.http_archive(package)?,
            InstallMethod::FilesystemCopy => self.filesystem_copy(package)?,
            InstallMethod::BinaryPackage => self.binary_package(package)?,
            InstallMethod::Custom => match self.hooks.install(&package.name) {
                Some(hook) => hook(&self.ctx, package)?,
                None => {
                    debug!(package = %package.name, "no install hook, skipping");
                    return Ok(None);
                }
            },
        };

        debug!(package = %package.name, install = %package.install, "rendered install step");
        Ok(Some(Fragment::new(package.name.clone(), text)))
    }

    /// One package-manager invocation for `packages`.
    ///
    /// Entries are version-qualified names, or the resolved URL for records
    /// that carry one.
    pub fn render_package_batch(
        &self,
        group: Group,
        packages: &[&Package],
    ) -> Result<Option<Fragment>> {
        if packages.is_empty() {
            return Ok(None);
        }

        let package_manager = self.settings().package_manager;
        let entries = packages
            .iter()
            .map(|p| match &p.url {
                Some(_) => self.ctx.resolve_url(p),
                None => Ok(package_manager.qualify(&p.name, p.version.as_deref())),
            })
            .collect::<Result<Vec<_>>>()?;

        let text = ScriptBuilder::new()
            .comment(&format!("{} packages", group))
            .line(&format!(
                "{} {}",
                package_manager.install_command(),
                entries.join(" ")
            ))
            .build();

        debug!(%group, count = packages.len(), "rendered package batch");
        Ok(Some(Fragment::new(format!("{} packages", group), text)))
    }

    /// The group's epilogue, if a hook is registered and has something to say.
    pub fn render_group_epilogue(&self, group: Group, packages: &[Package]) -> Option<Fragment> {
        let hook = self.hooks.epilogue(group)?;
        let text = hook(&self.ctx, packages)?;
        debug!(%group, "rendered group epilogue");
        Some(Fragment::new(format!("{} epilogue", group), text))
    }

    /// Where an archive or copied package ends up.
    pub fn install_home(&self, package: &Package) -> String {
        self.ctx.install_home(package)
    }

    fn http_archive(&self, package: &Package) -> Result<String> {
        let location = self.ctx.resolve_url(package)?;
        let format = ArchiveFormat::from_url(&location).ok_or_else(|| {
            GenerateError::UnknownArchiveFormat {
                package: package.name.clone(),
                url: location.clone(),
            }
        })?;
        let file = url::file_name(&location)
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}{}", package.name, format.suffix()));
        let archive = format!("{}{}", ARCHIVES_ROOT, file);
        let scratch = format!("{}{}.extract", BUILD_ROOT, package.name);
        let prefix = self.install_home(package);

        let builder = ScriptBuilder::new().comment(&title(package));
        let builder = shell::download(builder, &location, &file)
            .line(&format!("rm -rf {scratch} && mkdir -p {scratch}"))
            .each(format.extract_commands(&archive, &scratch), |b, cmd| {
                b.line(&cmd)
            });

        let builder = if package.relocate {
            let parent = parent_dir(&prefix);
            builder
                .line(&format!("mkdir -p {}", parent))
                .line(&format!("rm -rf {}", prefix))
                .line(&format!("mv {}/* {}", scratch, prefix))
        } else {
            builder
                .line(&format!("mkdir -p {}", prefix))
                .line(&format!("cp -a {}/. {}/", scratch, prefix))
        };

        let builder = shell::append_profile(builder, &title(package), shell::prefix_exports(&prefix))
            .line(&format!("rm -rf {}", scratch));

        Ok(builder.build())
    }

    fn filesystem_copy(&self, package: &Package) -> Result<String> {
        let source = self.ctx.resolve_url(package)?;
        let prefix = self.install_home(package);

        Ok(ScriptBuilder::new()
            .comment(&title(package))
            .line(&format!("mkdir -p {}", prefix))
            .line(&format!("cp -a {} {}/", shell::quote(&source), prefix))
            .build())
    }

    fn binary_package(&self, package: &Package) -> Result<String> {
        let location = self.ctx.resolve_url(package)?;
        let file = url::file_name(&location)
            .map(str::to_string)
            .unwrap_or_else(|| package.name.clone());
        let install = self.settings().package_manager.local_install_command();

        let builder = ScriptBuilder::new().comment(&title(package));
        Ok(shell::download(builder, &location, &file)
            .line(&format!("{} {}{}", install, ARCHIVES_ROOT, file))
            .build())
    }
}

fn title(package: &Package) -> String {
    match &package.version {
        Some(version) => format!("{} {}", package.name, version),
        None => package.name.clone(),
    }
}

fn parent_dir(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) => "/",
        Some(i) => &path[..i],
        None => path,
    }
}
