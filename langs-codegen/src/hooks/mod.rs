//! Install and epilogue hooks.
//!
//! A `custom` package is rendered by the install hook registered under its
//! name. After a group's packages, the epilogue hook registered for the
//! group (if any) adds group-wide setup. Lookups go through an explicit
//! [`HookRegistry`]; a missing hook renders nothing.

mod epilogue;
mod install;

use std::fmt;

use indexmap::IndexMap;
use langs_manifest::{Group, Package, Settings};

use crate::{error::Result, url};

/// Renders a `custom` package.
pub type InstallHook = fn(&HookContext<'_>, &Package) -> Result<String>;

/// Renders group-wide setup after the group's packages.
pub type EpilogueHook = fn(&HookContext<'_>, &[Package]) -> Option<String>;

/// What a hook gets to see while rendering.
#[derive(Debug, Clone, Copy)]
pub struct HookContext<'a> {
    settings: &'a Settings,
}

impl<'a> HookContext<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &'a Settings {
        self.settings
    }

    /// `{install_root}/{home}[/{version}]` for `package`.
    pub fn install_home(&self, package: &Package) -> String {
        let root = self.settings.install_root();
        let base = if root == "/" {
            format!("/{}", package.home_name())
        } else {
            format!("{}/{}", root, package.home_name())
        };
        match &package.version {
            Some(version) => format!("{}/{}", base, version),
            None => base,
        }
    }

    /// The package's download location, mirrored when a mirror is configured.
    pub fn resolve_url(&self, package: &Package) -> Result<String> {
        url::resolve_url(package, self.settings.mirror())
    }
}

/// Lookup table from package name to install hook and from group to
/// epilogue hook.
#[derive(Clone, Default)]
pub struct HookRegistry {
    install: IndexMap<String, InstallHook>,
    epilogue: IndexMap<Group, EpilogueHook>,
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookRegistry")
            .field("install", &self.install.keys().collect::<Vec<_>>())
            .field("epilogue", &self.epilogue.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl HookRegistry {
    /// A registry with no hooks.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A registry with the built-in hooks.
    pub fn builtin() -> Self {
        Self::empty()
            .with_install("python", install::python_source_build)
            .with_install("rustup", install::rustup)
            .with_epilogue(Group::Python, epilogue::python)
            .with_epilogue(Group::Java, epilogue::java)
            .with_epilogue(Group::Golang, epilogue::golang)
            .with_epilogue(Group::Ssh, epilogue::ssh)
            .with_epilogue(Group::Cert, epilogue::cert)
    }

    /// Register (or replace) the install hook for a package name.
    pub fn with_install(mut self, name: impl Into<String>, hook: InstallHook) -> Self {
        self.install.insert(name.into(), hook);
        self
    }

    /// Register (or replace) the epilogue hook for a group.
    pub fn with_epilogue(mut self, group: Group, hook: EpilogueHook) -> Self {
        self.epilogue.insert(group, hook);
        self
    }

    pub fn install(&self, name: &str) -> Option<InstallHook> {
        self.install.get(name).copied()
    }

    pub fn epilogue(&self, group: Group) -> Option<EpilogueHook> {
        self.epilogue.get(&group).copied()
    }

    pub fn has_install(&self, name: &str) -> bool {
        self.install.contains_key(name)
    }

    /// Names with an install hook, in registration order.
    pub fn install_names(&self) -> impl Iterator<Item = &str> {
        self.install.keys().map(String::as_str)
    }

    /// Groups with an epilogue hook, in registration order.
    pub fn epilogue_groups(&self) -> impl Iterator<Item = Group> + '_ {
        self.epilogue.keys().copied()
    }
}
