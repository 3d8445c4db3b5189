//! Package records and their closed categories.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// A logical toolchain category.
///
/// Groups order and batch package installation. The rendered script installs
/// one group block at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Group {
    /// Base tools every image gets (editors, archivers, VCS).
    Common,
    /// C/C++ compiler toolchain and build tools.
    Cpp,
    Python,
    Java,
    Node,
    Rust,
    Golang,
    /// Remote access daemon.
    Ssh,
    /// Certificates and TLS verification.
    Cert,
}

impl Group {
    /// Every known group, in declaration order.
    pub const ALL: [Group; 9] = [
        Group::Common,
        Group::Cpp,
        Group::Python,
        Group::Java,
        Group::Node,
        Group::Rust,
        Group::Golang,
        Group::Ssh,
        Group::Cert,
    ];

    /// Returns the group identifier as a static string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Group::Common => "common",
            Group::Cpp => "cpp",
            Group::Python => "python",
            Group::Java => "java",
            Group::Node => "node",
            Group::Rust => "rust",
            Group::Golang => "golang",
            Group::Ssh => "ssh",
            Group::Cert => "cert",
        }
    }

    /// Directory name under the install root used by archive packages of this group.
    pub fn home_name(&self) -> &'static str {
        match self {
            Group::Golang => "go",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Group {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "common" => Ok(Group::Common),
            "cpp" | "c++" => Ok(Group::Cpp),
            "python" => Ok(Group::Python),
            "java" => Ok(Group::Java),
            "node" | "nodejs" => Ok(Group::Node),
            "rust" => Ok(Group::Rust),
            "golang" | "go" => Ok(Group::Golang),
            "ssh" => Ok(Group::Ssh),
            "cert" => Ok(Group::Cert),
            _ => Err(format!(
                "unknown group '{}', expected one of: {}",
                s,
                Group::ALL.map(|g| g.as_str()).join(", ")
            )),
        }
    }
}

/// How a package is materialized in the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InstallMethod {
    /// Installed by the distribution package manager.
    PackageManager,
    /// Downloaded over HTTP and extracted from an archive.
    HttpArchive,
    /// Copied from a path.
    FilesystemCopy,
    /// A package file (`.rpm`, `.deb`) installed directly.
    BinaryPackage,
    /// Installed by a hook registered under the package name.
    #[serde(alias = "custom-procedure")]
    Custom,
}

impl InstallMethod {
    /// Returns the method identifier as a static string.
    pub fn as_str(&self) -> &'static str {
        match self {
            InstallMethod::PackageManager => "package-manager",
            InstallMethod::HttpArchive => "http-archive",
            InstallMethod::FilesystemCopy => "filesystem-copy",
            InstallMethod::BinaryPackage => "binary-package",
            InstallMethod::Custom => "custom",
        }
    }

    /// Whether a package with this method cannot be installed without a `url`.
    pub fn requires_url(&self) -> bool {
        matches!(
            self,
            InstallMethod::HttpArchive | InstallMethod::FilesystemCopy | InstallMethod::BinaryPackage
        )
    }
}

impl fmt::Display for InstallMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single installable package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Package {
    /// Package identifier, unique within a manifest.
    pub name: String,
    pub group: Group,
    pub install: InstallMethod,
    pub version: Option<String>,
    /// Source location template with `{name}`/`{version}` placeholders.
    pub url: Option<String>,
    /// Install-home directory name, defaults to the group's [`Group::home_name`].
    pub home: Option<String>,
    /// Move the extracted top-level directory to a versioned install home.
    pub relocate: bool,
}

impl Package {
    pub fn new(name: impl Into<String>, group: Group, install: InstallMethod) -> Self {
        Self {
            name: name.into(),
            group,
            install,
            version: None,
            url: None,
            home: None,
            relocate: true,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_home(mut self, home: impl Into<String>) -> Self {
        self.home = Some(home.into());
        self
    }

    pub fn with_relocate(mut self, relocate: bool) -> Self {
        self.relocate = relocate;
        self
    }

    /// The install-home directory name for this package.
    pub fn home_name(&self) -> &str {
        self.home.as_deref().unwrap_or(self.group.home_name())
    }
}
