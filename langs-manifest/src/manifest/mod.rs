//! Manifest types and parsing for langs.toml files.

mod file;
mod parse;
mod validate;

use indexmap::IndexMap;
use serde::Deserialize;
use toml::Spanned;

pub use file::LangsToml;
pub use validate::ParseContext;

use crate::{ImageConfig, InstallMethod, Settings};

/// Root manifest for langs.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Image descriptor settings
    #[serde(default)]
    pub image: ImageConfig,

    /// Script generator settings
    #[serde(default)]
    pub generator: Settings,

    /// Package sections keyed by package name, in document order
    #[serde(default)]
    pub packages: IndexMap<String, PackageSection>,
}

/// A raw `[packages.<name>]` section.
///
/// The group is kept as a spanned string so sections naming an unknown
/// group can be skipped (or reported with a location) instead of failing
/// the whole parse.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageSection {
    pub group: Option<Spanned<String>>,
    pub install: InstallMethod,
    pub version: Option<String>,
    pub url: Option<String>,
    pub home: Option<String>,
    #[serde(default = "default_true")]
    pub relocate: bool,
}

fn default_true() -> bool {
    true
}
