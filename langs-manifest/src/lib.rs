//! Manifest parsing for langs.toml files.
//!
//! A manifest carries three things:
//! - [`ImageConfig`] - the `[image]` table describing the produced image
//! - [`Settings`] - the `[generator]` table, passed explicitly to the script renderer
//! - package sections under `[packages.<name>]`, turned into an ordered [`Registry`]

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod manifest;
mod package;
mod registry;
mod settings;

pub use error::{Error, Result, SourceContext};
pub use manifest::{LangsToml, Manifest, PackageSection, ParseContext};
pub use package::{Group, InstallMethod, Package};
pub use registry::{Registry, SkippedSection};
pub use settings::{ImageConfig, Locale, PackageManager, Settings};
