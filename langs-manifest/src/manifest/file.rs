use std::path::{Path, PathBuf};

use super::{Manifest, ParseContext};
use crate::{Registry, Result};

/// Represents a langs.toml file with both raw content and parsed manifest.
pub struct LangsToml {
    path: PathBuf,
    content: String,
    manifest: Manifest,
}

impl LangsToml {
    /// Open and parse a langs.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(crate::Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        let manifest = Manifest::from_str_with_filename(&content, &filename)?;

        Ok(Self {
            path,
            content,
            manifest,
        })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the raw content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the parsed manifest.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Build the package registry.
    ///
    /// In strict mode a section without a recognized group is an error
    /// pointing at the offending section; otherwise it is skipped and
    /// listed in [`Registry::skipped`].
    pub fn registry(&self, strict: bool) -> Result<Registry> {
        let registry = Registry::from_manifest(&self.manifest);
        if strict {
            let ctx = ParseContext::new(&self.content, &self.path.display().to_string());
            registry.ensure_no_skipped(&ctx)?;
        }
        Ok(registry)
    }
}
