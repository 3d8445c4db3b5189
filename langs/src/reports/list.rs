//! List command report data structures.

use std::path::PathBuf;

use langs_manifest::{Group, Package};
use serde::Serialize;

use super::output::{Output, Report};

/// The registry of a langs.toml, grouped for display or `--json`.
#[derive(Debug, Serialize)]
pub struct ListReport {
    pub config_path: PathBuf,
    pub image: String,
    pub groups: Vec<GroupListing>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedListing>,
}

#[derive(Debug, Serialize)]
pub struct GroupListing {
    pub group: Group,
    pub packages: Vec<Package>,
}

#[derive(Debug, Serialize)]
pub struct SkippedListing {
    pub name: String,
    pub reason: String,
}

impl Report for ListReport {
    fn render(&self, out: &mut dyn Output) {
        if self.groups.is_empty() {
            out.preformatted("No packages defined");
        }

        for listing in &self.groups {
            out.section(listing.group.as_str());
            for package in &listing.packages {
                let mut line = package.name.clone();
                if let Some(version) = &package.version {
                    line.push_str(&format!(" {}", version));
                }
                line.push_str(&format!(" [{}]", package.install));
                out.list_item(&line);
            }
        }

        for skipped in &self.skipped {
            out.warning(&format!("{}, section skipped", skipped.reason));
        }
    }
}
