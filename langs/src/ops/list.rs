//! List operation - the registry as groups of packages.

use std::path::Path;

use langs_manifest::{Manifest, Registry};

use crate::reports::{GroupListing, ListReport, SkippedListing};

/// Execute the list operation.
pub fn list(manifest: &Manifest, config_path: &Path) -> ListReport {
    let registry = Registry::from_manifest(manifest);

    let groups = registry
        .iter()
        .map(|(group, packages)| GroupListing {
            group,
            packages: packages.to_vec(),
        })
        .collect();
    let skipped = registry
        .skipped()
        .iter()
        .map(|s| SkippedListing {
            name: s.name.clone(),
            reason: s.reason(),
        })
        .collect();

    ListReport {
        config_path: config_path.to_path_buf(),
        image: manifest.image.reference(),
        groups,
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use langs_manifest::Group;

    use super::*;

    #[test]
    fn test_list_keeps_document_order() {
        let manifest = Manifest::from_str(
            r#"
            [packages.openssh]
            group = "ssh"
            install = "package-manager"

            [packages.vim]
            group = "common"
            install = "package-manager"

            [packages.git]
            group = "common"
            install = "package-manager"

            [packages.rexx]
            install = "package-manager"
        "#,
        )
        .unwrap();

        let report = list(&manifest, Path::new("langs.toml"));
        let groups: Vec<_> = report.groups.iter().map(|g| g.group).collect();

        assert_eq!(groups, [Group::Ssh, Group::Common]);
        assert_eq!(report.groups[1].packages[1].name, "git");
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].name, "rexx");
    }
}
