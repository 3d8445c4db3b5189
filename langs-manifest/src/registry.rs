//! Ordered package registry.

use std::{ops::Range, str::FromStr};

use indexmap::IndexMap;
use miette::SourceSpan;

use crate::{Group, Manifest, Package, ParseContext, Result};

/// A package section that was left out of the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedSection {
    /// Package name of the section.
    pub name: String,
    /// The group value, if the section had one.
    pub group: Option<String>,
    /// Location of the group value in the source.
    pub span: Option<Range<usize>>,
}

impl SkippedSection {
    /// Human-readable reason the section was skipped.
    pub fn reason(&self) -> String {
        match &self.group {
            Some(group) => format!("package '{}' has unknown group '{}'", self.name, group),
            None => format!("package '{}' has no 'group'", self.name),
        }
    }
}

/// Packages bucketed by group.
///
/// Group order is the order in which each group first appears in the
/// configuration; package order within a group is document order. Nothing
/// is ever sorted, since installation order must be reproducible.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    groups: IndexMap<Group, Vec<Package>>,
    skipped: Vec<SkippedSection>,
}

impl Registry {
    /// Parse configuration text and build a registry.
    ///
    /// Sections whose group is missing or unknown are skipped, see
    /// [`Registry::skipped`].
    pub fn load(config: &str) -> Result<Self> {
        Self::load_with_filename(config, "langs.toml")
    }

    /// Parse configuration text with a custom filename for error reporting.
    pub fn load_with_filename(config: &str, filename: &str) -> Result<Self> {
        let manifest = Manifest::from_str_with_filename(config, filename)?;
        Ok(Self::from_manifest(&manifest))
    }

    /// Like [`Registry::load`], but a section without a recognized group is an error.
    pub fn load_strict(config: &str) -> Result<Self> {
        let registry = Self::load(config)?;
        registry.ensure_no_skipped(&ParseContext::new(config, "langs.toml"))?;
        Ok(registry)
    }

    /// Build a registry from an already parsed manifest.
    pub fn from_manifest(manifest: &Manifest) -> Self {
        let mut registry = Self::default();

        for (name, section) in &manifest.packages {
            let group = section
                .group
                .as_ref()
                .and_then(|g| Group::from_str(g.get_ref()).ok());

            match group {
                Some(group) => registry.push(Package {
                    name: name.clone(),
                    group,
                    install: section.install,
                    version: section.version.clone(),
                    url: section.url.clone(),
                    home: section.home.clone(),
                    relocate: section.relocate,
                }),
                None => registry.skipped.push(SkippedSection {
                    name: name.clone(),
                    group: section.group.as_ref().map(|g| g.get_ref().clone()),
                    span: section.group.as_ref().map(|g| g.span()),
                }),
            }
        }

        registry
    }

    /// Add a package at the end of its group.
    pub fn push(&mut self, package: Package) {
        self.groups.entry(package.group).or_default().push(package);
    }

    /// Fail on the first skipped section.
    pub fn ensure_no_skipped(&self, ctx: &ParseContext) -> Result<()> {
        match self.skipped.first() {
            Some(section) => {
                let span = section
                    .span
                    .clone()
                    .map(SourceSpan::from)
                    .or_else(|| ctx.find_span(&section.name));
                Err(ctx.source_context().unknown_group_error(
                    &section.name,
                    section.group.clone(),
                    span,
                ))
            }
            None => Ok(()),
        }
    }

    /// Groups in configuration order.
    pub fn groups(&self) -> impl Iterator<Item = Group> + '_ {
        self.groups.keys().copied()
    }

    /// Packages of a group, in configuration order.
    pub fn packages(&self, group: Group) -> &[Package] {
        self.groups.get(&group).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate over groups and their packages in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = (Group, &[Package])> {
        self.groups.iter().map(|(g, p)| (*g, p.as_slice()))
    }

    /// Look up a package by name.
    pub fn get(&self, name: &str) -> Option<&Package> {
        self.groups
            .values()
            .flat_map(|packages| packages.iter())
            .find(|p| p.name == name)
    }

    /// Total number of packages.
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sections that were left out because of a missing or unknown group.
    pub fn skipped(&self) -> &[SkippedSection] {
        &self.skipped
    }

    /// Select groups for rendering.
    ///
    /// An empty request selects every group in configuration order.
    /// Otherwise the requested order wins; duplicates are dropped and
    /// requested groups with no packages yield an empty slice.
    pub fn select(&self, requested: &[Group]) -> Vec<(Group, &[Package])> {
        if requested.is_empty() {
            return self.iter().collect();
        }

        let mut selected: Vec<(Group, &[Package])> = Vec::with_capacity(requested.len());
        for group in requested {
            if selected.iter().any(|(g, _)| g == group) {
                continue;
            }
            selected.push((*group, self.packages(*group)));
        }
        selected
    }
}
