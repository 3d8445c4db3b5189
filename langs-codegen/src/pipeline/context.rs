//! Compilation context passed through pipeline phases.

use langs_manifest::{Group, Manifest, Package, Registry};

use super::diagnostic::{Diagnostic, Severity};
use crate::{hooks::HookRegistry, script::ProvisionScript};

/// Context passed through all pipeline phases.
///
/// Carries the manifest, the registry built from it, the selection the
/// caller asked for, and whatever the phases produce.
#[derive(Debug)]
pub struct CompilationContext {
    /// The manifest being generated from.
    pub manifest: Manifest,
    /// Packages bucketed by group (built from the manifest).
    pub registry: Registry,
    /// Requested groups, in requested order. Empty means every group.
    pub groups: Vec<Group>,
    /// Treat skipped package sections as errors.
    pub strict: bool,
    /// Install and epilogue hooks used while rendering.
    pub hooks: HookRegistry,
    /// The provisioning script (populated by RenderPhase).
    pub script: Option<ProvisionScript>,
    /// Diagnostics collected so far.
    pub diagnostics: Vec<Diagnostic>,
}

impl CompilationContext {
    /// Create a context selecting every group, with the built-in hooks.
    pub fn new(manifest: Manifest) -> Self {
        let registry = Registry::from_manifest(&manifest);
        Self {
            manifest,
            registry,
            groups: Vec::new(),
            strict: false,
            hooks: HookRegistry::builtin(),
            script: None,
            diagnostics: Vec::new(),
        }
    }

    /// Groups to render with their packages, in render order.
    pub fn selection(&self) -> Vec<(Group, &[Package])> {
        self.registry.select(&self.groups)
    }

    /// Packages of the selected groups, in render order.
    pub fn selected_packages(&self) -> impl Iterator<Item = &Package> {
        self.selection()
            .into_iter()
            .flat_map(|(_, packages)| packages.iter())
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_warning())
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_error())
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_warning())
            .count()
    }

    pub fn add_error(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::error(phase, message));
    }

    pub fn add_warning(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::warning(phase, message));
    }

    pub fn add_info(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::info(phase, message));
    }

    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Error))
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Warning))
    }
}
