//! Validation context and utilities for manifest parsing.

use std::sync::Arc;

use miette::SourceSpan;

use crate::{Result, error::SourceContext};

/// Parsing and validation context that carries source information.
///
/// # Example
///
/// ```ignore
/// let ctx = ParseContext::new(src, "langs.toml");
/// ctx.validate_name("gcc-c++")?;
/// ```
#[derive(Debug, Clone)]
pub struct ParseContext {
    /// Source context for error reporting
    source: Arc<SourceContext>,
}

impl ParseContext {
    /// Create a new parse context with the given source and filename.
    pub fn new(src: &str, filename: &str) -> Self {
        Self {
            source: Arc::new(SourceContext::new(src, filename)),
        }
    }

    /// Get the source context for error creation.
    pub fn source_context(&self) -> &SourceContext {
        &self.source
    }

    /// Find the span of a package section header in the source.
    pub fn find_span(&self, name: &str) -> Option<SourceSpan> {
        find_section_span(self.source.src(), name)
    }

    /// Validate that a package name is safe to paste into shell commands.
    pub fn validate_name(&self, name: &str) -> Result<()> {
        if let Some(reason) = validate_package_name(name) {
            return Err(self
                .source
                .invalid_name_error(name, reason, self.find_span(name)));
        }
        Ok(())
    }
}

/// Find the span of a package name in a `[packages.<name>]` header.
///
/// Handles bare keys as well as quoted keys such as `[packages."gcc-c++"]`.
pub(crate) fn find_section_span(src: &str, name: &str) -> Option<SourceSpan> {
    let patterns = [
        (format!("[packages.{}]", name), "[packages.".len()),
        (format!("[packages.\"{}\"]", name), "[packages.\"".len()),
        (format!("[packages.'{}']", name), "[packages.'".len()),
    ];

    for (pattern, skip) in &patterns {
        if let Some(pos) = src.find(pattern.as_str()) {
            return Some(SourceSpan::from((pos + skip, name.len())));
        }
    }

    // No fallback - better to have no span than point to wrong location
    None
}

/// Validate that a package name only uses shell-safe characters.
/// Returns None if valid, Some(reason) if invalid
pub(crate) fn validate_package_name(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphanumeric() => {}
        Some(_) => return Some("name must start with a letter or number"),
        None => return Some("name cannot be empty"),
    }

    if chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '+')) {
        None
    } else {
        Some("name contains characters that are not safe in a shell command")
    }
}
