//! Errors, warnings and notes collected while phases run.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Stops the pipeline before anything is rendered.
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }

    /// `Error` when `strict`, `Warning` otherwise.
    pub fn warning_unless(strict: bool) -> Self {
        if strict {
            Severity::Error
        } else {
            Severity::Warning
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        })
    }
}

/// A message produced by a phase or lint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// The phase that produced this diagnostic.
    pub phase: String,
    /// The lint that produced this diagnostic, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lint: Option<&'static str>,
    pub message: String,
    /// Location in the manifest (e.g. `packages.golang`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Diagnostic {
    pub fn new(severity: Severity, phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            phase: phase.into(),
            lint: None,
            message: message.into(),
            location: None,
        }
    }

    pub fn error(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, phase, message)
    }

    pub fn warning(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, phase, message)
    }

    pub fn info(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, phase, message)
    }

    /// Point at a manifest location.
    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Point at a package section.
    pub fn at_package(self, name: &str) -> Self {
        self.at(format!("packages.{}", name))
    }

    /// Tag with the lint that raised it.
    pub fn from_lint(mut self, lint: &'static str) -> Self {
        self.lint = Some(lint);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.severity)?;
        if let Some(lint) = self.lint {
            write!(f, "[{}]", lint)?;
        }
        write!(f, ": {}", self.message)?;
        if let Some(loc) = &self.location {
            write!(f, " (at {})", loc)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_error() {
        let diag = Diagnostic::error("validate", "package 'cmake' has no 'url'");
        assert!(diag.severity.is_error());
        assert_eq!(diag.phase, "validate");
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::warning("validate", "no install hook")
            .at_package("tool")
            .from_lint("missing-hook");

        assert_eq!(diag.location.as_deref(), Some("packages.tool"));
        assert_eq!(
            diag.to_string(),
            "warning[missing-hook]: no install hook (at packages.tool)"
        );
    }

    #[test]
    fn test_strict_severity() {
        assert_eq!(Severity::warning_unless(false), Severity::Warning);
        assert_eq!(Severity::warning_unless(true), Severity::Error);
    }

    #[test]
    fn test_serialize() {
        let diag = Diagnostic::error("validate", "boom").from_lint("missing-url");
        let json = serde_json::to_value(&diag).unwrap();

        assert_eq!(json["severity"], "error");
        assert_eq!(json["lint"], "missing-url");
        assert!(json.get("location").is_none());
    }
}
