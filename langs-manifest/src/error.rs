use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for manifest operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Encapsulates the source content and filename, reducing parameter passing
/// in error factory functions.
///
/// # Example
///
/// ```ignore
/// let ctx = SourceContext::new(content, "langs.toml");
/// ctx.configuration_error("missing url", None);
/// ```
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Get the filename.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a parse error from a toml error.
    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a configuration error, optionally pointing at a span.
    pub fn configuration_error(
        &self,
        message: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::Configuration {
            src: self.named_source(),
            span,
            message: message.into(),
        })
    }

    /// Create an unknown group error.
    pub fn unknown_group_error(
        &self,
        package: impl Into<String>,
        group: Option<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        let reason = match group {
            Some(group) => format!("unknown group '{}'", group),
            None => "missing 'group'".to_string(),
        };
        Box::new(Error::UnknownGroup {
            src: self.named_source(),
            span,
            package: package.into(),
            reason,
        })
    }

    /// Create an invalid package name error.
    pub fn invalid_name_error(
        &self,
        name: impl Into<String>,
        reason: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::InvalidName {
            src: self.named_source(),
            span,
            name: name.into(),
            reason: reason.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("run 'langs init' to create a langs.toml"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse langs.toml")]
    #[diagnostic(code(langs::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(langs::configuration_error))]
    Configuration {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("package '{package}' has no recognized group")]
    #[diagnostic(
        code(langs::unknown_group),
        help("valid groups are: common, cpp, python, java, node, rust, golang, ssh, cert")
    )]
    UnknownGroup {
        #[source_code]
        src: NamedSource<String>,
        #[label("{reason}")]
        span: Option<SourceSpan>,
        package: String,
        reason: String,
    },

    #[error("invalid package name '{name}'")]
    #[diagnostic(help(
        "{reason}. Package names are pasted into shell commands, use only letters, numbers, '-', '_', '.' and '+'."
    ))]
    InvalidName {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid package name")]
        span: Option<SourceSpan>,
        name: String,
        reason: String,
    },
}
