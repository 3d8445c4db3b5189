use langs_manifest::InstallMethod;
use thiserror::Error;

/// Errors raised while rendering a provisioning script.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("package '{package}' is installed with {install} but has no 'url'")]
    MissingUrl {
        package: String,
        install: InstallMethod,
    },

    #[error("url of package '{package}' uses {{version}} but no version is set")]
    MissingVersion { package: String },

    #[error("cannot tell the archive format of '{url}' (package '{package}')")]
    UnknownArchiveFormat { package: String, url: String },
}

impl GenerateError {
    /// Name of the package the error is about.
    pub fn package(&self) -> &str {
        match self {
            GenerateError::MissingUrl { package, .. }
            | GenerateError::MissingVersion { package }
            | GenerateError::UnknownArchiveFormat { package, .. } => package,
        }
    }
}

pub type Result<T> = std::result::Result<T, GenerateError>;
