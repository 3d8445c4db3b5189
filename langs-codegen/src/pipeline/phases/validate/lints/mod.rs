//! Built-in lints for package validation.

mod archive_format;
mod empty_group;
mod missing_hook;
mod missing_url;
mod skipped_section;
mod unresolved_version;

pub use archive_format::ArchiveFormatLint;
pub use empty_group::EmptyGroupLint;
pub use missing_hook::MissingHookLint;
pub use missing_url::MissingUrlLint;
pub use skipped_section::SkippedSectionLint;
pub use unresolved_version::UnresolvedVersionLint;
