//! IO boundary of the langs image generator.
//!
//! Everything that touches the filesystem or spawns a process lives here:
//! writing generated files, the temporary build workspace, and the external
//! image build.

mod file;
mod image_build;
mod workspace;

pub use file::{File, FileRules, GeneratedFile, Overwrite, WriteResult};
pub use image_build::{BuildError, ImageBuild, SCRIPT_BUILD_ARG};
pub use workspace::BuildWorkspace;
