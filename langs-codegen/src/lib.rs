//! Provisioning script and image descriptor generation.
//!
//! Turns a parsed `langs.toml` into two artifacts: a POSIX shell script that
//! installs every selected toolchain group, and a Dockerfile that runs that
//! script on top of a base image.
//!
//! # Module Organization
//!
//! - [`builder`] - Script text building blocks (ScriptBuilder, Fragment)
//! - [`hooks`] - Install and epilogue hooks for packages that need custom steps
//! - [`pipeline`] - Validation and rendering phases with collected diagnostics
//! - [`url`] - Url templating and mirror rewriting
//!
//! # Example
//!
//! ```ignore
//! let manifest: Manifest = content.parse()?;
//! let ctx = Pipeline::new().select(vec![Group::Golang]).run(manifest)?;
//! let generator = Generator::from_context(ctx)?;
//! generator.generate(Path::new("out"))?;
//! ```

mod archive;
pub mod builder;
mod descriptor;
mod error;
mod generator;
pub mod hooks;
pub mod pipeline;
mod render;
mod script;
mod shell;
pub mod url;

pub use archive::ArchiveFormat;
pub use descriptor::{ImageDescriptor, assemble_image_descriptor};
pub use error::{GenerateError, Result};
pub use generator::{GenerateResult, Generator, PreviewFile};
pub use render::Renderer;
pub use script::{ProvisionScript, SCRIPT_FILE_NAME, assemble_script};
pub use url::{resolve_url, substitute};
