//! Generation pipeline.
//!
//! A [`Pipeline`] runs phases over a [`CompilationContext`]:
//!
//! - `validate` runs lints over the registry and collects diagnostics
//! - `render` assembles the provisioning script
//!
//! The pipeline stops after the first phase that leaves an error
//! diagnostic behind, so nothing is rendered for a broken manifest.
//!
//! # Example
//!
//! ```ignore
//! use langs_codegen::pipeline::Pipeline;
//!
//! let ctx = Pipeline::new().select(vec![Group::Golang]).run(manifest)?;
//!
//! for diag in ctx.warnings() {
//!     eprintln!("warning: {}", diag.message);
//! }
//! ```

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod runner;

pub use context::CompilationContext;
pub use diagnostic::{Diagnostic, Severity};
pub use phase::{Phase, PhaseInfo};
pub use runner::Pipeline;
