//! Shell text building blocks.
//!
//! - [`ScriptBuilder`] - fluent API for building indented shell text
//! - [`Fragment`] - one labelled piece of a rendered script

mod fragment;
mod script_builder;

pub use fragment::{Fragment, join_fragments};
pub use script_builder::ScriptBuilder;
