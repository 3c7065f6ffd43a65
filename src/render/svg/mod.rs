//! Retained-mode SVG backend.

pub mod defs;
pub mod document;
mod renderer;

pub use defs::{DefsPool, Definition};
pub use document::{SvgDocument, SvgElement};
pub use renderer::{SvgOptions, SvgRenderer};
