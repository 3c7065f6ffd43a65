//! DrawingML style resolution and geometry.
//!
//! Three pure components live here:
//!
//! - [`color`]: theme-aware color resolution with tint/shade/luminance/saturation transforms
//! - [`table`]: the table style cascade
//! - [`geometry`]: preset and custom shape geometry compiled to path data
//!
//! All of them read a [`SlideContext`] built once per slide and never mutate it.

pub mod color;
pub mod context;
pub mod geometry;
pub mod table;

pub use context::{ColorMap, ResolveOptions, SlideContext};
