//! Immediate-mode raster backend on tiny-skia.

mod context;
mod image;
mod renderer;
mod shadow;
mod text;

pub use renderer::{RasterOptions, RasterRenderer};
