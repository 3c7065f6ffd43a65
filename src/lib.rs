//! Litchi Render - Theme-aware DrawingML style resolution and rendering
//!
//! This library turns the style and geometry records of OOXML presentations
//! into concrete paint values and drawing commands.
//!
//! # Features
//!
//! - **Color Resolver**: scheme, preset, system and sRGB colors with tint/shade/luminance/saturation/alpha transforms
//! - **Table Style Resolver**: the PowerPoint region cascade (whole table, bands, first/last row and column, corners)
//! - **Geometry Compiler**: preset shapes and custom paths compiled to SVG-compatible path data
//! - **SVG Renderer**: retained vector output with shared gradient and shadow definitions
//! - **Raster Renderer**: immediate-mode pixels on tiny-skia (feature `raster`)
//!
//! # Example - Resolving a theme color
//!
//! ```
//! use litchi_render::drawingml::color::{ColorDescriptor, ColorScheme, SchemeSlot, Theme};
//! use litchi_render::{SlideContext, resolve_color};
//!
//! let theme = Theme::new("Office", ColorScheme::new().with(SchemeSlot::Accent1, "#4472C4"));
//! let ctx = SlideContext::new(theme);
//!
//! let color = resolve_color(Some(&ColorDescriptor::scheme("accent1")), &ctx);
//! assert_eq!(color.as_deref(), Some("#4472C4"));
//! ```
//!
//! # Example - Drawing a preset shape to SVG
//!
//! ```
//! use litchi_render::drawingml::geometry::{BoundingBox, GeometryDescriptor};
//! use litchi_render::render::{DrawOptions, Matrix};
//! use litchi_render::{Renderer, SvgOptions, SvgRenderer, compile};
//!
//! let bbox = BoundingBox::new(100.0, 50.0, 200.0, 100.0);
//! let path = compile(Some(&GeometryDescriptor::preset("rect")), &bbox).unwrap();
//!
//! let mut renderer = SvgRenderer::new(SvgOptions::new(960.0, 540.0));
//! renderer.set_transform(Matrix::translate(bbox.x, bbox.y), Some("shape-1"));
//! renderer.draw_path(&path, &DrawOptions::new().with_fill("#4472C4"));
//!
//! let svg = renderer.to_svg_string();
//! assert!(svg.contains(r#"<g id="shape-1""#));
//! ```

/// Shared error types, unit conversions and formatting helpers
pub mod common;

/// DrawingML color, table style and geometry resolution
///
/// Everything in this module is pure: it reads a [`SlideContext`] and
/// returns new values.
pub mod drawingml;

/// Drawing contract and backends
pub mod render;

// Re-export commonly used types for convenience
pub use common::{Error, Result};
pub use drawingml::SlideContext;
pub use drawingml::color::{resolve_color, resolve_color_alpha};
pub use drawingml::geometry::{PathData, compile};
pub use drawingml::table::{resolve_cell_style, resolve_table};
#[cfg(feature = "raster")]
pub use render::{RasterOptions, RasterRenderer};
pub use render::{Renderer, SvgOptions, SvgRenderer};
