//! Drawing contract and renderer backends.
//!
//! [`Renderer`] is the capability set shared by every backend. Two
//! implementations are provided:
//!
//! - [`svg::SvgRenderer`]: retained vector output, one group per transform scope
//! - [`raster::RasterRenderer`]: immediate-mode pixels (feature `raster`)
//!
//! Callers serialize draw calls against one backend instance. Separate
//! instances share no state and may render in parallel.

pub mod compound;
pub mod dash;
pub mod gradient;
pub mod matrix;
pub mod options;
#[cfg(feature = "raster")]
pub mod raster;
pub mod svg;

pub use compound::{SubStroke, decompose};
pub use gradient::{GradientStop, LinearGradient};
pub use matrix::Matrix;
pub use options::{
    CompoundLine, DrawOptions, Effect, Fill, LineCap, LineJoin, OuterShadow, Stroke, TextAnchor,
    TextOptions,
};
#[cfg(feature = "raster")]
pub use raster::{RasterOptions, RasterRenderer};
pub use svg::{SvgOptions, SvgRenderer};

use crate::drawingml::geometry::PathData;

/// Drawing primitives every backend provides.
///
/// Draw calls never fail: unresolvable paint, degenerate geometry and
/// unreadable images are skipped.
pub trait Renderer {
    /// Reset the output surface. Resource ids already issued stay reserved.
    fn clear(&mut self);

    /// Replace the current transform. Primitives drawn until the next call
    /// are in the new coordinate system; `group_id` names that scope where the
    /// backend supports it.
    fn set_transform(&mut self, matrix: Matrix, group_id: Option<&str>);

    fn draw_rect(&mut self, x: f64, y: f64, width: f64, height: f64, options: &DrawOptions);

    fn draw_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, options: &DrawOptions);

    /// Draw a line with the stroke in `options`; compound strokes are split
    /// into parallel sub-strokes. Fill is ignored.
    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, options: &DrawOptions);

    fn draw_path(&mut self, path: &PathData, options: &DrawOptions);

    fn draw_text(&mut self, content: &str, x: f64, y: f64, options: &TextOptions);

    /// Draw an image from a `data:` URI or an href known to the backend.
    fn draw_image(&mut self, href: &str, x: f64, y: f64, width: f64, height: f64);
}
