//! Geometry compiler: preset and custom shape geometry to [`PathData`].
//!
//! Output is in the shape's local pixel space, `[0, width] x [0, height]`.
//! Callers place it with a renderer transform or [`PathData::translate`].
//!
//! # Examples
//!
//! ```
//! use litchi_render::drawingml::geometry::{BoundingBox, CustomPath, GeometryDescriptor, compile};
//!
//! let desc = GeometryDescriptor::custom(
//!     CustomPath::new(200.0, 100.0)
//!         .move_to(10.0, 10.0)
//!         .line_to(190.0, 10.0)
//!         .close(),
//! );
//! let path = compile(Some(&desc), &BoundingBox::sized(400.0, 200.0)).unwrap();
//! assert_eq!(path.to_svg_string(), "M 20 20 L 380 20 Z");
//! ```

pub mod arc;
pub mod custom;
pub mod descriptor;
pub mod path;
pub mod preset;

pub use custom::compile_custom;
pub use descriptor::{BoundingBox, CustomCommand, CustomPath, GeometryDescriptor, Point};
pub use path::{PathCommand, PathData};
pub use preset::{PRESET_NAMES, compile_preset};

/// Compile shape geometry against its target box.
///
/// Returns `None` for a missing descriptor, an unknown preset or an empty
/// custom path. `flipH`/`flipV` on the box mirror the result; arc sweep
/// flags are not renormalized under flips.
pub fn compile(descriptor: Option<&GeometryDescriptor>, bbox: &BoundingBox) -> Option<PathData> {
    let path = match descriptor? {
        GeometryDescriptor::Preset {
            preset,
            adjustments,
        } => compile_preset(preset, adjustments, bbox.width, bbox.height)?,
        GeometryDescriptor::Custom { path } => compile_custom(path, bbox)?,
    };
    Some(path.mirror(bbox.flip_h, bbox.flip_v, bbox.width, bbox.height))
}
