//! Compiled vector path data.

use smallvec::SmallVec;

use super::arc::{ArcSegment, endpoint_to_center};
use crate::common::fmt::{DEFAULT_PRECISION, write_num_with_precision};

/// One absolute drawing command in target pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo {
        x: f64,
        y: f64,
    },
    LineTo {
        x: f64,
        y: f64,
    },
    CubicTo {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x: f64,
        y: f64,
    },
    QuadTo {
        x1: f64,
        y1: f64,
        x: f64,
        y: f64,
    },
    /// Elliptical arc in endpoint form, as in SVG `A`.
    Arc {
        rx: f64,
        ry: f64,
        rotation: f64,
        large_arc: bool,
        sweep: bool,
        x: f64,
        y: f64,
    },
    Close,
}

impl PathCommand {
    /// End point of the command, `None` for `Close`.
    pub fn end_point(&self) -> Option<(f64, f64)> {
        match *self {
            Self::MoveTo { x, y }
            | Self::LineTo { x, y }
            | Self::CubicTo { x, y, .. }
            | Self::QuadTo { x, y, .. }
            | Self::Arc { x, y, .. } => Some((x, y)),
            Self::Close => None,
        }
    }

    fn map_points(self, f: impl Fn(f64, f64) -> (f64, f64)) -> Self {
        match self {
            Self::MoveTo { x, y } => {
                let (x, y) = f(x, y);
                Self::MoveTo { x, y }
            },
            Self::LineTo { x, y } => {
                let (x, y) = f(x, y);
                Self::LineTo { x, y }
            },
            Self::CubicTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => {
                let (x1, y1) = f(x1, y1);
                let (x2, y2) = f(x2, y2);
                let (x, y) = f(x, y);
                Self::CubicTo {
                    x1,
                    y1,
                    x2,
                    y2,
                    x,
                    y,
                }
            },
            Self::QuadTo { x1, y1, x, y } => {
                let (x1, y1) = f(x1, y1);
                let (x, y) = f(x, y);
                Self::QuadTo { x1, y1, x, y }
            },
            Self::Arc {
                rx,
                ry,
                rotation,
                large_arc,
                sweep,
                x,
                y,
            } => {
                let (x, y) = f(x, y);
                Self::Arc {
                    rx,
                    ry,
                    rotation,
                    large_arc,
                    sweep,
                    x,
                    y,
                }
            },
            Self::Close => Self::Close,
        }
    }

    fn write_svg(&self, buf: &mut String, precision: u32) {
        let num = |buf: &mut String, n: f64| {
            buf.push(' ');
            write_num_with_precision(buf, n, precision);
        };
        match *self {
            Self::MoveTo { x, y } => {
                buf.push('M');
                num(buf, x);
                num(buf, y);
            },
            Self::LineTo { x, y } => {
                buf.push('L');
                num(buf, x);
                num(buf, y);
            },
            Self::CubicTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => {
                buf.push('C');
                for n in [x1, y1, x2, y2, x, y] {
                    num(buf, n);
                }
            },
            Self::QuadTo { x1, y1, x, y } => {
                buf.push('Q');
                for n in [x1, y1, x, y] {
                    num(buf, n);
                }
            },
            Self::Arc {
                rx,
                ry,
                rotation,
                large_arc,
                sweep,
                x,
                y,
            } => {
                buf.push('A');
                num(buf, rx);
                num(buf, ry);
                num(buf, rotation);
                buf.push_str(if large_arc { " 1" } else { " 0" });
                buf.push_str(if sweep { " 1" } else { " 0" });
                num(buf, x);
                num(buf, y);
            },
            Self::Close => buf.push('Z'),
        }
    }
}

/// An ordered sequence of absolute drawing commands.
///
/// Produced fresh for every shape render and not mutated afterwards; the
/// transforming methods return new values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathData {
    commands: Vec<PathCommand>,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_commands(commands: Vec<PathCommand>) -> Self {
        Self { commands }
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub(crate) fn push(&mut self, command: PathCommand) {
        self.commands.push(command);
    }

    /// Serialize as an SVG path string with the default coordinate precision.
    ///
    /// ```
    /// use litchi_render::drawingml::geometry::{PathCommand, PathData};
    ///
    /// let path = PathData::from_commands(vec![
    ///     PathCommand::MoveTo { x: 20.0, y: 20.0 },
    ///     PathCommand::LineTo { x: 380.0, y: 20.0 },
    ///     PathCommand::Close,
    /// ]);
    /// assert_eq!(path.to_svg_string(), "M 20 20 L 380 20 Z");
    /// ```
    pub fn to_svg_string(&self) -> String {
        self.to_svg_string_with_precision(DEFAULT_PRECISION)
    }

    pub fn to_svg_string_with_precision(&self, precision: u32) -> String {
        let mut buf = String::with_capacity(self.commands.len() * 16);
        self.write_svg(&mut buf, precision);
        buf
    }

    /// Append the SVG path string to `buf`.
    pub fn write_svg(&self, buf: &mut String, precision: u32) {
        for (i, cmd) in self.commands.iter().enumerate() {
            if i > 0 {
                buf.push(' ');
            }
            cmd.write_svg(buf, precision);
        }
    }

    /// Shift every point by `(dx, dy)`.
    pub fn translate(&self, dx: f64, dy: f64) -> PathData {
        self.map_points(|x, y| (x + dx, y + dy))
    }

    /// Mirror inside a `width` x `height` box.
    ///
    /// Arc sweep flags are carried over untouched, so a flipped arc bulges
    /// the other way from the mirror image of the original.
    pub fn mirror(&self, flip_h: bool, flip_v: bool, width: f64, height: f64) -> PathData {
        if !flip_h && !flip_v {
            return self.clone();
        }
        self.map_points(|x, y| {
            (
                if flip_h { width - x } else { x },
                if flip_v { height - y } else { y },
            )
        })
    }

    fn map_points(&self, f: impl Fn(f64, f64) -> (f64, f64) + Copy) -> PathData {
        PathData {
            commands: self.commands.iter().map(|cmd| cmd.map_points(f)).collect(),
        }
    }

    /// Lower every arc to cubic Béziers for consumers without native
    /// elliptical arcs. Other commands are kept as they are.
    pub fn to_cubics(&self) -> PathData {
        let mut out = Vec::with_capacity(self.commands.len());
        let mut pen = (0.0, 0.0);
        let mut start = (0.0, 0.0);

        for &cmd in &self.commands {
            match cmd {
                PathCommand::Arc {
                    rx,
                    ry,
                    rotation,
                    large_arc,
                    sweep,
                    x,
                    y,
                } => {
                    match endpoint_to_center(pen, rx, ry, rotation, large_arc, sweep, (x, y)) {
                        Some(arc) => {
                            let cubics: SmallVec<[ArcSegment; 4]> = arc.to_cubics();
                            out.extend(cubics.into_iter().map(ArcSegment::into_command));
                        },
                        // Zero radii or coincident endpoints: a straight segment or nothing
                        None if pen != (x, y) => out.push(PathCommand::LineTo { x, y }),
                        None => {},
                    }
                    pen = (x, y);
                },
                PathCommand::MoveTo { x, y } => {
                    out.push(cmd);
                    pen = (x, y);
                    start = pen;
                },
                PathCommand::Close => {
                    out.push(cmd);
                    pen = start;
                },
                _ => {
                    out.push(cmd);
                    if let Some(end) = cmd.end_point() {
                        pen = end;
                    }
                },
            }
        }

        PathData { commands: out }
    }

    /// Axis-aligned bounds of the command end and control points.
    pub fn control_bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let mut bounds: Option<(f64, f64, f64, f64)> = None;
        let mut include = |x: f64, y: f64| {
            bounds = Some(match bounds {
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
                None => (x, y, x, y),
            });
        };
        for cmd in &self.to_cubics().commands {
            match *cmd {
                PathCommand::CubicTo {
                    x1,
                    y1,
                    x2,
                    y2,
                    x,
                    y,
                } => {
                    include(x1, y1);
                    include(x2, y2);
                    include(x, y);
                },
                PathCommand::QuadTo { x1, y1, x, y } => {
                    include(x1, y1);
                    include(x, y);
                },
                other => {
                    if let Some((x, y)) = other.end_point() {
                        include(x, y);
                    }
                },
            }
        }
        bounds
    }
}

/// Incremental builder that tracks the pen and applies per-axis scale.
///
/// Points are given in the source coordinate space; commands are emitted in
/// the scaled space. Arc geometry is evaluated before scaling so that
/// DrawingML's angle convention holds in the source space.
#[derive(Debug, Clone)]
pub(crate) struct PathBuilder {
    data: PathData,
    scale_x: f64,
    scale_y: f64,
    pen: (f64, f64),
    subpath_start: (f64, f64),
}

impl PathBuilder {
    pub(crate) fn new() -> Self {
        Self::scaled(1.0, 1.0)
    }

    pub(crate) fn scaled(scale_x: f64, scale_y: f64) -> Self {
        Self {
            data: PathData::new(),
            scale_x,
            scale_y,
            pen: (0.0, 0.0),
            subpath_start: (0.0, 0.0),
        }
    }

    #[inline]
    fn sx(&self, x: f64) -> f64 {
        x * self.scale_x
    }

    #[inline]
    fn sy(&self, y: f64) -> f64 {
        y * self.scale_y
    }

    pub(crate) fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        let cmd = PathCommand::MoveTo {
            x: self.sx(x),
            y: self.sy(y),
        };
        self.data.push(cmd);
        self.pen = (x, y);
        self.subpath_start = (x, y);
        self
    }

    pub(crate) fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        let cmd = PathCommand::LineTo {
            x: self.sx(x),
            y: self.sy(y),
        };
        self.data.push(cmd);
        self.pen = (x, y);
        self
    }

    pub(crate) fn cubic_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) -> &mut Self {
        let cmd = PathCommand::CubicTo {
            x1: self.sx(x1),
            y1: self.sy(y1),
            x2: self.sx(x2),
            y2: self.sy(y2),
            x: self.sx(x),
            y: self.sy(y),
        };
        self.data.push(cmd);
        self.pen = (x, y);
        self
    }

    pub(crate) fn quad_to(&mut self, x1: f64, y1: f64, x: f64, y: f64) -> &mut Self {
        let cmd = PathCommand::QuadTo {
            x1: self.sx(x1),
            y1: self.sy(y1),
            x: self.sx(x),
            y: self.sy(y),
        };
        self.data.push(cmd);
        self.pen = (x, y);
        self
    }

    /// DrawingML `arcTo`: continue from the pen along the ellipse with radii
    /// `(w_r, h_r)`, starting at visual angle `start_deg` and sweeping
    /// `sweep_deg` (positive is clockwise on screen).
    pub(crate) fn arc_to(&mut self, w_r: f64, h_r: f64, start_deg: f64, sweep_deg: f64) -> &mut Self {
        let arc = super::arc::DrawingArc::from_pen(self.pen, w_r, h_r, start_deg, sweep_deg);
        let parts = arc.split_full_turn();
        if parts.is_empty() {
            // Zero sweep leaves the pen in place
            let (x, y) = self.pen;
            self.data.push(PathCommand::LineTo {
                x: self.sx(x),
                y: self.sy(y),
            });
            return self;
        }
        for part in parts {
            let (x, y) = part.end;
            let cmd = if w_r == 0.0 || h_r == 0.0 {
                PathCommand::LineTo {
                    x: self.sx(x),
                    y: self.sy(y),
                }
            } else {
                PathCommand::Arc {
                    rx: self.sx(w_r).abs(),
                    ry: self.sy(h_r).abs(),
                    rotation: 0.0,
                    large_arc: part.large_arc(),
                    sweep: part.sweep_flag(),
                    x: self.sx(x),
                    y: self.sy(y),
                }
            };
            self.data.push(cmd);
            self.pen = (x, y);
        }
        self
    }

    pub(crate) fn close(&mut self) -> &mut Self {
        self.data.push(PathCommand::Close);
        self.pen = self.subpath_start;
        self
    }

    pub(crate) fn finish(&mut self) -> PathData {
        std::mem::take(&mut self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> PathData {
        let mut b = PathBuilder::new();
        b.move_to(0.0, 0.0)
            .line_to(10.0, 0.0)
            .line_to(10.0, 10.0)
            .line_to(0.0, 10.0)
            .close();
        b.finish()
    }

    #[test]
    fn test_svg_string() {
        assert_eq!(square().to_svg_string(), "M 0 0 L 10 0 L 10 10 L 0 10 Z");
    }

    #[test]
    fn test_svg_string_rounds() {
        let path = PathData::from_commands(vec![
            PathCommand::MoveTo { x: 1.0 / 3.0, y: 2.5 },
            PathCommand::QuadTo {
                x1: 1.005,
                y1: 0.0,
                x: -0.001,
                y: 4.0,
            },
        ]);
        assert_eq!(path.to_svg_string(), "M 0.33 2.5 Q 1 0 0 4");
        assert_eq!(path.to_svg_string_with_precision(3), "M 0.333 2.5 Q 1.005 0 -0.001 4");
    }

    #[test]
    fn test_arc_serialization() {
        let path = PathData::from_commands(vec![
            PathCommand::MoveTo { x: 0.0, y: 5.0 },
            PathCommand::Arc {
                rx: 5.0,
                ry: 5.0,
                rotation: 0.0,
                large_arc: false,
                sweep: true,
                x: 5.0,
                y: 0.0,
            },
        ]);
        assert_eq!(path.to_svg_string(), "M 0 5 A 5 5 0 0 1 5 0");
    }

    #[test]
    fn test_scaled_builder() {
        let mut b = PathBuilder::scaled(2.0, 3.0);
        b.move_to(1.0, 1.0).cubic_to(2.0, 2.0, 3.0, 3.0, 4.0, 4.0);
        assert_eq!(b.finish().to_svg_string(), "M 2 3 C 4 6 6 9 8 12");
    }

    #[test]
    fn test_mirror_keeps_sweep() {
        let path = PathData::from_commands(vec![
            PathCommand::MoveTo { x: 0.0, y: 5.0 },
            PathCommand::Arc {
                rx: 5.0,
                ry: 5.0,
                rotation: 0.0,
                large_arc: false,
                sweep: true,
                x: 5.0,
                y: 0.0,
            },
        ]);
        let flipped = path.mirror(true, false, 10.0, 10.0);
        assert_eq!(flipped.to_svg_string(), "M 10 5 A 5 5 0 0 1 5 0");
        assert_eq!(path.mirror(false, false, 10.0, 10.0), path);
    }

    #[test]
    fn test_translate() {
        let moved = square().translate(5.0, -5.0);
        assert_eq!(moved.commands()[0], PathCommand::MoveTo { x: 5.0, y: -5.0 });
        assert_eq!(moved.commands()[4], PathCommand::Close);
    }

    #[test]
    fn test_to_cubics_replaces_arcs() {
        let mut b = PathBuilder::new();
        b.move_to(0.0, 5.0).arc_to(5.0, 5.0, 180.0, 180.0).close();
        let path = b.finish();
        assert!(path.commands().iter().any(|c| matches!(c, PathCommand::Arc { .. })));

        let cubics = path.to_cubics();
        assert!(!cubics.commands().iter().any(|c| matches!(c, PathCommand::Arc { .. })));
        assert_eq!(cubics.commands().len(), 4);
        let Some((x, y)) = cubics.commands()[2].end_point() else {
            panic!("expected a cubic");
        };
        assert!((x - 10.0).abs() < 1e-9);
        assert!((y - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_control_bounds() {
        assert_eq!(square().control_bounds(), Some((0.0, 0.0, 10.0, 10.0)));
        assert_eq!(PathData::new().control_bounds(), None);
    }
}
