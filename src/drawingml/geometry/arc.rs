//! Elliptical arc math.
//!
//! DrawingML describes arcs relative to the pen (`arcTo`: radii, start angle,
//! sweep), SVG in endpoint form, and rasterizers want cubic Béziers. This
//! module converts between the three.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use smallvec::SmallVec;

use super::path::PathCommand;

const EPSILON: f64 = 1e-9;

/// Parametric angle of the point where a ray at `visual` radians from the
/// center meets an ellipse with radii `rx`, `ry`.
#[inline]
pub fn visual_to_parametric(visual: f64, rx: f64, ry: f64) -> f64 {
    (rx * visual.sin()).atan2(ry * visual.cos())
}

/// Point on an axis-aligned ellipse at visual angle `degrees`.
pub fn ellipse_point(cx: f64, cy: f64, rx: f64, ry: f64, degrees: f64) -> (f64, f64) {
    let t = visual_to_parametric(degrees.to_radians(), rx, ry);
    (cx + rx * t.cos(), cy + ry * t.sin())
}

/// A DrawingML `arcTo` resolved against the pen position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawingArc {
    pub center: (f64, f64),
    pub rx: f64,
    pub ry: f64,
    /// Parametric start angle in radians.
    pub start: f64,
    /// Signed parametric sweep in radians, clamped to one full turn.
    pub sweep: f64,
    /// Sign of the sweep as written in the source.
    pub clockwise: bool,
    pub end: (f64, f64),
}

/// One emitted piece of a [`DrawingArc`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawingArcPart {
    pub sweep: f64,
    pub clockwise: bool,
    pub end: (f64, f64),
}

impl DrawingArcPart {
    #[inline]
    pub fn large_arc(&self) -> bool {
        self.sweep.abs() > PI + EPSILON
    }

    /// SVG sweep flag, taken from the sign of the written sweep angle.
    #[inline]
    pub fn sweep_flag(&self) -> bool {
        self.clockwise
    }
}

impl DrawingArc {
    /// The pen lies on the ellipse at visual angle `start_deg`; the arc ends
    /// at visual angle `start_deg + sweep_deg`.
    pub fn from_pen(pen: (f64, f64), rx: f64, ry: f64, start_deg: f64, sweep_deg: f64) -> Self {
        let t1 = visual_to_parametric(start_deg.to_radians(), rx, ry);
        let center = (pen.0 - rx * t1.cos(), pen.1 - ry * t1.sin());

        let t2 = visual_to_parametric((start_deg + sweep_deg).to_radians(), rx, ry);
        let raw = sweep_deg.to_radians();
        let mut dt = t2 - t1;
        if raw.abs() >= TAU - EPSILON {
            dt = TAU.copysign(raw);
        } else if raw > 0.0 && dt < 0.0 {
            dt += TAU;
        } else if raw < 0.0 && dt > 0.0 {
            dt -= TAU;
        } else if raw == 0.0 {
            dt = 0.0;
        }

        let end = (center.0 + rx * (t1 + dt).cos(), center.1 + ry * (t1 + dt).sin());
        Self {
            center,
            rx,
            ry,
            start: t1,
            sweep: dt,
            clockwise: sweep_deg > 0.0,
            end,
        }
    }

    /// Arcs whose end coincides with their start cannot be expressed as a
    /// single SVG arc; such sweeps come back as two halves.
    pub fn split_full_turn(&self) -> SmallVec<[DrawingArcPart; 2]> {
        let mut parts = SmallVec::new();
        if self.sweep.abs() >= TAU - EPSILON {
            let half = self.sweep / 2.0;
            let t = self.start + half;
            parts.push(DrawingArcPart {
                sweep: half,
                clockwise: self.clockwise,
                end: (self.center.0 + self.rx * t.cos(), self.center.1 + self.ry * t.sin()),
            });
            parts.push(DrawingArcPart {
                sweep: half,
                clockwise: self.clockwise,
                end: self.end,
            });
        } else if self.sweep != 0.0 {
            parts.push(DrawingArcPart {
                sweep: self.sweep,
                clockwise: self.clockwise,
                end: self.end,
            });
        }
        parts
    }
}

/// An elliptical arc in center parameterization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenterArc {
    pub cx: f64,
    pub cy: f64,
    pub rx: f64,
    pub ry: f64,
    /// X-axis rotation in radians.
    pub rotation: f64,
    pub start: f64,
    pub sweep: f64,
}

/// A cubic Bézier piece of an arc, without its start point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSegment {
    pub c1: (f64, f64),
    pub c2: (f64, f64),
    pub end: (f64, f64),
}

impl ArcSegment {
    pub fn into_command(self) -> PathCommand {
        PathCommand::CubicTo {
            x1: self.c1.0,
            y1: self.c1.1,
            x2: self.c2.0,
            y2: self.c2.1,
            x: self.end.0,
            y: self.end.1,
        }
    }
}

impl CenterArc {
    fn point(&self, t: f64) -> (f64, f64) {
        let (sin_r, cos_r) = self.rotation.sin_cos();
        let (x, y) = (self.rx * t.cos(), self.ry * t.sin());
        (self.cx + x * cos_r - y * sin_r, self.cy + x * sin_r + y * cos_r)
    }

    fn derivative(&self, t: f64) -> (f64, f64) {
        let (sin_r, cos_r) = self.rotation.sin_cos();
        let (dx, dy) = (-self.rx * t.sin(), self.ry * t.cos());
        (dx * cos_r - dy * sin_r, dx * sin_r + dy * cos_r)
    }

    /// Approximate with cubic Béziers, one per quarter turn or less.
    pub fn to_cubics(&self) -> SmallVec<[ArcSegment; 4]> {
        let count = ((self.sweep.abs() / FRAC_PI_2) - EPSILON).ceil().max(1.0) as usize;
        let step = self.sweep / count as f64;
        let alpha = 4.0 / 3.0 * (step / 4.0).tan();

        let mut segments = SmallVec::with_capacity(count);
        let mut t = self.start;
        for _ in 0..count {
            let next = t + step;
            let (p0, d0) = (self.point(t), self.derivative(t));
            let (p1, d1) = (self.point(next), self.derivative(next));
            segments.push(ArcSegment {
                c1: (p0.0 + alpha * d0.0, p0.1 + alpha * d0.1),
                c2: (p1.0 - alpha * d1.0, p1.1 - alpha * d1.1),
                end: p1,
            });
            t = next;
        }
        segments
    }
}

/// Convert an SVG endpoint arc to center form, scaling radii up when they
/// cannot span the endpoints.
///
/// Returns `None` when the arc degenerates: coincident endpoints draw
/// nothing and a zero radius draws a straight line.
pub fn endpoint_to_center(
    from: (f64, f64),
    rx: f64,
    ry: f64,
    rotation_deg: f64,
    large_arc: bool,
    sweep: bool,
    to: (f64, f64),
) -> Option<CenterArc> {
    let (x1, y1) = from;
    let (x2, y2) = to;
    if (x1 - x2).abs() < EPSILON && (y1 - y2).abs() < EPSILON {
        return None;
    }
    let (mut rx, mut ry) = (rx.abs(), ry.abs());
    if rx < EPSILON || ry < EPSILON {
        return None;
    }

    let phi = rotation_deg.to_radians();
    let (sin_phi, cos_phi) = phi.sin_cos();
    let dx2 = (x1 - x2) / 2.0;
    let dy2 = (y1 - y2) / 2.0;
    let x1p = cos_phi * dx2 + sin_phi * dy2;
    let y1p = -sin_phi * dx2 + cos_phi * dy2;

    let lambda = (x1p * x1p) / (rx * rx) + (y1p * y1p) / (ry * ry);
    if lambda > 1.0 {
        let scale = lambda.sqrt();
        rx *= scale;
        ry *= scale;
    }

    let (rx2, ry2) = (rx * rx, ry * ry);
    let num = rx2 * ry2 - rx2 * y1p * y1p - ry2 * x1p * x1p;
    let den = rx2 * y1p * y1p + ry2 * x1p * x1p;
    let mut coef = (num / den).max(0.0).sqrt();
    if large_arc == sweep {
        coef = -coef;
    }
    let cxp = coef * rx * y1p / ry;
    let cyp = -coef * ry * x1p / rx;

    let cx = cos_phi * cxp - sin_phi * cyp + (x1 + x2) / 2.0;
    let cy = sin_phi * cxp + cos_phi * cyp + (y1 + y2) / 2.0;

    let (ux, uy) = ((x1p - cxp) / rx, (y1p - cyp) / ry);
    let (vx, vy) = ((-x1p - cxp) / rx, (-y1p - cyp) / ry);
    let start = uy.atan2(ux);
    let mut delta = (ux * vy - uy * vx).atan2(ux * vx + uy * vy);
    if !sweep && delta > 0.0 {
        delta -= TAU;
    } else if sweep && delta < 0.0 {
        delta += TAU;
    }

    Some(CenterArc {
        cx,
        cy,
        rx,
        ry,
        rotation: phi,
        start,
        sweep: delta,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: (f64, f64), b: (f64, f64)) -> bool {
        (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9
    }

    #[test]
    fn test_visual_angle_on_circle_is_parametric() {
        for deg in [0.0f64, 30.0, 90.0, 135.0] {
            let t = visual_to_parametric(deg.to_radians(), 4.0, 4.0);
            assert!((t - deg.to_radians()).abs() < 1e-12);
        }
    }

    #[test]
    fn test_ellipse_point_hits_ray() {
        let (x, y) = ellipse_point(0.0, 0.0, 100.0, 50.0, 45.0);
        // The point lies on the 45 degree diagonal and on the ellipse
        assert!((x - y).abs() < 1e-9);
        assert!(((x / 100.0).powi(2) + (y / 50.0).powi(2) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_quarter_arc_from_pen() {
        // Top-left rounded corner: pen at (0, 10), sweep 90 degrees clockwise
        let arc = DrawingArc::from_pen((0.0, 10.0), 10.0, 10.0, 180.0, 90.0);
        assert!(close(arc.center, (10.0, 10.0)));
        assert!(close(arc.end, (10.0, 0.0)));
        let parts = arc.split_full_turn();
        assert_eq!(parts.len(), 1);
        assert!(parts[0].sweep_flag());
        assert!(!parts[0].large_arc());
    }

    #[test]
    fn test_negative_sweep_is_counter_clockwise() {
        let arc = DrawingArc::from_pen((10.0, 0.0), 10.0, 10.0, 270.0, -90.0);
        assert!(close(arc.end, (0.0, 10.0)));
        assert!(arc.sweep < 0.0);
        assert!(!arc.split_full_turn()[0].sweep_flag());
    }

    #[test]
    fn test_large_sweep_sets_large_arc() {
        let arc = DrawingArc::from_pen((20.0, 10.0), 10.0, 10.0, 0.0, 270.0);
        let part = arc.split_full_turn()[0];
        assert!(part.large_arc());
        assert!(close(part.end, (10.0, 0.0)));
    }

    #[test]
    fn test_full_turn_splits_in_two() {
        let arc = DrawingArc::from_pen((20.0, 10.0), 10.0, 10.0, 0.0, 360.0);
        let parts = arc.split_full_turn();
        assert_eq!(parts.len(), 2);
        assert!(close(parts[0].end, (0.0, 10.0)));
        assert!(close(parts[1].end, (20.0, 10.0)));
    }

    #[test]
    fn test_zero_sweep_emits_nothing() {
        let arc = DrawingArc::from_pen((20.0, 10.0), 10.0, 10.0, 0.0, 0.0);
        assert!(arc.split_full_turn().is_empty());
    }

    #[test]
    fn test_endpoint_to_center_semicircle() {
        let arc = endpoint_to_center((0.0, 0.0), 5.0, 5.0, 0.0, false, true, (10.0, 0.0)).unwrap();
        assert!(close((arc.cx, arc.cy), (5.0, 0.0)));
        assert!((arc.sweep.abs() - PI).abs() < 1e-9);
    }

    #[test]
    fn test_endpoint_to_center_scales_small_radii() {
        let arc = endpoint_to_center((0.0, 0.0), 1.0, 1.0, 0.0, false, true, (10.0, 0.0)).unwrap();
        assert!((arc.rx - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_endpoint_to_center_degenerate() {
        assert!(endpoint_to_center((1.0, 1.0), 5.0, 5.0, 0.0, false, true, (1.0, 1.0)).is_none());
        assert!(endpoint_to_center((0.0, 0.0), 0.0, 5.0, 0.0, false, true, (1.0, 1.0)).is_none());
    }

    #[test]
    fn test_cubics_end_on_the_arc() {
        let arc = endpoint_to_center((0.0, 0.0), 5.0, 5.0, 0.0, true, true, (10.0, 0.0)).unwrap();
        let segments = arc.to_cubics();
        assert_eq!(segments.len(), 2);
        assert!(close(segments[1].end, (10.0, 0.0)));
        for seg in &segments {
            let r = ((seg.end.0 - arc.cx).powi(2) + (seg.end.1 - arc.cy).powi(2)).sqrt();
            assert!((r - 5.0).abs() < 1e-9);
        }
    }
}
