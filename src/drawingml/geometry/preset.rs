//! Preset geometry (`a:prstGeom`).
//!
//! Each preset is a pure function of the box size and its adjustment values.
//! Formulas and adjustment ranges follow the DrawingML preset shape
//! definitions; adjustments are in 1/100000ths of the shorter side unless
//! noted, angles in 60000ths of a degree.

use std::collections::HashMap;

use super::arc::ellipse_point;
use super::path::{PathBuilder, PathData};
use crate::common::unit::{ANGLE_FULL_TURN, PERCENT_DENOMINATOR, angle_to_degrees};

/// Names accepted by [`compile_preset`].
pub const PRESET_NAMES: &[&str] = &[
    "rect",
    "roundRect",
    "ellipse",
    "arc",
    "pie",
    "chord",
    "line",
    "triangle",
    "rtTriangle",
    "diamond",
    "parallelogram",
    "trapezoid",
    "corner",
    "chevron",
    "homePlate",
    "rightArrow",
    "leftArrow",
    "plus",
];

type PresetFn = fn(&Guides<'_>) -> PathData;

/// Shape guide context: box size plus the caller's adjustment values.
struct Guides<'a> {
    w: f64,
    h: f64,
    adjustments: &'a HashMap<String, f64>,
}

impl Guides<'_> {
    #[inline]
    fn ss(&self) -> f64 {
        self.w.min(self.h)
    }

    #[inline]
    fn hc(&self) -> f64 {
        self.w / 2.0
    }

    #[inline]
    fn vc(&self) -> f64 {
        self.h / 2.0
    }

    /// Adjustment by name; single-handle presets also accept `adj1` for `adj`.
    fn adj(&self, name: &str, default: f64) -> f64 {
        self.adjustments
            .get(name)
            .or_else(|| (name == "adj").then(|| self.adjustments.get("adj1")).flatten())
            .copied()
            .unwrap_or(default)
    }

    /// Ratio `max * extent / ss` used as an upper pin bound.
    #[inline]
    fn max_for(&self, max: f64, extent: f64) -> f64 {
        max * extent / self.ss()
    }

    /// Apply a proportion of the shorter side.
    #[inline]
    fn of_ss(&self, value: f64) -> f64 {
        self.ss() * value / PERCENT_DENOMINATOR
    }
}

/// Clamp without swallowing NaN.
#[inline]
fn pin(lo: f64, value: f64, hi: f64) -> f64 {
    if value < lo {
        lo
    } else if value > hi {
        hi
    } else {
        value
    }
}

/// Clockwise sweep from `start` to `end`, wrapping through a full turn.
#[inline]
fn clockwise_sweep(start: f64, end: f64) -> f64 {
    let raw = end - start;
    if raw > 0.0 { raw } else { raw + ANGLE_FULL_TURN }
}

fn lookup(name: &str) -> Option<PresetFn> {
    let f: PresetFn = match name {
        "rect" => rect,
        "roundRect" => round_rect,
        "ellipse" => ellipse,
        "arc" => arc,
        "pie" => pie,
        "chord" => chord,
        "line" => line,
        "triangle" => triangle,
        "rtTriangle" => rt_triangle,
        "diamond" => diamond,
        "parallelogram" => parallelogram,
        "trapezoid" => trapezoid,
        "corner" => corner,
        "chevron" => chevron,
        "homePlate" => home_plate,
        "rightArrow" => right_arrow,
        "leftArrow" => left_arrow,
        "plus" => plus,
        _ => return None,
    };
    Some(f)
}

/// Compile a preset at `width` x `height`; `None` for unknown names.
pub fn compile_preset(
    name: &str,
    adjustments: &HashMap<String, f64>,
    width: f64,
    height: f64,
) -> Option<PathData> {
    let Some(f) = lookup(name) else {
        log::debug!("unsupported preset geometry {name:?}");
        return None;
    };
    Some(f(&Guides {
        w: width,
        h: height,
        adjustments,
    }))
}

fn polygon(points: &[(f64, f64)]) -> PathData {
    let mut b = PathBuilder::new();
    if let Some((&(x, y), rest)) = points.split_first() {
        b.move_to(x, y);
        for &(x, y) in rest {
            b.line_to(x, y);
        }
        b.close();
    }
    b.finish()
}

fn rect(g: &Guides<'_>) -> PathData {
    polygon(&[(0.0, 0.0), (g.w, 0.0), (g.w, g.h), (0.0, g.h)])
}

fn round_rect(g: &Guides<'_>) -> PathData {
    let a = pin(0.0, g.adj("adj", 16667.0), 50000.0);
    let dx1 = g.of_ss(a);
    let (x2, y2) = (g.w - dx1, g.h - dx1);

    let mut b = PathBuilder::new();
    b.move_to(0.0, dx1)
        .arc_to(dx1, dx1, 180.0, 90.0)
        .line_to(x2, 0.0)
        .arc_to(dx1, dx1, 270.0, 90.0)
        .line_to(g.w, y2)
        .arc_to(dx1, dx1, 0.0, 90.0)
        .line_to(dx1, g.h)
        .arc_to(dx1, dx1, 90.0, 90.0)
        .close();
    b.finish()
}

fn ellipse(g: &Guides<'_>) -> PathData {
    let (wd2, hd2) = (g.hc(), g.vc());
    let mut b = PathBuilder::new();
    b.move_to(0.0, hd2);
    for start in [180.0, 270.0, 0.0, 90.0] {
        b.arc_to(wd2, hd2, start, 90.0);
    }
    b.close();
    b.finish()
}

/// Start angle, sweep (both degrees) and start point of an arc-family preset.
fn arc_params(g: &Guides<'_>, default_start: f64, default_end: f64) -> (f64, f64, (f64, f64)) {
    let max = ANGLE_FULL_TURN - 1.0;
    let st_ang = pin(0.0, g.adj("adj1", default_start), max);
    let en_ang = pin(0.0, g.adj("adj2", default_end), max);
    let sw_ang = clockwise_sweep(st_ang, en_ang);

    let (start, sweep) = (angle_to_degrees(st_ang), angle_to_degrees(sw_ang));
    let origin = ellipse_point(g.hc(), g.vc(), g.hc(), g.vc(), start);
    (start, sweep, origin)
}

fn arc(g: &Guides<'_>) -> PathData {
    let (start, sweep, (x1, y1)) = arc_params(g, 16_200_000.0, 0.0);
    let mut b = PathBuilder::new();
    b.move_to(x1, y1).arc_to(g.hc(), g.vc(), start, sweep);
    b.finish()
}

fn pie(g: &Guides<'_>) -> PathData {
    let (start, sweep, (x1, y1)) = arc_params(g, 0.0, 16_200_000.0);
    let mut b = PathBuilder::new();
    b.move_to(x1, y1)
        .arc_to(g.hc(), g.vc(), start, sweep)
        .line_to(g.hc(), g.vc())
        .close();
    b.finish()
}

fn chord(g: &Guides<'_>) -> PathData {
    let (start, sweep, (x1, y1)) = arc_params(g, 2_700_000.0, 16_200_000.0);
    let mut b = PathBuilder::new();
    b.move_to(x1, y1).arc_to(g.hc(), g.vc(), start, sweep).close();
    b.finish()
}

fn line(g: &Guides<'_>) -> PathData {
    let mut b = PathBuilder::new();
    b.move_to(0.0, 0.0).line_to(g.w, g.h);
    b.finish()
}

fn triangle(g: &Guides<'_>) -> PathData {
    // Apex position is a fraction of the width, not of ss
    let a = pin(0.0, g.adj("adj", 50000.0), PERCENT_DENOMINATOR);
    let x1 = g.w * a / PERCENT_DENOMINATOR;
    polygon(&[(0.0, g.h), (x1, 0.0), (g.w, g.h)])
}

fn rt_triangle(g: &Guides<'_>) -> PathData {
    polygon(&[(0.0, g.h), (0.0, 0.0), (g.w, g.h)])
}

fn diamond(g: &Guides<'_>) -> PathData {
    polygon(&[(0.0, g.vc()), (g.hc(), 0.0), (g.w, g.vc()), (g.hc(), g.h)])
}

fn parallelogram(g: &Guides<'_>) -> PathData {
    let a = pin(0.0, g.adj("adj", 25000.0), g.max_for(PERCENT_DENOMINATOR, g.w));
    let x2 = g.of_ss(a);
    polygon(&[(0.0, g.h), (x2, 0.0), (g.w, 0.0), (g.w - x2, g.h)])
}

fn trapezoid(g: &Guides<'_>) -> PathData {
    let a = pin(0.0, g.adj("adj", 25000.0), g.max_for(50000.0, g.w));
    let x2 = g.of_ss(a);
    polygon(&[(0.0, g.h), (x2, 0.0), (g.w - x2, 0.0), (g.w, g.h)])
}

fn corner(g: &Guides<'_>) -> PathData {
    let a1 = pin(0.0, g.adj("adj1", 50000.0), g.max_for(PERCENT_DENOMINATOR, g.h));
    let a2 = pin(0.0, g.adj("adj2", 50000.0), g.max_for(PERCENT_DENOMINATOR, g.w));
    let x1 = g.of_ss(a2);
    let y1 = g.h - g.of_ss(a1);
    polygon(&[
        (0.0, 0.0),
        (x1, 0.0),
        (x1, y1),
        (g.w, y1),
        (g.w, g.h),
        (0.0, g.h),
    ])
}

fn chevron(g: &Guides<'_>) -> PathData {
    let a = pin(0.0, g.adj("adj", 50000.0), g.max_for(PERCENT_DENOMINATOR, g.w));
    let x1 = g.of_ss(a);
    let x2 = g.w - x1;
    polygon(&[
        (0.0, 0.0),
        (x2, 0.0),
        (g.w, g.vc()),
        (x2, g.h),
        (0.0, g.h),
        (x1, g.vc()),
    ])
}

fn home_plate(g: &Guides<'_>) -> PathData {
    let a = pin(0.0, g.adj("adj", 50000.0), g.max_for(PERCENT_DENOMINATOR, g.w));
    let x1 = g.w - g.of_ss(a);
    polygon(&[(0.0, 0.0), (x1, 0.0), (g.w, g.vc()), (x1, g.h), (0.0, g.h)])
}

/// Shaft half-height and head length shared by the block arrows.
fn arrow_params(g: &Guides<'_>) -> (f64, f64) {
    let a1 = pin(0.0, g.adj("adj1", 50000.0), PERCENT_DENOMINATOR);
    let a2 = pin(0.0, g.adj("adj2", 50000.0), g.max_for(PERCENT_DENOMINATOR, g.w));
    let dy1 = g.h * a1 / 200000.0;
    (dy1, g.of_ss(a2))
}

fn right_arrow(g: &Guides<'_>) -> PathData {
    let (dy1, head) = arrow_params(g);
    let x1 = g.w - head;
    let (y1, y2) = (g.vc() - dy1, g.vc() + dy1);
    polygon(&[
        (0.0, y1),
        (x1, y1),
        (x1, 0.0),
        (g.w, g.vc()),
        (x1, g.h),
        (x1, y2),
        (0.0, y2),
    ])
}

fn left_arrow(g: &Guides<'_>) -> PathData {
    let (dy1, head) = arrow_params(g);
    let x2 = head;
    let (y1, y2) = (g.vc() - dy1, g.vc() + dy1);
    polygon(&[
        (0.0, g.vc()),
        (x2, 0.0),
        (x2, y1),
        (g.w, y1),
        (g.w, y2),
        (x2, y2),
        (x2, g.h),
    ])
}

fn plus(g: &Guides<'_>) -> PathData {
    let a = pin(0.0, g.adj("adj", 25000.0), 50000.0);
    let x1 = g.of_ss(a);
    let (x2, y2) = (g.w - x1, g.h - x1);
    polygon(&[
        (0.0, x1),
        (x1, x1),
        (x1, 0.0),
        (x2, 0.0),
        (x2, x1),
        (g.w, x1),
        (g.w, y2),
        (x2, y2),
        (x2, g.h),
        (x1, g.h),
        (x1, y2),
        (0.0, y2),
    ])
}
