//! Compound line decomposition.
//!
//! A compound line is drawn as two or three parallel strokes offset along the
//! unit normal of the line direction. Widths and offsets are fixed fractions
//! of the total width:
//!
//! | type | widths | offsets |
//! | --- | --- | --- |
//! | `dbl` | 3/8, 3/8 | -5/16, +5/16 |
//! | `thickThin` | 3/4, 1/4 | -1/8, +3/8 |
//! | `thinThick` | 1/4, 3/4 | -3/8, +1/8 |
//! | `tri` | 1/5, 1/5, 1/5 | -2/5, 0, +2/5 |
//!
//! Both backends draw lines through [`decompose`] so their output agrees.

use smallvec::{SmallVec, smallvec};

use super::options::CompoundLine;

/// One stroke of a decomposed line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubStroke {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub width: f64,
}

/// `(width, offset)` fractions of the total width for each sub-stroke.
fn layout(cmpd: CompoundLine) -> SmallVec<[(f64, f64); 3]> {
    match cmpd {
        CompoundLine::Single => smallvec![(1.0, 0.0)],
        CompoundLine::Double => smallvec![(3.0 / 8.0, -5.0 / 16.0), (3.0 / 8.0, 5.0 / 16.0)],
        CompoundLine::ThickThin => smallvec![(3.0 / 4.0, -1.0 / 8.0), (1.0 / 4.0, 3.0 / 8.0)],
        CompoundLine::ThinThick => smallvec![(1.0 / 4.0, -3.0 / 8.0), (3.0 / 4.0, 1.0 / 8.0)],
        CompoundLine::Triple => {
            smallvec![(1.0 / 5.0, -2.0 / 5.0), (1.0 / 5.0, 0.0), (1.0 / 5.0, 2.0 / 5.0)]
        },
    }
}

/// Split the line `(x1, y1)-(x2, y2)` of total `width` into parallel strokes.
///
/// Empty for a zero-length line or a non-positive width.
pub fn decompose(x1: f64, y1: f64, x2: f64, y2: f64, width: f64, cmpd: CompoundLine) -> SmallVec<[SubStroke; 3]> {
    let (dx, dy) = (x2 - x1, y2 - y1);
    let len = dx.hypot(dy);
    if !(width > 0.0) || len == 0.0 || !len.is_finite() {
        return SmallVec::new();
    }
    let (nx, ny) = (-dy / len, dx / len);

    layout(cmpd)
        .into_iter()
        .map(|(w, offset)| {
            let (ox, oy) = (nx * offset * width, ny * offset * width);
            SubStroke {
                x1: x1 + ox,
                y1: y1 + oy,
                x2: x2 + ox,
                y2: y2 + oy,
                width: w * width,
            }
        })
        .collect()
}
