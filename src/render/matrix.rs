use serde::Deserialize;

use crate::common::fmt::write_num_with_precision;

/// 2D affine transform `[a c e; b d f; 0 0 1]`, the SVG/canvas convention.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Matrix {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix {
    pub const IDENTITY: Matrix = Matrix {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub const fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    pub const fn translate(tx: f64, ty: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    pub const fn scale(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Clockwise rotation on a y-down surface.
    pub fn rotate(degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self::new(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// `self` applied after `other`.
    pub fn multiply(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    /// Transform of a shape placed at `(x, y)` with size `(w, h)`, rotated
    /// about its center and flipped inside its box.
    pub fn for_shape(x: f64, y: f64, w: f64, h: f64, rotation: f64, flip_h: bool, flip_v: bool) -> Matrix {
        let (cx, cy) = (w / 2.0, h / 2.0);
        let flip = Matrix::scale(if flip_h { -1.0 } else { 1.0 }, if flip_v { -1.0 } else { 1.0 });
        Matrix::translate(x + cx, y + cy)
            .multiply(&Matrix::rotate(rotation))
            .multiply(&flip)
            .multiply(&Matrix::translate(-cx, -cy))
    }

    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// SVG `transform` attribute value.
    pub fn write_svg(&self, buf: &mut String, precision: u32) {
        if self.a == 1.0 && self.b == 0.0 && self.c == 0.0 && self.d == 1.0 {
            buf.push_str("translate(");
            write_num_with_precision(buf, self.e, precision);
            buf.push(' ');
            write_num_with_precision(buf, self.f, precision);
            buf.push(')');
            return;
        }
        buf.push_str("matrix(");
        for (i, n) in [self.a, self.b, self.c, self.d, self.e, self.f].into_iter().enumerate() {
            if i > 0 {
                buf.push(' ');
            }
            // Rotation terms need more digits than coordinates
            write_num_with_precision(buf, n, precision.max(6));
        }
        buf.push(')');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: (f64, f64), b: (f64, f64)) -> bool {
        (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9
    }

    #[test]
    fn test_multiply_order() {
        let m = Matrix::translate(10.0, 0.0).multiply(&Matrix::scale(2.0, 2.0));
        assert!(approx(m.apply(1.0, 1.0), (12.0, 2.0)));
    }

    #[test]
    fn test_rotate_is_clockwise() {
        assert!(approx(Matrix::rotate(90.0).apply(1.0, 0.0), (0.0, 1.0)));
    }

    #[test]
    fn test_for_shape() {
        let m = Matrix::for_shape(100.0, 50.0, 20.0, 10.0, 0.0, false, false);
        assert_eq!(m, Matrix::translate(100.0, 50.0));

        let flipped = Matrix::for_shape(0.0, 0.0, 20.0, 10.0, 0.0, true, false);
        assert!(approx(flipped.apply(0.0, 0.0), (20.0, 0.0)));

        let rotated = Matrix::for_shape(0.0, 0.0, 20.0, 10.0, 180.0, false, false);
        assert!(approx(rotated.apply(0.0, 0.0), (20.0, 10.0)));
    }

    #[test]
    fn test_write_svg() {
        let mut buf = String::new();
        Matrix::translate(3.5, 4.0).write_svg(&mut buf, 2);
        assert_eq!(buf, "translate(3.5 4)");

        buf.clear();
        Matrix::scale(2.0, 0.5).write_svg(&mut buf, 2);
        assert_eq!(buf, "matrix(2 0 0 0.5 0 0)");
    }
}
