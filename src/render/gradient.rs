//! Linear gradient fills.

use serde::Deserialize;

use crate::drawingml::color::ColorAlpha;

/// One gradient stop. `position` is in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GradientStop {
    pub position: f64,
    pub color: ColorAlpha,
}

impl GradientStop {
    pub fn new(position: f64, color: ColorAlpha) -> Self {
        Self { position, color }
    }
}

/// Linear gradient at `angle` degrees, clockwise from left-to-right.
///
/// Stops are used in the order given; callers sort them when needed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LinearGradient {
    #[serde(default)]
    pub angle: f64,
    pub stops: Vec<GradientStop>,
}

impl LinearGradient {
    pub fn new(angle: f64, stops: Vec<GradientStop>) -> Self {
        Self { angle, stops }
    }

    /// Endpoints of the gradient line across the box `(x, y, w, h)`.
    ///
    /// The line passes through the box center and is long enough for the
    /// first and last stops to land on opposite corners.
    pub fn line(&self, x: f64, y: f64, w: f64, h: f64) -> ((f64, f64), (f64, f64)) {
        let (sin, cos) = self.angle.to_radians().sin_cos();
        let half = (w * cos.abs() + h * sin.abs()) / 2.0;
        let (cx, cy) = (x + w / 2.0, y + h / 2.0);
        ((cx - cos * half, cy - sin * half), (cx + cos * half, cy + sin * half))
    }
}
