//! Parsing of resolved paint strings back into channels.
//!
//! Both render backends receive paint as `#RRGGBB` or `rgba(r, g, b, a)`
//! strings and need the individual channels.

use super::rgb::RGBColor;

/// A color with straight (non-premultiplied) alpha in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub rgb: RGBColor,
    pub alpha: f64,
}

impl Rgba {
    pub const fn opaque(rgb: RGBColor) -> Self {
        Self { rgb, alpha: 1.0 }
    }

    pub fn new(rgb: RGBColor, alpha: f64) -> Self {
        Self {
            rgb,
            alpha: alpha.clamp(0.0, 1.0),
        }
    }

    /// Alpha scaled to 0-255.
    #[inline]
    pub fn alpha_u8(&self) -> u8 {
        (self.alpha * 255.0).round() as u8
    }

    #[inline]
    pub fn is_transparent(&self) -> bool {
        self.alpha <= 0.0
    }
}

/// Parse a paint string: `#RRGGBB`, `RRGGBB`, `#RGB`, `rgb(r, g, b)` or
/// `rgba(r, g, b, a)`. `none`/`transparent` and anything unparseable give `None`.
pub fn parse_paint(paint: &str) -> Option<Rgba> {
    let paint = paint.trim();
    if let Some(body) = paint
        .strip_prefix("rgba(")
        .or_else(|| paint.strip_prefix("rgb("))
    {
        let body = body.strip_suffix(')')?;
        let mut parts = body.split(',').map(str::trim);
        let r: f64 = parts.next()?.parse().ok()?;
        let g: f64 = parts.next()?.parse().ok()?;
        let b: f64 = parts.next()?.parse().ok()?;
        let alpha = match parts.next() {
            Some(a) => a.parse().ok()?,
            None => 1.0,
        };
        if parts.next().is_some() {
            return None;
        }
        return Some(Rgba::new(RGBColor::from_f64(r, g, b), alpha));
    }

    match paint {
        "" | "none" | "transparent" => None,
        hex => RGBColor::from_hex(hex).map(Rgba::opaque),
    }
}

/// Format a hex color with alpha as a CSS paint value.
///
/// Opaque colors stay as the given hex string; translucent colors become
/// `rgba(r, g, b, a)`.
pub fn format_paint(hex: &str, alpha: f64) -> String {
    if alpha >= 1.0 {
        return hex.to_string();
    }
    let Some(c) = RGBColor::from_hex(hex) else {
        return hex.to_string();
    };
    format!("rgba({}, {}, {}, {})", c.r, c.g, c.b, alpha.max(0.0))
}
