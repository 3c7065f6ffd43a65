use std::fmt;

use crate::common::fmt::write_hex_rgb;

/// RGB color representation.
///
/// Represents a color using red, green, and blue components, each in the range 0-255.
///
/// # Examples
///
/// ```rust
/// use litchi_render::drawingml::color::RGBColor;
///
/// let red = RGBColor::new(255, 0, 0);
/// let blue = RGBColor::from_hex("#0000FF").unwrap();
/// assert_eq!(red.to_css_hex(), "#FF0000");
/// assert_eq!(blue.b, 255);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RGBColor {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
}

impl RGBColor {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create an RGB color from a hex string.
    ///
    /// Accepts `RRGGBB`, `#RRGGBB` and the short `#RGB` form.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        match hex.len() {
            6 => {
                let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
                let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
                let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
                Some(Self::new(r, g, b))
            },
            3 => {
                let mut channels = [0u8; 3];
                for (i, c) in hex.chars().enumerate() {
                    let v = c.to_digit(16)? as u8;
                    channels[i] = v << 4 | v;
                }
                Some(Self::new(channels[0], channels[1], channels[2]))
            },
            _ => None,
        }
    }

    /// Build a color from floating-point channels, rounding and clamping to 0-255.
    #[inline]
    pub fn from_f64(r: f64, g: f64, b: f64) -> Self {
        Self::new(clamp_channel(r), clamp_channel(g), clamp_channel(b))
    }

    /// Convert to hex string (without # prefix).
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Convert to a `#RRGGBB` string.
    pub fn to_css_hex(&self) -> String {
        let mut s = String::with_capacity(7);
        write_hex_rgb(&mut s, self.r, self.g, self.b);
        s
    }

    #[inline]
    pub fn channels(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

#[inline]
pub(crate) fn clamp_channel(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.round().clamp(0.0, 255.0) as u8
}

impl fmt::Display for RGBColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        assert_eq!(RGBColor::from_hex("FF8000"), Some(RGBColor::new(255, 128, 0)));
        assert_eq!(RGBColor::from_hex("#0000ff"), Some(RGBColor::new(0, 0, 255)));
        assert_eq!(RGBColor::from_hex("#F0A"), Some(RGBColor::new(255, 0, 170)));
        assert_eq!(RGBColor::from_hex("#GG0000"), None);
        assert_eq!(RGBColor::from_hex("#12345"), None);
    }

    #[test]
    fn test_display_and_clamp() {
        assert_eq!(RGBColor::new(1, 2, 3).to_string(), "#010203");
        assert_eq!(RGBColor::from_f64(-4.0, 127.5, 300.0), RGBColor::new(0, 128, 255));
    }
}
