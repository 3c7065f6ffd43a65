//! Color-space transforms applied to scheme colors.
//!
//! Every transform takes its parameter in DrawingML's 1/100000 units. Hex in,
//! hex out; input that is not a hex color is returned unchanged.

use super::rgb::RGBColor;
use crate::common::unit::percent_to_ratio;

/// Blend toward white: `c' = c * (1 - amt) + 255 * amt`.
pub fn apply_tint(hex: &str, tint: f64) -> String {
    map_hex(hex, |c| tint_rgb(c, percent_to_ratio(tint)))
}

/// Blend toward black: `c' = c * (1 - amt)`.
pub fn apply_shade(hex: &str, shade: f64) -> String {
    map_hex(hex, |c| shade_rgb(c, percent_to_ratio(shade)))
}

/// Scale and/or offset the HSL lightness channel.
pub fn apply_luminance(hex: &str, lum_mod: Option<f64>, lum_off: Option<f64>) -> String {
    map_hex(hex, |c| luminance_rgb(c, lum_mod, lum_off))
}

/// Scale the HSL saturation channel.
pub fn apply_saturation(hex: &str, sat_mod: f64) -> String {
    map_hex(hex, |c| saturation_rgb(c, sat_mod))
}

fn map_hex(hex: &str, f: impl FnOnce(RGBColor) -> RGBColor) -> String {
    match RGBColor::from_hex(hex) {
        Some(c) => f(c).to_css_hex(),
        None => hex.to_string(),
    }
}

pub(crate) fn tint_rgb(c: RGBColor, amt: f64) -> RGBColor {
    let blend = |ch: u8| ch as f64 * (1.0 - amt) + 255.0 * amt;
    RGBColor::from_f64(blend(c.r), blend(c.g), blend(c.b))
}

pub(crate) fn shade_rgb(c: RGBColor, amt: f64) -> RGBColor {
    let blend = |ch: u8| ch as f64 * (1.0 - amt);
    RGBColor::from_f64(blend(c.r), blend(c.g), blend(c.b))
}

pub(crate) fn luminance_rgb(c: RGBColor, lum_mod: Option<f64>, lum_off: Option<f64>) -> RGBColor {
    let (h, s, mut l) = rgb_to_hsl(c.r, c.g, c.b);
    if let Some(m) = lum_mod {
        l *= percent_to_ratio(m);
    }
    if let Some(o) = lum_off {
        l += percent_to_ratio(o);
    }
    let (r, g, b) = hsl_to_rgb(h, s, clamp01(l));
    RGBColor::new(r, g, b)
}

pub(crate) fn saturation_rgb(c: RGBColor, sat_mod: f64) -> RGBColor {
    let (h, s, l) = rgb_to_hsl(c.r, c.g, c.b);
    let (r, g, b) = hsl_to_rgb(h, clamp01(s * percent_to_ratio(sat_mod)), l);
    RGBColor::new(r, g, b)
}

#[inline]
fn clamp01(v: f64) -> f64 {
    v.clamp(0.0, 1.0)
}

/// Convert 8-bit RGB to HSL, every component in `[0, 1]`.
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    let r = r as f64 / 255.0;
    let g = g as f64 / 255.0;
    let b = b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        // achromatic
        return (0.0, 0.0, l);
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    (h / 6.0, s, l)
}

/// Convert HSL (components in `[0, 1]`) back to 8-bit RGB.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (u8, u8, u8) {
    if s == 0.0 {
        let v = (l * 255.0).round() as u8;
        return (v, v, v);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    let r = hue_to_rgb(p, q, h + 1.0 / 3.0);
    let g = hue_to_rgb(p, q, h);
    let b = hue_to_rgb(p, q, h - 1.0 / 3.0);

    let c = RGBColor::from_f64(r * 255.0, g * 255.0, b * 255.0);
    (c.r, c.g, c.b)
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 1.0 / 2.0 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tint_and_shade_endpoints() {
        assert_eq!(apply_tint("#336699", 100_000.0), "#FFFFFF");
        assert_eq!(apply_tint("#336699", 0.0), "#336699");
        assert_eq!(apply_shade("#336699", 100_000.0), "#000000");
        assert_eq!(apply_shade("#336699", 0.0), "#336699");
        assert_eq!(apply_shade("#FF0000", 50_000.0), "#800000");
        assert_eq!(apply_tint("#000000", 50_000.0), "#808080");
    }

    #[test]
    fn test_luminance() {
        // lumMod 50% on pure red halves the lightness: L 0.5 -> 0.25
        assert_eq!(apply_luminance("#FF0000", Some(50_000.0), None), "#800000");
        // lumOff pushes toward white and clamps
        assert_eq!(apply_luminance("#FF0000", None, Some(60_000.0)), "#FFFFFF");
        // typical "lighter 40%" pair
        assert_eq!(
            apply_luminance("#000000", Some(60_000.0), Some(40_000.0)),
            "#666666"
        );
        assert_eq!(apply_luminance("#4472C4", None, None), "#4472C4");
    }

    #[test]
    fn test_saturation() {
        assert_eq!(apply_saturation("#FF0000", 0.0), "#808080");
        assert_eq!(apply_saturation("#808080", 200_000.0), "#808080");
    }

    #[test]
    fn test_invalid_hex_is_passthrough() {
        assert_eq!(apply_tint("not-a-color", 50_000.0), "not-a-color");
    }

    #[test]
    fn test_hsl_primaries() {
        assert_eq!(rgb_to_hsl(255, 0, 0), (0.0, 1.0, 0.5));
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), (255, 0, 0));
        assert_eq!(hsl_to_rgb(1.0 / 3.0, 1.0, 0.5), (0, 255, 0));
        assert_eq!(hsl_to_rgb(2.0 / 3.0, 1.0, 0.5), (0, 0, 255));
        assert_eq!(rgb_to_hsl(128, 128, 128).1, 0.0);
    }

    #[cfg(test)]
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn hex_strategy() -> impl Strategy<Value = String> {
            (any::<u8>(), any::<u8>(), any::<u8>())
                .prop_map(|(r, g, b)| RGBColor::new(r, g, b).to_css_hex())
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(256))]

            #[test]
            fn prop_tint_is_monotonic(hex in hex_strategy(), a in 0u32..=100_000, b in 0u32..=100_000) {
                let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
                let c_lo = RGBColor::from_hex(&apply_tint(&hex, lo as f64)).unwrap();
                let c_hi = RGBColor::from_hex(&apply_tint(&hex, hi as f64)).unwrap();
                prop_assert!(c_lo.r <= c_hi.r && c_lo.g <= c_hi.g && c_lo.b <= c_hi.b);
                prop_assert_eq!(apply_tint(&hex, 100_000.0), "#FFFFFF");
            }

            #[test]
            fn prop_shade_endpoints(hex in hex_strategy()) {
                prop_assert_eq!(apply_shade(&hex, 100_000.0), "#000000");
                prop_assert_eq!(apply_shade(&hex, 0.0), hex);
            }

            #[test]
            fn prop_hsl_round_trip(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
                let (h, s, l) = rgb_to_hsl(r, g, b);
                let (r2, g2, b2) = hsl_to_rgb(h, s, l);
                prop_assert!((r as i16 - r2 as i16).abs() <= 1);
                prop_assert!((g as i16 - g2 as i16).abs() <= 1);
                prop_assert!((b as i16 - b2 as i16).abs() <= 1);
            }
        }
    }
}
