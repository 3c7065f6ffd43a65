//! Unit conversion utilities.
//!
//! DrawingML measures lengths in EMUs, angles in 60000ths of a degree and
//! ratios in 100000ths. Everything downstream of the resolvers works in CSS
//! pixels (96 DPI) and degrees.

/// EMUs per CSS pixel at 96 DPI.
pub const EMUS_PER_PX: i64 = 9_525;
/// Angle units per degree (`ST_Angle`).
pub const ANGLE_UNITS_PER_DEGREE: f64 = 60_000.0;
/// Full turn in `ST_Angle` units.
pub const ANGLE_FULL_TURN: f64 = 21_600_000.0;
/// Denominator of `ST_Percentage` / `ST_PositiveFixedPercentage` values.
pub const PERCENT_DENOMINATOR: f64 = 100_000.0;

#[inline]
pub fn emu_to_px_f64(emu: f64) -> f64 {
    emu / EMUS_PER_PX as f64
}

/// Convert an `ST_Angle` value to degrees.
#[inline]
pub fn angle_to_degrees(angle: f64) -> f64 {
    angle / ANGLE_UNITS_PER_DEGREE
}

/// Convert a 1/100000 fraction to a plain ratio.
#[inline]
pub fn percent_to_ratio(value: f64) -> f64 {
    value / PERCENT_DENOMINATOR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emu_px_conversion() {
        assert_eq!(emu_to_px_f64(914_400.0), 96.0);
        assert_eq!(emu_to_px_f64(38_100.0), 4.0);
    }

    #[test]
    fn test_angle_conversion() {
        assert_eq!(angle_to_degrees(5_400_000.0), 90.0);
        assert_eq!(angle_to_degrees(ANGLE_FULL_TURN), 360.0);
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent_to_ratio(50_000.0), 0.5);
    }
}
