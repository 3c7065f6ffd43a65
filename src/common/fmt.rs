//! Number and colour writers shared by the path serializer and the SVG backend.
//!
//! All functions write directly into a `&mut String` instead of returning a new
//! allocation. Integers go through `itoa`, floats through `ryu`.

/// Default number of decimal places kept in serialized coordinates.
pub const DEFAULT_PRECISION: u32 = 2;

/// Write a number with at most [`DEFAULT_PRECISION`] decimals and no trailing zeros.
///
/// # Examples
///
/// ```
/// use litchi_render::common::fmt::write_num;
///
/// let mut buf = String::new();
/// write_num(&mut buf, 10.0);
/// assert_eq!(buf, "10");
/// ```
#[inline]
pub fn write_num(buf: &mut String, n: f64) {
    write_num_with_precision(buf, n, DEFAULT_PRECISION);
}

/// Write a number rounded to `precision` decimals, trimming trailing zeros.
pub fn write_num_with_precision(buf: &mut String, n: f64, precision: u32) {
    if !n.is_finite() {
        // NaN/inf coordinates come from malformed upstream input; keep them visible
        let mut buffer = ryu::Buffer::new();
        buf.push_str(buffer.format(n));
        return;
    }

    let factor = 10f64.powi(precision as i32);
    let rounded = (n * factor).round() / factor;

    if rounded.fract() == 0.0 && rounded.abs() < 1e15 {
        let mut buffer = itoa::Buffer::new();
        // Avoid "-0"
        let int = rounded as i64;
        buf.push_str(buffer.format(int));
        return;
    }

    let mut buffer = ryu::Buffer::new();
    let s = buffer.format(rounded);
    if s.contains('e') {
        // ryu switches to exponent form for tiny magnitudes; fall back to fixed
        let fixed = format!("{:.*}", precision as usize, rounded);
        buf.push_str(fixed.trim_end_matches('0').trim_end_matches('.'));
    } else if s.contains('.') {
        buf.push_str(s.trim_end_matches('0').trim_end_matches('.'));
    } else {
        buf.push_str(s);
    }
}

/// Format a number with minimal precision (no trailing zeros).
#[inline]
pub fn fmt_num(n: f64) -> String {
    let mut s = String::with_capacity(16);
    write_num(&mut s, n);
    s
}

/// Write an RGB triple as `#RRGGBB`.
#[inline]
pub fn write_hex_rgb(buf: &mut String, r: u8, g: u8, b: u8) {
    const DIGITS: &[u8; 16] = b"0123456789ABCDEF";
    buf.push('#');
    for c in [r, g, b] {
        buf.push(DIGITS[(c >> 4) as usize] as char);
        buf.push(DIGITS[(c & 0x0F) as usize] as char);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_num() {
        let mut buf = String::new();
        write_num(&mut buf, 10.0);
        assert_eq!(buf, "10");

        buf.clear();
        write_num(&mut buf, 10.5);
        assert_eq!(buf, "10.5");

        buf.clear();
        write_num(&mut buf, 10.123);
        assert_eq!(buf, "10.12");

        buf.clear();
        write_num(&mut buf, -0.001);
        assert_eq!(buf, "0");

        buf.clear();
        write_num_with_precision(&mut buf, 1.23456, 4);
        assert_eq!(buf, "1.2346");
    }

    #[test]
    fn test_write_hex_rgb() {
        let mut buf = String::new();
        write_hex_rgb(&mut buf, 255, 0, 171);
        assert_eq!(buf, "#FF00AB");
    }
}
