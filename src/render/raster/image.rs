//! Image payload decoding for `draw_image`.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tiny_skia::{ColorU8, IntSize, Pixmap};

use crate::common::error::{Error, Result};

/// Split a `data:` URI into its payload bytes.
pub(crate) fn decode_data_uri(href: &str) -> Result<Vec<u8>> {
    let rest = href
        .strip_prefix("data:")
        .ok_or_else(|| Error::ImageDecode("not a data URI".to_string()))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| Error::ImageDecode("data URI without payload".to_string()))?;
    if meta.ends_with(";base64") {
        let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        Ok(STANDARD.decode(compact)?)
    } else {
        Ok(payload.as_bytes().to_vec())
    }
}

/// Decode an encoded image into a premultiplied pixmap.
pub(crate) fn decode_pixmap(bytes: &[u8]) -> Result<Pixmap> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    let size = IntSize::from_wh(width, height).ok_or(Error::InvalidDimensions { width, height })?;
    let mut pixmap =
        Pixmap::new(size.width(), size.height()).ok_or(Error::InvalidDimensions { width, height })?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(rgba.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Ok(pixmap)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_uri_forms() {
        assert_eq!(decode_data_uri("data:text/plain;base64,aGk=").unwrap(), b"hi");
        assert_eq!(decode_data_uri("data:text/plain,hi").unwrap(), b"hi");
        assert!(matches!(decode_data_uri("https://example.com/a.png"), Err(Error::ImageDecode(_))));
        assert!(matches!(decode_data_uri("data:image/png;base64"), Err(Error::ImageDecode(_))));
        assert!(matches!(decode_data_uri("data:image/png;base64,!!!"), Err(Error::ImageDecode(_))));
    }

    #[test]
    fn test_garbage_image_bytes() {
        assert!(matches!(decode_pixmap(b"not an image"), Err(Error::ImageDecode(_))));
    }
}
