//! Error conversion implementations.
//!
//! This module contains From trait implementations to convert from third-party
//! error types to the unified Error type.

use super::types::Error;

#[cfg(feature = "raster")]
impl From<base64::DecodeError> for Error {
    fn from(err: base64::DecodeError) -> Self {
        Error::ImageDecode(err.to_string())
    }
}

#[cfg(feature = "raster")]
impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::ImageDecode(err.to_string())
    }
}
