//! Unified error type for litchi-render operations.
use thiserror::Error;

/// Main error type for litchi-render operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A drawing surface could not be allocated with the requested size
    #[error("Invalid surface dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Embedded image payload could not be decoded
    #[error("Image decode error: {0}")]
    ImageDecode(String),

    /// Output surface could not be encoded
    #[error("Encode error: {0}")]
    Encode(String),

    /// Font data was rejected by the rasterizer
    #[error("Font error: {0}")]
    Font(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Result type for litchi-render operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidDimensions {
            width: 0,
            height: 10,
        };
        assert_eq!(err.to_string(), "Invalid surface dimensions: 0x10");
        assert_eq!(
            Error::ImageDecode("bad header".to_string()).to_string(),
            "Image decode error: bad header"
        );
    }
}
