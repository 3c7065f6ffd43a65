//! Unified error types for litchi-render.
//!
//! Style resolution and drawing are best-effort and never fail; only surface
//! construction, resource decoding and export report errors through this type.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result};
