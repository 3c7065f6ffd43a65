//! Common types and utilities shared by the resolvers and the render backends.

// Submodule declarations
pub mod error;
pub mod fmt;
pub mod unit;
pub mod xml;

// Re-exports for convenience
pub use error::{Error, Result};
