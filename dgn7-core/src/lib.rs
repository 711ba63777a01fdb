//! # DGN7 Core
//!
//! Decoder for the element stream of DGN v7 design files: signature
//! validation, structural traversal of the self-describing element
//! records, and extraction of the text-bearing elements.
//!
//! ## Modules
//!
//! - `constants`: Format constants and header-byte accessors
//! - `error`: Error type for decode failures
//! - `types`: Core types (ElementHeader, DesignFileContent)
//! - `source`: Forward-only byte source with signature peek
//! - `decoder`: Strict element stream decoding
//! - `encoder`: Synthetic stream construction for tests and fixtures

#![warn(missing_docs)]

pub mod constants;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod source;
pub mod types;

// Re-export commonly used items
pub use decoder::{decode_from_bytes, decode_stream, decode_stream_bounded};
pub use error::DgnError;
pub use types::{DesignFileContent, ElementHeader, ElementRange};

/// Result type alias for DGN7 operations
pub type Result<T> = core::result::Result<T, DgnError>;
