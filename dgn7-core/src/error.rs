//! Error types for DGN v7 decoding

use thiserror::Error;

/// Errors that can occur while decoding a design file
///
/// Every format error is fatal for the current stream: the format has no
/// resynchronization marker, so a detected inconsistency aborts the parse
/// instead of guessing at the next element boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DgnError {
    /// File signature matches no supported design-file variant
    #[error("bad file signature 0x{0:08x}")]
    BadSignature(u32),

    /// File is a cell library, which this decoder does not handle
    #[error("cell libraries are not supported (signature 0x{0:08x})")]
    CellLibrary(u32),

    /// Source ended in the middle of an element
    #[error("truncated element while reading {context} ({expected} byte(s) expected)")]
    Truncated {
        /// Which field or region the read was for.
        context: &'static str,
        /// How many bytes the operation required.
        expected: usize,
    },

    /// Declared word count is smaller than the fields already consumed
    #[error("element type {element_type} declares {word_count} words, fewer than its {minimum}-word header")]
    InconsistentLength {
        /// Type code of the offending element.
        element_type: u8,
        /// The word count the element declared.
        word_count: u16,
        /// Minimum legal word count for this element type.
        minimum: u16,
    },

    /// Decoding consumed more bytes than the caller allowed
    #[error("consumed {consumed} bytes, exceeding the limit of {limit}")]
    ByteLimitExceeded {
        /// Bytes consumed when the limit check fired.
        consumed: u64,
        /// The configured limit.
        limit: u64,
    },

    /// Element could not be constructed or encoded
    #[error("invalid element structure: {0}")]
    InvalidStructure(String),

    /// IO error during read/skip
    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for DgnError {
    fn from(err: std::io::Error) -> Self {
        DgnError::Io(err.to_string())
    }
}
