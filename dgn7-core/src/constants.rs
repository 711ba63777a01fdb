//! Constants and header-byte accessors for the DGN v7 element stream

use serde::{Deserialize, Serialize};

/// File signature of the little-endian-flavored design file variant,
/// read as a big-endian u32 from the first four bytes
pub const SIGNATURE_V7: u32 = 0x0809_fe02;

/// File signature of the big-endian-flavored variant; decoded identically
pub const SIGNATURE_V7_ALT: u32 = 0xc809_fe02;

/// Signature of a cell library; recognized so it can be rejected with a
/// dedicated diagnostic rather than a generic bad-signature error
pub const SIGNATURE_CELL_LIBRARY: u32 = 0x0805_1700;

/// Terminator byte; two in a row mark the intentional end of the stream
pub const TERMINATOR_BYTE: u8 = 0xff;

/// The single element type whose payload carries human-readable text
pub const TEXT_ELEMENT_TYPE: u8 = 17;

/// Words covered by the common element fields that follow the word count:
/// six 4-byte range values (12 words) plus four 2-byte property fields
/// (4 words). The declared word count includes these, so every skip and
/// text-length computation subtracts from here.
pub const COMMON_FIELD_WORDS: u16 = 16;

/// Bytes of text-element sub-header (font, symbology, origin) sitting
/// between the common fields and the character data
pub const TEXT_SUBHEADER_BYTES: usize = 24;

/// Words consumed before a text element's character data: the common
/// fields plus the 12-word text sub-header
pub const TEXT_HEADER_WORDS: u16 = 28;

/// Lowest byte value kept by text sanitation (space)
pub const PRINTABLE_MIN: u8 = 0x20;

/// Highest byte value kept by text sanitation (tilde)
pub const PRINTABLE_MAX: u8 = 0x7e;

/// First byte of every element header (stored as a single byte)
///
/// Layout: 6-bit level number, one reserved bit, and the complex-element
/// flag in the high bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelFlags(u8);

impl LevelFlags {
    /// Mask selecting the 6-bit level number
    pub const LEVEL_MASK: u8 = 0b0011_1111;

    /// Reserved bit
    pub const RESERVED: u8 = 0b0100_0000;

    /// Element is part of a complex chain (cell, chain, surface)
    pub const COMPLEX: u8 = 0b1000_0000;

    /// Create from the raw header byte
    pub const fn new(raw: u8) -> Self {
        Self(raw)
    }

    /// Get the raw byte back
    pub const fn as_u8(&self) -> u8 {
        self.0
    }

    /// Level number (0-63)
    pub const fn level(&self) -> u8 {
        self.0 & Self::LEVEL_MASK
    }

    /// Check the complex-element flag
    pub const fn is_complex(&self) -> bool {
        (self.0 & Self::COMPLEX) != 0
    }
}

/// Second byte of every element header (stored as a single byte)
///
/// Layout: 7-bit element type and the deleted flag in the high bit. The
/// type is the record's discriminant; everything except type 17 is
/// structurally skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeFlags(u8);

impl TypeFlags {
    /// Mask selecting the 7-bit element type
    pub const TYPE_MASK: u8 = 0b0111_1111;

    /// Element has been deleted in place
    pub const DELETED: u8 = 0b1000_0000;

    /// Create from the raw header byte
    pub const fn new(raw: u8) -> Self {
        Self(raw)
    }

    /// Get the raw byte back
    pub const fn as_u8(&self) -> u8 {
        self.0
    }

    /// Element type code (0-127)
    pub const fn element_type(&self) -> u8 {
        self.0 & Self::TYPE_MASK
    }

    /// Check the deleted flag
    pub const fn is_deleted(&self) -> bool {
        (self.0 & Self::DELETED) != 0
    }
}
