//! Synthetic element stream construction
//!
//! Production DGN v7 handling is decode-only; this module assembles
//! well-formed element streams for tests, demos, benches, and fixtures.
//! Word counts are derived from the payload so built streams always honor
//! the self-skipping length contract the decoder depends on.

use crate::constants::{
    COMMON_FIELD_WORDS, LevelFlags, SIGNATURE_V7, SIGNATURE_V7_ALT, TERMINATOR_BYTE,
    TEXT_ELEMENT_TYPE, TEXT_SUBHEADER_BYTES, TypeFlags,
};
use crate::error::DgnError;
use crate::types::ElementRange;
use bytes::{BufMut, Bytes, BytesMut};

/// Builder for a single element with an opaque payload
pub struct ElementBuilder {
    element_type: u8,
    level: u8,
    complex: bool,
    deleted: bool,
    range: ElementRange,
    graphic_group: u16,
    attribute_offset: u16,
    properties: u16,
    symbology: u16,
    payload: Bytes,
}

impl ElementBuilder {
    /// Start an element of the given type (masked to 7 bits)
    pub fn new(element_type: u8) -> Self {
        Self {
            element_type: element_type & TypeFlags::TYPE_MASK,
            level: 0,
            complex: false,
            deleted: false,
            range: ElementRange::default(),
            graphic_group: 0,
            attribute_offset: 0,
            properties: 0,
            symbology: 0,
            payload: Bytes::new(),
        }
    }

    /// Set the level number (masked to 6 bits)
    pub fn level(mut self, level: u8) -> Self {
        self.level = level & LevelFlags::LEVEL_MASK;
        self
    }

    /// Mark the element as part of a complex chain
    pub fn complex(mut self) -> Self {
        self.complex = true;
        self
    }

    /// Mark the element as deleted in place
    pub fn deleted(mut self) -> Self {
        self.deleted = true;
        self
    }

    /// Set the range fields
    pub fn range(mut self, range: ElementRange) -> Self {
        self.range = range;
        self
    }

    /// Set the symbology word
    pub fn symbology(mut self, symbology: u16) -> Self {
        self.symbology = symbology;
        self
    }

    /// Set the type-specific payload; must be an even number of bytes
    pub fn payload(mut self, payload: Bytes) -> Self {
        self.payload = payload;
        self
    }

    /// Encode the element
    ///
    /// The word count is computed as the common fields plus the payload,
    /// so the declared length always matches the emitted bytes.
    pub fn build(self) -> Result<Bytes, DgnError> {
        if self.payload.len() % 2 != 0 {
            return Err(DgnError::InvalidStructure(format!(
                "payload must be an even number of bytes, got {}",
                self.payload.len()
            )));
        }
        let words = COMMON_FIELD_WORDS as usize + self.payload.len() / 2;
        if words > u16::MAX as usize {
            return Err(DgnError::InvalidStructure(format!(
                "element of {} words exceeds the 16-bit word count",
                words
            )));
        }

        let mut buf = BytesMut::with_capacity(4 + words * 2);

        let mut h1 = self.level;
        if self.complex {
            h1 |= LevelFlags::COMPLEX;
        }
        let mut h2 = self.element_type;
        if self.deleted {
            h2 |= TypeFlags::DELETED;
        }
        buf.put_u8(h1);
        buf.put_u8(h2);
        buf.put_u16_le(words as u16);

        buf.put_u32_le(self.range.x_low);
        buf.put_u32_le(self.range.y_low);
        buf.put_u32_le(self.range.z_low);
        buf.put_u32_le(self.range.x_high);
        buf.put_u32_le(self.range.y_high);
        buf.put_u32_le(self.range.z_high);

        buf.put_u16_le(self.graphic_group);
        buf.put_u16_le(self.attribute_offset);
        buf.put_u16_le(self.properties);
        buf.put_u16_le(self.symbology);

        buf.put_slice(&self.payload);

        Ok(buf.freeze())
    }
}

/// Encode a text element (type 17) with a zeroed sub-header
///
/// Takes raw bytes rather than a `&str` so tests can plant unprintable
/// values for the sanitizer to strip. Odd-length text is padded with one
/// NUL, which sanitation removes again on decode.
pub fn text_element(text: &[u8]) -> Result<Bytes, DgnError> {
    let mut payload = BytesMut::with_capacity(TEXT_SUBHEADER_BYTES + text.len() + 1);
    payload.put_bytes(0, TEXT_SUBHEADER_BYTES);
    payload.put_slice(text);
    if text.len() % 2 != 0 {
        payload.put_u8(0);
    }
    ElementBuilder::new(TEXT_ELEMENT_TYPE)
        .payload(payload.freeze())
        .build()
}

/// Assembles a complete synthetic design file
///
/// Starts with the signature element (the four signature bytes double as
/// the level/type pair and word count of the type-9 design-file header
/// element, padded out to its declared length), then appends body elements
/// and optionally the two-byte terminator.
pub struct DesignFileBuilder {
    buf: BytesMut,
}

impl DesignFileBuilder {
    /// Start a design file with the little-endian-flavored signature
    pub fn new() -> Self {
        Self::with_signature(SIGNATURE_V7).expect("supported signature")
    }

    /// Start a design file with a specific supported signature
    pub fn with_signature(sig: u32) -> Result<Self, DgnError> {
        if sig != SIGNATURE_V7 && sig != SIGNATURE_V7_ALT {
            return Err(DgnError::BadSignature(sig));
        }
        let raw = sig.to_be_bytes();
        // The low half of the signature is the header element's word count
        let words = u16::from_le_bytes([raw[2], raw[3]]) as usize;

        let mut buf = BytesMut::with_capacity(4 + words * 2);
        buf.put_slice(&raw);
        buf.put_bytes(0, words * 2);

        Ok(Self { buf })
    }

    /// Append one encoded element
    pub fn element(mut self, element: Bytes) -> Self {
        self.buf.put_slice(&element);
        self
    }

    /// Finish with the two-byte terminator pattern
    pub fn finish(mut self) -> Bytes {
        self.buf.put_u8(TERMINATOR_BYTE);
        self.buf.put_u8(TERMINATOR_BYTE);
        self.buf.freeze()
    }

    /// Finish at a bare element boundary, without a terminator
    pub fn finish_without_terminator(self) -> Bytes {
        self.buf.freeze()
    }
}

impl Default for DesignFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
