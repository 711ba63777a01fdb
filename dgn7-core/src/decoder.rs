//! Element stream decoding (strict mode)
//!
//! The stream is self-skipping: every element declares its own length in
//! 16-bit words, so the decoder only interprets the one text-bearing type
//! and advances past everything else by arithmetic on the declared word
//! count. An off-by-one in that arithmetic desynchronizes the rest of the
//! stream with no way to recover, so all length computations live here and
//! are checked before any skip.

use crate::constants::{
    COMMON_FIELD_WORDS, LevelFlags, PRINTABLE_MAX, PRINTABLE_MIN, SIGNATURE_CELL_LIBRARY,
    SIGNATURE_V7, SIGNATURE_V7_ALT, TERMINATOR_BYTE, TEXT_ELEMENT_TYPE, TEXT_HEADER_WORDS,
    TEXT_SUBHEADER_BYTES, TypeFlags,
};
use crate::error::DgnError;
use crate::source::ByteSource;
use crate::types::{DesignFileContent, ElementHeader, ElementRange};
use std::io::Read;

#[cfg(feature = "logging")]
use tracing::{debug, trace};

/// Validate the 4-byte file signature without consuming it
///
/// Accepts the two supported design-file variants and returns the matched
/// signature. The cell-library signature gets its own rejection so callers
/// can tell "wrong format" from "known but unsupported format". The source
/// stays at offset 0 either way.
pub fn validate_signature<R: Read>(source: &mut ByteSource<R>) -> Result<u32, DgnError> {
    let sig = source.peek_u32_be()?;
    match sig {
        SIGNATURE_V7 | SIGNATURE_V7_ALT => Ok(sig),
        SIGNATURE_CELL_LIBRARY => Err(DgnError::CellLibrary(sig)),
        other => Err(DgnError::BadSignature(other)),
    }
}

/// Decode a complete design-file stream from a reader
///
/// Validates the signature, then scans elements from offset 0 until the
/// terminator pattern or clean exhaustion. No byte limit is applied; use
/// [`decode_stream_bounded`] when the source length is known.
pub fn decode_stream<R: Read>(reader: R) -> Result<DesignFileContent, DgnError> {
    decode_stream_bounded(reader, None)
}

/// Decode a complete design-file stream, bounding total consumed bytes
///
/// `max_bytes` guards against a crafted stream that never presents a
/// terminator nor exhausts; pass the known source length when available.
pub fn decode_stream_bounded<R: Read>(
    reader: R,
    max_bytes: Option<u64>,
) -> Result<DesignFileContent, DgnError> {
    let mut source = ByteSource::new(reader);
    validate_signature(&mut source)?;
    scan_elements(&mut source, max_bytes)
}

/// Decode a design-file stream held entirely in memory
///
/// The slice length doubles as the byte limit.
pub fn decode_from_bytes(data: &[u8]) -> Result<DesignFileContent, DgnError> {
    decode_stream_bounded(std::io::Cursor::new(data), Some(data.len() as u64))
}

/// Per-scan state, created fresh for every stream
///
/// Lives only for the duration of one `scan_elements` call so a decoder is
/// trivially safe to reuse across streams.
struct ScanSession {
    content: DesignFileContent,
    keep_going: bool,
}

/// Scan elements from a source positioned at the start of the element data
///
/// The signature bytes double as the first element's header (the type-9
/// design-file header element), which is why [`validate_signature`] peeks
/// instead of consuming: this loop decodes the header region like any
/// other element.
///
/// On success the accumulated content is returned whole; on any format
/// error the partial results are discarded.
pub fn scan_elements<R: Read>(
    source: &mut ByteSource<R>,
    max_bytes: Option<u64>,
) -> Result<DesignFileContent, DgnError> {
    let mut session = ScanSession {
        content: DesignFileContent::default(),
        keep_going: true,
    };

    while session.keep_going {
        step(source, &mut session)?;
        if let Some(limit) = max_bytes {
            if source.consumed() > limit {
                return Err(DgnError::ByteLimitExceeded {
                    consumed: source.consumed(),
                    limit,
                });
            }
        }
    }

    #[cfg(feature = "logging")]
    debug!(
        "scan complete: {} element types, {} text fragments, {} bytes",
        session.content.element_types.len(),
        session.content.text_fragments.len(),
        source.consumed()
    );

    Ok(session.content)
}

/// Decode one element, or observe termination
fn step<R: Read>(source: &mut ByteSource<R>, session: &mut ScanSession) -> Result<(), DgnError> {
    // 6 bits level, 1 bit reserved, 1 bit complex
    let h1 = match source.read_byte()? {
        Some(b) => b,
        None => {
            session.keep_going = false;
            return Ok(());
        }
    };
    // 7 bits type, 1 bit deleted
    let h2 = match source.read_byte()? {
        Some(b) => b,
        None => {
            // Exhaustion inside the two-byte pair is still a record
            // boundary, not a truncated element
            session.keep_going = false;
            return Ok(());
        }
    };
    if h1 == TERMINATOR_BYTE && h2 == TERMINATOR_BYTE {
        session.keep_going = false;
        return Ok(());
    }

    let header = read_common_header(source, h1, h2)?;
    let element_type = header.element_type();
    session.content.element_types.insert(element_type);

    #[cfg(feature = "logging")]
    trace!(
        element_type,
        word_count = header.word_count,
        size = header.declared_size(),
        deleted = header.kind.is_deleted(),
        "element"
    );

    if element_type == TEXT_ELEMENT_TYPE {
        let text = read_text_payload(source, header.word_count)?;
        session.content.text_fragments.push(text);
    } else {
        skip_opaque_payload(source, element_type, header.word_count)?;
    }

    Ok(())
}

/// Read the fields every element shares: word count, range, properties
///
/// The range and property values are kept only in the returned header;
/// the decoder reads them solely to keep the cursor aligned.
fn read_common_header<R: Read>(
    source: &mut ByteSource<R>,
    h1: u8,
    h2: u8,
) -> Result<ElementHeader, DgnError> {
    let word_count = source.read_u16_le("element word count")?;

    let range = ElementRange {
        x_low: source.read_u32_le("element range")?,
        y_low: source.read_u32_le("element range")?,
        z_low: source.read_u32_le("element range")?,
        x_high: source.read_u32_le("element range")?,
        y_high: source.read_u32_le("element range")?,
        z_high: source.read_u32_le("element range")?,
    };

    let graphic_group = source.read_u16_le("graphic group")?;
    let attribute_offset = source.read_u16_le("attribute offset")?;
    let properties = source.read_u16_le("element properties")?;
    let symbology = source.read_u16_le("element symbology")?;

    Ok(ElementHeader {
        level: LevelFlags::new(h1),
        kind: TypeFlags::new(h2),
        word_count,
        range,
        graphic_group,
        attribute_offset,
        properties,
        symbology,
    })
}

/// Extract and sanitize the character data of a text element
fn read_text_payload<R: Read>(
    source: &mut ByteSource<R>,
    word_count: u16,
) -> Result<String, DgnError> {
    if word_count < TEXT_HEADER_WORDS {
        return Err(DgnError::InconsistentLength {
            element_type: TEXT_ELEMENT_TYPE,
            word_count,
            minimum: TEXT_HEADER_WORDS,
        });
    }

    // Font, symbology, origin: aligned past, never interpreted
    source.skip(TEXT_SUBHEADER_BYTES, "text sub-header")?;

    let len = (word_count - TEXT_HEADER_WORDS) as usize * 2;
    let mut raw = vec![0u8; len];
    source.read_into(&mut raw, "text characters")?;

    Ok(sanitize_text(&raw))
}

/// Advance past the payload of an element this decoder does not interpret
fn skip_opaque_payload<R: Read>(
    source: &mut ByteSource<R>,
    element_type: u8,
    word_count: u16,
) -> Result<(), DgnError> {
    if word_count < COMMON_FIELD_WORDS {
        return Err(DgnError::InconsistentLength {
            element_type,
            word_count,
            minimum: COMMON_FIELD_WORDS,
        });
    }
    let skip = (word_count - COMMON_FIELD_WORDS) as usize * 2;
    source.skip(skip, "element payload")
}

/// Interpret raw bytes one character per byte (Latin-1 layout) and keep
/// only the printable ASCII range, preserving order
fn sanitize_text(raw: &[u8]) -> String {
    raw.iter()
        .copied()
        .filter(|b| (PRINTABLE_MIN..=PRINTABLE_MAX).contains(b))
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::{DesignFileBuilder, ElementBuilder, text_element};
    use bytes::Bytes;
    use std::io::Cursor;

    #[test]
    fn test_validate_both_variants() {
        for sig in [SIGNATURE_V7, SIGNATURE_V7_ALT] {
            let mut source = ByteSource::new(Cursor::new(sig.to_be_bytes()));
            assert_eq!(validate_signature(&mut source).unwrap(), sig);
            assert_eq!(source.consumed(), 0);
        }
    }

    #[test]
    fn test_validate_rejects_cell_library() {
        let mut source = ByteSource::new(Cursor::new(SIGNATURE_CELL_LIBRARY.to_be_bytes()));
        assert_eq!(
            validate_signature(&mut source),
            Err(DgnError::CellLibrary(SIGNATURE_CELL_LIBRARY))
        );
    }

    #[test]
    fn test_validate_rejects_unknown_signature() {
        let mut source = ByteSource::new(Cursor::new([0x12u8, 0x34, 0x56, 0x78]));
        let err = validate_signature(&mut source).unwrap_err();
        assert_eq!(err, DgnError::BadSignature(0x1234_5678));
        // Diagnostic names the rejected value in hex
        assert!(err.to_string().contains("12345678"));
    }

    #[test]
    fn test_decode_single_text_element() {
        let stream = DesignFileBuilder::new()
            .element(text_element(b"HELLO DGN").unwrap())
            .finish();

        let content = decode_from_bytes(&stream).unwrap();
        assert_eq!(content.text_fragments, vec!["HELLO DGN".to_string()]);
        assert!(content.element_types.contains(&TEXT_ELEMENT_TYPE));
        // The signature region decodes as the type-9 header element
        assert!(content.element_types.contains(&9));
    }

    #[test]
    fn test_sanitize_strips_unprintable_bytes() {
        let raw = b"\x01A\x80B\xffC\x1f \x7f~";
        assert_eq!(sanitize_text(raw), "ABC ~");
    }

    #[test]
    fn test_sanitize_keeps_range_bounds() {
        assert_eq!(sanitize_text(&[0x1f, 0x20, 0x7e, 0x7f]), " ~");
    }

    #[test]
    fn test_minimum_word_count_element() {
        // word_count == 16: legal, zero-length payload
        let stream = DesignFileBuilder::new()
            .element(ElementBuilder::new(3).build().unwrap())
            .element(text_element(b"AFTER").unwrap())
            .finish();

        let content = decode_from_bytes(&stream).unwrap();
        assert!(content.element_types.contains(&3));
        assert_eq!(content.text_fragments, vec!["AFTER".to_string()]);
    }

    #[test]
    fn test_undersized_word_count_is_rejected() {
        let mut stream = DesignFileBuilder::new().finish_without_terminator().to_vec();
        // Hand-built element claiming fewer words than its own header
        stream.extend_from_slice(&[0x00, 0x04]); // level 0, type 4
        stream.extend_from_slice(&15u16.to_le_bytes());
        stream.extend_from_slice(&[0u8; 32]); // range + properties

        assert_eq!(
            decode_from_bytes(&stream),
            Err(DgnError::InconsistentLength {
                element_type: 4,
                word_count: 15,
                minimum: COMMON_FIELD_WORDS,
            })
        );
    }

    #[test]
    fn test_undersized_text_element_is_rejected() {
        let mut stream = DesignFileBuilder::new().finish_without_terminator().to_vec();
        stream.extend_from_slice(&[0x00, 17]);
        stream.extend_from_slice(&20u16.to_le_bytes());
        stream.extend_from_slice(&[0u8; 32]);
        // Enough trailing bytes that only the length check can reject it
        stream.extend_from_slice(&[0u8; 64]);

        assert_eq!(
            decode_from_bytes(&stream),
            Err(DgnError::InconsistentLength {
                element_type: 17,
                word_count: 20,
                minimum: TEXT_HEADER_WORDS,
            })
        );
    }

    #[test]
    fn test_terminator_stops_cleanly() {
        let stream = DesignFileBuilder::new()
            .element(text_element(b"BEFORE END").unwrap())
            .finish();

        let content = decode_from_bytes(&stream).unwrap();
        assert_eq!(content.text_fragments, vec!["BEFORE END".to_string()]);
    }

    #[test]
    fn test_exhaustion_at_boundary_stops_cleanly() {
        let stream = DesignFileBuilder::new()
            .element(ElementBuilder::new(3).payload(Bytes::from(vec![0u8; 8])).build().unwrap())
            .finish_without_terminator();

        let content = decode_from_bytes(&stream).unwrap();
        assert!(content.element_types.contains(&3));
    }

    #[test]
    fn test_truncated_payload_is_fatal() {
        let stream = DesignFileBuilder::new()
            .element(text_element(b"LOST TEXT").unwrap())
            .finish_without_terminator();

        // Chop into the character data: "LOST TEXT" pads to 10 bytes, so
        // the element declares 33 words and a 10-byte character region
        let cut = &stream[..stream.len() - 4];
        let err = decode_from_bytes(cut).unwrap_err();
        assert_eq!(
            err,
            DgnError::Truncated {
                context: "text characters",
                expected: 10
            }
        );
    }

    #[test]
    fn test_byte_limit_enforced() {
        let stream = DesignFileBuilder::new()
            .element(ElementBuilder::new(3).payload(Bytes::from(vec![0u8; 64])).build().unwrap())
            .finish();

        let err = decode_stream_bounded(Cursor::new(stream.as_ref()), Some(100)).unwrap_err();
        assert!(matches!(err, DgnError::ByteLimitExceeded { limit: 100, .. }));
    }
}
