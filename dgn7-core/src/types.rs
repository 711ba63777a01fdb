//! Core types for decoded design files

use crate::constants::{LevelFlags, TypeFlags};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::Write as _;

/// Design-cube range covered by an element
///
/// The six fields are consumed to keep the cursor aligned but never
/// interpreted by this decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ElementRange {
    /// Low X bound
    pub x_low: u32,
    /// Low Y bound
    pub y_low: u32,
    /// Low Z bound
    pub z_low: u32,
    /// High X bound
    pub x_high: u32,
    /// High Y bound
    pub y_high: u32,
    /// High Z bound
    pub z_high: u32,
}

/// Common header fields shared by every element in the stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementHeader {
    /// Level number, reserved bit, complex flag
    pub level: LevelFlags,

    /// Element type and deleted flag
    pub kind: TypeFlags,

    /// Declared element length in 16-bit words, counted from just after
    /// this field. The sole authority for how many bytes the element
    /// occupies.
    pub word_count: u16,

    /// Range covered by the element (not interpreted)
    pub range: ElementRange,

    /// Graphic group number (not interpreted)
    pub graphic_group: u16,

    /// Word offset to the attribute data (not interpreted)
    pub attribute_offset: u16,

    /// Property flags (not interpreted)
    pub properties: u16,

    /// Symbology word: style, weight, color (not interpreted)
    pub symbology: u16,
}

impl ElementHeader {
    /// Element type code (0-127)
    pub const fn element_type(&self) -> u8 {
        self.kind.element_type()
    }

    /// Total declared size of the element in bytes, including the four
    /// header bytes that precede the counted words
    pub const fn declared_size(&self) -> usize {
        4 + self.word_count as usize * 2
    }
}

/// Everything extracted from one design-file stream
///
/// Produced all-or-nothing by a successful decode and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DesignFileContent {
    /// Distinct element type codes observed, in ascending order
    pub element_types: BTreeSet<u8>,

    /// Sanitized text fragments from type-17 elements, in stream order
    pub text_fragments: Vec<String>,
}

impl DesignFileContent {
    /// Render the type inventory as a single descriptive value,
    /// e.g. `[3, 9, 17]`
    pub fn types_summary(&self) -> String {
        let mut out = String::from("[");
        for (i, t) in self.element_types.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            let _ = write!(out, "{}", t);
        }
        out.push(']');
        out
    }

    /// Join the text fragments with a separator into one content block
    pub fn joined_text(&self, separator: &str) -> String {
        self.text_fragments.join(separator)
    }

    /// Check whether any text was extracted
    pub fn has_text(&self) -> bool {
        !self.text_fragments.is_empty()
    }
}
