//! Field tags: the `(field_number << 3) | wire_type` prefix of every field.

use stream::{decode_varint, varint_len, Source};

/// How a field's payload is laid out on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireType {
    /// Base-128 varint (uint32, bool, enum).
    Varint,
    /// Varint length prefix followed by that many bytes.
    LengthDelimited,
    /// Four little-endian bytes (fixed32, float).
    Fixed32,
    /// Any other 3-bit value; never produced by the encoder.
    Unsupported(u8),
}

impl WireType {
    /// Returns the 3-bit wire value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        match self {
            Self::Varint => 0,
            Self::LengthDelimited => 2,
            Self::Fixed32 => 5,
            Self::Unsupported(raw) => raw,
        }
    }

    /// Interprets the low 3 bits of `raw`.
    #[must_use]
    pub const fn from_raw(raw: u8) -> Self {
        match raw & 0x07 {
            0 => Self::Varint,
            2 => Self::LengthDelimited,
            5 => Self::Fixed32,
            other => Self::Unsupported(other),
        }
    }
}

/// A decoded `(field number, wire type)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag {
    field: u32,
    wire_type: WireType,
}

impl Tag {
    /// Creates a tag.
    #[must_use]
    pub const fn new(field: u32, wire_type: WireType) -> Self {
        Self { field, wire_type }
    }

    /// Splits a raw tag varint.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_raw(raw: u32) -> Self {
        Self {
            field: raw >> 3,
            wire_type: WireType::from_raw((raw & 0x07) as u8),
        }
    }

    /// Returns the raw varint value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        (self.field << 3) | self.wire_type.raw() as u32
    }

    /// Returns the field number.
    #[must_use]
    pub const fn field(self) -> u32 {
        self.field
    }

    /// Returns the wire type.
    #[must_use]
    pub const fn wire_type(self) -> WireType {
        self.wire_type
    }
}

/// Encoded length of any tag for `field`.
#[must_use]
pub const fn tag_len(field: u32) -> usize {
    varint_len(field << 3)
}

/// Reads the next tag.
///
/// Returns `None` when the tag varint cannot be read. Decode loops treat that
/// as the end of the message, whether the source ended cleanly or not.
pub fn read_tag<R: Source + ?Sized>(source: &mut R) -> Option<Tag> {
    decode_varint(source).ok().map(Tag::from_raw)
}
