//! Field codec strategies.
//!
//! Every message codec is composed from these families:
//!
//! - [`scalar`] - varint and fixed32 values with implicit (zero is absent) or
//!   explicit (`Option`) presence.
//! - [`message`] - length-delimited submessages, scoped on decode by a
//!   [`stream::BoundedReader`].
//! - [`oneof`] - tagged unions where the last decoded alternative wins.
//! - [`repeated`] - fixed-capacity packed floats and repeated submessages.
//! - [`string`] - fixed-capacity UTF-8 strings.

pub mod message;
pub mod oneof;
pub mod repeated;
pub mod scalar;
pub mod string;

use stream::{decode_varint, encode_varint, Sink, Source, MAX_VARINT_LEN};

use crate::error::DecodeResult;
use crate::tag::{Tag, WireType};

/// Scratch big enough for a tag plus any scalar payload.
pub(crate) const SCRATCH_LEN: usize = 2 * MAX_VARINT_LEN;

/// Drops a tag the schema does not recognize.
///
/// Nothing past the tag itself is consumed: an unknown field's payload is
/// read as the next tag.
pub fn unknown(tag: Tag) {
    log::trace!(
        "dropping unrecognized tag field={} wire_type={}",
        tag.field(),
        tag.wire_type().raw()
    );
}

/// Reads a length prefix.
pub(crate) fn read_len<R: Source + ?Sized>(source: &mut R) -> DecodeResult<usize> {
    let len = decode_varint(source)?;
    Ok(len as usize)
}

/// Converts an encoded length to its varint value.
#[allow(clippy::cast_possible_truncation)]
pub(crate) const fn len_value(len: usize) -> u32 {
    len as u32
}

/// Writes the tag and length prefix of a length-delimited field in one chunk.
pub(crate) fn write_len_header<W: Sink + ?Sized>(
    field: u32,
    len: usize,
    sink: &mut W,
) -> Result<(), W::Error> {
    let mut scratch = [0u8; SCRATCH_LEN];
    let mut used = encode_varint(&mut scratch, Tag::new(field, WireType::LengthDelimited).raw());
    used += encode_varint(&mut scratch[used..], len_value(len));
    sink.write_all(&scratch[..used])
}

/// Encoded length of a length-delimited field carrying `len` payload bytes.
#[must_use]
pub const fn len_delimited_len(field: u32, len: usize) -> usize {
    crate::tag::tag_len(field) + stream::varint_len(len_value(len)) + len
}
