//! Fixed-capacity UTF-8 string fields.

use heapless::{String, Vec};
use stream::{Sink, Source};

use crate::error::{DecodeError, DecodeResult};
use crate::field::{len_delimited_len, read_len, write_len_header};

/// Encoded length of a present string.
#[must_use]
pub fn encoded_len(field: u32, value: &str) -> usize {
    len_delimited_len(field, value.len())
}

/// Encoded length under implicit presence: empty strings are omitted.
#[must_use]
pub fn implicit_len(field: u32, value: &str) -> usize {
    if value.is_empty() {
        0
    } else {
        encoded_len(field, value)
    }
}

/// Encoded length under explicit presence.
#[must_use]
pub fn optional_len(field: u32, value: Option<&str>) -> usize {
    value.map_or(0, |value| encoded_len(field, value))
}

/// Writes the tag and length prefix, then the bytes.
///
/// # Errors
///
/// Returns the sink's error unchanged.
pub fn encode<W: Sink + ?Sized>(field: u32, value: &str, sink: &mut W) -> Result<(), W::Error> {
    write_len_header(field, value.len(), sink)?;
    sink.write_all(value.as_bytes())
}

/// Writes a non-empty string.
///
/// # Errors
///
/// Returns the sink's error unchanged.
pub fn encode_implicit<W: Sink + ?Sized>(
    field: u32,
    value: &str,
    sink: &mut W,
) -> Result<(), W::Error> {
    if value.is_empty() {
        return Ok(());
    }
    encode(field, value, sink)
}

/// Writes the string if set.
///
/// # Errors
///
/// Returns the sink's error unchanged.
pub fn encode_optional<W: Sink + ?Sized>(
    field: u32,
    value: Option<&str>,
    sink: &mut W,
) -> Result<(), W::Error> {
    match value {
        Some(value) => encode(field, value, sink),
        None => Ok(()),
    }
}

/// Reads a length-prefixed string of at most `N` bytes.
///
/// # Errors
///
/// Fails with [`DecodeError::CapacityExceeded`] before reading the payload
/// if the declared length exceeds `N`, and with [`DecodeError::InvalidUtf8`]
/// if the payload is not UTF-8.
pub fn merge<R: Source + ?Sized, const N: usize>(
    field: u32,
    source: &mut R,
) -> DecodeResult<String<N>> {
    let len = read_len(source)?;
    let mut bytes: Vec<u8, N> = Vec::new();
    if bytes.resize_default(len).is_err() {
        log::debug!("field {field} string of {len} bytes exceeds capacity {N}");
        return Err(DecodeError::CapacityExceeded { field, capacity: N });
    }
    source.read_exact(&mut bytes)?;
    String::from_utf8(bytes).map_err(|_| DecodeError::InvalidUtf8 { field })
}
