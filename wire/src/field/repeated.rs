//! Repeated fields backed by fixed-capacity `heapless::Vec`s.
//!
//! Floats are always encoded packed. Decode accepts the packed blob and the
//! unpacked one-tag-per-element form, and the two may be interleaved; every
//! occurrence appends. Capacity is checked before each element is read.

use heapless::Vec;
use stream::{decode_float, encode_float, BoundedReader, Sink, Source, FIXED32_LEN};

use crate::error::{DecodeError, DecodeResult};
use crate::field::{len_delimited_len, message, read_len, write_len_header};
use crate::message::Message;

fn ensure_room<T, const N: usize>(values: &Vec<T, N>, field: u32) -> DecodeResult<()> {
    if values.is_full() {
        log::debug!("field {field} is full at {N} elements");
        return Err(DecodeError::CapacityExceeded { field, capacity: N });
    }
    Ok(())
}

fn push<T, const N: usize>(values: &mut Vec<T, N>, field: u32, value: T) -> DecodeResult<()> {
    values
        .push(value)
        .map_err(|_| DecodeError::CapacityExceeded { field, capacity: N })
}

/// Encoded length of a packed float field; zero when empty.
#[must_use]
pub fn packed_floats_len(field: u32, values: &[f32]) -> usize {
    if values.is_empty() {
        0
    } else {
        len_delimited_len(field, values.len() * FIXED32_LEN)
    }
}

/// Writes a non-empty float slice as one packed field.
///
/// # Errors
///
/// Returns the sink's error unchanged.
pub fn encode_packed_floats<W: Sink + ?Sized>(
    field: u32,
    values: &[f32],
    sink: &mut W,
) -> Result<(), W::Error> {
    if values.is_empty() {
        return Ok(());
    }
    write_len_header(field, values.len() * FIXED32_LEN, sink)?;
    let mut scratch = [0u8; FIXED32_LEN];
    for value in values {
        let len = encode_float(&mut scratch, *value);
        sink.write_all(&scratch[..len])?;
    }
    Ok(())
}

/// Appends every float of a packed blob.
///
/// # Errors
///
/// Fails with [`DecodeError::CapacityExceeded`] once `values` is full, or if
/// the blob is truncated or not a whole number of floats.
pub fn merge_packed_floats<R: Source + ?Sized, const N: usize>(
    values: &mut Vec<f32, N>,
    field: u32,
    source: &mut R,
) -> DecodeResult<()> {
    let len = read_len(source)?;
    let mut span = BoundedReader::new(source, len);
    while !span.is_exhausted() {
        ensure_room(values, field)?;
        let value = decode_float(&mut span)?;
        push(values, field, value)?;
    }
    Ok(())
}

/// Appends a single unpacked float.
///
/// # Errors
///
/// Fails with [`DecodeError::CapacityExceeded`] if `values` is already full.
pub fn merge_unpacked_float<R: Source + ?Sized, const N: usize>(
    values: &mut Vec<f32, N>,
    field: u32,
    source: &mut R,
) -> DecodeResult<()> {
    ensure_room(values, field)?;
    let value = decode_float(source)?;
    push(values, field, value)
}

/// Encoded length of every element, each with its own tag and length.
#[must_use]
pub fn messages_len<M: Message>(field: u32, values: &[M]) -> usize {
    values
        .iter()
        .map(|value| message::encoded_len(field, value))
        .sum()
}

/// Writes each element as its own length-delimited field.
///
/// # Errors
///
/// Returns the sink's error unchanged.
pub fn encode_messages<M: Message, W: Sink + ?Sized>(
    field: u32,
    values: &[M],
    sink: &mut W,
) -> Result<(), W::Error> {
    for value in values {
        message::encode(field, value, sink)?;
    }
    Ok(())
}

/// Decodes one element and appends it.
///
/// The declared length is checked against `M::MAX_SIZE` and the array
/// against its capacity before any payload byte is read.
///
/// # Errors
///
/// Fails with [`DecodeError::LengthExceeded`], [`DecodeError::CapacityExceeded`]
/// or the element's own decode error.
pub fn merge_message<M: Message, R: Source + ?Sized, const N: usize>(
    values: &mut Vec<M, N>,
    field: u32,
    source: &mut R,
) -> DecodeResult<()> {
    let len = read_len(source)?;
    if len > M::MAX_SIZE {
        log::debug!(
            "field {field} element declares {len} bytes, max is {}",
            M::MAX_SIZE
        );
        return Err(DecodeError::LengthExceeded {
            field,
            length: len,
            max: M::MAX_SIZE,
        });
    }
    ensure_room(values, field)?;
    let mut element = M::default();
    message::merge_span(&mut element, len, source)?;
    push(values, field, element)
}
