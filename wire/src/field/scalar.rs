//! Scalar fields: uint32, fixed32, float, bool and enums.
//!
//! Each wire representation is a [`ScalarKind`]. Messages pick the presence
//! rule per field: `implicit_*` omits the zero value, `optional_*` emits
//! whenever the `Option` is `Some`, even for zero.

use std::marker::PhantomData;

use stream::{
    decode_fixed32, decode_float, decode_varint, encode_fixed32, encode_float, encode_varint,
    varint_len, Sink, Source, FIXED32_LEN,
};

use crate::error::{DecodeError, DecodeResult};
use crate::field::SCRATCH_LEN;
use crate::message::Enumeration;
use crate::tag::{tag_len, Tag, WireType};

/// A scalar wire representation.
pub trait ScalarKind {
    /// In-memory value type.
    type Value: Copy;

    /// Wire type the value is encoded with.
    const WIRE_TYPE: WireType;

    /// Returns `true` for the zero value.
    fn is_zero(value: Self::Value) -> bool;

    /// Encoded payload length, excluding the tag.
    fn value_len(value: Self::Value) -> usize;

    /// Writes the payload into `dst` and returns the bytes written.
    fn write_value(value: Self::Value, dst: &mut [u8]) -> usize;

    /// Reads one payload.
    fn read_value<R: Source + ?Sized>(field: u32, source: &mut R) -> DecodeResult<Self::Value>;
}

/// `uint32`: an unsigned varint.
pub enum UInt32 {}

/// `fixed32`: four little-endian bytes.
pub enum Fixed32 {}

/// `float`: IEEE-754 single precision, four little-endian bytes.
pub enum Float {}

/// `bool`: a varint holding 0 or 1.
pub enum Bool {}

/// A schema enum carried as a varint.
pub struct Enum<E>(PhantomData<E>);

impl ScalarKind for UInt32 {
    type Value = u32;
    const WIRE_TYPE: WireType = WireType::Varint;

    fn is_zero(value: u32) -> bool {
        value == 0
    }

    fn value_len(value: u32) -> usize {
        varint_len(value)
    }

    fn write_value(value: u32, dst: &mut [u8]) -> usize {
        encode_varint(dst, value)
    }

    fn read_value<R: Source + ?Sized>(_field: u32, source: &mut R) -> DecodeResult<u32> {
        Ok(decode_varint(source)?)
    }
}

impl ScalarKind for Fixed32 {
    type Value = u32;
    const WIRE_TYPE: WireType = WireType::Fixed32;

    fn is_zero(value: u32) -> bool {
        value == 0
    }

    fn value_len(_value: u32) -> usize {
        FIXED32_LEN
    }

    fn write_value(value: u32, dst: &mut [u8]) -> usize {
        encode_fixed32(dst, value)
    }

    fn read_value<R: Source + ?Sized>(_field: u32, source: &mut R) -> DecodeResult<u32> {
        Ok(decode_fixed32(source)?)
    }
}

impl ScalarKind for Float {
    type Value = f32;
    const WIRE_TYPE: WireType = WireType::Fixed32;

    // -0.0 counts as zero.
    #[allow(clippy::float_cmp)]
    fn is_zero(value: f32) -> bool {
        value == 0.0
    }

    fn value_len(_value: f32) -> usize {
        FIXED32_LEN
    }

    fn write_value(value: f32, dst: &mut [u8]) -> usize {
        encode_float(dst, value)
    }

    fn read_value<R: Source + ?Sized>(_field: u32, source: &mut R) -> DecodeResult<f32> {
        Ok(decode_float(source)?)
    }
}

impl ScalarKind for Bool {
    type Value = bool;
    const WIRE_TYPE: WireType = WireType::Varint;

    fn is_zero(value: bool) -> bool {
        !value
    }

    fn value_len(_value: bool) -> usize {
        1
    }

    fn write_value(value: bool, dst: &mut [u8]) -> usize {
        encode_varint(dst, u32::from(value))
    }

    fn read_value<R: Source + ?Sized>(_field: u32, source: &mut R) -> DecodeResult<bool> {
        Ok(stream::decode_bool(source)?)
    }
}

impl<E: Enumeration> ScalarKind for Enum<E> {
    type Value = E;
    const WIRE_TYPE: WireType = WireType::Varint;

    fn is_zero(value: E) -> bool {
        value.raw() == 0
    }

    fn value_len(value: E) -> usize {
        varint_len(value.raw())
    }

    fn write_value(value: E, dst: &mut [u8]) -> usize {
        encode_varint(dst, value.raw())
    }

    fn read_value<R: Source + ?Sized>(field: u32, source: &mut R) -> DecodeResult<E> {
        let value = decode_varint(source)?;
        E::from_raw(value).ok_or_else(|| {
            log::debug!("rejecting unknown enum value {value} in field {field}");
            DecodeError::InvalidEnum { field, value }
        })
    }
}

/// Encoded length of the field, tag included.
#[must_use]
pub fn encoded_len<K: ScalarKind>(field: u32, value: K::Value) -> usize {
    tag_len(field) + K::value_len(value)
}

/// Encoded length under implicit presence.
#[must_use]
pub fn implicit_len<K: ScalarKind>(field: u32, value: K::Value) -> usize {
    if K::is_zero(value) {
        0
    } else {
        encoded_len::<K>(field, value)
    }
}

/// Encoded length under explicit presence.
#[must_use]
pub fn optional_len<K: ScalarKind>(field: u32, value: Option<K::Value>) -> usize {
    value.map_or(0, |value| encoded_len::<K>(field, value))
}

/// Writes tag and value as a single chunk.
///
/// # Errors
///
/// Returns the sink's error unchanged.
pub fn encode<K: ScalarKind, W: Sink + ?Sized>(
    field: u32,
    value: K::Value,
    sink: &mut W,
) -> Result<(), W::Error> {
    let mut scratch = [0u8; SCRATCH_LEN];
    let mut len = encode_varint(&mut scratch, Tag::new(field, K::WIRE_TYPE).raw());
    len += K::write_value(value, &mut scratch[len..]);
    sink.write_all(&scratch[..len])
}

/// Writes the field unless it holds the zero value.
///
/// # Errors
///
/// Returns the sink's error unchanged.
pub fn encode_implicit<K: ScalarKind, W: Sink + ?Sized>(
    field: u32,
    value: K::Value,
    sink: &mut W,
) -> Result<(), W::Error> {
    if K::is_zero(value) {
        return Ok(());
    }
    encode::<K, W>(field, value, sink)
}

/// Writes the field if it is set.
///
/// # Errors
///
/// Returns the sink's error unchanged.
pub fn encode_optional<K: ScalarKind, W: Sink + ?Sized>(
    field: u32,
    value: Option<K::Value>,
    sink: &mut W,
) -> Result<(), W::Error> {
    match value {
        Some(value) => encode::<K, W>(field, value, sink),
        None => Ok(()),
    }
}

/// Reads the value following a recognized tag.
///
/// # Errors
///
/// Fails on a truncated payload or, for enums, an undefined number.
pub fn merge<K: ScalarKind, R: Source + ?Sized>(
    field: u32,
    source: &mut R,
) -> DecodeResult<K::Value> {
    K::read_value(field, source)
}
