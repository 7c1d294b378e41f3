//! Primitive encoders and decoders: varints, fixed32 and floats.
//!
//! Encoders write into caller-provided scratch and return the number of bytes
//! written. They do not bounds-check beyond normal slice indexing, so callers
//! size scratch with [`MAX_VARINT_LEN`] and [`FIXED32_LEN`].

use crate::error::{StreamError, StreamResult};
use crate::reader::Source;

/// Maximum encoded length of a 32-bit varint.
pub const MAX_VARINT_LEN: usize = 5;

/// Encoded length of a fixed32 or float value.
pub const FIXED32_LEN: usize = 4;

/// Returns the number of bytes `value` occupies as a varint.
#[must_use]
pub const fn varint_len(value: u32) -> usize {
    match value {
        0..=0x7F => 1,
        0x80..=0x3FFF => 2,
        0x4000..=0x001F_FFFF => 3,
        0x0020_0000..=0x0FFF_FFFF => 4,
        _ => 5,
    }
}

/// Encodes `value` as a base-128 varint into `dst`.
///
/// # Panics
///
/// Panics if `dst` is shorter than [`varint_len`]`(value)`.
#[allow(clippy::cast_possible_truncation)]
pub fn encode_varint(dst: &mut [u8], mut value: u32) -> usize {
    let mut written = 0;
    while value >= 0x80 {
        dst[written] = (value as u8 & 0x7F) | 0x80;
        value >>= 7;
        written += 1;
    }
    dst[written] = value as u8;
    written + 1
}

/// Decodes a base-128 varint from `source`.
///
/// Any read failure, including one in the middle of the varint, is returned
/// as-is. Bits beyond the 32nd are discarded.
pub fn decode_varint<R: Source + ?Sized>(source: &mut R) -> StreamResult<u32> {
    let mut result = 0u32;
    for shift in (0..35).step_by(7) {
        let byte = source.read_byte()?;
        result |= u32::from(byte & 0x7F) << shift;
        if byte & 0x80 == 0 {
            return Ok(result);
        }
    }
    Err(StreamError::InvalidVarint)
}

/// Writes `value` as 4 little-endian bytes.
///
/// # Panics
///
/// Panics if `dst` is shorter than [`FIXED32_LEN`].
pub fn encode_fixed32(dst: &mut [u8], value: u32) -> usize {
    dst[..FIXED32_LEN].copy_from_slice(&value.to_le_bytes());
    FIXED32_LEN
}

/// Reads 4 little-endian bytes.
pub fn decode_fixed32<R: Source + ?Sized>(source: &mut R) -> StreamResult<u32> {
    let mut bytes = [0u8; FIXED32_LEN];
    source.read_exact(&mut bytes)?;
    Ok(u32::from_le_bytes(bytes))
}

/// Writes the IEEE-754 bit pattern of `value` as a fixed32.
pub fn encode_float(dst: &mut [u8], value: f32) -> usize {
    encode_fixed32(dst, value.to_bits())
}

/// Reads a fixed32 and reinterprets it as an IEEE-754 float.
pub fn decode_float<R: Source + ?Sized>(source: &mut R) -> StreamResult<f32> {
    decode_fixed32(source).map(f32::from_bits)
}

/// Reads a varint and narrows it to a bool (any non-zero value is `true`).
pub fn decode_bool<R: Source + ?Sized>(source: &mut R) -> StreamResult<bool> {
    decode_varint(source).map(|value| value != 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::SliceReader;

    #[test]
    fn varint_len_boundaries() {
        assert_eq!(varint_len(0), 1);
        assert_eq!(varint_len(127), 1);
        assert_eq!(varint_len(128), 2);
        assert_eq!(varint_len(16_383), 2);
        assert_eq!(varint_len(16_384), 3);
        assert_eq!(varint_len(2_097_151), 3);
        assert_eq!(varint_len(2_097_152), 4);
        assert_eq!(varint_len(268_435_455), 4);
        assert_eq!(varint_len(268_435_456), 5);
        assert_eq!(varint_len(u32::MAX), 5);
    }

    #[test]
    fn encode_varint_single_byte() {
        let mut buf = [0u8; MAX_VARINT_LEN];
        assert_eq!(encode_varint(&mut buf, 1), 1);
        assert_eq!(buf[0], 0x01);
    }

    #[test]
    fn encode_varint_300() {
        let mut buf = [0u8; MAX_VARINT_LEN];
        let n = encode_varint(&mut buf, 300);
        assert_eq!(&buf[..n], &[0xAC, 0x02]);
    }

    #[test]
    fn encode_varint_max() {
        let mut buf = [0u8; MAX_VARINT_LEN];
        let n = encode_varint(&mut buf, u32::MAX);
        assert_eq!(&buf[..n], &[0xFF, 0xFF, 0xFF, 0xFF, 0x0F]);
    }

    #[test]
    fn decode_varint_300() {
        let mut reader = SliceReader::new(&[0xAC, 0x02]);
        assert_eq!(decode_varint(&mut reader).unwrap(), 300);
        assert!(reader.is_empty());
    }

    #[test]
    fn decode_varint_truncated_mid_value() {
        let mut reader = SliceReader::new(&[0xAC]);
        let err = decode_varint(&mut reader).unwrap_err();
        assert!(matches!(err, StreamError::UnexpectedEof { .. }));
    }

    #[test]
    fn decode_varint_too_long() {
        let mut reader = SliceReader::new(&[0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01]);
        assert_eq!(
            decode_varint(&mut reader).unwrap_err(),
            StreamError::InvalidVarint
        );
    }

    #[test]
    fn fixed32_is_little_endian() {
        let mut buf = [0u8; FIXED32_LEN];
        encode_fixed32(&mut buf, 1000);
        assert_eq!(buf, [0xE8, 0x03, 0x00, 0x00]);

        let mut reader = SliceReader::new(&buf);
        assert_eq!(decode_fixed32(&mut reader).unwrap(), 1000);
    }

    #[test]
    fn float_bit_pattern() {
        let mut buf = [0u8; FIXED32_LEN];
        encode_float(&mut buf, 1.0);
        assert_eq!(buf, [0x00, 0x00, 0x80, 0x3F]);

        let mut reader = SliceReader::new(&buf);
        assert_eq!(decode_float(&mut reader).unwrap().to_bits(), 1.0f32.to_bits());
    }

    #[test]
    fn decode_bool_non_zero_is_true() {
        let mut reader = SliceReader::new(&[0x00, 0x01, 0x02]);
        assert!(!decode_bool(&mut reader).unwrap());
        assert!(decode_bool(&mut reader).unwrap());
        assert!(decode_bool(&mut reader).unwrap());
    }
}
