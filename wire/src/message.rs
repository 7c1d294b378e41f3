//! The `Message` and `Enumeration` traits every schema type implements.

use std::convert::Infallible;

use stream::{BufferWriter, Sink, SliceReader, SliceWriter, Source, StreamResult};

use crate::error::DecodeResult;
use crate::field;
use crate::tag::read_tag;

/// A schema message with a size, encode and decode triple.
///
/// Fields are visited in ascending field-number order on encode. Decode
/// accepts tags in any order and only ever sets fields, so [`merge`] into a
/// non-default value layers the wire contents on top of it.
///
/// [`merge`]: Message::merge
pub trait Message: Default {
    /// Largest number of bytes any value of this type encodes to.
    const MAX_SIZE: usize;

    /// Exact number of bytes [`encode`](Message::encode) will write.
    fn encoded_len(&self) -> usize;

    /// Writes every present field to `sink`.
    ///
    /// Stops at the first rejected write. Bytes already accepted by the sink
    /// are not retracted.
    ///
    /// # Errors
    ///
    /// Returns the sink's error unchanged.
    fn encode<W: Sink + ?Sized>(&self, sink: &mut W) -> Result<(), W::Error>;

    /// Decodes fields from `source` into `self` until a tag cannot be read.
    ///
    /// # Errors
    ///
    /// Fails if a recognized field's payload is truncated or violates a
    /// capacity bound. `self` is left partially updated.
    fn merge<R: Source + ?Sized>(&mut self, source: &mut R) -> DecodeResult<()>;

    /// Decodes a fresh value from `source`.
    ///
    /// # Errors
    ///
    /// See [`merge`](Message::merge).
    fn decode<R: Source + ?Sized>(source: &mut R) -> DecodeResult<Self> {
        let mut msg = Self::default();
        msg.merge(source)?;
        Ok(msg)
    }

    /// Decodes a fresh value from a byte slice.
    ///
    /// # Errors
    ///
    /// See [`merge`](Message::merge).
    fn decode_from_slice(bytes: &[u8]) -> DecodeResult<Self> {
        Self::decode(&mut SliceReader::new(bytes))
    }

    /// Encodes into `buf` with bounds checking and returns the bytes written.
    ///
    /// # Errors
    ///
    /// Returns [`stream::StreamError::BufferFull`] if `buf` is too short.
    fn encode_to_slice(&self, buf: &mut [u8]) -> StreamResult<usize> {
        let mut writer = SliceWriter::new(buf);
        self.encode(&mut writer)?;
        Ok(writer.position())
    }

    /// Encodes into a buffer sized for [`MAX_SIZE`](Message::MAX_SIZE) and
    /// returns the bytes written.
    ///
    /// # Panics
    ///
    /// Panics if `buf` is shorter than the encoding.
    fn encode_to_buffer(&self, buf: &mut [u8]) -> usize {
        let mut writer = BufferWriter::new(buf);
        unwrap_infallible(self.encode(&mut writer));
        writer.position()
    }

    /// Encodes into a freshly allocated vector.
    fn encode_to_vec(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        unwrap_infallible(self.encode(&mut out));
        out
    }
}

/// A schema enum carried as a varint.
pub trait Enumeration: Copy + Default {
    /// Maps a wire number to a variant, if the schema defines one.
    fn from_raw(value: u32) -> Option<Self>;

    /// Returns the wire number.
    fn raw(self) -> u32;
}

/// A message with no fields.
///
/// Used for oneof alternatives that carry no payload.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Empty;

impl Message for Empty {
    const MAX_SIZE: usize = 0;

    fn encoded_len(&self) -> usize {
        0
    }

    fn encode<W: Sink + ?Sized>(&self, _sink: &mut W) -> Result<(), W::Error> {
        Ok(())
    }

    fn merge<R: Source + ?Sized>(&mut self, source: &mut R) -> DecodeResult<()> {
        while let Some(tag) = read_tag(source) {
            field::unknown(tag);
        }
        Ok(())
    }
}

pub(crate) fn unwrap_infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;
    use crate::field::scalar::{self, Fixed32, Float};
    use crate::tag::WireType;
    use stream::StreamError;

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Sample {
        id: u32,
        value: f32,
    }

    impl Message for Sample {
        const MAX_SIZE: usize = 10;

        fn encoded_len(&self) -> usize {
            scalar::implicit_len::<Fixed32>(1, self.id) + scalar::implicit_len::<Float>(2, self.value)
        }

        fn encode<W: Sink + ?Sized>(&self, sink: &mut W) -> Result<(), W::Error> {
            scalar::encode_implicit::<Fixed32, W>(1, self.id, sink)?;
            scalar::encode_implicit::<Float, W>(2, self.value, sink)
        }

        fn merge<R: Source + ?Sized>(&mut self, source: &mut R) -> DecodeResult<()> {
            while let Some(tag) = read_tag(source) {
                match (tag.field(), tag.wire_type()) {
                    (1, WireType::Fixed32) => self.id = scalar::merge::<Fixed32, R>(1, source)?,
                    (2, WireType::Fixed32) => self.value = scalar::merge::<Float, R>(2, source)?,
                    _ => field::unknown(tag),
                }
            }
            Ok(())
        }
    }

    #[test]
    fn default_encodes_to_nothing() {
        assert!(Sample::default().encode_to_vec().is_empty());
        assert_eq!(Sample::default().encoded_len(), 0);
    }

    #[test]
    fn vec_slice_and_buffer_agree() {
        let msg = Sample { id: 7, value: 0.5 };
        let vec = msg.encode_to_vec();

        let mut checked = [0u8; Sample::MAX_SIZE];
        let n = msg.encode_to_slice(&mut checked).unwrap();
        assert_eq!(&checked[..n], vec.as_slice());

        let mut flat = [0u8; Sample::MAX_SIZE];
        let n = msg.encode_to_buffer(&mut flat);
        assert_eq!(&flat[..n], vec.as_slice());
        assert_eq!(n, msg.encoded_len());
    }

    #[test]
    fn encode_to_slice_reports_short_buffer() {
        let msg = Sample { id: 7, value: 0.5 };
        let mut short = [0u8; 6];
        let err = msg.encode_to_slice(&mut short).unwrap_err();
        assert!(matches!(err, StreamError::BufferFull { .. }));
    }

    #[test]
    fn decode_from_slice_roundtrip() {
        let msg = Sample { id: 42, value: -1.25 };
        let decoded = Sample::decode_from_slice(&msg.encode_to_vec()).unwrap();
        assert_eq!(decoded, msg);
    }

    #[test]
    fn merge_layers_over_existing_value() {
        let mut msg = Sample { id: 1, value: 3.0 };
        let update = Sample { id: 9, value: 0.0 };
        msg.merge(&mut SliceReader::new(&update.encode_to_vec()))
            .unwrap();
        assert_eq!(msg, Sample { id: 9, value: 3.0 });
    }

    #[test]
    fn truncated_fixed32_payload_fails() {
        let err = Sample::decode_from_slice(&[0x0D, 0x01, 0x02]).unwrap_err();
        assert!(matches!(err, DecodeError::Stream(StreamError::UnexpectedEof { .. })));
    }

    #[test]
    fn empty_consumes_any_tags() {
        let mut reader = SliceReader::new(&[0x08, 0x10]);
        Empty.merge(&mut reader).unwrap();
        assert!(reader.is_empty());
        assert_eq!(Empty.encode_to_vec(), Vec::<u8>::new());
    }
}
