//! Submessage fields with explicit presence.
//!
//! Encoding is two-pass per level: the child's size is computed first and
//! written as the length prefix, then the child encodes itself straight into
//! the same sink. Nothing is buffered.

use stream::{BoundedReader, Sink, Source};

use crate::error::DecodeResult;
use crate::field::{len_delimited_len, read_len, write_len_header};
use crate::message::Message;

/// Encoded length of a present submessage, tag and length prefix included.
#[must_use]
pub fn encoded_len<M: Message>(field: u32, msg: &M) -> usize {
    len_delimited_len(field, msg.encoded_len())
}

/// Encoded length of an optional submessage.
#[must_use]
pub fn optional_len<M: Message>(field: u32, msg: Option<&M>) -> usize {
    msg.map_or(0, |msg| encoded_len(field, msg))
}

/// Writes tag, length prefix and the child's fields.
///
/// # Errors
///
/// Returns the sink's error unchanged.
pub fn encode<M: Message, W: Sink + ?Sized>(
    field: u32,
    msg: &M,
    sink: &mut W,
) -> Result<(), W::Error> {
    write_len_header(field, msg.encoded_len(), sink)?;
    msg.encode(sink)
}

/// Writes the submessage if present.
///
/// # Errors
///
/// Returns the sink's error unchanged.
pub fn encode_optional<M: Message, W: Sink + ?Sized>(
    field: u32,
    msg: Option<&M>,
    sink: &mut W,
) -> Result<(), W::Error> {
    match msg {
        Some(msg) => encode(field, msg, sink),
        None => Ok(()),
    }
}

/// Reads a length prefix and merges the span into `msg`.
///
/// The child decode cannot read past the span. Whatever the child leaves
/// unread is skipped, so the parent resumes exactly at the span's end.
///
/// # Errors
///
/// Fails if the length prefix or any span byte cannot be read, or if the
/// child decode fails.
pub fn merge<M: Message, R: Source + ?Sized>(msg: &mut M, source: &mut R) -> DecodeResult<()> {
    let len = read_len(source)?;
    merge_span(msg, len, source)
}

pub(crate) fn merge_span<M: Message, R: Source + ?Sized>(
    msg: &mut M,
    len: usize,
    source: &mut R,
) -> DecodeResult<()> {
    let mut span = BoundedReader::new(source, len);
    msg.merge(&mut span)?;
    span.skip_remaining()?;
    Ok(())
}

/// Marks an optional submessage present and merges into it.
///
/// A submessage that is already present is merged into, not replaced.
///
/// # Errors
///
/// See [`merge`].
pub fn merge_optional<M: Message, R: Source + ?Sized>(
    slot: &mut Option<M>,
    source: &mut R,
) -> DecodeResult<()> {
    merge(slot.get_or_insert_with(M::default), source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{self, scalar};
    use crate::field::scalar::{Fixed32, UInt32};
    use crate::tag::{read_tag, WireType};
    use stream::{SliceReader, StreamError};

    use crate::error::DecodeError;

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Inner {
        a: u32,
        b: u32,
    }

    impl Message for Inner {
        const MAX_SIZE: usize = 12;

        fn encoded_len(&self) -> usize {
            scalar::implicit_len::<UInt32>(1, self.a) + scalar::implicit_len::<Fixed32>(2, self.b)
        }

        fn encode<W: Sink + ?Sized>(&self, sink: &mut W) -> Result<(), W::Error> {
            scalar::encode_implicit::<UInt32, W>(1, self.a, sink)?;
            scalar::encode_implicit::<Fixed32, W>(2, self.b, sink)
        }

        fn merge<R: Source + ?Sized>(&mut self, source: &mut R) -> DecodeResult<()> {
            while let Some(tag) = read_tag(source) {
                match (tag.field(), tag.wire_type()) {
                    (1, WireType::Varint) => self.a = scalar::merge::<UInt32, R>(1, source)?,
                    (2, WireType::Fixed32) => self.b = scalar::merge::<Fixed32, R>(2, source)?,
                    _ => field::unknown(tag),
                }
            }
            Ok(())
        }
    }

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Outer {
        inner: Option<Inner>,
        tail: u32,
    }

    impl Message for Outer {
        const MAX_SIZE: usize = 20;

        fn encoded_len(&self) -> usize {
            optional_len(1, self.inner.as_ref()) + scalar::implicit_len::<UInt32>(2, self.tail)
        }

        fn encode<W: Sink + ?Sized>(&self, sink: &mut W) -> Result<(), W::Error> {
            encode_optional(1, self.inner.as_ref(), sink)?;
            scalar::encode_implicit::<UInt32, W>(2, self.tail, sink)
        }

        fn merge<R: Source + ?Sized>(&mut self, source: &mut R) -> DecodeResult<()> {
            while let Some(tag) = read_tag(source) {
                match (tag.field(), tag.wire_type()) {
                    (1, WireType::LengthDelimited) => merge_optional(&mut self.inner, source)?,
                    (2, WireType::Varint) => self.tail = scalar::merge::<UInt32, R>(2, source)?,
                    _ => field::unknown(tag),
                }
            }
            Ok(())
        }
    }

    #[test]
    fn present_empty_submessage_is_encoded() {
        let msg = Outer {
            inner: Some(Inner::default()),
            tail: 0,
        };
        assert_eq!(msg.encode_to_vec(), vec![0x0A, 0x00]);
        let decoded = Outer::decode_from_slice(&[0x0A, 0x00]).unwrap();
        assert_eq!(decoded, msg);
    }

    #[test]
    fn absent_submessage_is_omitted() {
        assert!(Outer::default().encode_to_vec().is_empty());
    }

    #[test]
    fn nested_bytes() {
        let msg = Outer {
            inner: Some(Inner { a: 1, b: 2 }),
            tail: 3,
        };
        let bytes = msg.encode_to_vec();
        assert_eq!(
            bytes,
            vec![0x0A, 0x07, 0x08, 0x01, 0x15, 0x02, 0x00, 0x00, 0x00, 0x10, 0x03]
        );
        assert_eq!(msg.encoded_len(), bytes.len());
        assert_eq!(Outer::decode_from_slice(&bytes).unwrap(), msg);
    }

    #[test]
    fn parent_resumes_at_span_end() {
        // The span holds an unknown one-byte tag after the known field.
        let bytes = [0x0A, 0x03, 0x08, 0x05, 0x78, 0x10, 0x09];
        let msg = Outer::decode_from_slice(&bytes).unwrap();
        assert_eq!(msg.inner, Some(Inner { a: 5, b: 0 }));
        assert_eq!(msg.tail, 9);
    }

    #[test]
    fn truncated_span_fails() {
        let err = Outer::decode_from_slice(&[0x0A, 0x05, 0x08, 0x01]).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Stream(StreamError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn repeated_submessage_merges() {
        let bytes = [0x0A, 0x02, 0x08, 0x01, 0x0A, 0x05, 0x15, 0x07, 0x00, 0x00, 0x00];
        let msg = Outer::decode_from_slice(&bytes).unwrap();
        assert_eq!(msg.inner, Some(Inner { a: 1, b: 7 }));
    }

    #[test]
    fn child_cannot_read_past_span() {
        // The fixed32 inside the span claims 4 bytes but only 2 belong to it.
        let mut reader = SliceReader::new(&[0x03, 0x15, 0x01, 0x02, 0x00, 0x00]);
        let mut inner = Inner::default();
        assert!(merge(&mut inner, &mut reader).is_err());
    }
}
