//! Byte sources: the read side of the codec.

use crate::error::{StreamError, StreamResult};

/// A source of bytes for decoding.
///
/// `read_exact` either fills the whole buffer or fails. End of data and
/// transport failures travel through the same error channel, so decoders
/// cannot tell them apart.
pub trait Source {
    /// Reads exactly `buf.len()` bytes.
    fn read_exact(&mut self, buf: &mut [u8]) -> StreamResult<()>;

    /// Reads a single byte.
    fn read_byte(&mut self) -> StreamResult<u8> {
        let mut byte = [0u8; 1];
        self.read_exact(&mut byte)?;
        Ok(byte[0])
    }
}

impl<S: Source + ?Sized> Source for &mut S {
    fn read_exact(&mut self, buf: &mut [u8]) -> StreamResult<()> {
        (**self).read_exact(buf)
    }
}

/// A source reading from an in-memory byte slice.
#[derive(Debug, Clone)]
pub struct SliceReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceReader<'a> {
    /// Creates a new `SliceReader` over `data`.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the number of bytes left to read.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Returns `true` if every byte has been read.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Returns the current read offset.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }
}

impl Source for SliceReader<'_> {
    fn read_exact(&mut self, buf: &mut [u8]) -> StreamResult<()> {
        let available = self.remaining();
        if buf.len() > available {
            return Err(StreamError::UnexpectedEof {
                requested: buf.len(),
                available,
            });
        }
        buf.copy_from_slice(&self.data[self.pos..self.pos + buf.len()]);
        self.pos += buf.len();
        Ok(())
    }
}

/// A source backed by a caller-supplied read function.
///
/// The function must fill the whole buffer and return `true`, or return
/// `false`. Any user context lives in the closure's captures.
pub struct FnSource<F> {
    read: F,
}

impl<F: FnMut(&mut [u8]) -> bool> FnSource<F> {
    /// Wraps a read function.
    pub const fn new(read: F) -> Self {
        Self { read }
    }
}

impl<F: FnMut(&mut [u8]) -> bool> Source for FnSource<F> {
    fn read_exact(&mut self, buf: &mut [u8]) -> StreamResult<()> {
        if (self.read)(buf) {
            Ok(())
        } else {
            Err(StreamError::SourceFailed)
        }
    }
}

/// A source limited to a declared number of bytes of an underlying source.
///
/// Used to scope the decode of a nested message or packed field to its
/// length prefix. Requests that exceed the remaining span fail without
/// touching the underlying source; exhaustion is reported exactly like end of
/// data.
#[derive(Debug)]
pub struct BoundedReader<'a, R: ?Sized> {
    inner: &'a mut R,
    remaining: usize,
}

impl<'a, R: Source + ?Sized> BoundedReader<'a, R> {
    /// Limits `inner` to the next `len` bytes.
    pub fn new(inner: &'a mut R, len: usize) -> Self {
        Self {
            inner,
            remaining: len,
        }
    }

    /// Returns the number of bytes left in the span.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.remaining
    }

    /// Returns `true` once the whole span has been consumed.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// Reads and discards whatever is left of the span.
    ///
    /// Leaves the underlying source positioned exactly at the span's end, or
    /// fails if the underlying source runs out first.
    pub fn skip_remaining(&mut self) -> StreamResult<()> {
        let mut scratch = [0u8; 16];
        while self.remaining > 0 {
            let chunk = self.remaining.min(scratch.len());
            self.read_exact(&mut scratch[..chunk])?;
        }
        Ok(())
    }
}

impl<R: Source + ?Sized> Source for BoundedReader<'_, R> {
    fn read_exact(&mut self, buf: &mut [u8]) -> StreamResult<()> {
        if buf.len() > self.remaining {
            return Err(StreamError::UnexpectedEof {
                requested: buf.len(),
                available: self.remaining,
            });
        }
        self.inner.read_exact(buf)?;
        self.remaining -= buf.len();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_slice_reader() {
        let reader = SliceReader::new(&[]);
        assert!(reader.is_empty());
        assert_eq!(reader.remaining(), 0);
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn read_from_empty_fails() {
        let mut reader = SliceReader::new(&[]);
        let err = reader.read_byte().unwrap_err();
        assert_eq!(
            err,
            StreamError::UnexpectedEof {
                requested: 1,
                available: 0
            }
        );
    }

    #[test]
    fn short_read_does_not_consume() {
        let mut reader = SliceReader::new(&[1, 2, 3]);
        let mut buf = [0u8; 4];
        assert!(reader.read_exact(&mut buf).is_err());
        assert_eq!(reader.position(), 0);
        assert_eq!(reader.read_byte().unwrap(), 1);
    }

    #[test]
    fn fn_source_passes_through() {
        let data = [7u8, 8, 9];
        let mut pos = 0usize;
        let mut source = FnSource::new(|buf: &mut [u8]| {
            if pos + buf.len() > data.len() {
                return false;
            }
            buf.copy_from_slice(&data[pos..pos + buf.len()]);
            pos += buf.len();
            true
        });
        let mut buf = [0u8; 2];
        source.read_exact(&mut buf).unwrap();
        assert_eq!(buf, [7, 8]);
        assert_eq!(source.read_byte().unwrap(), 9);
        assert_eq!(source.read_byte().unwrap_err(), StreamError::SourceFailed);
    }

    #[test]
    fn bounded_reader_stops_at_span() {
        let mut inner = SliceReader::new(&[1, 2, 3, 4, 5]);
        {
            let mut bounded = BoundedReader::new(&mut inner, 2);
            assert_eq!(bounded.read_byte().unwrap(), 1);
            assert_eq!(bounded.remaining(), 1);
            assert_eq!(bounded.read_byte().unwrap(), 2);
            assert!(bounded.is_exhausted());
            assert!(matches!(
                bounded.read_byte(),
                Err(StreamError::UnexpectedEof {
                    requested: 1,
                    available: 0
                })
            ));
        }
        assert_eq!(inner.read_byte().unwrap(), 3);
    }

    #[test]
    fn bounded_reader_rejects_oversized_request_without_consuming() {
        let mut inner = SliceReader::new(&[1, 2, 3, 4, 5]);
        {
            let mut bounded = BoundedReader::new(&mut inner, 3);
            let mut buf = [0u8; 4];
            assert!(bounded.read_exact(&mut buf).is_err());
            assert_eq!(bounded.remaining(), 3);
        }
        assert_eq!(inner.position(), 0);
    }

    #[test]
    fn bounded_reader_reports_inner_failure() {
        let mut inner = SliceReader::new(&[1]);
        let mut bounded = BoundedReader::new(&mut inner, 10);
        let mut buf = [0u8; 2];
        assert!(matches!(
            bounded.read_exact(&mut buf),
            Err(StreamError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn skip_remaining_lands_on_span_end() {
        let data: Vec<u8> = (0..40).collect();
        let mut inner = SliceReader::new(&data);
        {
            let mut bounded = BoundedReader::new(&mut inner, 35);
            assert_eq!(bounded.read_byte().unwrap(), 0);
            bounded.skip_remaining().unwrap();
            assert!(bounded.is_exhausted());
        }
        assert_eq!(inner.position(), 35);
    }

    #[test]
    fn skip_remaining_fails_on_truncated_source() {
        let mut inner = SliceReader::new(&[1, 2]);
        let mut bounded = BoundedReader::new(&mut inner, 5);
        assert!(bounded.skip_remaining().is_err());
    }

    #[test]
    fn nested_bounded_readers() {
        let mut inner = SliceReader::new(&[1, 2, 3, 4]);
        let mut outer = BoundedReader::new(&mut inner, 3);
        let mut nested = BoundedReader::new(&mut outer, 5);
        let mut buf = [0u8; 4];
        assert!(nested.read_exact(&mut buf).is_err());
        let mut buf = [0u8; 3];
        nested.read_exact(&mut buf).unwrap();
        assert_eq!(buf, [1, 2, 3]);
    }
}
