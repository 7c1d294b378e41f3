//! Byte sinks: the write side of the codec.
//!
//! A [`Sink`] accepts whole chunks or fails. Encoders call it once per field
//! header and once per payload, and stop at the first failure. Bytes already
//! accepted are never retracted.

use std::convert::Infallible;

use crate::error::{StreamError, StreamResult};

/// A destination for encoded bytes.
pub trait Sink {
    /// Error reported when a write is rejected.
    type Error;

    /// Accepts all of `bytes` or fails.
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;
}

impl<W: Sink + ?Sized> Sink for &mut W {
    type Error = W::Error;

    fn write_all(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        (**self).write_all(bytes)
    }
}

impl Sink for Vec<u8> {
    type Error = Infallible;

    fn write_all(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

/// A bounds-checked sink writing into a caller-provided slice.
#[derive(Debug)]
pub struct SliceWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> SliceWriter<'a> {
    /// Creates a writer positioned at the start of `buf`.
    #[must_use]
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Returns the number of bytes written so far.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Returns the number of bytes still free.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }
}

impl Sink for SliceWriter<'_> {
    type Error = StreamError;

    fn write_all(&mut self, bytes: &[u8]) -> StreamResult<()> {
        let available = self.remaining();
        if bytes.len() > available {
            return Err(StreamError::BufferFull {
                needed: bytes.len(),
                available,
            });
        }
        self.buf[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
        Ok(())
    }
}

/// A cursor into a flat buffer that the caller has sized in advance.
///
/// Writes are not checked against the buffer length beyond Rust's slice
/// indexing: writing past the end panics. Size the buffer with the message
/// type's `MAX_SIZE`.
#[derive(Debug)]
pub struct BufferWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> BufferWriter<'a> {
    /// Creates a cursor at the start of `buf`.
    #[must_use]
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Returns the number of bytes written so far.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }
}

impl Sink for BufferWriter<'_> {
    type Error = Infallible;

    fn write_all(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        let end = self.pos + bytes.len();
        self.buf[self.pos..end].copy_from_slice(bytes);
        self.pos = end;
        Ok(())
    }
}

/// A sink backed by a caller-supplied write function.
///
/// The function must accept the whole chunk and return `true`, or return
/// `false` to abort the encode.
pub struct FnSink<F> {
    write: F,
}

impl<F: FnMut(&[u8]) -> bool> FnSink<F> {
    /// Wraps a write function.
    pub const fn new(write: F) -> Self {
        Self { write }
    }
}

impl<F: FnMut(&[u8]) -> bool> Sink for FnSink<F> {
    type Error = StreamError;

    fn write_all(&mut self, bytes: &[u8]) -> StreamResult<()> {
        if (self.write)(bytes) {
            Ok(())
        } else {
            Err(StreamError::SinkRejected)
        }
    }
}

/// A sink that only counts the bytes it is given.
#[derive(Debug, Default, Clone, Copy)]
pub struct CountingSink {
    count: usize,
}

impl CountingSink {
    /// Creates a counter at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self { count: 0 }
    }

    /// Returns the number of bytes accepted so far.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }
}

impl Sink for CountingSink {
    type Error = Infallible;

    fn write_all(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.count += bytes.len();
        Ok(())
    }
}
