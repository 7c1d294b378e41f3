//! Buffer mode: encoding straight into a flat buffer sized by `MAX_SIZE`.

use std::fmt;
use std::ops::Deref;

use crate::message::Message;

/// Encodes `msg` into `buf` and returns the number of bytes written.
///
/// `buf` must hold at least `M::MAX_SIZE` bytes. No per-write bounds check
/// is made beyond slice indexing.
///
/// # Panics
///
/// Panics if `buf` is shorter than the encoding.
pub fn encode_to_buffer<M: Message>(msg: &M, buf: &mut [u8]) -> usize {
    msg.encode_to_buffer(buf)
}

/// A fixed-size byte array holding one encoded message.
///
/// Size it with the message type's `MAX_SIZE`, e.g.
/// `StaticBuffer::<{ Header::MAX_SIZE }>`.
#[derive(Clone)]
pub struct StaticBuffer<const N: usize> {
    bytes: [u8; N],
    len: usize,
}

impl<const N: usize> StaticBuffer<N> {
    /// Creates an empty buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bytes: [0; N],
            len: 0,
        }
    }

    /// Encodes `msg` into a new buffer.
    ///
    /// # Panics
    ///
    /// Panics if `N` is smaller than `M::MAX_SIZE`.
    #[must_use]
    pub fn encode<M: Message>(msg: &M) -> Self {
        assert!(
            N >= M::MAX_SIZE,
            "buffer of {N} bytes cannot hold a message of up to {} bytes",
            M::MAX_SIZE
        );
        let mut buffer = Self::new();
        buffer.len = msg.encode_to_buffer(&mut buffer.bytes);
        buffer
    }

    /// Returns the encoded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Returns the number of encoded bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if nothing has been encoded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the buffer capacity.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for StaticBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Deref for StaticBuffer<N> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl<const N: usize> fmt::Debug for StaticBuffer<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticBuffer")
            .field("capacity", &N)
            .field("bytes", &self.as_bytes())
            .finish()
    }
}
