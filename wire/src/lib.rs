//! Wire format and message traits for the ecupb codec.
//!
//! This crate turns the byte primitives of `stream` into a protobuf-compatible
//! tag/length/value codec for a fixed schema: tags, the [`Message`] and
//! [`Enumeration`] traits, the field strategy families in [`field`], the
//! worst-case size arithmetic in [`size`], and the buffer-mode wrapper.
//!
//! # Design Principles
//!
//! - **Exact sizes** - `encoded_len` always equals the bytes `encode` writes;
//!   buffer mode depends on it.
//! - **Two-pass nesting** - Submessages are sized, then encoded, never buffered.
//! - **Bounded decoding** - Repeated fields and strings live in fixed-capacity
//!   `heapless` containers and reject input that would overflow them.
//! - **Faithful tag handling** - A failed tag read ends a message; unrecognized
//!   tags are dropped without skipping their payload.
//!
//! # Example
//!
//! ```
//! use stream::{Sink, Source};
//! use wire::field::scalar::{self, Fixed32};
//! use wire::{field, read_tag, DecodeResult, Message, WireType};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Header {
//!     seq: u32,
//! }
//!
//! impl Message for Header {
//!     const MAX_SIZE: usize = wire::size::fixed32(1);
//!
//!     fn encoded_len(&self) -> usize {
//!         scalar::implicit_len::<Fixed32>(1, self.seq)
//!     }
//!
//!     fn encode<W: Sink + ?Sized>(&self, sink: &mut W) -> Result<(), W::Error> {
//!         scalar::encode_implicit::<Fixed32, W>(1, self.seq, sink)
//!     }
//!
//!     fn merge<R: Source + ?Sized>(&mut self, source: &mut R) -> DecodeResult<()> {
//!         while let Some(tag) = read_tag(source) {
//!             match (tag.field(), tag.wire_type()) {
//!                 (1, WireType::Fixed32) => self.seq = scalar::merge::<Fixed32, R>(1, source)?,
//!                 _ => field::unknown(tag),
//!             }
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let bytes = Header { seq: 5 }.encode_to_vec();
//! assert_eq!(bytes, [0x0D, 0x05, 0x00, 0x00, 0x00]);
//! assert_eq!(Header::decode_from_slice(&bytes).unwrap(), Header { seq: 5 });
//! ```

mod buffer;
mod error;
pub mod field;
mod message;
pub mod size;
mod tag;

pub use buffer::{encode_to_buffer, StaticBuffer};
pub use error::{DecodeError, DecodeResult};
pub use message::{Empty, Enumeration, Message};
pub use tag::{read_tag, tag_len, Tag, WireType};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_api_exports() {
        let _ = WireType::Varint;
        let _ = Tag::new(1, WireType::Fixed32);
        let _ = StaticBuffer::<4>::new();
        let _ = Empty;
        let _: DecodeResult<()> = Ok(());
        assert_eq!(Empty::MAX_SIZE, 0);
        assert_eq!(tag_len(16), 2);
    }
}
