//! Byte-level primitives for the ecupb message codec.
//!
//! This crate provides the primitive encoders and decoders (varint, fixed32,
//! float, bool), the [`Source`] and [`Sink`] capabilities the codec reads from
//! and writes to, and the [`BoundedReader`] that scopes nested decodes to a
//! declared span.
//!
//! # Design Principles
//!
//! - **No unsafe code** - Buffer-mode overflow is a panic, never UB.
//! - **No allocation** - Every adapter borrows caller-owned storage; the
//!   `Vec<u8>` sink exists for hosts and tests.
//! - **No schema knowledge** - This crate knows nothing about tags or messages.
//! - **All-or-nothing transfers** - A read or write either moves every
//!   requested byte or fails.
//!
//! # Example
//!
//! ```
//! use stream::{decode_varint, encode_varint, SliceReader, MAX_VARINT_LEN};
//!
//! let mut scratch = [0u8; MAX_VARINT_LEN];
//! let len = encode_varint(&mut scratch, 300);
//! assert_eq!(&scratch[..len], &[0xAC, 0x02]);
//!
//! let mut reader = SliceReader::new(&scratch[..len]);
//! assert_eq!(decode_varint(&mut reader).unwrap(), 300);
//! ```

mod error;
mod primitive;
mod reader;
mod writer;

pub use error::{StreamError, StreamResult};
pub use primitive::{
    decode_bool, decode_fixed32, decode_float, decode_varint, encode_fixed32, encode_float,
    encode_varint, varint_len, FIXED32_LEN, MAX_VARINT_LEN,
};
pub use reader::{BoundedReader, FnSource, SliceReader, Source};
pub use writer::{BufferWriter, CountingSink, FnSink, SliceWriter, Sink};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_api_exports() {
        let _ = StreamError::InvalidVarint;
        let _: StreamResult<()> = Ok(());
        let _ = SliceReader::new(&[]);
        let _ = CountingSink::new();
        assert_eq!(MAX_VARINT_LEN, 5);
        assert_eq!(FIXED32_LEN, 4);
    }

    #[test]
    fn mixed_primitives_through_vec() {
        let mut out = Vec::new();
        let mut scratch = [0u8; MAX_VARINT_LEN + FIXED32_LEN];
        let mut len = encode_varint(&mut scratch, 0x0D);
        len += encode_fixed32(&mut scratch[len..], 5);
        out.write_all(&scratch[..len]).unwrap();
        let len = encode_float(&mut scratch, -2.5);
        out.write_all(&scratch[..len]).unwrap();

        assert_eq!(out, vec![0x0D, 0x05, 0x00, 0x00, 0x00, 0x00, 0x00, 0x20, 0xC0]);

        let mut reader = SliceReader::new(&out);
        assert_eq!(decode_varint(&mut reader).unwrap(), 0x0D);
        assert_eq!(decode_fixed32(&mut reader).unwrap(), 5);
        assert_eq!(decode_float(&mut reader).unwrap().to_bits(), (-2.5f32).to_bits());
        assert!(reader.is_empty());
    }

    #[test]
    fn bounded_reader_over_fn_source() {
        let data = [0x96, 0x01, 0xFF];
        let mut pos = 0usize;
        let mut source = FnSource::new(|buf: &mut [u8]| {
            let Some(chunk) = data.get(pos..pos + buf.len()) else {
                return false;
            };
            buf.copy_from_slice(chunk);
            pos += buf.len();
            true
        });
        let mut bounded = BoundedReader::new(&mut source, 2);
        assert_eq!(decode_varint(&mut bounded).unwrap(), 150);
        assert!(decode_varint(&mut bounded).is_err());
    }
}
