#![no_main]

use libfuzzer_sys::fuzz_target;
use stream::{decode_bool, decode_fixed32, decode_varint, BoundedReader, SliceReader, Source};

fuzz_target!(|data: &[u8]| {
    let Some((&span, rest)) = data.split_first() else {
        return;
    };
    let mut inner = SliceReader::new(rest);
    let start = inner.remaining();
    {
        let mut reader = BoundedReader::new(&mut inner, usize::from(span));
        let mut idx = 0usize;

        // Use input bytes to drive a bounded sequence of operations.
        while idx < rest.len() && idx < 1024 {
            let op = rest[idx] % 5;
            idx += 1;

            match op {
                0 => {
                    let _ = decode_varint(&mut reader);
                }
                1 => {
                    let _ = decode_fixed32(&mut reader);
                }
                2 => {
                    let _ = decode_bool(&mut reader);
                }
                3 => {
                    let mut buf = [0u8; 7];
                    let _ = reader.read_exact(&mut buf);
                }
                _ => {
                    let _ = reader.skip_remaining();
                }
            }
        }
    }

    // The span must never be overrun.
    assert!(start - inner.remaining() <= usize::from(span));
});
