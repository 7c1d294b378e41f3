use proptest::prelude::*;
use stream::{
    decode_bool, decode_fixed32, decode_float, decode_varint, encode_fixed32, encode_float,
    encode_varint, varint_len, BoundedReader, CountingSink, Sink, SliceReader, Source, FIXED32_LEN,
    MAX_VARINT_LEN,
};

#[derive(Clone, Debug)]
enum Op {
    Varint(u32),
    Bool(bool),
    Fixed32(u32),
    Float(f32),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<u32>().prop_map(Op::Varint),
        any::<bool>().prop_map(Op::Bool),
        any::<u32>().prop_map(Op::Fixed32),
        any::<f32>().prop_map(Op::Float),
    ]
}

fn write_op<W: Sink>(sink: &mut W, op: &Op) -> Result<(), W::Error> {
    let mut scratch = [0u8; MAX_VARINT_LEN];
    let len = match op {
        Op::Varint(v) => encode_varint(&mut scratch, *v),
        Op::Bool(b) => encode_varint(&mut scratch, u32::from(*b)),
        Op::Fixed32(v) => encode_fixed32(&mut scratch, *v),
        Op::Float(v) => encode_float(&mut scratch, *v),
    };
    sink.write_all(&scratch[..len])
}

fn op_len(op: &Op) -> usize {
    match op {
        Op::Varint(v) => varint_len(*v),
        Op::Bool(_) => 1,
        Op::Fixed32(_) | Op::Float(_) => FIXED32_LEN,
    }
}

proptest! {
    #[test]
    fn prop_roundtrip_ops(ops in prop::collection::vec(op_strategy(), 1..64)) {
        let mut out = Vec::new();
        for op in &ops {
            write_op(&mut out, op).unwrap();
        }

        let mut reader = SliceReader::new(&out);
        for op in &ops {
            match op {
                Op::Varint(v) => prop_assert_eq!(decode_varint(&mut reader).unwrap(), *v),
                Op::Bool(b) => prop_assert_eq!(decode_bool(&mut reader).unwrap(), *b),
                Op::Fixed32(v) => prop_assert_eq!(decode_fixed32(&mut reader).unwrap(), *v),
                Op::Float(v) => {
                    prop_assert_eq!(decode_float(&mut reader).unwrap().to_bits(), v.to_bits());
                }
            }
        }
        prop_assert!(reader.is_empty());
    }

    #[test]
    fn prop_predicted_len_matches_written(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let mut counter = CountingSink::new();
        for op in &ops {
            write_op(&mut counter, op).unwrap();
        }
        let predicted: usize = ops.iter().map(op_len).sum();
        prop_assert_eq!(counter.count(), predicted);
    }

    #[test]
    fn prop_bounded_reader_never_overreads(
        data in prop::collection::vec(any::<u8>(), 0..64),
        limit in 0usize..80,
        reads in prop::collection::vec(1usize..8, 0..32),
    ) {
        let mut inner = SliceReader::new(&data);
        let mut consumed = 0usize;
        {
            let mut bounded = BoundedReader::new(&mut inner, limit);
            let mut buf = [0u8; 8];
            for n in reads {
                if bounded.read_exact(&mut buf[..n]).is_ok() {
                    consumed += n;
                }
                prop_assert!(consumed <= limit);
                prop_assert_eq!(bounded.remaining(), limit - consumed);
            }
        }
        prop_assert_eq!(inner.position(), consumed);
    }
}
