//! Compile-time worst-case size arithmetic.
//!
//! Each function returns the largest number of bytes one field of that kind
//! can occupy. A message's `MAX_SIZE` is the sum over its fields, with a
//! oneof contributing the largest of its alternatives.

use stream::{varint_len, FIXED32_LEN, MAX_VARINT_LEN};

use crate::field::len_value;
use crate::tag::tag_len;

/// A `fixed32` or `float` field.
#[must_use]
pub const fn fixed32(field: u32) -> usize {
    tag_len(field) + FIXED32_LEN
}

/// A `uint32` field.
#[must_use]
pub const fn uint32(field: u32) -> usize {
    tag_len(field) + MAX_VARINT_LEN
}

/// A `bool` field.
#[must_use]
pub const fn boolean(field: u32) -> usize {
    tag_len(field) + 1
}

/// An enum field whose largest number is `max_value`.
#[must_use]
pub const fn enumeration(field: u32, max_value: u32) -> usize {
    tag_len(field) + varint_len(max_value)
}

/// A length-delimited field with at most `max_len` payload bytes.
#[must_use]
pub const fn len_delimited(field: u32, max_len: usize) -> usize {
    tag_len(field) + varint_len(len_value(max_len)) + max_len
}

/// A submessage field whose type has `MAX_SIZE` `max_len`.
#[must_use]
pub const fn message(field: u32, max_len: usize) -> usize {
    len_delimited(field, max_len)
}

/// A string field holding at most `capacity` bytes.
#[must_use]
pub const fn string(field: u32, capacity: usize) -> usize {
    len_delimited(field, capacity)
}

/// A packed float field holding at most `capacity` values.
#[must_use]
pub const fn packed_floats(field: u32, capacity: usize) -> usize {
    len_delimited(field, capacity * FIXED32_LEN)
}

/// A repeated submessage field holding at most `capacity` elements.
#[must_use]
pub const fn repeated_message(field: u32, capacity: usize, max_len: usize) -> usize {
    capacity * message(field, max_len)
}

/// Largest of a oneof's alternatives.
#[must_use]
pub const fn oneof(alternatives: &[usize]) -> usize {
    let mut max = 0;
    let mut i = 0;
    while i < alternatives.len() {
        if alternatives[i] > max {
            max = alternatives[i];
        }
        i += 1;
    }
    max
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_sizes() {
        assert_eq!(fixed32(1), 5);
        assert_eq!(fixed32(64), 6);
        assert_eq!(uint32(1), 6);
        assert_eq!(boolean(12), 2);
        assert_eq!(enumeration(32, 2), 3);
    }

    #[test]
    fn len_delimited_sizes() {
        assert_eq!(packed_floats(1, 24), 98);
        assert_eq!(string(1, 24), 26);
        assert_eq!(string(3, 16_384), 16_388);
        assert_eq!(message(4, 98), 100);
        assert_eq!(repeated_message(4, 24, 98), 2400);
        assert_eq!(message(2, 0), 2);
    }

    #[test]
    fn oneof_takes_largest() {
        assert_eq!(oneof(&[6, 6, 6]), 6);
        assert_eq!(oneof(&[2, 16_211, 2]), 16_211);
        assert_eq!(oneof(&[]), 0);
    }

    #[test]
    fn usable_in_const_context() {
        const MAX: usize = fixed32(1) + fixed32(2);
        assert_eq!(MAX, 10);
    }
}
