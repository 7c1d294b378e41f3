//! Error types for message decoding.

use std::fmt;

use stream::StreamError;

/// Result type for message decoding.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Decode failures.
///
/// On any error the message being decoded is left partially mutated and
/// must be discarded by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    /// The underlying source failed or ran out mid-field.
    Stream(StreamError),

    /// A repeated field or string would exceed its fixed capacity.
    CapacityExceeded { field: u32, capacity: usize },

    /// A repeated message element declared more bytes than its type can
    /// ever encode to.
    LengthExceeded {
        field: u32,
        length: usize,
        max: usize,
    },

    /// An enum field carried a number the schema does not define.
    InvalidEnum { field: u32, value: u32 },

    /// A string field was not valid UTF-8.
    InvalidUtf8 { field: u32 },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stream(err) => write!(f, "stream error: {err}"),
            Self::CapacityExceeded { field, capacity } => {
                write!(f, "field {field} exceeds capacity of {capacity}")
            }
            Self::LengthExceeded { field, length, max } => {
                write!(
                    f,
                    "field {field} element declares {length} bytes, max is {max}"
                )
            }
            Self::InvalidEnum { field, value } => {
                write!(f, "field {field} has unknown enum value {value}")
            }
            Self::InvalidUtf8 { field } => write!(f, "field {field} is not valid UTF-8"),
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Stream(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StreamError> for DecodeError {
    fn from(err: StreamError) -> Self {
        Self::Stream(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_capacity_exceeded() {
        let err = DecodeError::CapacityExceeded {
            field: 1,
            capacity: 16,
        };
        let msg = err.to_string();
        assert!(msg.contains("field 1"));
        assert!(msg.contains("16"));
    }

    #[test]
    fn display_length_exceeded() {
        let err = DecodeError::LengthExceeded {
            field: 4,
            length: 120,
            max: 98,
        };
        let msg = err.to_string();
        assert!(msg.contains("120"));
        assert!(msg.contains("98"));
    }

    #[test]
    fn display_invalid_enum() {
        let err = DecodeError::InvalidEnum { field: 5, value: 9 };
        assert!(err.to_string().contains("unknown enum value 9"));
    }

    #[test]
    fn from_stream_error() {
        let err: DecodeError = StreamError::InvalidVarint.into();
        assert_eq!(err, DecodeError::Stream(StreamError::InvalidVarint));
        assert!(err.to_string().contains("varint"));
    }

    #[test]
    fn source_chain() {
        use std::error::Error;
        let err = DecodeError::Stream(StreamError::SourceFailed);
        assert!(err.source().is_some());
        assert!(DecodeError::InvalidUtf8 { field: 1 }.source().is_none());
    }
}
