//! Error types for byte stream operations.

use std::fmt;

/// Result type for byte stream operations.
pub type StreamResult<T> = Result<T, StreamError>;

/// Errors raised by sources, sinks and the primitive decoders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
    /// Attempted to read past the end of the available bytes.
    UnexpectedEof {
        /// Number of bytes requested.
        requested: usize,
        /// Number of bytes available.
        available: usize,
    },

    /// A caller-supplied read function reported failure.
    SourceFailed,

    /// A caller-supplied write function reported failure.
    SinkRejected,

    /// A bounded output buffer cannot take the write.
    BufferFull {
        /// Number of bytes the write needed.
        needed: usize,
        /// Number of bytes left in the buffer.
        available: usize,
    },

    /// A varint ran past five bytes without terminating.
    InvalidVarint,
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof {
                requested,
                available,
            } => {
                write!(
                    f,
                    "attempted to read {requested} bytes but only {available} bytes available"
                )
            }
            Self::SourceFailed => write!(f, "byte source reported failure"),
            Self::SinkRejected => write!(f, "byte sink rejected the write"),
            Self::BufferFull { needed, available } => {
                write!(
                    f,
                    "attempted to write {needed} bytes but buffer has {available} bytes left"
                )
            }
            Self::InvalidVarint => write!(f, "varint exceeds 5 bytes"),
        }
    }
}

impl std::error::Error for StreamError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_unexpected_eof() {
        let err = StreamError::UnexpectedEof {
            requested: 4,
            available: 1,
        };
        let msg = err.to_string();
        assert!(msg.contains("4 bytes"), "should mention requested bytes");
        assert!(msg.contains("1 bytes"), "should mention available bytes");
        assert!(msg.contains("read"), "should mention read operation");
    }

    #[test]
    fn error_display_buffer_full() {
        let err = StreamError::BufferFull {
            needed: 12,
            available: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("12"));
        assert!(msg.contains('3'));
        assert!(msg.contains("write"));
    }

    #[test]
    fn error_display_callbacks() {
        assert!(StreamError::SourceFailed.to_string().contains("source"));
        assert!(StreamError::SinkRejected.to_string().contains("sink"));
    }

    #[test]
    fn error_equality() {
        let a = StreamError::UnexpectedEof {
            requested: 1,
            available: 0,
        };
        let b = StreamError::UnexpectedEof {
            requested: 1,
            available: 0,
        };
        assert_eq!(a, b);
        assert_ne!(a, StreamError::InvalidVarint);
    }

    #[test]
    fn error_is_std_error() {
        fn assert_error<E: std::error::Error>() {}
        assert_error::<StreamError>();
    }
}
