/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Error types for the fixwire codec.
//!
//! Every failure is fail-fast: the first violation aborts the operation and is
//! returned with enough context (byte offset, tag, or attribute) for the caller
//! to decide between a protocol-level Reject, a disconnect, or a log line.

use crate::message::Attribute;
use thiserror::Error;

/// Result type alias using [`FixError`] as the error type.
pub type Result<T> = std::result::Result<T, FixError>;

/// Top-level error type for all fixwire operations.
#[derive(Debug, Error)]
pub enum FixError {
    /// Error during message decoding.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Error during message encoding or construction.
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),

    /// Structural validation failure.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// I/O error from the underlying transport.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that occur while parsing a message from wire bytes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The buffer ends before the message does.
    #[error("incomplete message, need more data")]
    Incomplete,

    /// A tag is not a positive decimal number.
    #[error("invalid tag at offset {offset}")]
    InvalidTag {
        /// Offset of the first byte of the tag.
        offset: usize,
    },

    /// The first three fields are not BeginString, BodyLength, MsgType.
    #[error("malformed header at offset {offset}: expected tag {expected}, found {found}")]
    MalformedHeader {
        /// Offset of the offending field.
        offset: usize,
        /// Tag required at this position.
        expected: u32,
        /// Tag actually found (0 if the head itself is oversized).
        found: u32,
    },

    /// CheckSum is not the last field of the message.
    #[error("malformed trailer at offset {offset}")]
    MalformedTrailer {
        /// Offset of the field that breaks the trailer layout.
        offset: usize,
    },

    /// BodyLength declares more bytes than the configured maximum.
    #[error("body too large: declared {declared} bytes exceeds maximum {max}")]
    BodyTooLarge {
        /// Declared body length.
        declared: usize,
        /// Configured maximum body length.
        max: usize,
    },

    /// Checksum mismatch between calculated and declared values.
    #[error("checksum mismatch: calculated {calculated}, declared {declared}")]
    ChecksumMismatch {
        /// Calculated checksum value.
        calculated: u8,
        /// Declared checksum value in message.
        declared: u8,
    },

    /// The body field sequence is full.
    #[error("too many fields at offset {offset}: capacity is {capacity}")]
    TooManyFields {
        /// Offset of the field that did not fit.
        offset: usize,
        /// Capacity of the message's field storage.
        capacity: usize,
    },

    /// A field value does not match the kind its tag requires.
    #[error("invalid field format for tag {tag} at offset {offset}: {reason}")]
    InvalidFieldFormat {
        /// The tag number of the field.
        tag: u32,
        /// Offset of the field.
        offset: usize,
        /// Description of why the value is invalid.
        reason: &'static str,
    },

    /// The parsed message failed structural validation.
    #[error("invalid message: {0}")]
    Invalid(#[from] ValidationError),
}

impl DecodeError {
    /// Returns the byte offset the error refers to, when it has one.
    #[must_use]
    pub const fn offset(&self) -> Option<usize> {
        match self {
            Self::InvalidTag { offset }
            | Self::MalformedHeader { offset, .. }
            | Self::MalformedTrailer { offset }
            | Self::TooManyFields { offset, .. }
            | Self::InvalidFieldFormat { offset, .. } => Some(*offset),
            Self::Incomplete
            | Self::BodyTooLarge { .. }
            | Self::ChecksumMismatch { .. }
            | Self::Invalid(_) => None,
        }
    }
}

/// Errors that occur while building or encoding a message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// Output capacity exceeded during encoding.
    #[error("buffer overflow: need {needed} bytes, have {available}")]
    BufferOverflow {
        /// Bytes needed to complete encoding.
        needed: usize,
        /// Bytes available in buffer.
        available: usize,
    },

    /// A caller-supplied output buffer cannot hold a rendered value.
    #[error("buffer too small: need {needed} bytes, limit is {limit}")]
    BufferTooSmall {
        /// Bytes needed for the rendering.
        needed: usize,
        /// Size of the caller's buffer.
        limit: usize,
    },

    /// The body field sequence is full.
    #[error("too many fields: capacity is {capacity}")]
    TooManyFields {
        /// Capacity of the message's field storage.
        capacity: usize,
    },

    /// The tag is produced by the serializer and cannot be added by hand.
    #[error("tag {tag} is reserved for message framing")]
    ReservedTag {
        /// The reserved tag number.
        tag: u32,
    },

    /// Invalid field value for encoding.
    #[error("invalid field value for tag {tag}: {reason}")]
    InvalidFieldValue {
        /// The tag number of the field.
        tag: u32,
        /// Description of why the value is invalid.
        reason: &'static str,
    },

    /// The message failed validation before encoding.
    #[error("invalid message: {0}")]
    Invalid(#[from] ValidationError),
}

/// Structural validation failures, naming the first failing attribute.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// A required attribute is not set.
    #[error("missing required attribute {0}")]
    Missing(Attribute),

    /// An attribute holds a value that its wire kind cannot carry.
    #[error("attribute {0} is out of range")]
    OutOfRange(Attribute),

    /// BodyLength disagrees with the retained body span.
    #[error("body length mismatch: declared {declared}, actual {actual}")]
    BodyLengthMismatch {
        /// BodyLength attribute value.
        declared: usize,
        /// Length of the body span.
        actual: usize,
    },

    /// CheckSum disagrees with the retained head and body spans.
    #[error("checksum mismatch: declared {declared}, calculated {calculated}")]
    CheckSumMismatch {
        /// CheckSum attribute value.
        declared: u8,
        /// Checksum recomputed from the spans.
        calculated: u8,
    },
}

impl ValidationError {
    /// Returns the attribute that failed validation.
    #[must_use]
    pub const fn attribute(&self) -> Attribute {
        match self {
            Self::Missing(attribute) | Self::OutOfRange(attribute) => *attribute,
            Self::BodyLengthMismatch { .. } => Attribute::BodyLength,
            Self::CheckSumMismatch { .. } => Attribute::CheckSum,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::ChecksumMismatch {
            calculated: 100,
            declared: 200,
        };
        assert_eq!(
            err.to_string(),
            "checksum mismatch: calculated 100, declared 200"
        );
    }

    #[test]
    fn test_decode_error_offset() {
        let err = DecodeError::MalformedHeader {
            offset: 12,
            expected: 9,
            found: 35,
        };
        assert_eq!(err.offset(), Some(12));
        assert_eq!(DecodeError::Incomplete.offset(), None);
    }

    #[test]
    fn test_fix_error_from_decode() {
        let fix_err: FixError = DecodeError::Incomplete.into();
        assert!(matches!(fix_err, FixError::Decode(DecodeError::Incomplete)));
    }

    #[test]
    fn test_validation_error_attribute() {
        let err = ValidationError::Missing(Attribute::TargetCompId);
        assert_eq!(err.attribute(), Attribute::TargetCompId);
        assert_eq!(err.to_string(), "missing required attribute TargetCompID");

        let err = ValidationError::OutOfRange(Attribute::MsgSeqNum);
        assert_eq!(err.attribute(), Attribute::MsgSeqNum);
        assert_eq!(err.to_string(), "attribute MsgSeqNum is out of range");

        let err = ValidationError::BodyLengthMismatch {
            declared: 5,
            actual: 6,
        };
        assert_eq!(err.attribute(), Attribute::BodyLength);
    }

    #[test]
    fn test_encode_error_from_validation() {
        let err: EncodeError = ValidationError::Missing(Attribute::MsgType).into();
        assert_eq!(
            err.to_string(),
            "invalid message: missing required attribute MsgType"
        );
    }
}
