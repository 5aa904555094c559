/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Codec configuration.
//!
//! Bounds and checks shared by the parser, serializer, and stream codec.

use serde::{Deserialize, Serialize};

/// Default maximum head size: BeginString, BodyLength, and MsgType.
pub const DEFAULT_MAX_HEAD_LEN: usize = 32;

/// Default maximum body size in bytes.
pub const DEFAULT_MAX_BODY_LEN: usize = 4096;

/// Size of the CheckSum trailer on the wire (`10=NNN<SOH>`).
pub const TRAILER_LEN: usize = 7;

/// Configuration for encoding and decoding messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Maximum size of the head segment in bytes.
    pub max_head_len: usize,
    /// Maximum size of the body segment in bytes.
    pub max_body_len: usize,
    /// Whether to verify the CheckSum of incoming messages.
    pub validate_checksum: bool,
    /// Whether to run structural validation after each decode.
    pub validate_on_decode: bool,
}

impl CodecConfig {
    /// Creates a configuration with the default bounds and all checks enabled.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_head_len: DEFAULT_MAX_HEAD_LEN,
            max_body_len: DEFAULT_MAX_BODY_LEN,
            validate_checksum: true,
            validate_on_decode: true,
        }
    }

    /// Sets the maximum head size.
    #[must_use]
    pub const fn with_max_head_len(mut self, len: usize) -> Self {
        self.max_head_len = len;
        self
    }

    /// Sets the maximum body size.
    #[must_use]
    pub const fn with_max_body_len(mut self, len: usize) -> Self {
        self.max_body_len = len;
        self
    }

    /// Sets whether to verify checksums during decoding.
    #[must_use]
    pub const fn with_checksum_validation(mut self, validate: bool) -> Self {
        self.validate_checksum = validate;
        self
    }

    /// Sets whether to validate messages after decoding.
    #[must_use]
    pub const fn with_decode_validation(mut self, validate: bool) -> Self {
        self.validate_on_decode = validate;
        self
    }

    /// Returns the largest complete message these bounds allow.
    #[must_use]
    pub const fn max_message_size(&self) -> usize {
        self.max_head_len + self.max_body_len + TRAILER_LEN
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self::new()
    }
}
