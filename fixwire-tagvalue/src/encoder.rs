/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! FIX message encoder.
//!
//! Serializes a [`Message`] into `head + body + trailer`. The body is rendered
//! first into a scratch buffer so BodyLength is known before the head is
//! written; the CheckSum covers head and body.

use crate::checksum::calculate_checksum;
use crate::field::encode_field;
use crate::validator::validate_required;
use bytes::{Bytes, BytesMut};
use fixwire_core::config::{CodecConfig, TRAILER_LEN};
use fixwire_core::error::{EncodeError, ValidationError};
use fixwire_core::field::{Field, FieldValue};
use fixwire_core::message::{Attribute, Message, MsgType};
use fixwire_core::tags;
use tracing::trace;

/// FIX message encoder.
///
/// The encoder keeps one body buffer and reuses it for every message, so
/// steady-state encoding allocates only the output buffer.
#[derive(Debug)]
pub struct Encoder {
    /// Bounds applied to the head and body.
    config: CodecConfig,
    /// Buffer for the message body (between MsgType and CheckSum).
    body: BytesMut,
}

impl Encoder {
    /// Creates a new encoder with the default bounds.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(CodecConfig::default())
    }

    /// Creates a new encoder with the given bounds.
    ///
    /// # Arguments
    /// * `config` - Head and body limits
    #[must_use]
    pub fn with_config(config: CodecConfig) -> Self {
        Self {
            body: BytesMut::with_capacity(config.max_body_len),
            config,
        }
    }

    /// Returns the encoder configuration.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Serializes `msg` and records the produced spans on it.
    ///
    /// The session attributes (SenderCompID, TargetCompID, MsgSeqNum,
    /// SendingTime) are written first, followed by the body fields in
    /// insertion order. On success the message's BodyLength, CheckSum, head,
    /// and body describe the returned bytes.
    ///
    /// # Returns
    /// The complete FIX message.
    ///
    /// # Errors
    /// - [`EncodeError::Invalid`] if a required attribute is missing
    /// - [`EncodeError::BufferOverflow`] if the head or body exceeds its bound
    /// - [`EncodeError::InvalidFieldValue`] if a value cannot be rendered
    pub fn encode<const N: usize>(&mut self, msg: &mut Message<N>) -> Result<Bytes, EncodeError> {
        validate_required(msg)?;

        self.body.clear();
        let body_limit = self.config.max_body_len;
        for field in msg.session_fields() {
            encode_field(&field, &mut self.body, body_limit)?;
        }
        for field in msg.fields() {
            encode_field(field, &mut self.body, body_limit)?;
        }
        let body_len = self.body.len();

        let begin_string = msg
            .has_tag(tags::BEGIN_STRING)
            .ok_or(ValidationError::Missing(Attribute::BeginString))?;
        let msg_type = msg
            .msg_type()
            .ok_or(ValidationError::Missing(Attribute::MsgType))?;
        let body_length = i64::try_from(body_len).map_err(|_| EncodeError::InvalidFieldValue {
            tag: tags::BODY_LENGTH,
            reason: "body length out of range",
        })?;

        let mut out = BytesMut::with_capacity(self.config.max_head_len + body_len + TRAILER_LEN);
        let head_limit = self.config.max_head_len;
        encode_field(&begin_string, &mut out, head_limit)?;
        encode_field(&Field::int(tags::BODY_LENGTH, body_length), &mut out, head_limit)?;
        encode_field(
            &Field::string(tags::MSG_TYPE, Bytes::copy_from_slice(msg_type.as_str().as_bytes())),
            &mut out,
            head_limit,
        )?;
        let head_len = out.len();

        out.extend_from_slice(&self.body);
        let check_sum = calculate_checksum(&out);
        let trailer = Field::new(tags::CHECK_SUM, FieldValue::CheckSum(check_sum));
        encode_field(&trailer, &mut out, usize::MAX)?;

        let wire = out.freeze();
        trace!(
            msg_type = %msg_type,
            body_length = body_len,
            check_sum,
            "encoded message"
        );
        msg.set_wire(
            wire.slice(..head_len),
            wire.slice(head_len..head_len + body_len),
            check_sum,
        );
        Ok(wire)
    }

    /// Returns the body length of the last encoded message.
    #[inline]
    #[must_use]
    pub fn body_len(&self) -> usize {
        self.body.len()
    }

    /// Clears the encoder for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.body.clear();
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a message carrying the header attributes every session message needs.
///
/// # Arguments
/// * `begin_string` - The FIX version string (e.g., "FIX.4.4")
/// * `msg_type` - The message type
/// * `sender` - SenderCompID
/// * `target` - TargetCompID
/// * `seq_num` - MsgSeqNum
#[must_use]
pub fn session_message<const N: usize>(
    begin_string: impl Into<Bytes>,
    msg_type: MsgType,
    sender: impl Into<Bytes>,
    target: impl Into<Bytes>,
    seq_num: u64,
) -> Message<N> {
    let mut msg = Message::new();
    msg.set_begin_string(begin_string);
    msg.set_msg_type(msg_type);
    msg.set_sender_comp_id(sender);
    msg.set_target_comp_id(target);
    msg.set_msg_seq_num(seq_num);
    msg
}
