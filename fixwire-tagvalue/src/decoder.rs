/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Zero-copy FIX message decoder.
//!
//! The decoder parses messages out of a [`Bytes`] buffer. Every string value,
//! and the retained head and body spans, are slices sharing that buffer, so
//! decoding does not copy field data.
//!
//! Parsing is fail-fast: the first violation is returned with the absolute
//! byte offset it was found at, and the decoder's cursor stays at the start of
//! the rejected message.

use crate::checksum::{calculate_checksum, parse_checksum};
use crate::field::{EQUALS, decode_field, parse_unsigned};
use crate::validator::validate_required;
use bytes::Bytes;
use fixwire_core::config::{CodecConfig, TRAILER_LEN};
use fixwire_core::error::{DecodeError, EncodeError};
use fixwire_core::field::SOH;
use fixwire_core::message::{Message, MsgType};
use fixwire_core::tags;
use memchr::memchr;
use tracing::{debug, trace};

/// Position of one `tag=value<SOH>` unit in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RawField {
    tag: u32,
    start: usize,
    value_start: usize,
    value_end: usize,
    end: usize,
}

/// The three header fields of a message.
#[derive(Debug, Clone, Copy)]
struct Head {
    begin_string: RawField,
    body_length: usize,
    msg_type: RawField,
}

impl Head {
    const fn body_start(&self) -> usize {
        self.msg_type.end
    }

    const fn body_end(&self) -> usize {
        self.msg_type.end + self.body_length
    }
}

/// Zero-copy FIX message decoder.
///
/// Holds a cursor into its input, so a buffer carrying several back-to-back
/// messages is consumed by calling [`decode`](Self::decode) repeatedly.
#[derive(Debug, Clone)]
pub struct Decoder {
    /// Input buffer.
    input: Bytes,
    /// Start of the next message in the buffer.
    offset: usize,
    /// Bounds and checks.
    config: CodecConfig,
}

impl Decoder {
    /// Creates a new decoder for the given input buffer.
    ///
    /// # Arguments
    /// * `input` - The FIX message bytes to decode
    #[inline]
    #[must_use]
    pub fn new(input: Bytes) -> Self {
        Self {
            input,
            offset: 0,
            config: CodecConfig::default(),
        }
    }

    /// Sets the bounds and checks used while decoding.
    #[inline]
    #[must_use]
    pub fn with_config(mut self, config: CodecConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the decoder configuration.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Decodes the next message into a new [`Message`].
    ///
    /// # Errors
    /// Returns `DecodeError` if the message is malformed or incomplete.
    pub fn decode<const N: usize>(&mut self) -> Result<Message<N>, DecodeError> {
        let mut msg = Message::new();
        self.decode_into(&mut msg)?;
        Ok(msg)
    }

    /// Decodes the next message into `msg`, clearing it first.
    ///
    /// On success the cursor moves past the message's CheckSum field; on
    /// failure it does not move and `msg` holds whatever was parsed before the
    /// violation.
    ///
    /// # Errors
    /// Returns `DecodeError` if the message is malformed or incomplete.
    pub fn decode_into<const N: usize>(&mut self, msg: &mut Message<N>) -> Result<(), DecodeError> {
        msg.clear();
        match self.parse(msg) {
            Ok(end) => {
                trace!(
                    offset = self.offset,
                    msg_type = %msg.msg_type().map_or("?", MsgType::as_str),
                    body_length = msg.body_length(),
                    fields = msg.field_count(),
                    "decoded message"
                );
                self.offset = end;
                Ok(())
            }
            Err(err) => {
                if err != DecodeError::Incomplete {
                    debug!(offset = self.offset, error = %err, "rejected message");
                }
                Err(err)
            }
        }
    }

    /// Returns the current offset in the buffer.
    #[inline]
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the bytes not consumed yet.
    #[inline]
    #[must_use]
    pub fn remaining(&self) -> &[u8] {
        &self.input[self.offset.min(self.input.len())..]
    }

    /// Returns true if the buffer has been fully consumed.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offset >= self.input.len()
    }

    /// Resets the decoder to the beginning of the buffer.
    #[inline]
    pub fn reset(&mut self) {
        self.offset = 0;
    }

    fn parse<const N: usize>(&self, msg: &mut Message<N>) -> Result<usize, DecodeError> {
        let input = &self.input[..];
        let start = self.offset;
        let head = scan_head(input, start, &self.config)?;
        let body_end = head.body_end();
        if input.len() < body_end {
            return Err(DecodeError::Incomplete);
        }

        let msg_type = &input[head.msg_type.value_start..head.msg_type.value_end];
        let msg_type = MsgType::from_bytes(msg_type).map_err(|_| DecodeError::InvalidFieldFormat {
            tag: tags::MSG_TYPE,
            offset: head.msg_type.start,
            reason: "invalid msg type",
        })?;
        msg.set_begin_string(self.value_of(&head.begin_string));
        msg.set_msg_type(msg_type);

        let mut at = head.body_start();
        let trailer = loop {
            let field = read_field(input, at)?;
            if field.tag == tags::CHECK_SUM {
                if field.start != body_end {
                    return Err(DecodeError::MalformedTrailer {
                        offset: field.start,
                    });
                }
                break field;
            }
            if field.end > body_end {
                return Err(DecodeError::MalformedTrailer {
                    offset: field.start,
                });
            }

            let decoded = decode_field(field.tag, self.value_of(&field), field.start)?;
            msg.add_field(decoded)
                .map_err(|err| body_field_error(err, field.start))?;
            at = field.end;
        };

        let declared = parse_checksum(&input[trailer.value_start..trailer.value_end]).ok_or(
            DecodeError::InvalidFieldFormat {
                tag: tags::CHECK_SUM,
                offset: trailer.start,
                reason: "checksum must be three digits",
            },
        )?;
        if self.config.validate_checksum {
            let calculated = calculate_checksum(&input[start..body_end]);
            if calculated != declared {
                return Err(DecodeError::ChecksumMismatch {
                    calculated,
                    declared,
                });
            }
        }

        msg.set_wire(
            self.input.slice(start..head.body_start()),
            self.input.slice(head.body_start()..body_end),
            declared,
        );
        if self.config.validate_on_decode {
            validate_required(msg)?;
        }
        Ok(trailer.end)
    }

    fn value_of(&self, field: &RawField) -> Bytes {
        self.input.slice(field.value_start..field.value_end)
    }
}

/// Returns the total length of the first message in `buf`.
///
/// Only the header is parsed; the body and trailer are not checked. Used to
/// split a byte stream into whole messages before decoding them.
///
/// # Returns
/// `Ok(None)` until every byte of the message is present.
///
/// # Errors
/// Returns the header violation if the message can never be framed.
pub fn frame_len(buf: &[u8], config: &CodecConfig) -> Result<Option<usize>, DecodeError> {
    match scan_head(buf, 0, config) {
        Ok(head) => {
            let total = head.body_end() + TRAILER_LEN;
            Ok((buf.len() >= total).then_some(total))
        }
        Err(DecodeError::Incomplete) => Ok(None),
        Err(err) => Err(err),
    }
}

/// Parses BeginString, BodyLength, and MsgType starting at `start`.
fn scan_head(input: &[u8], start: usize, config: &CodecConfig) -> Result<Head, DecodeError> {
    let begin_string = head_field(input, start, start, tags::BEGIN_STRING, config)?;
    if begin_string.value_start == begin_string.value_end {
        return Err(DecodeError::InvalidFieldFormat {
            tag: tags::BEGIN_STRING,
            offset: begin_string.start,
            reason: "empty value",
        });
    }

    let length = head_field(input, start, begin_string.end, tags::BODY_LENGTH, config)?;
    let body_length = parse_unsigned(&input[length.value_start..length.value_end])
        .and_then(|n| usize::try_from(n).ok())
        .ok_or(DecodeError::InvalidFieldFormat {
            tag: tags::BODY_LENGTH,
            offset: length.start,
            reason: "body length is not a byte count",
        })?;
    if body_length > config.max_body_len {
        return Err(DecodeError::BodyTooLarge {
            declared: body_length,
            max: config.max_body_len,
        });
    }

    let msg_type = head_field(input, start, length.end, tags::MSG_TYPE, config)?;
    Ok(Head {
        begin_string,
        body_length,
        msg_type,
    })
}

/// Reads one header field, which must carry `expected` and end within the
/// configured head length.
fn head_field(
    input: &[u8],
    start: usize,
    at: usize,
    expected: u32,
    config: &CodecConfig,
) -> Result<RawField, DecodeError> {
    let limit = start.saturating_add(config.max_head_len);
    let unreadable = DecodeError::MalformedHeader {
        offset: at,
        expected,
        found: 0,
    };

    let field = match read_field(input, at) {
        Err(DecodeError::Incomplete) if input.len() > limit => return Err(unreadable),
        Err(DecodeError::InvalidTag { .. }) => return Err(unreadable),
        other => other?,
    };
    if field.tag != expected {
        return Err(DecodeError::MalformedHeader {
            offset: at,
            expected,
            found: field.tag,
        });
    }
    if field.end > limit {
        return Err(unreadable);
    }
    Ok(field)
}

/// Locates the `tag=value<SOH>` unit starting at `at`.
#[inline]
fn read_field(input: &[u8], at: usize) -> Result<RawField, DecodeError> {
    let rest = input.get(at..).ok_or(DecodeError::Incomplete)?;

    let Some(eq_pos) = memchr(EQUALS, rest) else {
        return if rest.iter().all(u8::is_ascii_digit) {
            Err(DecodeError::Incomplete)
        } else {
            Err(DecodeError::InvalidTag { offset: at })
        };
    };
    let tag = parse_tag(&rest[..eq_pos]).ok_or(DecodeError::InvalidTag { offset: at })?;

    let value_start = at + eq_pos + 1;
    let soh_pos = memchr(SOH, &input[value_start..]).ok_or(DecodeError::Incomplete)?;
    let value_end = value_start + soh_pos;

    Ok(RawField {
        tag,
        start: at,
        value_start,
        value_end,
        end: value_end + 1,
    })
}

/// Parses a positive tag number from ASCII bytes.
///
/// # Returns
/// The parsed tag number, or `None` if it is empty, not decimal, zero, or
/// out of range.
#[inline]
fn parse_tag(bytes: &[u8]) -> Option<u32> {
    if bytes.len() > 10 {
        return None;
    }
    let tag = u32::try_from(parse_unsigned(bytes)?).ok()?;
    (tag != 0).then_some(tag)
}

/// Maps a rejected body field onto the decode error reported for it.
fn body_field_error(err: EncodeError, offset: usize) -> DecodeError {
    match err {
        EncodeError::TooManyFields { capacity } => DecodeError::TooManyFields { offset, capacity },
        EncodeError::ReservedTag { tag } => DecodeError::InvalidFieldFormat {
            tag,
            offset,
            reason: "framing tag inside body",
        },
        EncodeError::InvalidFieldValue { tag, reason } => DecodeError::InvalidFieldFormat {
            tag,
            offset,
            reason,
        },
        EncodeError::BufferOverflow { .. }
        | EncodeError::BufferTooSmall { .. }
        | EncodeError::Invalid(_) => DecodeError::InvalidFieldFormat {
            tag: 0,
            offset,
            reason: "field rejected",
        },
    }
}
