/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Message types and the bounded message container.
//!
//! This module provides:
//! - [`MsgType`]: Session-level message type classification
//! - [`Attribute`]: The header/trailer attributes a message materializes
//! - [`Message`]: Header attributes plus a fixed-capacity body field sequence
//!
//! ## Layout
//!
//! BeginString, BodyLength, MsgType, SenderCompID, TargetCompID, MsgSeqNum,
//! SendingTime, and CheckSum live in dedicated slots and are never stored in the
//! body sequence. All other fields keep their wire/insertion order in an
//! [`ArrayVec`] sized by the `N` const parameter, so appending never allocates.

use crate::error::{EncodeError, ValidationError};
use crate::field::{Field, FieldValue};
use crate::tags;
use arrayvec::{ArrayString, ArrayVec};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use thiserror::Error;

/// Default capacity of a message's body field sequence.
pub const DEFAULT_MAX_FIELDS: usize = 32;

/// Largest MsgSeqNum that fits the Int wire kind.
pub const MAX_SEQ_NUM: u64 = i64::MAX as u64;

/// Longest MsgType code accepted.
pub const MSG_TYPE_MAX_LEN: usize = 8;

/// Error returned when a MsgType code is empty, too long, or not ASCII.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("invalid msg type")]
pub struct InvalidMsgType;

/// FIX message types classified by the codec.
///
/// Only the session-level types are named; every other code is carried
/// verbatim in [`MsgType::Other`] for the application to interpret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MsgType {
    /// Heartbeat (0).
    #[default]
    Heartbeat,
    /// Test Request (1).
    TestRequest,
    /// Resend Request (2).
    ResendRequest,
    /// Reject (3).
    Reject,
    /// Sequence Reset (4).
    SequenceReset,
    /// Logout (5).
    Logout,
    /// Logon (A).
    Logon,
    /// Any other message type code.
    Other(ArrayString<MSG_TYPE_MAX_LEN>),
}

impl MsgType {
    /// Parses a MsgType from its wire bytes.
    ///
    /// # Errors
    /// Returns [`InvalidMsgType`] if the code is empty, longer than
    /// [`MSG_TYPE_MAX_LEN`], or not ASCII.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, InvalidMsgType> {
        Ok(match bytes {
            b"0" => Self::Heartbeat,
            b"1" => Self::TestRequest,
            b"2" => Self::ResendRequest,
            b"3" => Self::Reject,
            b"4" => Self::SequenceReset,
            b"5" => Self::Logout,
            b"A" => Self::Logon,
            other => {
                if other.is_empty() || !other.iter().all(u8::is_ascii_graphic) {
                    return Err(InvalidMsgType);
                }
                let code = std::str::from_utf8(other).map_err(|_| InvalidMsgType)?;
                Self::Other(ArrayString::from(code).map_err(|_| InvalidMsgType)?)
            }
        })
    }

    /// Returns the wire code of this message type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Heartbeat => "0",
            Self::TestRequest => "1",
            Self::ResendRequest => "2",
            Self::Reject => "3",
            Self::SequenceReset => "4",
            Self::Logout => "5",
            Self::Logon => "A",
            Self::Other(code) => code.as_str(),
        }
    }

    /// Returns true if this is a session-level (administrative) message.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    fn to_bytes(self) -> Bytes {
        match self {
            Self::Other(code) => Bytes::copy_from_slice(code.as_bytes()),
            Self::Heartbeat => Bytes::from_static(b"0"),
            Self::TestRequest => Bytes::from_static(b"1"),
            Self::ResendRequest => Bytes::from_static(b"2"),
            Self::Reject => Bytes::from_static(b"3"),
            Self::SequenceReset => Bytes::from_static(b"4"),
            Self::Logout => Bytes::from_static(b"5"),
            Self::Logon => Bytes::from_static(b"A"),
        }
    }
}

impl std::str::FromStr for MsgType {
    type Err = InvalidMsgType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bytes(s.as_bytes())
    }
}

impl fmt::Display for MsgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Header and trailer attributes materialized on every [`Message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
    /// BeginString (8).
    BeginString,
    /// BodyLength (9).
    BodyLength,
    /// MsgType (35).
    MsgType,
    /// SenderCompID (49).
    SenderCompId,
    /// TargetCompID (56).
    TargetCompId,
    /// MsgSeqNum (34).
    MsgSeqNum,
    /// SendingTime (52).
    SendingTime,
    /// CheckSum (10).
    CheckSum,
}

impl Attribute {
    /// Returns the tag number of this attribute.
    #[must_use]
    pub const fn tag(&self) -> u32 {
        match self {
            Self::BeginString => tags::BEGIN_STRING,
            Self::BodyLength => tags::BODY_LENGTH,
            Self::MsgType => tags::MSG_TYPE,
            Self::SenderCompId => tags::SENDER_COMP_ID,
            Self::TargetCompId => tags::TARGET_COMP_ID,
            Self::MsgSeqNum => tags::MSG_SEQ_NUM,
            Self::SendingTime => tags::SENDING_TIME,
            Self::CheckSum => tags::CHECK_SUM,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(tags::name_of(self.tag()).unwrap_or("Unknown"))
    }
}

/// A single FIX message.
///
/// A message is either built by the caller with the setters and
/// [`add_field`](Self::add_field) and then serialized, or populated by the
/// decoder. Both passes record the `head` (BeginString through MsgType) and
/// `body` (everything up to the CheckSum tag) byte spans as [`Bytes`] views of
/// the buffer they produced or read; any later mutation drops them, together
/// with BodyLength and CheckSum, since they no longer describe the message.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Message<const N: usize = DEFAULT_MAX_FIELDS> {
    begin_string: Option<Bytes>,
    body_length: Option<usize>,
    msg_type: Option<MsgType>,
    sender_comp_id: Option<Bytes>,
    target_comp_id: Option<Bytes>,
    msg_seq_num: Option<u64>,
    sending_time: Option<Bytes>,
    check_sum: Option<u8>,
    head: Option<Bytes>,
    body: Option<Bytes>,
    fields: ArrayVec<Field, N>,
}

impl<const N: usize> Message<N> {
    /// Creates an empty message.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            begin_string: None,
            body_length: None,
            msg_type: None,
            sender_comp_id: None,
            target_comp_id: None,
            msg_seq_num: None,
            sending_time: None,
            check_sum: None,
            head: None,
            body: None,
            fields: ArrayVec::new_const(),
        }
    }

    /// Appends a field.
    ///
    /// SenderCompID, TargetCompID, MsgSeqNum, and SendingTime are stored in
    /// their attribute slots, replacing any earlier value. Every other field is
    /// appended to the body sequence.
    ///
    /// # Errors
    /// - [`EncodeError::TooManyFields`] if the body sequence is full; the
    ///   existing fields are left untouched.
    /// - [`EncodeError::ReservedTag`] for BeginString, BodyLength, MsgType,
    ///   and CheckSum, which are written by the serializer.
    /// - [`EncodeError::InvalidFieldValue`] if the tag is zero, the value kind
    ///   differs from the tag table, or the value cannot be put on the wire.
    pub fn add_field(&mut self, field: Field) -> Result<(), EncodeError> {
        let tag = field.tag();
        if tag == 0 {
            return Err(EncodeError::InvalidFieldValue {
                tag,
                reason: "tag must be positive",
            });
        }
        if tags::is_framing(tag) {
            return Err(EncodeError::ReservedTag { tag });
        }
        if field.kind() != tags::kind_of(tag) {
            return Err(EncodeError::InvalidFieldValue {
                tag,
                reason: "value kind does not match tag",
            });
        }
        field
            .value()
            .check_wire()
            .map_err(|reason| EncodeError::InvalidFieldValue { tag, reason })?;

        match (tag, field.value()) {
            (tags::SENDER_COMP_ID, FieldValue::String(v)) => {
                self.sender_comp_id = Some(v.clone());
            }
            (tags::TARGET_COMP_ID, FieldValue::String(v)) => {
                self.target_comp_id = Some(v.clone());
            }
            (tags::SENDING_TIME, FieldValue::String(v)) => {
                self.sending_time = Some(v.clone());
            }
            (tags::MSG_SEQ_NUM, FieldValue::Int(v)) => {
                let seq = u64::try_from(*v).map_err(|_| EncodeError::InvalidFieldValue {
                    tag,
                    reason: "sequence number is negative",
                })?;
                self.msg_seq_num = Some(seq);
            }
            _ => {
                self.fields
                    .try_push(field)
                    .map_err(|_| EncodeError::TooManyFields { capacity: N })?;
            }
        }
        self.invalidate_wire();
        Ok(())
    }

    /// Looks up a tag, checking the attribute slots before the body sequence.
    ///
    /// Attributes are returned as owned fields built from their slot; body
    /// fields are borrowed. Returns the first body field when a tag repeats.
    #[must_use]
    pub fn has_tag(&self, tag: u32) -> Option<Cow<'_, Field>> {
        if let Some(field) = self.attribute_field(tag) {
            return Some(Cow::Owned(field));
        }
        self.get_field(tag).map(Cow::Borrowed)
    }

    /// Returns true if the message type equals `expected`.
    #[inline]
    #[must_use]
    pub fn type_is(&self, expected: &MsgType) -> bool {
        self.msg_type.as_ref() == Some(expected)
    }

    /// Gets the first body field with the given tag.
    #[must_use]
    pub fn get_field(&self, tag: u32) -> Option<&Field> {
        self.fields.iter().find(|f| f.tag() == tag)
    }

    /// Gets a text value by tag, including the string attributes.
    #[must_use]
    pub fn get_str(&self, tag: u32) -> Option<&str> {
        match tag {
            tags::BEGIN_STRING => self.begin_string(),
            tags::MSG_TYPE => self.msg_type.as_ref().map(MsgType::as_str),
            tags::SENDER_COMP_ID => self.sender_comp_id(),
            tags::TARGET_COMP_ID => self.target_comp_id(),
            tags::SENDING_TIME => self.sending_time(),
            _ => self.get_field(tag).and_then(|f| f.value().as_str()),
        }
    }

    /// Gets an integer value by tag, including BodyLength and MsgSeqNum.
    #[must_use]
    pub fn get_int(&self, tag: u32) -> Option<i64> {
        self.has_tag(tag).and_then(|f| f.value().as_i64())
    }

    /// Gets a float value by tag.
    #[must_use]
    pub fn get_float(&self, tag: u32) -> Option<f64> {
        self.get_field(tag).and_then(|f| f.value().as_f64())
    }

    /// Gets a single character value by tag.
    #[must_use]
    pub fn get_char(&self, tag: u32) -> Option<u8> {
        self.get_field(tag).and_then(|f| f.value().as_char())
    }

    /// Returns an iterator over the body fields in wire order.
    #[inline]
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    /// Returns the number of body fields.
    #[inline]
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Returns the capacity of the body field sequence.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Returns the session attributes that are serialized at the start of the
    /// body, in wire order: SenderCompID, TargetCompID, MsgSeqNum, SendingTime.
    pub fn session_fields(&self) -> impl Iterator<Item = Field> + '_ {
        [
            tags::SENDER_COMP_ID,
            tags::TARGET_COMP_ID,
            tags::MSG_SEQ_NUM,
            tags::SENDING_TIME,
        ]
        .into_iter()
        .filter_map(|tag| self.attribute_field(tag))
    }

    /// Returns the BeginString value.
    #[must_use]
    pub fn begin_string(&self) -> Option<&str> {
        as_str(self.begin_string.as_ref())
    }

    /// Returns the BodyLength recorded by the last parse or serialize pass.
    #[inline]
    #[must_use]
    pub const fn body_length(&self) -> Option<usize> {
        self.body_length
    }

    /// Returns the message type.
    #[inline]
    #[must_use]
    pub const fn msg_type(&self) -> Option<&MsgType> {
        self.msg_type.as_ref()
    }

    /// Returns the SenderCompID value.
    #[must_use]
    pub fn sender_comp_id(&self) -> Option<&str> {
        as_str(self.sender_comp_id.as_ref())
    }

    /// Returns the TargetCompID value.
    #[must_use]
    pub fn target_comp_id(&self) -> Option<&str> {
        as_str(self.target_comp_id.as_ref())
    }

    /// Returns the MsgSeqNum value.
    #[inline]
    #[must_use]
    pub const fn msg_seq_num(&self) -> Option<u64> {
        self.msg_seq_num
    }

    /// Returns the SendingTime value.
    #[must_use]
    pub fn sending_time(&self) -> Option<&str> {
        as_str(self.sending_time.as_ref())
    }

    /// Returns the CheckSum recorded by the last parse or serialize pass.
    #[inline]
    #[must_use]
    pub const fn check_sum(&self) -> Option<u8> {
        self.check_sum
    }

    /// Returns true if `attribute` has a value.
    #[must_use]
    pub const fn has_attribute(&self, attribute: Attribute) -> bool {
        match attribute {
            Attribute::BeginString => self.begin_string.is_some(),
            Attribute::BodyLength => self.body_length.is_some(),
            Attribute::MsgType => self.msg_type.is_some(),
            Attribute::SenderCompId => self.sender_comp_id.is_some(),
            Attribute::TargetCompId => self.target_comp_id.is_some(),
            Attribute::MsgSeqNum => self.msg_seq_num.is_some(),
            Attribute::SendingTime => self.sending_time.is_some(),
            Attribute::CheckSum => self.check_sum.is_some(),
        }
    }

    /// Returns the head span (BeginString through MsgType) of the last pass.
    #[inline]
    #[must_use]
    pub const fn head(&self) -> Option<&Bytes> {
        self.head.as_ref()
    }

    /// Returns the body span (after MsgType, before CheckSum) of the last pass.
    #[inline]
    #[must_use]
    pub const fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Sets the BeginString.
    pub fn set_begin_string(&mut self, value: impl Into<Bytes>) {
        self.begin_string = Some(value.into());
        self.invalidate_wire();
    }

    /// Sets the message type.
    pub fn set_msg_type(&mut self, msg_type: MsgType) {
        self.msg_type = Some(msg_type);
        self.invalidate_wire();
    }

    /// Sets the SenderCompID.
    pub fn set_sender_comp_id(&mut self, value: impl Into<Bytes>) {
        self.sender_comp_id = Some(value.into());
        self.invalidate_wire();
    }

    /// Sets the TargetCompID.
    pub fn set_target_comp_id(&mut self, value: impl Into<Bytes>) {
        self.target_comp_id = Some(value.into());
        self.invalidate_wire();
    }

    /// Sets the MsgSeqNum.
    ///
    /// Values above [`MAX_SEQ_NUM`] are kept but fail validation.
    pub fn set_msg_seq_num(&mut self, seq_num: u64) {
        self.msg_seq_num = Some(seq_num);
        self.invalidate_wire();
    }

    /// Sets the SendingTime.
    pub fn set_sending_time(&mut self, value: impl Into<Bytes>) {
        self.sending_time = Some(value.into());
        self.invalidate_wire();
    }

    /// Records the wire image produced by a parse or serialize pass.
    ///
    /// BodyLength is taken from the body span length.
    ///
    /// # Arguments
    /// * `head` - BeginString, BodyLength, and MsgType fields
    /// * `body` - Every byte after MsgType up to the CheckSum tag
    /// * `check_sum` - The CheckSum carried by (or written to) the trailer
    pub fn set_wire(&mut self, head: Bytes, body: Bytes, check_sum: u8) {
        self.body_length = Some(body.len());
        self.check_sum = Some(check_sum);
        self.head = Some(head);
        self.body = Some(body);
    }

    /// Returns true if the message carries the spans of a parse or serialize pass.
    #[inline]
    #[must_use]
    pub const fn has_wire(&self) -> bool {
        self.head.is_some() && self.body.is_some()
    }

    /// Checks that every header attribute required to serialize is present.
    ///
    /// A text attribute set to an empty value counts as missing.
    ///
    /// # Errors
    /// - [`ValidationError::Missing`] for the first absent attribute
    /// - [`ValidationError::OutOfRange`] if MsgSeqNum exceeds [`MAX_SEQ_NUM`]
    pub fn check_required(&self) -> Result<(), ValidationError> {
        const REQUIRED: [Attribute; 5] = [
            Attribute::BeginString,
            Attribute::MsgType,
            Attribute::SenderCompId,
            Attribute::TargetCompId,
            Attribute::MsgSeqNum,
        ];
        if let Some(missing) = REQUIRED.into_iter().find(|a| !self.is_filled(*a)) {
            return Err(ValidationError::Missing(missing));
        }
        if self.msg_seq_num.is_some_and(|seq| seq > MAX_SEQ_NUM) {
            return Err(ValidationError::OutOfRange(Attribute::MsgSeqNum));
        }
        Ok(())
    }

    /// Resets the message to its empty state, releasing every shared buffer.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    fn is_filled(&self, attribute: Attribute) -> bool {
        let text = match attribute {
            Attribute::BeginString => &self.begin_string,
            Attribute::SenderCompId => &self.sender_comp_id,
            Attribute::TargetCompId => &self.target_comp_id,
            Attribute::SendingTime => &self.sending_time,
            other => return self.has_attribute(other),
        };
        text.as_ref().is_some_and(|v| !v.is_empty())
    }

    fn invalidate_wire(&mut self) {
        self.body_length = None;
        self.check_sum = None;
        self.head = None;
        self.body = None;
    }

    fn attribute_field(&self, tag: u32) -> Option<Field> {
        let value = match tag {
            tags::BEGIN_STRING => FieldValue::String(self.begin_string.clone()?),
            tags::BODY_LENGTH => FieldValue::Int(i64::try_from(self.body_length?).ok()?),
            tags::MSG_TYPE => FieldValue::String(self.msg_type?.to_bytes()),
            tags::SENDER_COMP_ID => FieldValue::String(self.sender_comp_id.clone()?),
            tags::TARGET_COMP_ID => FieldValue::String(self.target_comp_id.clone()?),
            tags::MSG_SEQ_NUM => FieldValue::Int(i64::try_from(self.msg_seq_num?).ok()?),
            tags::SENDING_TIME => FieldValue::String(self.sending_time.clone()?),
            tags::CHECK_SUM => FieldValue::CheckSum(self.check_sum?),
            _ => return None,
        };
        debug_assert_eq!(value.kind(), tags::kind_of(tag));
        Some(Field::new(tag, value))
    }
}

fn as_str(value: Option<&Bytes>) -> Option<&str> {
    value.and_then(|b| std::str::from_utf8(b).ok())
}

impl<const N: usize> fmt::Display for Message<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg_type = self.msg_type.as_ref().map_or("?", MsgType::as_str);
        write!(f, "{}|", msg_type)?;
        for field in self.session_fields() {
            write!(f, "{}|", field)?;
        }
        for field in &self.fields {
            write!(f, "{}|", field)?;
        }
        Ok(())
    }
}
