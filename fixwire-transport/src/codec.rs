/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Tokio codec for FIX message framing.
//!
//! This module provides a codec that splits a byte stream into whole FIX
//! messages using the BodyLength header, then decodes each frame into a
//! [`Message`].

use bytes::{BufMut, Bytes, BytesMut};
use fixwire_core::config::CodecConfig;
use fixwire_core::error::{DecodeError, EncodeError};
use fixwire_core::message::{DEFAULT_MAX_FIELDS, Message};
use fixwire_tagvalue::decoder::{Decoder as MessageDecoder, frame_len};
use fixwire_tagvalue::encoder::Encoder as MessageEncoder;
use thiserror::Error;
use tokio_util::codec::{Decoder, Encoder};
use tracing::trace;

/// Errors that can occur during codec operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// A frame could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// A message could not be encoded.
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),

    /// I/O error.
    #[error("io error: {0}")]
    Io(String),
}

impl From<std::io::Error> for CodecError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Tokio codec for FIX message framing.
///
/// Decoding yields one [`Message`] per frame and `None` while a frame is
/// incomplete. A frame whose header can never be valid is an error; the
/// stream is not resynchronized.
#[derive(Debug)]
pub struct FixCodec<const N: usize = DEFAULT_MAX_FIELDS> {
    /// Bounds and checks shared by both directions.
    config: CodecConfig,
    /// Serializer with its reusable body buffer.
    encoder: MessageEncoder,
}

impl<const N: usize> FixCodec<N> {
    /// Creates a new codec with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(CodecConfig::default())
    }

    /// Creates a new codec with the given bounds and checks.
    #[must_use]
    pub fn with_config(config: CodecConfig) -> Self {
        Self {
            config,
            encoder: MessageEncoder::with_config(config),
        }
    }

    /// Returns the codec configuration.
    #[must_use]
    pub const fn config(&self) -> &CodecConfig {
        &self.config
    }
}

impl<const N: usize> Default for FixCodec<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Decoder for FixCodec<N> {
    type Item = Message<N>;
    type Error = CodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let Some(len) = frame_len(src, &self.config)? else {
            return Ok(None);
        };

        let frame = src.split_to(len).freeze();
        trace!(len, buffered = src.len(), "framed message");
        let msg: Message<N> = MessageDecoder::new(frame).with_config(self.config).decode()?;
        Ok(Some(msg))
    }
}

impl<const N: usize> Encoder<Message<N>> for FixCodec<N> {
    type Error = CodecError;

    fn encode(&mut self, mut item: Message<N>, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let wire = self.encoder.encode(&mut item)?;
        dst.reserve(wire.len());
        dst.put_slice(&wire);
        Ok(())
    }
}

impl<const N: usize> Encoder<Bytes> for FixCodec<N> {
    type Error = CodecError;

    fn encode(&mut self, item: Bytes, dst: &mut BytesMut) -> Result<(), Self::Error> {
        dst.reserve(item.len());
        dst.put_slice(&item);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixwire_core::field::Field;
    use fixwire_core::message::MsgType;
    use fixwire_core::tags;
    use fixwire_tagvalue::checksum::calculate_checksum;
    use fixwire_tagvalue::encoder::session_message;

    fn make_fix_message(msg_type: &str, body: &str) -> Vec<u8> {
        let header = format!("8=FIX.4.4\x019={}\x0135={}\x01", body.len(), msg_type);
        let without_checksum = format!("{}{}", header, body);
        let checksum = calculate_checksum(without_checksum.as_bytes());
        format!("{}10={:03}\x01", without_checksum, checksum).into_bytes()
    }

    const SESSION: &str = "49=SENDER\x0156=TARGET\x0134=7\x01";

    #[test]
    fn test_codec_decode_complete_message() {
        let mut codec: FixCodec = FixCodec::new();
        let msg = make_fix_message("0", SESSION);
        let mut buf = BytesMut::from(&msg[..]);

        let decoded = codec.decode(&mut buf).unwrap().unwrap();
        assert!(decoded.type_is(&MsgType::Heartbeat));
        assert_eq!(decoded.msg_seq_num(), Some(7));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_codec_decode_incomplete() {
        let mut codec: FixCodec = FixCodec::new();
        let msg = make_fix_message("0", SESSION);
        let mut buf = BytesMut::from(&msg[..msg.len() - 5]);

        assert!(codec.decode(&mut buf).unwrap().is_none());
        assert_eq!(buf.len(), msg.len() - 5);

        buf.extend_from_slice(&msg[msg.len() - 5..]);
        assert!(codec.decode(&mut buf).unwrap().is_some());
    }

    #[test]
    fn test_codec_decode_two_messages() {
        let mut codec: FixCodec<8> = FixCodec::new();
        let mut buf = BytesMut::from(&make_fix_message("0", SESSION)[..]);
        buf.extend_from_slice(&make_fix_message("1", &format!("{SESSION}112=T1\x01")));

        let first = codec.decode(&mut buf).unwrap().unwrap();
        let second = codec.decode(&mut buf).unwrap().unwrap();
        assert!(first.type_is(&MsgType::Heartbeat));
        assert_eq!(second.get_str(tags::TEST_REQ_ID), Some("T1"));
        assert!(codec.decode(&mut buf).unwrap().is_none());
    }

    #[test]
    fn test_codec_decode_invalid_begin_string() {
        let mut codec: FixCodec = FixCodec::new();
        let mut buf = BytesMut::from(&b"9=FIX.4.4\x019=5\x0135=0\x0110=000\x01"[..]);

        let result = codec.decode(&mut buf);
        assert!(matches!(
            result,
            Err(CodecError::Decode(DecodeError::MalformedHeader { expected: 8, .. }))
        ));
    }

    #[test]
    fn test_codec_decode_checksum_mismatch() {
        let mut codec: FixCodec = FixCodec::new();
        let mut buf = BytesMut::from(&b"8=FIX.4.4\x019=5\x0135=0\x0149=A\x0110=000\x01"[..]);

        let result = codec.decode(&mut buf);
        assert!(matches!(
            result,
            Err(CodecError::Decode(DecodeError::ChecksumMismatch { .. }))
        ));
    }

    #[test]
    fn test_codec_decode_no_checksum_validation() {
        let config = CodecConfig::default()
            .with_checksum_validation(false)
            .with_decode_validation(false);
        let mut codec: FixCodec = FixCodec::with_config(config);
        let mut buf = BytesMut::from(&b"8=FIX.4.4\x019=5\x0135=0\x0149=A\x0110=000\x01"[..]);

        let decoded = codec.decode(&mut buf).unwrap().unwrap();
        assert_eq!(decoded.sender_comp_id(), Some("A"));
    }

    #[test]
    fn test_codec_encode_message() {
        let mut codec: FixCodec<4> = FixCodec::new();
        let mut msg: Message<4> =
            session_message("FIX.4.4", MsgType::TestRequest, "SENDER", "TARGET", 3);
        msg.add_field(Field::string(tags::TEST_REQ_ID, "PING")).unwrap();

        let mut dst = BytesMut::new();
        codec.encode(msg, &mut dst).unwrap();

        let decoded = codec.decode(&mut dst).unwrap().unwrap();
        assert!(decoded.type_is(&MsgType::TestRequest));
        assert_eq!(decoded.get_str(tags::TEST_REQ_ID), Some("PING"));
        assert!(dst.is_empty());
    }

    #[test]
    fn test_codec_encode_invalid_message() {
        let mut codec: FixCodec<4> = FixCodec::new();
        let msg: Message<4> = Message::new();
        let mut dst = BytesMut::new();

        assert!(matches!(
            codec.encode(msg, &mut dst),
            Err(CodecError::Encode(EncodeError::Invalid(_)))
        ));
        assert!(dst.is_empty());
    }

    #[test]
    fn test_codec_encode_bytes() {
        let mut codec: FixCodec = FixCodec::new();
        let msg = Bytes::from_static(b"8=FIX.4.4\x019=5\x0135=0\x0110=123\x01");
        let mut dst = BytesMut::new();

        codec.encode(msg.clone(), &mut dst).unwrap();
        assert_eq!(&dst[..], &msg[..]);
    }
}
