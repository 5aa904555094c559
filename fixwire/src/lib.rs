/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # fixwire
//!
//! A bounded-memory FIX tag=value message codec for Rust.
//!
//! fixwire turns a byte stream into typed, validated messages and turns
//! messages back into wire bytes with a correct BodyLength prefix and CheckSum
//! trailer. Session sequencing, retransmission, and connection management are
//! left to the caller.
//!
//! ## Features
//!
//! - **Zero-copy parsing**: Field values reference the original buffer
//! - **Bounded storage**: Body fields live in a fixed-capacity array
//! - **Typed fields**: Integer, float, char, string, and checksum values
//! - **Fail-fast validation**: Every violation is classified and located
//! - **Stream framing**: A `tokio-util` codec splits byte streams into messages
//!
//! ## Quick Start
//!
//! ```rust
//! use fixwire::prelude::*;
//!
//! let mut msg: Message = session_message("FIX.4.4", MsgType::Logon, "CLIENT", "SERVER", 1);
//! msg.add_field(Field::int(tags::ENCRYPT_METHOD, 0)).unwrap();
//! msg.add_field(Field::int(tags::HEART_BT_INT, 30)).unwrap();
//!
//! let wire = Encoder::new().encode(&mut msg).unwrap();
//! let decoded: Message = Decoder::new(wire).decode().unwrap();
//!
//! assert!(decoded.type_is(&MsgType::Logon));
//! assert_eq!(decoded.get_int(tags::HEART_BT_INT), Some(30));
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`]: Field model, message container, errors, and configuration
//! - [`tagvalue`]: Zero-copy tag=value parsing, serialization, and validation
//! - [`transport`]: Send interface and stream framing codec

pub mod core {
    //! Field model, message container, errors, and configuration.
    pub use fixwire_core::*;
}

pub mod tagvalue {
    //! Zero-copy tag=value parsing, serialization, and validation.
    pub use fixwire_tagvalue::*;
}

pub mod transport {
    //! Send interface and stream framing codec.
    pub use fixwire_transport::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    // Core types
    pub use fixwire_core::tags;
    pub use fixwire_core::{
        Attribute, CodecConfig, DecodeError, EncodeError, Field, FieldKind, FieldValue, FixError,
        Message, MsgType, Result, SOH, Timestamp, ValidationError,
    };

    // Tag-value encoding
    pub use fixwire_tagvalue::{
        Decoder, Encoder, calculate_checksum, get_string, session_message, validate,
    };

    // Transport
    pub use fixwire_transport::{CodecError, FixCodec, SendError, Transport, send_message};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_imports() {
        let _config = CodecConfig::default();
        let _ts = Timestamp::now();
        let _codec: FixCodec = FixCodec::new();
        assert_eq!(calculate_checksum(b"1=A\x01"), 176);
    }

    #[test]
    fn test_fix_error_conversions() {
        let err: FixError = DecodeError::Incomplete.into();
        assert!(matches!(err, FixError::Decode(_)));

        let err: FixError = ValidationError::Missing(Attribute::TargetCompId).into();
        assert_eq!(
            err.to_string(),
            "validation error: missing required attribute TargetCompID"
        );
    }

    #[test]
    fn test_logon_roundtrip() -> Result<()> {
        let mut msg: Message =
            session_message("FIX.4.4", MsgType::Logon, "CLIENT", "SERVER", 1);
        msg.set_sending_time(Timestamp::from_millis(0).to_field_value());
        msg.add_field(Field::int(tags::ENCRYPT_METHOD, 0))?;
        msg.add_field(Field::int(tags::HEART_BT_INT, 30))?;
        msg.add_field(Field::char(tags::RESET_SEQ_NUM_FLAG, b'Y'))?;

        let wire = Encoder::new().encode(&mut msg)?;
        let decoded: Message = Decoder::new(wire).decode()?;

        assert_eq!(decoded.sending_time(), Some("19700101-00:00:00.000"));
        assert_eq!(decoded.get_char(tags::RESET_SEQ_NUM_FLAG), Some(b'Y'));
        assert_eq!(decoded.to_string(), msg.to_string());
        validate(&decoded)?;

        let mut buf = [0u8; 8];
        let heart_bt_int = decoded.get_field(tags::HEART_BT_INT).unwrap();
        assert_eq!(get_string(heart_bt_int, &mut buf), Ok("30"));
        Ok(())
    }
}
