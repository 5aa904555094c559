/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # fixwire Tag-Value
//!
//! Zero-copy FIX tag=value parsing and serialization.
//!
//! ## Features
//!
//! - **Zero-copy parsing**: String values and the retained head/body spans are
//!   `Bytes` slices of the input buffer
//! - **SIMD-accelerated**: Uses `memchr` for delimiter search
//! - **Bounded**: Head and body sizes are capped by [`CodecConfig`]
//! - **Validation**: Header order, trailer position, BodyLength, and CheckSum
//!
//! ## Example
//!
//! ```
//! use fixwire_core::{Message, MsgType};
//! use fixwire_tagvalue::{Decoder, Encoder, session_message};
//!
//! let mut msg: Message = session_message("FIX.4.4", MsgType::Heartbeat, "SENDER", "TARGET", 1);
//! let wire = Encoder::new().encode(&mut msg).unwrap();
//!
//! let decoded: Message = Decoder::new(wire).decode().unwrap();
//! assert!(decoded.type_is(&MsgType::Heartbeat));
//! ```
//!
//! [`CodecConfig`]: fixwire_core::CodecConfig

pub mod accessor;
pub mod checksum;
pub mod decoder;
pub mod encoder;
pub mod field;
pub mod validator;

pub use accessor::{get_string, get_tag_string};
pub use checksum::{calculate_checksum, format_checksum, parse_checksum};
pub use decoder::{Decoder, frame_len};
pub use encoder::{Encoder, session_message};
pub use field::{decode_field, encode_field};
pub use validator::{validate, validate_required};
