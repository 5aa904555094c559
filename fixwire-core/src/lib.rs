/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # fixwire Core
//!
//! Core types, the field model, and the message container for the fixwire
//! FIX tag=value codec.
//!
//! This crate provides the building blocks used by the codec crates:
//! - **Error types**: Unified error handling with `thiserror`
//! - **Field model**: `FieldKind`, `FieldValue`, `Field`, and the tag table
//! - **Message container**: `Message` with fixed-capacity body storage
//! - **Configuration**: `CodecConfig` bounds and checks
//! - **Timestamps**: `Timestamp` for SendingTime values
//!
//! ## Bounded Storage
//!
//! A [`Message`] stores its body fields in an `ArrayVec` whose capacity is a
//! const generic, and its string values as `Bytes` views into the buffer they
//! were decoded from, so the decode path does not allocate per field.

pub mod config;
pub mod error;
pub mod field;
pub mod message;
pub mod tags;
pub mod types;

pub use config::CodecConfig;
pub use error::{DecodeError, EncodeError, FixError, Result, ValidationError};
pub use field::{Field, FieldKind, FieldValue, SOH};
pub use message::{Attribute, DEFAULT_MAX_FIELDS, InvalidMsgType, MAX_SEQ_NUM, Message, MsgType};
pub use types::Timestamp;
