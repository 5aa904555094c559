/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # fixwire Transport
//!
//! The seams between the codec and the network.
//!
//! This crate provides:
//! - **Send interface**: [`Transport`] and [`send_message`], one verbatim write
//!   per message
//! - **Codec**: Tokio codec for FIX message framing over a byte stream

pub mod codec;
pub mod send;

pub use codec::{CodecError, FixCodec};
pub use send::{SendError, Transport, send_message};
