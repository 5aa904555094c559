/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Message send interface.
//!
//! [`send_message`] serializes a message and hands the bytes to a
//! [`Transport`] in a single call. Whatever the transport returns, bytes
//! written or its own error, is passed back unchanged; there is no retry and
//! no handling of partial writes.

use bytes::Bytes;
use fixwire_core::error::EncodeError;
use fixwire_core::message::Message;
use fixwire_tagvalue::encoder::Encoder;
use socket2::SockRef;
use std::convert::Infallible;
use std::ffi::c_int;
use std::net::TcpStream;
use thiserror::Error;
use tracing::{trace, warn};

/// A byte sink that accepts one encoded message per call.
pub trait Transport {
    /// Per-call options understood by the transport.
    type Flags;
    /// Error reported by the transport.
    type Error;

    /// Writes `buf` once.
    ///
    /// # Returns
    /// The number of bytes written, which may be less than `buf.len()`.
    ///
    /// # Errors
    /// Returns the transport's own error.
    fn send(&mut self, buf: &[u8], flags: Self::Flags) -> Result<usize, Self::Error>;
}

/// Flags are the raw `send(2)` flags of the platform, `0` for none.
impl Transport for TcpStream {
    type Flags = c_int;
    type Error = std::io::Error;

    fn send(&mut self, buf: &[u8], flags: c_int) -> Result<usize, Self::Error> {
        let written = SockRef::from(&*self).send_with_flags(buf, flags)?;
        if written < buf.len() {
            warn!(written, len = buf.len(), "short write");
        }
        Ok(written)
    }
}

/// In-memory sink; every call appends the whole buffer.
impl Transport for Vec<u8> {
    type Flags = ();
    type Error = Infallible;

    fn send(&mut self, buf: &[u8], _flags: ()) -> Result<usize, Self::Error> {
        self.extend_from_slice(buf);
        Ok(buf.len())
    }
}

/// Errors returned by [`send_message`].
#[derive(Debug, Error)]
pub enum SendError<E> {
    /// The message could not be serialized; nothing was sent.
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),

    /// The transport rejected the write.
    #[error("transport error: {0}")]
    Transport(#[source] E),
}

/// Serializes `msg` and forwards the bytes to `transport`.
///
/// The message is validated before it is encoded.
///
/// # Arguments
/// * `msg` - The message; its spans describe the sent bytes on success
/// * `encoder` - The serializer
/// * `transport` - Destination of the encoded bytes
/// * `flags` - Passed through to [`Transport::send`]
///
/// # Returns
/// The transport's byte count.
///
/// # Errors
/// - [`SendError::Encode`] if validation or serialization fails
/// - [`SendError::Transport`] with the transport's error, unmodified
pub fn send_message<const N: usize, T: Transport>(
    msg: &mut Message<N>,
    encoder: &mut Encoder,
    transport: &mut T,
    flags: T::Flags,
) -> Result<usize, SendError<T::Error>> {
    let wire: Bytes = encoder.encode(msg)?;
    let written = transport.send(&wire, flags).map_err(SendError::Transport)?;
    trace!(len = wire.len(), written, "sent message");
    Ok(written)
}
