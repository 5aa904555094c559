//! Common utilities shared across demos.

#![allow(dead_code)]

use anyhow::{Context, bail};
use bytes::BytesMut;
use fixwire::prelude::*;
use std::env;
use std::io::Read;
use std::net::TcpStream;
use tokio_util::codec::Decoder as _;

/// Default FIX version.
pub const DEFAULT_BEGIN_STRING: &str = "FIX.4.4";

/// Demo configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    /// BeginString written on every message.
    pub begin_string: String,
    /// Sender CompID.
    pub sender_comp_id: String,
    /// Target CompID.
    pub target_comp_id: String,
    /// Heartbeat interval in seconds.
    pub heartbeat_interval: i64,
    /// Codec bounds.
    pub codec: CodecConfig,
}

impl DemoConfig {
    /// Reads `FIXWIRE_BEGIN_STRING`, `FIXWIRE_SENDER`, `FIXWIRE_TARGET`, and
    /// `FIXWIRE_MAX_BODY_LEN`, falling back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let max_body_len = env::var("FIXWIRE_MAX_BODY_LEN")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(CodecConfig::default().max_body_len);
        Self {
            begin_string: env::var("FIXWIRE_BEGIN_STRING")
                .unwrap_or_else(|_| DEFAULT_BEGIN_STRING.to_string()),
            sender_comp_id: env::var("FIXWIRE_SENDER").unwrap_or_else(|_| "CLIENT".to_string()),
            target_comp_id: env::var("FIXWIRE_TARGET").unwrap_or_else(|_| "SERVER".to_string()),
            heartbeat_interval: 30,
            codec: CodecConfig::default().with_max_body_len(max_body_len),
        }
    }

    /// Builds a message from this side of the session, stamped with the
    /// current time.
    #[must_use]
    pub fn message(&self, msg_type: MsgType, seq_num: u64) -> Message {
        let mut msg = session_message(
            self.begin_string.clone(),
            msg_type,
            self.sender_comp_id.clone(),
            self.target_comp_id.clone(),
            seq_num,
        );
        msg.set_sending_time(Timestamp::now().to_field_value());
        msg
    }

    /// Returns the configuration seen from the counterparty.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            sender_comp_id: self.target_comp_id.clone(),
            target_comp_id: self.sender_comp_id.clone(),
            ..self.clone()
        }
    }
}

/// Initializes logging for demos.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .try_init();
}

/// Renders wire bytes with `|` in place of SOH.
#[must_use]
pub fn printable(wire: &[u8]) -> String {
    wire.iter()
        .map(|&b| if b == SOH { '|' } else { char::from(b) })
        .collect()
}

/// Reads from `stream` until `codec` yields a whole message.
pub fn read_message(
    stream: &mut TcpStream,
    codec: &mut FixCodec,
    buf: &mut BytesMut,
) -> anyhow::Result<Message> {
    let mut chunk = [0u8; 1024];
    loop {
        if let Some(msg) = codec.decode(buf).context("decoding inbound message")? {
            return Ok(msg);
        }
        let n = stream.read(&mut chunk).context("reading socket")?;
        if n == 0 {
            bail!("connection closed with {} bytes buffered", buf.len());
        }
        buf.extend_from_slice(&chunk[..n]);
    }
}
