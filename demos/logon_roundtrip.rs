//! Exchanges a Logon over a loopback TCP connection.
//!
//! The acceptor thread frames inbound bytes with `FixCodec` and answers with
//! its own Logon; the initiator sends with `send_message` and waits for it.

use anyhow::{Context, anyhow, ensure};
use bytes::BytesMut;
use fixwire::prelude::*;
use std::net::{TcpListener, TcpStream};
use std::thread;
use tracing::info;

mod common;
use common::{DemoConfig, init_logging, printable, read_message};

fn acceptor(listener: TcpListener, cfg: DemoConfig) -> anyhow::Result<()> {
    let (mut stream, peer) = listener.accept().context("accepting initiator")?;
    info!(%peer, "acceptor connected");

    let mut codec: FixCodec = FixCodec::with_config(cfg.codec);
    let mut buf = BytesMut::with_capacity(cfg.codec.max_message_size());
    let logon = read_message(&mut stream, &mut codec, &mut buf)?;
    ensure!(logon.type_is(&MsgType::Logon), "expected Logon, got {}", logon);
    info!("acceptor received {}", logon);

    let mut reply = cfg.message(MsgType::Logon, 1);
    reply.add_field(Field::int(tags::ENCRYPT_METHOD, 0))?;
    let heart_bt_int = logon.get_int(tags::HEART_BT_INT).unwrap_or(cfg.heartbeat_interval);
    reply.add_field(Field::int(tags::HEART_BT_INT, heart_bt_int))?;

    let mut encoder = Encoder::with_config(cfg.codec);
    send_message(&mut reply, &mut encoder, &mut stream, 0)?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cfg = DemoConfig::from_env();

    let listener = TcpListener::bind("127.0.0.1:0").context("binding acceptor")?;
    let addr = listener.local_addr()?;
    let server_cfg = cfg.reversed();
    let server = thread::spawn(move || acceptor(listener, server_cfg));

    let mut stream = TcpStream::connect(addr).context("connecting to acceptor")?;
    let mut logon = cfg.message(MsgType::Logon, 1);
    logon.add_field(Field::int(tags::ENCRYPT_METHOD, 0))?;
    logon.add_field(Field::int(tags::HEART_BT_INT, cfg.heartbeat_interval))?;
    logon.add_field(Field::char(tags::RESET_SEQ_NUM_FLAG, b'Y'))?;

    let mut encoder = Encoder::with_config(cfg.codec);
    let written = send_message(&mut logon, &mut encoder, &mut stream, 0)?;
    if let (Some(head), Some(body)) = (logon.head(), logon.body()) {
        info!(written, "initiator sent {}{}", printable(head), printable(body));
    }

    let mut codec: FixCodec = FixCodec::with_config(cfg.codec);
    let mut buf = BytesMut::new();
    let reply = read_message(&mut stream, &mut codec, &mut buf)?;
    validate(&reply)?;
    info!(
        sender = reply.sender_comp_id(),
        heart_bt_int = reply.get_int(tags::HEART_BT_INT),
        "initiator received {}",
        reply
    );

    server
        .join()
        .map_err(|_| anyhow!("acceptor thread panicked"))??;
    Ok(())
}
