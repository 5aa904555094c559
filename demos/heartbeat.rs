//! Builds a Heartbeat, serializes it, and parses it back.

use anyhow::Context;
use fixwire::prelude::*;
use tracing::info;

mod common;
use common::{DemoConfig, init_logging, printable};

fn main() -> anyhow::Result<()> {
    init_logging();
    let cfg = DemoConfig::from_env();

    let mut msg = cfg.message(MsgType::Heartbeat, 2);
    msg.add_field(Field::string(tags::TEST_REQ_ID, "TEST-1"))
        .context("adding TestReqID")?;

    let mut encoder = Encoder::with_config(cfg.codec);
    let wire = encoder.encode(&mut msg)?;
    info!(
        body_length = msg.body_length(),
        check_sum = msg.check_sum(),
        "encoded {}",
        printable(&wire)
    );

    let decoded: Message = Decoder::new(wire).with_config(cfg.codec).decode()?;
    validate(&decoded)?;
    info!(
        sender = decoded.sender_comp_id(),
        seq = decoded.msg_seq_num(),
        "decoded {}",
        decoded
    );

    let mut text = [0u8; 32];
    if let Some(field) = decoded.get_field(tags::TEST_REQ_ID) {
        info!("TestReqID = {}", get_string(field, &mut text)?);
    }
    Ok(())
}
