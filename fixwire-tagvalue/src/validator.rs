/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Structural message validation.
//!
//! These checks hold in both directions: the decoder runs them after parsing
//! and the encoder before serializing.

use crate::checksum::calculate_checksum_parts;
use fixwire_core::error::ValidationError;
use fixwire_core::message::{Attribute, Message};

/// Validates a message's attributes and, when present, its wire spans.
///
/// Checks, in order: the required header attributes; BodyLength and CheckSum
/// once the message carries the spans of a parse or serialize pass; BodyLength
/// against the body span; CheckSum against the head and body spans.
///
/// # Errors
/// Returns the first [`ValidationError`], naming the failing attribute.
pub fn validate<const N: usize>(msg: &Message<N>) -> Result<(), ValidationError> {
    validate_required(msg)?;

    let (Some(head), Some(body)) = (msg.head(), msg.body()) else {
        return Ok(());
    };

    let declared = msg
        .body_length()
        .ok_or(ValidationError::Missing(Attribute::BodyLength))?;
    if declared != body.len() {
        return Err(ValidationError::BodyLengthMismatch {
            declared,
            actual: body.len(),
        });
    }

    let declared = msg
        .check_sum()
        .ok_or(ValidationError::Missing(Attribute::CheckSum))?;
    let calculated = calculate_checksum_parts([&head[..], &body[..]]);
    if declared != calculated {
        return Err(ValidationError::CheckSumMismatch {
            declared,
            calculated,
        });
    }
    Ok(())
}

/// Checks attribute presence and the MsgSeqNum range only.
///
/// # Errors
/// Returns [`ValidationError::Missing`] for the first absent attribute, or
/// [`ValidationError::OutOfRange`] for a MsgSeqNum the wire cannot carry.
pub fn validate_required<const N: usize>(msg: &Message<N>) -> Result<(), ValidationError> {
    msg.check_required()?;
    if msg.has_wire() {
        for attribute in [Attribute::BodyLength, Attribute::CheckSum] {
            if !msg.has_attribute(attribute) {
                return Err(ValidationError::Missing(attribute));
            }
        }
    }
    Ok(())
}
