/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Text rendering of field values into caller-owned buffers.

use crate::field::{Scratch, render};
use fixwire_core::error::EncodeError;
use fixwire_core::field::Field;
use fixwire_core::message::Message;

/// Renders a field's value as text into `out`.
///
/// The value is written exactly as it appears on the wire: integers in
/// minimal decimal form, floats with six decimals, checksums as three digits.
/// The length of `out` is the limit; the value is never truncated.
///
/// # Returns
/// The rendered text, borrowed from `out`.
///
/// # Errors
/// - [`EncodeError::BufferTooSmall`] if the rendering does not fit in `out`
/// - [`EncodeError::InvalidFieldValue`] if the value cannot be rendered or is
///   not valid UTF-8
pub fn get_string<'b>(field: &Field, out: &'b mut [u8]) -> Result<&'b str, EncodeError> {
    let mut scratch = Scratch::default();
    let text = render(field.tag(), field.value(), &mut scratch)?;
    if text.len() > out.len() {
        return Err(EncodeError::BufferTooSmall {
            needed: text.len(),
            limit: out.len(),
        });
    }

    let dst = &mut out[..text.len()];
    dst.copy_from_slice(text);
    std::str::from_utf8(dst).map_err(|_| EncodeError::InvalidFieldValue {
        tag: field.tag(),
        reason: "value is not valid UTF-8",
    })
}

/// Looks up `tag` on a message and renders its value into `out`.
///
/// # Returns
/// `Ok(None)` if the message does not carry the tag.
///
/// # Errors
/// Same as [`get_string`].
pub fn get_tag_string<'b, const N: usize>(
    msg: &Message<N>,
    tag: u32,
    out: &'b mut [u8],
) -> Result<Option<&'b str>, EncodeError> {
    match msg.has_tag(tag) {
        Some(field) => get_string(&field, out).map(Some),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use fixwire_core::field::FieldValue;
    use fixwire_core::message::MsgType;
    use fixwire_core::tags;

    #[test]
    fn test_get_string_kinds() {
        let mut buf = [0u8; 32];
        assert_eq!(get_string(&Field::int(108, -30), &mut buf), Ok("-30"));
        assert_eq!(get_string(&Field::float(44, 0.5), &mut buf), Ok("0.500000"));
        assert_eq!(get_string(&Field::char(54, b'2'), &mut buf), Ok("2"));
        assert_eq!(get_string(&Field::string(58, "hi"), &mut buf), Ok("hi"));
        assert_eq!(
            get_string(&Field::new(10, FieldValue::CheckSum(5)), &mut buf),
            Ok("005")
        );
    }

    #[test]
    fn test_get_string_never_truncates() {
        let mut buf = [0u8; 4];
        let err = get_string(&Field::string(58, "hello"), &mut buf).unwrap_err();
        assert_eq!(err, EncodeError::BufferTooSmall { needed: 5, limit: 4 });
        assert_eq!(buf, [0u8; 4]);

        let mut exact = [0u8; 5];
        assert_eq!(get_string(&Field::string(58, "hello"), &mut exact), Ok("hello"));
    }

    #[test]
    fn test_get_string_invalid_utf8() {
        let mut buf = [0u8; 8];
        let field = Field::string(58, Bytes::from_static(&[0xFF, 0xFE]));
        assert!(matches!(
            get_string(&field, &mut buf),
            Err(EncodeError::InvalidFieldValue { tag: 58, .. })
        ));
    }

    #[test]
    fn test_get_tag_string() {
        let mut msg: Message<4> = Message::new();
        msg.set_msg_type(MsgType::Logon);
        msg.set_msg_seq_num(17);
        msg.add_field(Field::int(tags::HEART_BT_INT, 30)).unwrap();

        let mut buf = [0u8; 16];
        assert_eq!(get_tag_string(&msg, tags::MSG_SEQ_NUM, &mut buf), Ok(Some("17")));
        assert_eq!(get_tag_string(&msg, tags::MSG_TYPE, &mut buf), Ok(Some("A")));
        assert_eq!(get_tag_string(&msg, tags::HEART_BT_INT, &mut buf), Ok(Some("30")));
        assert_eq!(get_tag_string(&msg, tags::TEXT, &mut buf), Ok(None));
    }
}
