/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Single field codec.
//!
//! Encodes one `tag=value<SOH>` unit into an output buffer and decodes a raw
//! value into a typed [`Field`] according to the tag table.

use crate::checksum::{format_checksum, parse_checksum};
use arrayvec::ArrayString;
use bytes::{BufMut, Bytes, BytesMut};
use fixwire_core::error::{DecodeError, EncodeError};
use fixwire_core::field::{FLOAT_PRECISION, Field, FieldKind, FieldValue, SOH};
use fixwire_core::tags;
use std::fmt::Write;

/// Equals sign delimiter between tag and value.
pub const EQUALS: u8 = b'=';

/// Widest finite float rendering: sign, 309 integer digits, point, fraction.
const FLOAT_TEXT_LEN: usize = 1 + 309 + 1 + FLOAT_PRECISION + 3;

/// Stack storage for rendering a value without allocating.
#[derive(Default)]
pub(crate) struct Scratch {
    int: itoa::Buffer,
    float: ArrayString<FLOAT_TEXT_LEN>,
    checksum: [u8; 3],
}

/// Renders a value as the bytes written between `=` and SOH.
pub(crate) fn render<'a>(
    tag: u32,
    value: &'a FieldValue,
    scratch: &'a mut Scratch,
) -> Result<&'a [u8], EncodeError> {
    value
        .check_wire()
        .map_err(|reason| EncodeError::InvalidFieldValue { tag, reason })?;

    match value {
        FieldValue::Int(v) => Ok(scratch.int.format(*v).as_bytes()),
        FieldValue::Float(v) => {
            scratch.float.clear();
            write!(scratch.float, "{:.*}", FLOAT_PRECISION, v).map_err(|_| {
                EncodeError::InvalidFieldValue {
                    tag,
                    reason: "float is too wide to render",
                }
            })?;
            Ok(scratch.float.as_bytes())
        }
        FieldValue::Char(c) => Ok(std::slice::from_ref(c)),
        FieldValue::String(s) => Ok(s),
        FieldValue::CheckSum(v) => {
            scratch.checksum = format_checksum(*v);
            Ok(&scratch.checksum)
        }
    }
}

/// Appends `tag=value<SOH>` to `out`.
///
/// # Arguments
/// * `field` - The field to encode
/// * `out` - The output buffer
/// * `limit` - The maximum length `out` may reach
///
/// # Returns
/// The number of bytes appended.
///
/// # Errors
/// Returns [`EncodeError::BufferOverflow`] if the unit does not fit under
/// `limit`, in which case nothing is written, or
/// [`EncodeError::InvalidFieldValue`] if the value cannot be rendered.
pub fn encode_field(field: &Field, out: &mut BytesMut, limit: usize) -> Result<usize, EncodeError> {
    let mut scratch = Scratch::default();
    let mut tag_buf = itoa::Buffer::new();
    let tag = tag_buf.format(field.tag()).as_bytes();
    let value = render(field.tag(), field.value(), &mut scratch)?;

    let needed = tag.len() + value.len() + 2;
    let available = limit.saturating_sub(out.len());
    if needed > available {
        return Err(EncodeError::BufferOverflow { needed, available });
    }

    out.reserve(needed);
    out.put_slice(tag);
    out.put_u8(EQUALS);
    out.put_slice(value);
    out.put_u8(SOH);
    Ok(needed)
}

/// Decodes a raw value into a field of the kind the tag table assigns to `tag`.
///
/// String values keep sharing `raw`'s buffer.
///
/// # Arguments
/// * `tag` - The field tag number
/// * `raw` - The bytes between `=` and SOH
/// * `offset` - Offset of the field, reported on failure
///
/// # Errors
/// Returns [`DecodeError::InvalidFieldFormat`] if the value is empty or does
/// not parse as the expected kind.
pub fn decode_field(tag: u32, raw: Bytes, offset: usize) -> Result<Field, DecodeError> {
    let invalid = |reason| DecodeError::InvalidFieldFormat {
        tag,
        offset,
        reason,
    };

    if raw.is_empty() {
        return Err(invalid("empty value"));
    }

    let value = match tags::kind_of(tag) {
        FieldKind::Int => FieldValue::Int(parse_int(&raw).ok_or(invalid("not an integer"))?),
        FieldKind::Float => FieldValue::Float(parse_float(&raw).ok_or(invalid("not a finite decimal"))?),
        FieldKind::Char => match raw[..] {
            [c] => FieldValue::Char(c),
            _ => return Err(invalid("char must be exactly one byte")),
        },
        FieldKind::CheckSum => {
            FieldValue::CheckSum(parse_checksum(&raw).ok_or(invalid("checksum must be three digits"))?)
        }
        FieldKind::String => FieldValue::String(raw),
    };
    Ok(Field::new(tag, value))
}

/// Parses an unsigned decimal made only of ASCII digits.
#[inline]
pub(crate) fn parse_unsigned(bytes: &[u8]) -> Option<u64> {
    if bytes.is_empty() {
        return None;
    }

    let mut result: u64 = 0;
    for &b in bytes {
        if !b.is_ascii_digit() {
            return None;
        }
        result = result.checked_mul(10)?.checked_add(u64::from(b - b'0'))?;
    }
    Some(result)
}

/// Parses a decimal integer with an optional leading `-`.
#[inline]
fn parse_int(bytes: &[u8]) -> Option<i64> {
    match bytes {
        [b'-', digits @ ..] => {
            let magnitude = parse_unsigned(digits)?;
            0i64.checked_sub_unsigned(magnitude)
        }
        digits => i64::try_from(parse_unsigned(digits)?).ok(),
    }
}

/// Parses a plain decimal float (no exponent, no `inf`/`NaN`).
#[inline]
fn parse_float(bytes: &[u8]) -> Option<f64> {
    let plain = bytes
        .iter()
        .enumerate()
        .all(|(i, &b)| b.is_ascii_digit() || b == b'.' || (i == 0 && b == b'-'));
    if !plain || !bytes.iter().any(u8::is_ascii_digit) {
        return None;
    }
    let value: f64 = std::str::from_utf8(bytes).ok()?.parse().ok()?;
    value.is_finite().then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(field: &Field) -> Vec<u8> {
        let mut out = BytesMut::new();
        encode_field(field, &mut out, usize::MAX).unwrap();
        out.to_vec()
    }

    #[test]
    fn test_encode_field_kinds() {
        assert_eq!(encoded(&Field::int(34, 42)), b"34=42\x01");
        assert_eq!(encoded(&Field::int(373, -7)), b"373=-7\x01");
        assert_eq!(encoded(&Field::float(44, 1.5)), b"44=1.500000\x01");
        assert_eq!(encoded(&Field::char(43, b'Y')), b"43=Y\x01");
        assert_eq!(encoded(&Field::string(58, "hello")), b"58=hello\x01");
        assert_eq!(
            encoded(&Field::new(10, FieldValue::CheckSum(7))),
            b"10=007\x01"
        );
    }

    #[test]
    fn test_encode_field_extreme_floats() {
        for v in [f64::MAX, f64::MIN, f64::MIN_POSITIVE, 1e50] {
            let wire = encoded(&Field::float(44, v));
            assert!(wire.len() <= FLOAT_TEXT_LEN + 4);

            let raw = Bytes::copy_from_slice(&wire[3..wire.len() - 1]);
            let decoded = decode_field(44, raw, 0).unwrap();
            let expected = if v.abs() < 1e-6 { 0.0 } else { v };
            assert_eq!(decoded.value().as_f64(), Some(expected));
        }
    }

    #[test]
    fn test_encode_field_overflow_writes_nothing() {
        let mut out = BytesMut::from(&b"8=FIX.4.4\x01"[..]);
        let err = encode_field(&Field::string(58, "too long"), &mut out, 15).unwrap_err();

        assert_eq!(
            err,
            EncodeError::BufferOverflow {
                needed: 12,
                available: 5
            }
        );
        assert_eq!(&out[..], b"8=FIX.4.4\x01");
    }

    #[test]
    fn test_encode_field_exact_fit() {
        let mut out = BytesMut::new();
        assert_eq!(encode_field(&Field::int(9, 5), &mut out, 4), Ok(4));
        assert_eq!(&out[..], b"9=5\x01");
    }

    #[test]
    fn test_encode_field_rejects_soh_in_value() {
        let mut out = BytesMut::new();
        let err = encode_field(&Field::string(58, "a\x01b"), &mut out, 64).unwrap_err();
        assert!(matches!(err, EncodeError::InvalidFieldValue { tag: 58, .. }));
        assert!(out.is_empty());
    }

    #[test]
    fn test_decode_field_kinds() {
        let int = decode_field(108, Bytes::from_static(b"30"), 0).unwrap();
        assert_eq!(int, Field::int(108, 30));

        let float = decode_field(44, Bytes::from_static(b"-12.25"), 0).unwrap();
        assert_eq!(float, Field::float(44, -12.25));

        let ch = decode_field(123, Bytes::from_static(b"Y"), 0).unwrap();
        assert_eq!(ch, Field::char(123, b'Y'));

        let text = decode_field(9999, Bytes::from_static(b"opaque"), 0).unwrap();
        assert_eq!(text, Field::string(9999, "opaque"));

        let cs = decode_field(10, Bytes::from_static(b"176"), 0).unwrap();
        assert_eq!(cs.value().as_checksum(), Some(176));
    }

    #[test]
    fn test_decode_field_invalid() {
        let cases: [(u32, &'static [u8]); 8] = [
            (108, b"3x"),
            (108, b"+3"),
            (108, b"99999999999999999999"),
            (44, b"inf"),
            (44, b"1e5"),
            (43, b"YN"),
            (10, b"1000"),
            (58, b""),
        ];
        for (tag, raw) in cases {
            let err = decode_field(tag, Bytes::from_static(raw), 12).unwrap_err();
            assert!(
                matches!(err, DecodeError::InvalidFieldFormat { tag: t, offset: 12, .. } if t == tag),
                "tag {tag} value {raw:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_parse_int_bounds() {
        assert_eq!(parse_int(b"-9223372036854775808"), Some(i64::MIN));
        assert_eq!(parse_int(b"9223372036854775807"), Some(i64::MAX));
        assert_eq!(parse_int(b"9223372036854775808"), None);
        assert_eq!(parse_int(b"-"), None);
    }

    #[test]
    fn test_parse_unsigned() {
        assert_eq!(parse_unsigned(b"0"), Some(0));
        assert_eq!(parse_unsigned(b"4096"), Some(4096));
        assert_eq!(parse_unsigned(b""), None);
        assert_eq!(parse_unsigned(b"-1"), None);
    }
}
