/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Field types for FIX protocol messages.
//!
//! This module provides:
//! - [`FieldKind`]: The wire type a tag's value is rendered as
//! - [`FieldValue`]: One decoded value, one variant per kind
//! - [`Field`]: A tag paired with its value
//!
//! A field's kind is derived from its value variant, so the two can never
//! disagree. String values are [`Bytes`] so decoded fields share the input
//! buffer instead of copying it.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;

/// SOH (Start of Header) delimiter terminating every field.
pub const SOH: u8 = 0x01;

/// Number of decimal places used when rendering a float.
pub const FLOAT_PRECISION: usize = 6;

/// Wire type of a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    /// Signed 64-bit integer.
    Int,
    /// Double precision float.
    Float,
    /// Single byte.
    Char,
    /// Opaque text.
    String,
    /// Three-digit checksum (0-255).
    CheckSum,
}

impl FieldKind {
    /// Returns true if values of this kind are rendered as numbers.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Int | Self::Float | Self::CheckSum)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Char => "char",
            Self::String => "string",
            Self::CheckSum => "checksum",
        };
        f.write_str(name)
    }
}

/// A single decoded field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// Single character value.
    Char(u8),
    /// Text value.
    String(Bytes),
    /// Checksum value.
    CheckSum(u8),
}

impl FieldValue {
    /// Returns the kind of this value.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        match self {
            Self::Int(_) => FieldKind::Int,
            Self::Float(_) => FieldKind::Float,
            Self::Char(_) => FieldKind::Char,
            Self::String(_) => FieldKind::String,
            Self::CheckSum(_) => FieldKind::CheckSum,
        }
    }

    /// Returns the value as an i64, if it is an Int variant.
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as an f64, if it is a Float variant.
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as a byte, if it is a Char variant.
    #[must_use]
    pub const fn as_char(&self) -> Option<u8> {
        match self {
            Self::Char(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the raw text, if it is a String variant.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the text as a string slice, if it is a UTF-8 String variant.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.as_bytes().and_then(|b| std::str::from_utf8(b).ok())
    }

    /// Returns the value as a checksum, if it is a CheckSum variant.
    #[must_use]
    pub const fn as_checksum(&self) -> Option<u8> {
        match self {
            Self::CheckSum(v) => Some(*v),
            _ => None,
        }
    }

    /// Checks that the value can be written between `=` and SOH.
    ///
    /// # Errors
    /// Returns a short reason when the value would corrupt the framing or
    /// cannot be rendered: empty text, an embedded SOH, a control or non-ASCII
    /// char, or a non-finite float.
    pub fn check_wire(&self) -> Result<(), &'static str> {
        match self {
            Self::Int(_) | Self::CheckSum(_) => Ok(()),
            Self::Float(v) if !v.is_finite() => Err("float is not finite"),
            Self::Float(_) => Ok(()),
            Self::Char(c) if !c.is_ascii_graphic() && *c != b' ' => {
                Err("char is not printable ASCII")
            }
            Self::Char(_) => Ok(()),
            Self::String(s) if s.is_empty() => Err("empty value"),
            Self::String(s) if s.contains(&SOH) => Err("value contains SOH"),
            Self::String(_) => Ok(()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{:.*}", FLOAT_PRECISION, v),
            Self::Char(c) => write!(f, "{}", *c as char),
            Self::String(s) => write!(f, "{}", String::from_utf8_lossy(s)),
            Self::CheckSum(v) => write!(f, "{:03}", v),
        }
    }
}

/// A tag and its typed value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    tag: u32,
    value: FieldValue,
}

impl Field {
    /// Creates a field from a tag and a value.
    ///
    /// # Arguments
    /// * `tag` - The field tag number
    /// * `value` - The typed value
    #[inline]
    #[must_use]
    pub const fn new(tag: u32, value: FieldValue) -> Self {
        Self { tag, value }
    }

    /// Creates an integer field.
    #[inline]
    #[must_use]
    pub const fn int(tag: u32, value: i64) -> Self {
        Self::new(tag, FieldValue::Int(value))
    }

    /// Creates a float field.
    #[inline]
    #[must_use]
    pub const fn float(tag: u32, value: f64) -> Self {
        Self::new(tag, FieldValue::Float(value))
    }

    /// Creates a single character field.
    #[inline]
    #[must_use]
    pub const fn char(tag: u32, value: u8) -> Self {
        Self::new(tag, FieldValue::Char(value))
    }

    /// Creates a text field.
    ///
    /// `&'static str` and `&'static [u8]` values are stored without copying.
    #[inline]
    #[must_use]
    pub fn string(tag: u32, value: impl Into<Bytes>) -> Self {
        Self::new(tag, FieldValue::String(value.into()))
    }

    /// Returns the field tag.
    #[inline]
    #[must_use]
    pub const fn tag(&self) -> u32 {
        self.tag
    }

    /// Returns the field value.
    #[inline]
    #[must_use]
    pub const fn value(&self) -> &FieldValue {
        &self.value
    }

    /// Returns the kind of the field value.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        self.value.kind()
    }

    /// Consumes the field and returns its value.
    #[inline]
    #[must_use]
    pub fn into_value(self) -> FieldValue {
        self.value
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.tag, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_kind_follows_value() {
        assert_eq!(Field::int(34, 7).kind(), FieldKind::Int);
        assert_eq!(Field::float(44, 1.5).kind(), FieldKind::Float);
        assert_eq!(Field::char(43, b'Y').kind(), FieldKind::Char);
        assert_eq!(Field::string(49, "SENDER").kind(), FieldKind::String);
        assert_eq!(
            Field::new(10, FieldValue::CheckSum(3)).kind(),
            FieldKind::CheckSum
        );
    }

    #[test]
    fn test_field_value_accessors() {
        assert_eq!(FieldValue::Int(-4).as_i64(), Some(-4));
        assert_eq!(FieldValue::Int(-4).as_f64(), None);
        assert_eq!(FieldValue::Char(b'N').as_char(), Some(b'N'));
        assert_eq!(
            FieldValue::String(Bytes::from_static(b"ABC")).as_str(),
            Some("ABC")
        );
        assert_eq!(FieldValue::CheckSum(9).as_checksum(), Some(9));
    }

    #[test]
    fn test_field_value_invalid_utf8() {
        let value = FieldValue::String(Bytes::from_static(&[0xFF, 0xFE]));
        assert!(value.as_bytes().is_some());
        assert!(value.as_str().is_none());
    }

    #[test]
    fn test_check_wire() {
        assert!(FieldValue::Int(0).check_wire().is_ok());
        assert!(FieldValue::Char(b'Y').check_wire().is_ok());
        assert!(FieldValue::Char(SOH).check_wire().is_err());
        assert!(FieldValue::Float(f64::NAN).check_wire().is_err());
        assert!(FieldValue::String(Bytes::new()).check_wire().is_err());
        assert!(
            FieldValue::String(Bytes::from_static(b"A\x01B"))
                .check_wire()
                .is_err()
        );
    }

    #[test]
    fn test_field_display() {
        assert_eq!(Field::int(108, 30).to_string(), "108=30");
        assert_eq!(Field::float(44, 1.25).to_string(), "44=1.250000");
        assert_eq!(Field::char(123, b'Y').to_string(), "123=Y");
        assert_eq!(Field::new(10, FieldValue::CheckSum(7)).to_string(), "10=007");
    }

    #[test]
    fn test_field_kind_is_numeric() {
        assert!(FieldKind::Int.is_numeric());
        assert!(FieldKind::CheckSum.is_numeric());
        assert!(!FieldKind::Char.is_numeric());
        assert!(!FieldKind::String.is_numeric());
    }
}
