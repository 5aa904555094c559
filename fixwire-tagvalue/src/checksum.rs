/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! FIX checksum calculation.
//!
//! The checksum is the sum of every byte from the start of BeginString up to
//! (not including) the CheckSum tag, modulo 256, written as three zero-padded
//! decimal digits.

/// Calculates the FIX checksum for the given data.
///
/// # Arguments
/// * `data` - The message bytes to checksum (excluding the `10=NNN<SOH>` field)
///
/// # Example
/// ```
/// use fixwire_tagvalue::calculate_checksum;
///
/// assert_eq!(calculate_checksum(b"1=A\x01"), 176);
/// ```
#[inline]
#[must_use]
pub fn calculate_checksum(data: &[u8]) -> u8 {
    data.iter().fold(0u8, |sum, &b| sum.wrapping_add(b))
}

/// Calculates the checksum of several segments as if they were contiguous.
///
/// Used to check a message from its retained head and body spans without
/// joining them.
#[inline]
#[must_use]
pub fn calculate_checksum_parts<'a>(parts: impl IntoIterator<Item = &'a [u8]>) -> u8 {
    parts
        .into_iter()
        .fold(0u8, |sum, part| sum.wrapping_add(calculate_checksum(part)))
}

/// Formats a checksum value as a 3-digit zero-padded string.
///
/// # Returns
/// A 3-character representation (e.g., "042", "255").
#[inline]
#[must_use]
pub const fn format_checksum(checksum: u8) -> [u8; 3] {
    [
        b'0' + checksum / 100,
        b'0' + (checksum / 10) % 10,
        b'0' + checksum % 10,
    ]
}

/// Parses a 3-digit checksum string.
///
/// # Returns
/// `Some(checksum)` for exactly three digits with a value up to 255, `None`
/// otherwise.
#[inline]
#[must_use]
pub fn parse_checksum(bytes: &[u8]) -> Option<u8> {
    let [d0, d1, d2] = <[u8; 3]>::try_from(bytes).ok()?;
    if !(d0.is_ascii_digit() && d1.is_ascii_digit() && d2.is_ascii_digit()) {
        return None;
    }
    let value = u16::from(d0 - b'0') * 100 + u16::from(d1 - b'0') * 10 + u16::from(d2 - b'0');
    u8::try_from(value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_checksum_empty() {
        assert_eq!(calculate_checksum(b""), 0);
    }

    #[test]
    fn test_calculate_checksum_single_field() {
        // '1' + '=' + 'A' + SOH = 49 + 61 + 65 + 1
        assert_eq!(calculate_checksum(b"1=A\x01"), 176);
        assert_eq!(format_checksum(176), *b"176");
    }

    #[test]
    fn test_calculate_checksum_wraps() {
        let data = vec![255u8; 1000];
        let expected = ((255u32 * 1000) % 256) as u8;
        assert_eq!(calculate_checksum(&data), expected);
    }

    #[test]
    fn test_calculate_checksum_parts() {
        let whole = b"8=FIX.4.4\x019=5\x0135=0\x0149=A\x01";
        let (head, body) = whole.split_at(20);
        assert_eq!(
            calculate_checksum_parts([head, body]),
            calculate_checksum(whole)
        );
    }

    #[test]
    fn test_format_checksum() {
        assert_eq!(format_checksum(0), *b"000");
        assert_eq!(format_checksum(42), *b"042");
        assert_eq!(format_checksum(100), *b"100");
        assert_eq!(format_checksum(255), *b"255");
    }

    #[test]
    fn test_parse_checksum() {
        assert_eq!(parse_checksum(b"000"), Some(0));
        assert_eq!(parse_checksum(b"042"), Some(42));
        assert_eq!(parse_checksum(b"255"), Some(255));
    }

    #[test]
    fn test_parse_checksum_invalid() {
        assert_eq!(parse_checksum(b""), None);
        assert_eq!(parse_checksum(b"00"), None);
        assert_eq!(parse_checksum(b"0000"), None);
        assert_eq!(parse_checksum(b"12X"), None);
        assert_eq!(parse_checksum(b"256"), None);
        assert_eq!(parse_checksum(b"999"), None);
    }
}
