/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! UTC timestamps for SendingTime (52) and OrigSendingTime (122).
//!
//! The codec carries these fields as opaque text; [`Timestamp`] renders and
//! parses the `YYYYMMDD-HH:MM:SS.sss` form so session code does not have to.

use arrayvec::ArrayString;
use bytes::Bytes;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of a millisecond-precision UTC timestamp (`YYYYMMDD-HH:MM:SS.sss`).
pub const TIMESTAMP_MILLIS_LEN: usize = 21;

const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H:%M:%S%.f";

/// UTC timestamp with nanosecond resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp {
    /// Nanoseconds since Unix epoch (1970-01-01 00:00:00 UTC).
    nanos_since_epoch: i64,
}

impl Timestamp {
    /// Creates a timestamp from milliseconds since Unix epoch.
    ///
    /// # Arguments
    /// * `millis` - Milliseconds since 1970-01-01 00:00:00 UTC
    #[inline]
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self {
            nanos_since_epoch: millis.saturating_mul(1_000_000),
        }
    }

    /// Returns the current UTC timestamp.
    #[must_use]
    pub fn now() -> Self {
        Self::from(Utc::now())
    }

    /// Returns milliseconds since Unix epoch.
    #[inline]
    #[must_use]
    pub const fn as_millis(self) -> i64 {
        self.nanos_since_epoch / 1_000_000
    }

    /// Converts to a chrono `DateTime<Utc>`.
    #[must_use]
    pub fn to_datetime(self) -> DateTime<Utc> {
        DateTime::from_timestamp_nanos(self.nanos_since_epoch)
    }

    /// Formats the timestamp with millisecond precision.
    ///
    /// Format: `YYYYMMDD-HH:MM:SS.sss`
    #[must_use]
    pub fn format_millis(self) -> ArrayString<TIMESTAMP_MILLIS_LEN> {
        let dt = self.to_datetime();
        let mut buf = ArrayString::new();
        // Nanosecond storage keeps every instant within four-digit years.
        let written = std::fmt::write(
            &mut buf,
            format_args!("{}", dt.format("%Y%m%d-%H:%M:%S%.3f")),
        );
        debug_assert!(written.is_ok(), "timestamp wider than {TIMESTAMP_MILLIS_LEN} bytes");
        buf
    }

    /// Renders the timestamp as a SendingTime field value.
    #[must_use]
    pub fn to_field_value(self) -> Bytes {
        Bytes::copy_from_slice(self.format_millis().as_bytes())
    }

    /// Parses a UTC timestamp with optional fractional seconds.
    ///
    /// Accepts `YYYYMMDD-HH:MM:SS` followed by up to nine fractional digits.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let naive = NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).ok()?;
        Some(Self::from(naive.and_utc()))
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

/// Instants outside 1677-09-21..=2262-04-11 saturate to the nearest bound.
impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        let nanos_since_epoch = dt.timestamp_nanos_opt().unwrap_or(if dt.timestamp() < 0 {
            i64::MIN
        } else {
            i64::MAX
        });
        Self { nanos_since_epoch }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_format_epoch() {
        let ts = Timestamp::from_millis(0);
        assert_eq!(ts.format_millis().as_str(), "19700101-00:00:00.000");
    }

    #[test]
    fn test_timestamp_field_value() {
        let ts = Timestamp::from_millis(1_500);
        assert_eq!(&ts.to_field_value()[..], b"19700101-00:00:01.500");
    }

    #[test]
    fn test_timestamp_saturates_out_of_range() {
        let late = Timestamp::parse("99991231-23:59:59.999").unwrap();
        assert_eq!(late.format_millis().as_str(), "22620411-23:47:16.854");

        let early = Timestamp::parse("00010101-00:00:00").unwrap();
        assert_eq!(early.format_millis().as_str(), "16770921-00:12:43.145");

        let far = Timestamp::from_millis(i64::MAX);
        assert_eq!(far.format_millis().as_str(), "22620411-23:47:16.854");
    }

    #[test]
    fn test_timestamp_parse() {
        let ts = Timestamp::parse("19700101-00:00:01.250").unwrap();
        assert_eq!(ts.as_millis(), 1_250);

        let whole = Timestamp::parse("19700101-00:01:00").unwrap();
        assert_eq!(whole.as_millis(), 60_000);

        assert!(Timestamp::parse("not a time").is_none());
    }

    #[test]
    fn test_timestamp_parse_format_roundtrip() {
        let ts = Timestamp::from_millis(1_767_225_600_123);
        let parsed = Timestamp::parse(ts.format_millis().as_str()).unwrap();
        assert_eq!(parsed, ts);
    }
}
