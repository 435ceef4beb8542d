//! ISO-8601 timestamps for charge expiration.
//!
//! A charge's `expire_at` is sent as text and must be an ISO-8601 date or
//! date-time. This module provides [`ExpireAt`], which parses:
//!
//! - Dates, extended or basic: calendar `2024-12-31` / `20241231`, ordinal
//!   `2024-366` / `2024366`, week `2024-W01-1` / `2024W011`
//! - Any of those dates, `T`, then a time: `23:59:59`, `23:59`, `235959`, `2359`,
//!   with an optional fraction (`.5` or `,5`)
//! - An optional zone after the time: `Z`, `+03`, `-0300`, `-03:00`
//!
//! # Example
//!
//! ```
//! use kobana_types::timestamp::ExpireAt;
//!
//! let at: ExpireAt = "2024-12-31T23:59:59Z".parse().unwrap();
//! assert_eq!(at.to_string(), "2024-12-31T23:59:59+00:00");
//!
//! assert!("2024/12/31".parse::<ExpireAt>().is_err());
//! ```

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Date forms paired with the length of the text they accept.
const DATE_FORMATS: [(&str, usize); 6] = [
    ("%Y-%m-%d", 10),
    ("%G-W%V-%u", 10),
    ("%Y-%j", 8),
    ("%Y%m%d", 8),
    ("%GW%V%u", 8),
    ("%Y%j", 7),
];

// Applied after the date part is rewritten as `%Y-%m-%d`. `%#z` takes `Z`,
// `+HH`, `+HHMM` and `+HH:MM`.
const ZONED_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%dT%H%M%S%.f%#z",
    "%Y-%m-%dT%H%M%#z",
];
const LOCAL_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H%M%S%.f",
    "%Y-%m-%dT%H%M",
];

/// A parsed ISO-8601 expiration moment.
///
/// Values without a zone keep no offset; they are interpreted by the API, not
/// here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpireAt {
    /// Date-time carrying an explicit UTC offset.
    Zoned(DateTime<FixedOffset>),
    /// Date-time without a zone designator.
    Local(NaiveDateTime),
    /// Calendar date only.
    Date(NaiveDate),
}

/// The input is not an ISO-8601 date or date-time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Not an ISO8601 date or date-time: {0}")]
pub struct ExpireAtParseError(String);

impl ExpireAt {
    /// Parses `input` as ISO-8601, trying the most specific forms first.
    ///
    /// # Errors
    ///
    /// Returns an error if no supported form matches.
    pub fn parse(input: &str) -> Result<Self, ExpireAtParseError> {
        let input = input.trim();
        let invalid = || ExpireAtParseError(input.to_string());
        if let Ok(at) = DateTime::parse_from_rfc3339(input) {
            return Ok(ExpireAt::Zoned(at));
        }
        let Some((date, time)) = input.split_once(['T', 't']) else {
            return parse_date(input).map(ExpireAt::Date).ok_or_else(invalid);
        };
        let date = parse_date(date).ok_or_else(invalid)?;
        let date_time = format!("{}T{}", date.format(DATE_FORMAT), time.replace(',', "."));
        if let Some(at) = ZONED_FORMATS
            .iter()
            .find_map(|f| DateTime::parse_from_str(&date_time, f).ok())
        {
            return Ok(ExpireAt::Zoned(at));
        }
        LOCAL_FORMATS
            .iter()
            .find_map(|f| NaiveDateTime::parse_from_str(&date_time, f).ok())
            .map(ExpireAt::Local)
            .ok_or_else(invalid)
    }
}

fn parse_date(input: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .filter(|(_, len)| *len == input.len())
        .find_map(|(format, _)| NaiveDate::parse_from_str(input, format).ok())
}

impl FromStr for ExpireAt {
    type Err = ExpireAtParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExpireAt::parse(s)
    }
}

impl Display for ExpireAt {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ExpireAt::Zoned(at) => write!(f, "{}", at.to_rfc3339()),
            ExpireAt::Local(at) => write!(f, "{}", at.format("%Y-%m-%dT%H:%M:%S")),
            ExpireAt::Date(date) => write!(f, "{}", date.format(DATE_FORMAT)),
        }
    }
}

/// `true` iff `input` parses as an [`ExpireAt`].
pub fn is_iso8601(input: &str) -> bool {
    ExpireAt::parse(input).is_ok()
}
