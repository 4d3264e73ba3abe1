//! Date and time values.
//!
//! TOML has four date-time forms; [`Datetime`] keeps which one was written so
//! the writer can reproduce it.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat};
use std::fmt;
use std::str::FromStr;

/// A TOML date-time in one of its four forms.
///
/// # Examples
///
/// ```rust
/// use tomlet::Datetime;
///
/// let dt: Datetime = "1979-05-27T07:32:00Z".parse().unwrap();
/// assert!(dt.is_offset());
/// assert_eq!(dt.to_string(), "1979-05-27T07:32:00Z");
///
/// let date: Datetime = "1979-05-27".parse().unwrap();
/// assert_eq!(date, Datetime::Date(chrono::NaiveDate::from_ymd_opt(1979, 5, 27).unwrap()));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Datetime {
    /// Date and time with a UTC offset.
    Offset(DateTime<FixedOffset>),
    /// Date and time without an offset.
    Local(NaiveDateTime),
    /// A calendar date.
    Date(NaiveDate),
    /// A time of day.
    Time(NaiveTime),
}

/// Returned when text is not a TOML date-time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DatetimeParseError;

impl fmt::Display for DatetimeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid date-time")
    }
}

impl std::error::Error for DatetimeParseError {}

const LOCAL_DATETIME: &str = "%Y-%m-%dT%H:%M:%S%.f";
const LOCAL_TIME: &str = "%H:%M:%S%.f";

impl Datetime {
    #[inline]
    #[must_use]
    pub const fn is_offset(&self) -> bool {
        matches!(self, Datetime::Offset(_))
    }

    /// Returns `true` if `text` has the shape of a date or time, without validating it.
    pub(crate) fn looks_like(text: &str) -> bool {
        let bytes = text.as_bytes();
        let digits = |range: std::ops::Range<usize>| {
            bytes.len() >= range.end && bytes[range].iter().all(u8::is_ascii_digit)
        };
        (digits(0..4) && bytes.get(4) == Some(&b'-')) || (digits(0..2) && bytes.get(2) == Some(&b':'))
    }
}

impl FromStr for Datetime {
    type Err = DatetimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.is_ascii() {
            return Err(DatetimeParseError);
        }
        if s.as_bytes().get(2) == Some(&b':') {
            return NaiveTime::parse_from_str(s, LOCAL_TIME)
                .map(Datetime::Time)
                .map_err(|_| DatetimeParseError);
        }
        if s.len() == 10 {
            return NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map(Datetime::Date)
                .map_err(|_| DatetimeParseError);
        }

        // Normalize the optional separators TOML allows before handing off to chrono.
        let mut normalized = s.to_ascii_uppercase();
        if normalized.as_bytes().get(10) == Some(&b' ') {
            normalized.replace_range(10..11, "T");
        }

        let has_offset = normalized.ends_with('Z')
            || normalized
                .get(19..)
                .map_or(false, |tail| tail.contains('+') || tail.contains('-'));
        if has_offset {
            DateTime::parse_from_rfc3339(&normalized)
                .map(Datetime::Offset)
                .map_err(|_| DatetimeParseError)
        } else {
            NaiveDateTime::parse_from_str(&normalized, LOCAL_DATETIME)
                .map(Datetime::Local)
                .map_err(|_| DatetimeParseError)
        }
    }
}

impl fmt::Display for Datetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Datetime::Offset(dt) => f.write_str(&dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Datetime::Local(dt) => write!(f, "{}", dt.format(LOCAL_DATETIME)),
            Datetime::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Datetime::Time(t) => write!(f, "{}", t.format(LOCAL_TIME)),
        }
    }
}

impl From<DateTime<FixedOffset>> for Datetime {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Datetime::Offset(value)
    }
}

impl From<NaiveDateTime> for Datetime {
    fn from(value: NaiveDateTime) -> Self {
        Datetime::Local(value)
    }
}

impl From<NaiveDate> for Datetime {
    fn from(value: NaiveDate) -> Self {
        Datetime::Date(value)
    }
}

impl From<NaiveTime> for Datetime {
    fn from(value: NaiveTime) -> Self {
        Datetime::Time(value)
    }
}
