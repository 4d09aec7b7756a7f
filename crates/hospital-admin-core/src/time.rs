//! Clock times and the 24-hour / 12-hour display conversion.
//!
//! Native time inputs deliver `HH:MM` in 24-hour form, while list pages and
//! stored appointments show `hh:MM AM|PM`. Conversion rules:
//!
//! | 24h     | 12h        |
//! |---------|------------|
//! | `00:05` | `12:05 AM` |
//! | `11:59` | `11:59 AM` |
//! | `12:30` | `12:30 PM` |
//! | `13:15` | `01:15 PM` |
//! | `23:59` | `11:59 PM` |

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Time parsing errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeError {
    #[error("invalid 24-hour time '{0}', expected HH:MM")]
    Invalid24h(String),

    #[error("invalid 12-hour time '{0}', expected hh:MM AM or hh:MM PM")]
    Invalid12h(String),
}

pub type TimeResult<T> = Result<T, TimeError>;

const FORMAT_24H: &str = "%H:%M";
const FORMAT_12H: &str = "%I:%M %p";

/// A wall-clock time with minute precision.
///
/// Serializes as zero-padded `HH:MM`, so the lexicographic order of the
/// serialized form equals chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Build from hour (0-23) and minute (0-59).
    pub fn new(hour: u32, minute: u32) -> TimeResult<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or_else(|| TimeError::Invalid24h(format!("{hour}:{minute}")))
    }

    /// Parse a native 24-hour input value (`HH:MM`).
    pub fn parse_24h(input: &str) -> TimeResult<Self> {
        let trimmed = input.trim();
        NaiveTime::parse_from_str(trimmed, FORMAT_24H)
            .map(Self)
            .map_err(|_| TimeError::Invalid24h(input.to_string()))
    }

    /// Parse a 12-hour display string (`hh:MM AM|PM`, case-insensitive).
    pub fn parse_12h(input: &str) -> TimeResult<Self> {
        let trimmed = input.trim();
        NaiveTime::parse_from_str(trimmed, FORMAT_12H)
            .map(Self)
            .map_err(|_| TimeError::Invalid12h(input.to_string()))
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Zero-padded 24-hour form.
    pub fn to_24h(&self) -> String {
        format!("{:02}:{:02}", self.hour(), self.minute())
    }

    /// 12-hour display form.
    pub fn to_12h(&self) -> String {
        let hours = self.hour();
        let period = if hours >= 12 { "PM" } else { "AM" };
        let display_hours = if hours > 12 {
            hours - 12
        } else if hours == 0 {
            12
        } else {
            hours
        };
        format!("{:02}:{:02} {}", display_hours, self.minute(), period)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_24h())
    }
}

impl FromStr for ClockTime {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_24h(s)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = TimeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_24h(&value)
    }
}

impl From<ClockTime> for String {
    fn from(time: ClockTime) -> Self {
        time.to_24h()
    }
}

/// Convert a native `HH:MM` input into the stored 12-hour display string.
pub fn to_12h(input: &str) -> TimeResult<String> {
    Ok(ClockTime::parse_24h(input)?.to_12h())
}

/// Convert a 12-hour display string back into zero-padded `HH:MM`.
pub fn to_24h(display: &str) -> TimeResult<String> {
    Ok(ClockTime::parse_12h(display)?.to_24h())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &[(&str, &str)] = &[
        ("00:00", "12:00 AM"),
        ("00:05", "12:05 AM"),
        ("01:00", "01:00 AM"),
        ("09:45", "09:45 AM"),
        ("11:59", "11:59 AM"),
        ("12:00", "12:00 PM"),
        ("12:30", "12:30 PM"),
        ("13:15", "01:15 PM"),
        ("18:07", "06:07 PM"),
        ("23:59", "11:59 PM"),
    ];

    #[test]
    fn test_fixed_conversion_table() {
        for (h24, h12) in TABLE {
            assert_eq!(to_12h(h24).unwrap(), *h12, "24h -> 12h for {h24}");
            assert_eq!(to_24h(h12).unwrap(), *h24, "12h -> 24h for {h12}");
        }
    }

    #[test]
    fn test_noon_and_midnight() {
        assert_eq!(ClockTime::new(0, 5).unwrap().to_12h(), "12:05 AM");
        assert_eq!(ClockTime::new(12, 30).unwrap().to_12h(), "12:30 PM");
        assert_eq!(ClockTime::new(13, 15).unwrap().to_12h(), "01:15 PM");
    }

    #[test]
    fn test_rejects_malformed_input() {
        assert!(matches!(to_12h("24:00"), Err(TimeError::Invalid24h(_))));
        assert!(matches!(to_12h("noon"), Err(TimeError::Invalid24h(_))));
        assert!(matches!(to_12h(""), Err(TimeError::Invalid24h(_))));
        assert!(matches!(to_24h("13:00 PM"), Err(TimeError::Invalid12h(_))));
        assert!(ClockTime::new(7, 60).is_err());
    }

    #[test]
    fn test_lowercase_period_accepted() {
        assert_eq!(to_24h("07:30 pm").unwrap(), "19:30");
    }

    #[test]
    fn test_serde_as_padded_string() {
        let time = ClockTime::new(8, 5).unwrap();
        let json = serde_json::to_string(&time).unwrap();
        assert_eq!(json, "\"08:05\"");

        let back: ClockTime = serde_json::from_str(&json).unwrap();
        assert_eq!(back, time);

        assert!(serde_json::from_str::<ClockTime>("\"8am\"").is_err());
    }

    #[test]
    fn test_padded_form_sorts_chronologically() {
        let mut times = vec!["14:00", "09:30", "10:15", "08:45"];
        times.sort();
        let parsed: Vec<ClockTime> = times.iter().map(|t| t.parse().unwrap()).collect();
        let mut chronological = parsed.clone();
        chronological.sort();
        assert_eq!(parsed, chronological);
    }
}
