//! Date-only calendar values.

use crate::error::{Error, Result};
use chrono::{Datelike, NaiveDate, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

// `[0-9]` rather than `\d`: the latter also matches non-ASCII digits.
static ISO_DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("Valid regex pattern"));

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// A calendar day with no time-of-day component.
///
/// Always holds a valid Gregorian date. Advancing produces a new value; there
/// is no in-place mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Build a date from its parts, returning `None` for impossible dates.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Parse the strict `YYYY-MM-DD` form.
    ///
    /// Anything else (two-digit years, missing padding, trailing time
    /// components) is a validation error, as is a well-formed string naming a
    /// day that does not exist such as `2025-02-30`.
    pub fn parse_strict(text: &str) -> Result<Self> {
        if !ISO_DATE_PATTERN.is_match(text) {
            return Err(Error::validation("Start date must be in YYYY-MM-DD format"));
        }

        NaiveDate::parse_from_str(text, ISO_DATE_FORMAT)
            .map(Self)
            .map_err(|_| {
                Error::validation(format!("Start date is not a valid calendar date: {text}"))
            })
    }

    /// The following calendar day.
    pub fn succ(self) -> Result<Self> {
        self.0
            .succ_opt()
            .map(Self)
            .ok_or_else(|| Error::Internal(format!("date overflow after {self}")))
    }

    /// This date moved forward by `days` calendar days.
    pub fn plus_days(self, days: u64) -> Result<Self> {
        self.0
            .checked_add_days(chrono::Days::new(days))
            .map(Self)
            .ok_or_else(|| Error::Internal(format!("date overflow adding {days} days to {self}")))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(ISO_DATE_FORMAT))
    }
}

impl FromStr for CalendarDate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_strict(s)
    }
}

impl Serialize for CalendarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse_strict(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(text: &str) -> CalendarDate {
        CalendarDate::parse_strict(text).unwrap()
    }

    #[test]
    fn test_parse_and_display_roundtrip() {
        let d = date("2025-11-17");
        assert_eq!(d.year(), 2025);
        assert_eq!(d.to_string(), "2025-11-17");
        assert_eq!(d, CalendarDate::from_ymd(2025, 11, 17).unwrap());
    }

    #[test]
    fn test_parse_rejects_wrong_layouts() {
        for text in [
            "17-11-2025",
            "2025/11/17",
            "2025-1-17",
            "25-11-17",
            "2025-11-17T00:00:00",
            " 2025-11-17",
            "",
            "２０２５-11-17",
        ] {
            let err = CalendarDate::parse_strict(text).unwrap_err();
            assert!(err.is_validation(), "{text:?} should be rejected");
        }
    }

    #[test]
    fn test_parse_rejects_impossible_dates() {
        let err = CalendarDate::parse_strict("2025-02-30").unwrap_err();
        assert!(err.to_string().contains("not a valid calendar date"));
        assert!(CalendarDate::parse_strict("2025-13-01").is_err());
        assert!(CalendarDate::parse_strict("2024-02-29").is_ok());
    }

    #[test]
    fn test_weekday() {
        assert_eq!(date("2025-11-16").weekday(), Weekday::Sun);
        assert_eq!(date("2025-11-17").weekday(), Weekday::Mon);
        assert_eq!(date("2025-11-22").weekday(), Weekday::Sat);
    }

    #[test]
    fn test_succ_crosses_month_and_year() {
        assert_eq!(date("2025-01-31").succ().unwrap(), date("2025-02-01"));
        assert_eq!(date("2024-02-28").succ().unwrap(), date("2024-02-29"));
        assert_eq!(date("2025-12-31").succ().unwrap(), date("2026-01-01"));
    }

    #[test]
    fn test_succ_leaves_original_untouched() {
        let start = date("2025-11-21");
        let next = start.succ().unwrap();
        assert_eq!(start.to_string(), "2025-11-21");
        assert_eq!(next.to_string(), "2025-11-22");
    }

    #[test]
    fn test_ordering() {
        assert!(date("2025-12-31") < date("2026-01-01"));
        assert!(date("2025-11-17") > date("2025-11-16"));
    }

    #[test]
    fn test_plus_days() {
        assert_eq!(date("2025-12-24").plus_days(8).unwrap(), date("2026-01-01"));
        assert!(CalendarDate::from(NaiveDate::MAX).succ().is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let d = date("2025-12-25");
        assert_eq!(serde_json::to_string(&d).unwrap(), "\"2025-12-25\"");
        let back: CalendarDate = serde_json::from_str("\"2025-12-25\"").unwrap();
        assert_eq!(back, d);
        assert!(serde_json::from_str::<CalendarDate>("\"25-12-2025\"").is_err());
    }
}
