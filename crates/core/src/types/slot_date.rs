//! Booking slot dates.
//!
//! The backend serializes dates as ISO date-times without an offset
//! (`2025-01-06T00:00:00`); some endpoints send a bare date. Only the
//! calendar date is meaningful to the reports.

use core::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A calendar date attached to a booking slot or daily summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotDate(NaiveDate);

impl SlotDate {
    /// Wire format for dates sent to the backend.
    pub const WIRE_FORMAT: &'static str = "%Y-%m-%d";

    /// Wrap a calendar date.
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Parse `YYYY-MM-DD`, ignoring any time component that follows.
    ///
    /// # Errors
    ///
    /// Returns a `chrono` parse error if the leading date is malformed.
    pub fn parse(value: &str) -> Result<Self, chrono::ParseError> {
        let date_part = value.split(['T', ' ']).next().unwrap_or(value);
        NaiveDate::parse_from_str(date_part, Self::WIRE_FORMAT).map(Self)
    }

    /// Format as `dd-MMM-yyyy` (e.g., `06-Jan-2025`).
    #[must_use]
    pub fn short_display(&self) -> String {
        self.0.format("%d-%b-%Y").to_string()
    }

    /// Format with the weekday (e.g., `Monday Jan 06, 2025`).
    #[must_use]
    pub fn long_display(&self) -> String {
        self.0.format("%A %b %d, %Y").to_string()
    }

    /// Format for query strings and date inputs (`YYYY-MM-DD`).
    #[must_use]
    pub fn wire(&self) -> String {
        self.0.format(Self::WIRE_FORMAT).to_string()
    }

    /// The month number (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }
}

impl fmt::Display for SlotDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short_display())
    }
}

impl From<NaiveDate> for SlotDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl Serialize for SlotDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.wire())
    }
}

impl<'de> Deserialize<'de> for SlotDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_time_and_bare_date() {
        let a = SlotDate::parse("2025-01-06T00:00:00").unwrap();
        let b = SlotDate::parse("2025-01-06").unwrap();
        let c = SlotDate::parse("2025-01-06T18:30:00.123Z").unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(SlotDate::parse("06/01/2025").is_err());
        assert!(SlotDate::parse("").is_err());
    }

    #[test]
    fn test_displays() {
        let date = SlotDate::parse("2025-01-06").unwrap();
        assert_eq!(date.short_display(), "06-Jan-2025");
        assert_eq!(date.long_display(), "Monday Jan 06, 2025");
        assert_eq!(date.wire(), "2025-01-06");
        assert_eq!(date.to_string(), "06-Jan-2025");
    }

    #[test]
    fn test_serde_round_trip_uses_wire_format() {
        let date: SlotDate = serde_json::from_str("\"2024-12-31T00:00:00\"").unwrap();
        assert_eq!(serde_json::to_string(&date).unwrap(), "\"2024-12-31\"");
    }
}
