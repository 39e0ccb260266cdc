use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike, Utc};

use crate::error::FaceError;

/// Format accepted by [`parse_reference`].
pub const REFERENCE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parse a UTC reference instant such as `2024-06-03T23:10:00`.
pub fn parse_reference(value: &str) -> Result<NaiveDateTime, FaceError> {
    NaiveDateTime::parse_from_str(value, REFERENCE_FORMAT).map_err(|_| FaceError::InvalidReference(value.to_string()))
}

/// A snapshot of the current UTC time, decomposed the way the face uses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallClock {
    /// UTC hour, 0..=23.
    pub hour: u32,
    /// UTC minute, 0..=59.
    pub minute: u32,
    /// UTC calendar date. Only the date line reads it.
    pub date: NaiveDate,
}

impl WallClock {
    pub fn from_naive_utc(dt: NaiveDateTime) -> Self {
        WallClock { hour: dt.hour(), minute: dt.minute(), date: dt.date() }
    }

    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self::from_naive_utc(dt.naive_utc())
    }

    /// Build a snapshot from raw parts. Returns `None` if any part is out of range.
    pub fn from_parts(date: NaiveDate, hour: u32, minute: u32) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(WallClock { hour, minute, date })
    }

    pub fn weekday(&self) -> chrono::Weekday {
        self.date.weekday()
    }
}

/// Source of wall-clock time.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    fn snapshot(&self) -> WallClock {
        WallClock::from_utc(self.now())
    }
}

/// The system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant. Used for `--at` and in tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn from_naive_utc(dt: NaiveDateTime) -> Self {
        FixedClock(dt.and_utc())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Weekday};

    #[test]
    fn snapshot_decomposes_utc_instant() {
        let dt = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap().and_hms_opt(23, 10, 42).unwrap();
        let clock = FixedClock::from_naive_utc(dt).snapshot();
        assert_eq!(clock.hour, 23);
        assert_eq!(clock.minute, 10);
        assert_eq!(clock.date, NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());
        assert_eq!(clock.weekday(), Weekday::Mon);
    }

    #[test]
    fn parse_reference_accepts_iso_seconds() {
        let dt = parse_reference("2024-06-03T01:45:00").unwrap();
        assert_eq!(WallClock::from_naive_utc(dt).hour, 1);
        assert!(matches!(parse_reference("2024-06-03 01:45"), Err(FaceError::InvalidReference(_))));
    }

    #[test]
    fn from_parts_rejects_out_of_range() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        assert!(WallClock::from_parts(date, 23, 59).is_some());
        assert!(WallClock::from_parts(date, 24, 0).is_none());
        assert!(WallClock::from_parts(date, 0, 60).is_none());
    }
}
