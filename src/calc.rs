//! Zone time calculator.
//!
//! Pure arithmetic over a [`WallClock`] snapshot and a [`ZoneConfig`]:
//!
//! - each zone's hour is `utc_hour + offset` wrapped into `0..=23`;
//! - the minute is copied from UTC unchanged (offsets are whole hours);
//! - crossing midnight is not reported, only `HH:MM` is produced.
//!
//! Nothing here keeps state between calls. Every call is a full recomputation
//! from the snapshot it is given.

use std::fmt;

use crate::clock::WallClock;
use crate::date::format_date_line;
use crate::zone::{Zone, ZoneConfig, offset_in_range};

bitflags::bitflags! {
    /// Rows a face shows.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Lines: u8 {
        const ZONES = 1 << 0;
        const DATE  = 1 << 1;
    }
}

impl Default for Lines {
    fn default() -> Self {
        Lines::ZONES
    }
}

/// Wrap `utc_hour + offset` into `0..=23`.
///
/// Preconditions: `utc_hour < 24` and `|offset| <= 23`. Both are checked in
/// debug builds only; config loading rejects bad offsets before they get here.
pub fn local_hour(utc_hour: u32, offset: i32) -> u32 {
    debug_assert!(utc_hour < 24, "utc_hour {utc_hour} out of range");
    debug_assert!(offset_in_range(offset), "offset {offset} out of range");
    (utc_hour as i32 + offset).rem_euclid(24) as u32
}

/// A zone-local time of day. Displays as zero-padded 24-hour `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalTime {
    pub hour: u32,
    pub minute: u32,
}

impl LocalTime {
    pub fn at_offset(clock: &WallClock, offset: i32) -> Self {
        LocalTime { hour: local_hour(clock.hour, offset), minute: clock.minute }
    }
}

impl fmt::Display for LocalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Computed time for one configured zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneReading<'a> {
    pub zone: &'a Zone,
    pub time: LocalTime,
    /// `time` rendered as `HH:MM`.
    pub text: String,
}

impl ZoneReading<'_> {
    pub fn label(&self) -> &str {
        &self.zone.label
    }
}

/// Everything a face displays for one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reading<'a> {
    /// One entry per configured zone, in config order. Empty when
    /// [`Lines::ZONES`] is not requested.
    pub zones: Vec<ZoneReading<'a>>,
    /// UTC date line, present when [`Lines::DATE`] is requested.
    pub date: Option<String>,
}

/// Compute every zone's local time. The result has exactly one entry per zone.
pub fn compute<'a>(clock: &WallClock, zones: &'a ZoneConfig) -> Vec<ZoneReading<'a>> {
    zones
        .iter()
        .map(|zone| {
            let time = LocalTime::at_offset(clock, zone.offset);
            ZoneReading { zone, time, text: time.to_string() }
        })
        .collect()
}

/// Compute the rows selected by `lines`.
pub fn reading<'a>(clock: &WallClock, zones: &'a ZoneConfig, lines: Lines) -> Reading<'a> {
    let zone_rows = if lines.contains(Lines::ZONES) { compute(clock, zones) } else { Vec::new() };
    let date = lines.contains(Lines::DATE).then(|| format_date_line(clock.date));
    Reading { zones: zone_rows, date }
}
