//! A world clock face.
//!
//! The face shows a fixed list of zones, each a label and a whole-hour UTC
//! offset, as `HH:MM` rows plus an optional UTC date line. It is refreshed once
//! per minute.
//!
//! ```
//! use chrono::NaiveDate;
//! use worldface::{WallClock, ZoneConfig, compute};
//!
//! let zones = ZoneConfig::parse(&["UTC", "TOK=+9"]).unwrap();
//! let now = WallClock::from_parts(NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(), 23, 10).unwrap();
//! let rows = compute(&now, &zones);
//! assert_eq!(rows[1].text, "08:10");
//! ```

#[macro_use]
mod macros;
mod calc;
mod clock;
mod config;
mod date;
mod error;
mod face;
mod ticker;
mod zone;

pub use calc::{Lines, LocalTime, Reading, ZoneReading, compute, local_hour, reading};
pub use clock::{Clock, FixedClock, REFERENCE_FORMAT, SystemClock, WallClock, parse_reference};
pub use config::{Config, parse_config, parse_config_str};
pub use date::{DATE_LINE_FORMAT, format_date_line};
pub use error::FaceError;
pub use face::{Face, Slot, Surface};
pub use ticker::{run, run_with, until_next_minute};
pub use zone::{DEFAULT_ZONES, MAX_OFFSET_HOURS, Zone, ZoneConfig, abbreviation_offset, offset_in_range};
