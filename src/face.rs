use log::{debug, info};

use crate::calc::{Lines, reading};
use crate::clock::WallClock;
use crate::error::FaceError;
use crate::zone::ZoneConfig;

/// Addresses one label on a surface. Zone rows are numbered in config order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Name(usize),
    Time(usize),
    Date,
}

/// The label-rendering collaborator. It owns layout, fonts and colors; the face
/// only hands it strings.
pub trait Surface {
    /// Replace the text of one label.
    fn set_text(&mut self, slot: Slot, text: &str);

    /// Flush pending label changes to the screen.
    fn present(&mut self) -> Result<(), FaceError> {
        Ok(())
    }

    /// Remove every label. Called once at teardown.
    fn clear(&mut self) -> Result<(), FaceError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct LabelPair {
    name: String,
    time: String,
}

/// A running face: the zone table plus the labels currently on screen.
///
/// Created at startup with [`Face::new`], refreshed once per tick and torn
/// down with [`Face::teardown`].
#[derive(Debug)]
pub struct Face {
    zones: ZoneConfig,
    lines: Lines,
    labels: Vec<LabelPair>,
    date: Option<String>,
}

impl Face {
    /// Create one name/time label pair per zone and write the names.
    pub fn new<S: Surface + ?Sized>(zones: ZoneConfig, lines: Lines, surface: &mut S) -> Self {
        info!("init");

        let mut labels = Vec::new();
        if lines.contains(Lines::ZONES) {
            for (idx, zone) in zones.iter().enumerate() {
                surface.set_text(Slot::Name(idx), &zone.label);
                labels.push(LabelPair { name: zone.label.clone(), time: String::new() });
            }
        }

        Face { zones, lines, labels, date: None }
    }

    pub fn zones(&self) -> &ZoneConfig {
        &self.zones
    }

    pub fn lines(&self) -> Lines {
        self.lines
    }

    /// Texts currently shown, as `(name, time)` pairs.
    pub fn rows(&self) -> impl Iterator<Item = (&str, &str)> {
        self.labels.iter().map(|l| (l.name.as_str(), l.time.as_str()))
    }

    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    /// Recompute every row from `now` and push changed labels to `surface`.
    ///
    /// Labels are only recorded as shown once `present` succeeds, so a failed
    /// refresh is redrawn in full by the next one. Returns the number of labels
    /// that changed.
    pub fn refresh<S: Surface + ?Sized>(&mut self, now: &WallClock, surface: &mut S) -> Result<usize, FaceError> {
        let out = reading(now, &self.zones, self.lines);

        let mut times = Vec::new();
        for (idx, (label, row)) in self.labels.iter().zip(out.zones).enumerate() {
            if label.time != row.text {
                surface.set_text(Slot::Time(idx), &row.text);
                times.push((idx, row.text));
            }
        }

        let date_changed = out.date != self.date;
        if date_changed {
            if let Some(date) = &out.date {
                surface.set_text(Slot::Date, date);
            }
        }
        let changed = times.len() + usize::from(date_changed && out.date.is_some());

        debug!("refresh at {:02}:{:02} UTC, {} label(s) changed", now.hour, now.minute, changed);
        surface.present()?;

        for (idx, text) in times {
            self.labels[idx].time = text;
        }
        if date_changed {
            self.date = out.date;
        }
        Ok(changed)
    }

    /// Drop the labels and clear the surface.
    pub fn teardown<S: Surface + ?Sized>(self, surface: &mut S) -> Result<(), FaceError> {
        info!("deinit");
        surface.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zone::Zone;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemorySurface {
        labels: HashMap<Slot, String>,
        writes: usize,
        presented: usize,
        cleared: bool,
        fail_next_present: bool,
    }

    impl Surface for MemorySurface {
        fn set_text(&mut self, slot: Slot, text: &str) {
            self.labels.insert(slot, text.to_string());
            self.writes += 1;
        }

        fn present(&mut self) -> Result<(), FaceError> {
            if std::mem::take(&mut self.fail_next_present) {
                return Err(FaceError::Surface(std::io::Error::other("display busy")));
            }
            self.presented += 1;
            Ok(())
        }

        fn clear(&mut self) -> Result<(), FaceError> {
            self.labels.clear();
            self.cleared = true;
            Ok(())
        }
    }

    fn at(hour: u32, minute: u32) -> WallClock {
        WallClock::from_parts(NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(), hour, minute).unwrap()
    }

    fn zones() -> ZoneConfig {
        ZoneConfig::new(vec![Zone::new("UTC", 0), Zone::new("TOK", 9), Zone::new("LAX", -8)])
    }

    #[test]
    fn new_writes_names_only() {
        let mut surface = MemorySurface::default();
        let face = Face::new(zones(), Lines::ZONES, &mut surface);

        assert_eq!(surface.labels.get(&Slot::Name(1)).map(String::as_str), Some("TOK"));
        assert!(!surface.labels.contains_key(&Slot::Time(0)));
        assert_eq!(face.rows().count(), 3);
    }

    #[test]
    fn refresh_fills_one_pair_per_zone() {
        let mut surface = MemorySurface::default();
        let mut face = Face::new(zones(), Lines::ZONES, &mut surface);

        let changed = face.refresh(&at(23, 10), &mut surface).unwrap();
        assert_eq!(changed, 3);
        assert_eq!(surface.labels[&Slot::Time(0)], "23:10");
        assert_eq!(surface.labels[&Slot::Time(1)], "08:10");
        assert_eq!(surface.labels[&Slot::Time(2)], "15:10");
        assert!(!surface.labels.contains_key(&Slot::Date));
        assert_eq!(surface.presented, 1);

        let rows: Vec<(&str, &str)> = face.rows().collect();
        assert_eq!(rows, [("UTC", "23:10"), ("TOK", "08:10"), ("LAX", "15:10")]);
    }

    #[test]
    fn refresh_skips_unchanged_labels() {
        let mut surface = MemorySurface::default();
        let mut face = Face::new(zones(), Lines::ZONES | Lines::DATE, &mut surface);

        assert_eq!(face.refresh(&at(9, 0), &mut surface).unwrap(), 4);
        let writes = surface.writes;
        assert_eq!(face.refresh(&at(9, 0), &mut surface).unwrap(), 0);
        assert_eq!(surface.writes, writes);
        assert_eq!(face.refresh(&at(9, 1), &mut surface).unwrap(), 3);
    }

    #[test]
    fn date_label_only_when_enabled() {
        let mut surface = MemorySurface::default();
        let mut face = Face::new(zones(), Lines::ZONES | Lines::DATE, &mut surface);
        face.refresh(&at(12, 0), &mut surface).unwrap();

        assert_eq!(surface.labels[&Slot::Date], "Mon 3 Jun");
        assert_eq!(face.date(), Some("Mon 3 Jun"));
    }

    #[test]
    fn failed_present_is_redrawn_on_retry() {
        let mut surface = MemorySurface::default();
        let mut face = Face::new(zones(), Lines::ZONES | Lines::DATE, &mut surface);
        face.refresh(&at(9, 0), &mut surface).unwrap();

        surface.fail_next_present = true;
        assert!(matches!(face.refresh(&at(9, 1), &mut surface), Err(FaceError::Surface(_))));
        let rows: Vec<(&str, &str)> = face.rows().collect();
        assert_eq!(rows, [("UTC", "09:00"), ("TOK", "18:00"), ("LAX", "01:00")]);

        assert_eq!(face.refresh(&at(9, 1), &mut surface).unwrap(), 3);
        assert_eq!(surface.presented, 2);
        assert_eq!(surface.labels[&Slot::Time(1)], "18:01");
        assert_eq!(face.rows().nth(2), Some(("LAX", "01:01")));
    }

    #[test]
    fn failed_first_present_keeps_date_pending() {
        let mut surface = MemorySurface { fail_next_present: true, ..MemorySurface::default() };
        let mut face = Face::new(zones(), Lines::ZONES | Lines::DATE, &mut surface);

        assert!(face.refresh(&at(12, 0), &mut surface).is_err());
        assert_eq!(face.date(), None);
        assert_eq!(face.refresh(&at(12, 0), &mut surface).unwrap(), 4);
        assert_eq!(face.date(), Some("Mon 3 Jun"));
    }

    #[test]
    fn teardown_clears_surface() {
        let mut surface = MemorySurface::default();
        let mut face = Face::new(zones(), Lines::ZONES, &mut surface);
        face.refresh(&at(12, 0), &mut surface).unwrap();
        face.teardown(&mut surface).unwrap();

        assert!(surface.cleared);
        assert!(surface.labels.is_empty());
    }
}
