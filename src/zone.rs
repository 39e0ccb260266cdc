use crate::error::FaceError;
use serde::Deserialize;

/// Largest offset magnitude the calculator accepts.
pub const MAX_OFFSET_HOURS: i32 = 23;

/// Whether `offset` lies in `-MAX_OFFSET_HOURS..=MAX_OFFSET_HOURS`.
pub fn offset_in_range(offset: i32) -> bool {
    (-MAX_OFFSET_HOURS..=MAX_OFFSET_HOURS).contains(&offset)
}

/// Zones shown when nothing else is configured.
pub const DEFAULT_ZONES: &[(&str, i32)] = &[("UTC", 0), ("BKK", 7)];

/// Well-known abbreviations that imply a whole-hour offset.
///
/// Zones with half-hour offsets (IST, ACST, NPT) have no entry.
pub fn abbreviation_offset(label: &str) -> Option<i32> {
    match label.to_ascii_uppercase().as_str() {
        "UTC" | "GMT" | "Z" => Some(0),
        "BST" | "CET" | "WAT" => Some(1),
        "EET" | "CEST" | "SAST" => Some(2),
        "MSK" | "EAT" => Some(3),
        "GST" => Some(4),
        "PKT" => Some(5),
        "BKK" | "ICT" | "WIB" => Some(7),
        "SGT" | "HKT" | "AWST" => Some(8),
        "JST" | "KST" | "TOK" => Some(9),
        "AEST" => Some(10),
        "NZST" => Some(12),
        "AST" => Some(-4),
        "EST" => Some(-5),
        "CST" => Some(-6),
        "MST" => Some(-7),
        "PST" | "LAX" => Some(-8),
        "AKST" => Some(-9),
        "HST" => Some(-10),
        _ => None,
    }
}

/// One configured zone: a short display label and its whole-hour UTC offset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Zone {
    pub label: String,
    pub offset: i32,
}

impl Zone {
    /// Build a zone without validation. `offset` must lie in -23..=23.
    pub fn new(label: impl Into<String>, offset: i32) -> Self {
        Zone { label: label.into(), offset }
    }

    /// Build a zone, rejecting offsets the calculator does not handle.
    pub fn checked(label: impl Into<String>, offset: i32) -> Result<Self, FaceError> {
        let label = label.into();
        if !offset_in_range(offset) {
            return Err(FaceError::OffsetOutOfRange { label, offset });
        }
        Ok(Zone { label, offset })
    }

    /// Parse a zone spec.
    ///
    /// Accepted forms:
    /// - `TOK=+9`, `LAX=-8`, `home=0`: explicit label and offset.
    /// - `UTC-3`, `GMT+1`: the label carries its own offset.
    /// - `JST`, `PST`: a known whole-hour abbreviation.
    pub fn parse(spec: &str) -> Result<Self, FaceError> {
        let spec = spec.trim();

        if let Some(caps) = regex!(r"^([^=\s]{1,8})\s*=\s*([+-]?\d{1,3})$").captures(spec) {
            let offset = parse_offset(spec, &caps[2])?;
            return Zone::checked(&caps[1], offset);
        }

        if let Some(caps) = regex!(r"^(?i:UTC|GMT)([+-]\d{1,3})$").captures(spec) {
            let offset = parse_offset(spec, &caps[1])?;
            return Zone::checked(spec.to_ascii_uppercase(), offset);
        }

        match abbreviation_offset(spec) {
            Some(offset) => Ok(Zone::new(spec.to_ascii_uppercase(), offset)),
            None => Err(FaceError::InvalidZone(spec.to_string())),
        }
    }
}

fn parse_offset(spec: &str, digits: &str) -> Result<i32, FaceError> {
    digits.parse::<i32>().map_err(|_| FaceError::InvalidZone(spec.to_string()))
}

/// Ordered, immutable list of zones. Index `i` is row `i` on the face.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneConfig {
    zones: Vec<Zone>,
}

impl ZoneConfig {
    pub fn new(zones: Vec<Zone>) -> Self {
        ZoneConfig { zones }
    }

    /// Validate every entry and build the config.
    pub fn checked(zones: Vec<Zone>) -> Result<Self, FaceError> {
        let zones = zones.into_iter().map(|z| Zone::checked(z.label, z.offset)).collect::<Result<_, _>>()?;
        Ok(ZoneConfig { zones })
    }

    /// Parse a list of zone specs, see [`Zone::parse`].
    pub fn parse<S: AsRef<str>>(specs: &[S]) -> Result<Self, FaceError> {
        let zones = specs.iter().map(|s| Zone::parse(s.as_ref())).collect::<Result<_, _>>()?;
        Ok(ZoneConfig { zones })
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Zone> {
        self.zones.iter()
    }
}

impl Default for ZoneConfig {
    fn default() -> Self {
        ZoneConfig { zones: DEFAULT_ZONES.iter().map(|&(label, offset)| Zone::new(label, offset)).collect() }
    }
}

impl<'a> IntoIterator for &'a ZoneConfig {
    type Item = &'a Zone;
    type IntoIter = std::slice::Iter<'a, Zone>;

    fn into_iter(self) -> Self::IntoIter {
        self.zones.iter()
    }
}
