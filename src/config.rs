use log::warn;
use serde::Deserialize;

use crate::calc::Lines;
use crate::error::FaceError;
use crate::zone::{Zone, ZoneConfig};

/// A zone in the config file: either a spec string (`"TOK=+9"`) or a table
/// with `label` and `offset`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ZoneEntry {
    Spec(String),
    Table(Zone),
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    zones: Option<Vec<ZoneEntry>>,
    date_line: Option<bool>,
    color: Option<bool>,
}

/// Settings for a face, after layering the config file over defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub zones: ZoneConfig,
    pub date_line: bool,
    /// `None` leaves the choice to the terminal.
    pub color: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Config { zones: ZoneConfig::default(), date_line: false, color: None }
    }
}

impl Config {
    pub fn lines(&self) -> Lines {
        if self.date_line { Lines::ZONES | Lines::DATE } else { Lines::ZONES }
    }
}

/// Parse config file contents. Absent keys keep their defaults.
pub fn parse_config_str(contents: &str) -> Result<Config, FaceError> {
    let parsed: ConfigFile = toml::from_str(contents)?;
    let mut config = Config::default();

    if let Some(entries) = parsed.zones {
        let zones = entries
            .into_iter()
            .map(|entry| match entry {
                ZoneEntry::Spec(spec) => Zone::parse(&spec),
                ZoneEntry::Table(zone) => Zone::checked(zone.label, zone.offset),
            })
            .collect::<Result<Vec<_>, _>>()?;
        config.zones = ZoneConfig::new(zones);
    }
    if let Some(date_line) = parsed.date_line {
        config.date_line = date_line
    }
    if parsed.color.is_some() {
        config.color = parsed.color
    }

    Ok(config)
}

/// Read and parse a config file. A missing file falls back to defaults.
pub fn parse_config<P>(path: P) -> Result<Config, FaceError>
where
    P: AsRef<std::path::Path>,
{
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(contents) => parse_config_str(&contents),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            warn!("config file {} not found, using default config", path.display());
            Ok(Config::default())
        }
        Err(source) => Err(FaceError::ConfigRead { path: path.display().to_string(), source }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(parse_config_str("").unwrap(), Config::default());
    }

    #[test]
    fn zones_as_tables_and_specs() {
        let config = parse_config_str(
            r#"
            date_line = true
            color = false
            zones = [
                { label = "TOK", offset = 9 },
                "LAX=-8",
                "UTC-3",
            ]
            "#,
        )
        .unwrap();

        assert_eq!(
            config.zones.zones(),
            [Zone::new("TOK", 9), Zone::new("LAX", -8), Zone::new("UTC-3", -3)]
        );
        assert!(config.date_line);
        assert_eq!(config.color, Some(false));
        assert_eq!(config.lines(), Lines::ZONES | Lines::DATE);
    }

    #[test]
    fn array_of_tables() {
        let config = parse_config_str(
            r#"
            [[zones]]
            label = "NYC"
            offset = -5
            "#,
        )
        .unwrap();
        assert_eq!(config.zones.zones(), [Zone::new("NYC", -5)]);
    }

    #[test]
    fn out_of_range_offset_is_an_error() {
        let err = parse_config_str("zones = [{ label = \"BAD\", offset = 25 }]").unwrap_err();
        assert!(matches!(err, FaceError::OffsetOutOfRange { offset: 25, .. }));

        let err = parse_config_str("zones = [{ label = \"BAD\", offset = -2147483648 }]").unwrap_err();
        assert!(matches!(err, FaceError::OffsetOutOfRange { offset: i32::MIN, .. }));
    }

    #[test]
    fn malformed_file_is_an_error() {
        assert!(matches!(parse_config_str("date_line = \"yes\""), Err(FaceError::ConfigParse(_))));
        assert!(matches!(parse_config_str("refresh = 5"), Err(FaceError::ConfigParse(_))));
    }

    #[test]
    fn unknown_zone_key_is_an_error() {
        let err = parse_config_str("zones = [{ label = \"X\", offset = 1, dst = true }]").unwrap_err();
        assert!(matches!(err, FaceError::ConfigParse(_)));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let config = parse_config("/nonexistent/worldface/config.toml").unwrap();
        assert_eq!(config, Config::default());
    }
}
