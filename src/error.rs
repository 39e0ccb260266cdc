use thiserror::Error;

/// Errors raised while assembling a face: reading configuration, parsing zone
/// specs and reference times. The calculator itself cannot fail.
#[derive(Error, Debug)]
pub enum FaceError {
    #[error("unable to read config file {path}: {source}")]
    ConfigRead { path: String, source: std::io::Error },
    #[error("config file parsing error: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("invalid zone '{0}' (expected LABEL=OFFSET or UTC+N)")]
    InvalidZone(String),
    #[error("offset {offset} for zone '{label}' is outside -23..=23")]
    OffsetOutOfRange { label: String, offset: i32 },
    #[error("invalid reference time '{0}' (expected YYYY-MM-DDTHH:MM:SS)")]
    InvalidReference(String),
    #[error("surface error: {0}")]
    Surface(#[from] std::io::Error),
}
