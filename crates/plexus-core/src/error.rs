//! Error types for Plexus

use thiserror::Error;

/// The main error type for Plexus operations
#[derive(Debug, Error)]
pub enum PlexusError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),

    #[error("Image error: {0}")]
    ImageError(String),

    #[error("Render error: {0}")]
    RenderError(String),
}

/// Result type alias for Plexus operations
pub type Result<T> = std::result::Result<T, PlexusError>;

impl From<toml::de::Error> for PlexusError {
    fn from(err: toml::de::Error) -> Self {
        PlexusError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for PlexusError {
    fn from(err: toml::ser::Error) -> Self {
        PlexusError::TomlSerError(err.to_string())
    }
}
