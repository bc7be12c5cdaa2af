use thiserror::Error;

/// Top-level error type for the Kiosk system.
///
/// Only resource-layer failures live here: configuration, catalog loading,
/// and the conversation store. Classification never produces an error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum KioskError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Conversation memory unavailable: {0}")]
    MemoryUnavailable(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for KioskError {
    fn from(err: toml::de::Error) -> Self {
        KioskError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for KioskError {
    fn from(err: toml::ser::Error) -> Self {
        KioskError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for KioskError {
    fn from(err: serde_json::Error) -> Self {
        KioskError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Kiosk operations.
pub type Result<T> = std::result::Result<T, KioskError>;
