//! Error types for the dialogue engine.

use kiosk_core::error::KioskError;

/// Errors surfaced by [`DialogResolver`](crate::DialogResolver).
///
/// Classification never fails; only the resources behind the engine can.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("conversation memory unavailable: {0}")]
    MemoryUnavailable(String),
    #[error("catalog error: {0}")]
    Catalog(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<KioskError> for ChatError {
    fn from(err: KioskError) -> Self {
        match err {
            KioskError::Catalog(msg) => ChatError::Catalog(msg),
            KioskError::MemoryUnavailable(msg) => ChatError::MemoryUnavailable(msg),
            KioskError::Config(msg) => ChatError::Config(msg),
            KioskError::Storage(msg) => ChatError::Storage(msg),
            other => ChatError::Storage(other.to_string()),
        }
    }
}
