//! Settings error types

use thiserror::Error;

/// Errors raised while reading, validating or persisting widget settings.
///
/// Missing or malformed values found at load time never surface here; they
/// are replaced by defaults. Only user input rejected at commit time and
/// store I/O failures are reported.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// `Minutes` was not a finite, non-negative number.
    #[error("Invalid minutes value: {0:?}")]
    InvalidMinutes(String),

    /// A colour field was not 3 or 6 hex digits.
    #[error("Invalid colour for {key}: {value:?}")]
    InvalidColour { key: &'static str, value: String },

    #[error("Settings IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl SettingsError {
    /// Whether the error was caused by user input rather than the store.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidMinutes(_) | Self::InvalidColour { .. })
    }
}
