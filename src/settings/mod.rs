//! Widget settings module
//!
//! Key/value settings storage, the typed timer configuration read from it,
//! and the settings form that writes user edits back.

pub mod config;
pub mod error;
pub mod form;
pub mod store;

// Re-export main types
pub use config::{Colour, TimerConfig};
pub use error::SettingsError;
pub use form::{CloseAction, MinutesInput, SettingsForm};
pub use store::{JsonFileStore, MemoryStore, SettingsStore};
