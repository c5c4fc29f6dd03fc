//! State management module
//!
//! Shared application state handed to the HTTP handlers, the timer snapshot
//! they read, and the commands they send to the timer driver.

pub mod app_state;
pub mod commands;
pub mod timer_state;

// Re-export main types
pub use app_state::{AppState, CommandError};
pub use commands::{ControlAction, SettingsClosed, TimerCommand};
pub use timer_state::TimerSnapshot;
