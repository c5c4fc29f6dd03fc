//! Work Timer - a countdown work timer served over HTTP
//!
//! This library provides the countdown engine (pause, overtime counting,
//! blinking indicators, one-shot alarm and flyout), the widget settings it
//! reads, and the HTTP surface that presents it.

pub mod config;
pub mod settings;
pub mod timer;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use settings::TimerConfig;
pub use state::AppState;
pub use timer::TimerEngine;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
