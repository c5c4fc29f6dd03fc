//! Work timer core
//!
//! The countdown state machine, its display formatting and the blinking
//! indicators it drives. Nothing here touches a clock; the runtime driver
//! feeds ticks in.

pub mod activity;
pub mod blinker;
pub mod display;
pub mod engine;
pub mod host;

// Re-export main types
pub use activity::{Activity, ActivityHandle};
pub use blinker::{BlinkStep, Blinker};
pub use display::{colors_for, format, Colors, FormattedTime};
pub use engine::{Phase, TimerEngine, TimerState};
pub use host::{Frame, GadgetHost, HostError, ViewState};
