//! Commands sent from the HTTP layer to the timer driver

use tokio::sync::oneshot;

use super::TimerSnapshot;
use crate::settings::{CloseAction, SettingsError, SettingsForm};

/// User controls on the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    Start,
    PauseToggle,
    Reset,
}

impl ControlAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::PauseToggle => "pause",
            Self::Reset => "reset",
        }
    }
}

/// Outcome of closing the settings dialog
#[derive(Debug, Clone)]
pub struct SettingsClosed {
    pub committed: bool,
    pub snapshot: TimerSnapshot,
}

#[derive(Debug)]
pub enum TimerCommand {
    Control {
        action: ControlAction,
        reply: oneshot::Sender<TimerSnapshot>,
    },
    ReadSettings {
        reply: oneshot::Sender<SettingsForm>,
    },
    CloseSettings {
        action: CloseAction,
        form: SettingsForm,
        reply: oneshot::Sender<Result<SettingsClosed, SettingsError>>,
    },
    /// Unload the timer and stop the driver
    Shutdown,
}
