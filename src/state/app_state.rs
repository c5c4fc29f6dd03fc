//! Main application state management

use std::{sync::Mutex, time::Instant};
use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{info, warn};

use super::{ControlAction, SettingsClosed, TimerCommand, TimerSnapshot};
use crate::settings::{CloseAction, SettingsError, SettingsForm};

/// Failure to get a command through to the timer driver
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Timer driver is not running")]
    DriverUnavailable,
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// State shared by the HTTP handlers.
///
/// The timer itself lives in the driver task; handlers talk to it through
/// the command channel and read the latest published snapshot.
#[derive(Debug)]
pub struct AppState {
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Mutex<Option<String>>,
    pub last_action_time: Mutex<Option<DateTime<Utc>>>,
    /// Channel for timer commands
    pub commands: mpsc::Sender<TimerCommand>,
    /// Latest timer snapshot
    pub snapshots: watch::Receiver<TimerSnapshot>,
}

impl AppState {
    pub fn new(
        port: u16,
        host: String,
        commands: mpsc::Sender<TimerCommand>,
        snapshots: watch::Receiver<TimerSnapshot>,
    ) -> Self {
        Self {
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
            commands,
            snapshots,
        }
    }

    /// Send a start/pause/reset to the timer and wait for the resulting snapshot
    pub async fn control(&self, action: ControlAction) -> Result<TimerSnapshot, CommandError> {
        info!("Timer control: {}", action.as_str());
        let (reply, rx) = oneshot::channel();
        self.send(TimerCommand::Control { action, reply }).await?;
        let snapshot = rx.await.map_err(|_| CommandError::DriverUnavailable)?;
        self.record_action(action.as_str());
        Ok(snapshot)
    }

    /// Current settings form values
    pub async fn read_settings(&self) -> Result<SettingsForm, CommandError> {
        let (reply, rx) = oneshot::channel();
        self.send(TimerCommand::ReadSettings { reply }).await?;
        rx.await.map_err(|_| CommandError::DriverUnavailable)
    }

    /// Close the settings dialog, committing or discarding `form`
    pub async fn close_settings(
        &self,
        action: CloseAction,
        form: SettingsForm,
    ) -> Result<SettingsClosed, CommandError> {
        let (reply, rx) = oneshot::channel();
        self.send(TimerCommand::CloseSettings { action, form, reply }).await?;
        let closed = rx.await.map_err(|_| CommandError::DriverUnavailable)??;
        if closed.committed {
            self.record_action("settings");
        }
        Ok(closed)
    }

    /// Ask the driver to unload the timer and exit
    pub async fn shutdown(&self) {
        if self.commands.send(TimerCommand::Shutdown).await.is_err() {
            warn!("Timer driver already stopped");
        }
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> TimerSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    async fn send(&self, command: TimerCommand) -> Result<(), CommandError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| CommandError::DriverUnavailable)
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }
}
