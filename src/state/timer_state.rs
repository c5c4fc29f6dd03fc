//! Published timer snapshot

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::timer::{Activity, Frame, Phase, TimerEngine, ViewState};

/// Point-in-time view of the timer, published by the driver after every event
#[derive(Debug, Clone, Serialize)]
pub struct TimerSnapshot {
    pub phase: Phase,
    pub remaining_seconds: i64,
    pub duration_seconds: i64,
    pub alarm_fired: bool,
    pub negative_count_enabled: bool,
    pub frame: Frame,
    pub flyout_visible: bool,
    pub flyout_message: Option<String>,
    pub sounds_played: u64,
    pub active_activities: Vec<Activity>,
    pub updated_at: DateTime<Utc>,
}

impl TimerSnapshot {
    /// Capture the current engine and view state
    pub fn capture(engine: &TimerEngine<ViewState>) -> Self {
        let view = engine.host();
        Self {
            phase: engine.phase(),
            remaining_seconds: engine.remaining_seconds(),
            duration_seconds: engine.config().duration_seconds,
            alarm_fired: engine.alarm_fired(),
            negative_count_enabled: engine.config().negative_count_enabled,
            frame: view.frame.clone().unwrap_or_else(|| engine.frame()),
            flyout_visible: view.flyout_visible,
            flyout_message: view.flyout_message.clone(),
            sounds_played: view.sounds_played,
            active_activities: engine.active_activities(),
            updated_at: Utc::now(),
        }
    }

    /// Whether a repeating activity is registered
    pub fn is_active(&self, activity: Activity) -> bool {
        self.active_activities.contains(&activity)
    }
}
