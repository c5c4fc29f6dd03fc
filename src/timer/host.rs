//! Boundary between the timer engine and whatever presents it

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::settings::Colour;

/// Everything the view needs to draw the timer, applied verbatim
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frame {
    pub text: String,
    pub is_negative: bool,
    pub text_color: Colour,
    pub background: Colour,
    pub visible: bool,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HostError {
    #[error("Display element unavailable: {0}")]
    DisplayUnavailable(String),
    #[error("Flyout unavailable: {0}")]
    FlyoutUnavailable(String),
}

/// Display, flyout and audio services supplied by the widget container
pub trait GadgetHost {
    fn render(&mut self, frame: &Frame) -> Result<(), HostError>;

    /// Show the flyout panel with `message`
    fn show_flyout(&mut self, message: &str) -> Result<(), HostError>;

    fn hide_flyout(&mut self) -> Result<(), HostError>;

    /// Fire-and-forget playback of a sound asset, e.g. `audio/alarm_clock_bell.wav`
    fn play_sound(&mut self, asset_path: &str);
}

/// Host that keeps the latest presented state in memory.
///
/// Used by the HTTP service as its view model and by tests to observe what
/// the engine presented.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ViewState {
    pub frame: Option<Frame>,
    pub frames_rendered: u64,
    pub flyout_visible: bool,
    pub flyout_message: Option<String>,
    pub sounds_played: u64,
    pub last_sound: Option<String>,
}

impl GadgetHost for ViewState {
    fn render(&mut self, frame: &Frame) -> Result<(), HostError> {
        self.frame = Some(frame.clone());
        self.frames_rendered += 1;
        Ok(())
    }

    fn show_flyout(&mut self, message: &str) -> Result<(), HostError> {
        self.flyout_visible = true;
        self.flyout_message = Some(message.to_string());
        Ok(())
    }

    fn hide_flyout(&mut self) -> Result<(), HostError> {
        self.flyout_visible = false;
        Ok(())
    }

    fn play_sound(&mut self, asset_path: &str) {
        info!("Playing alarm sound {}", asset_path);
        self.sounds_played += 1;
        self.last_sound = Some(asset_path.to_string());
    }
}
