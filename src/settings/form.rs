//! Settings form: what the settings UI reads and writes back on commit

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{
    config::{keys, parse_bool, parse_minutes},
    Colour, SettingsError, SettingsStore,
};

/// How the settings dialog was closed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloseAction {
    Commit,
    Cancel,
}

/// Minutes as typed by the user; JSON clients may send a number or text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MinutesInput {
    Number(f64),
    Text(String),
}

impl MinutesInput {
    fn as_setting(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.trim().to_string(),
        }
    }
}

/// Values shown in and submitted by the settings form.
///
/// Field names match the settings keys. Fields left as `None` on commit keep
/// their stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SettingsForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minutes: Option<MinutesInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colour: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paused: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paused_flash: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alarm_sound: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autostart: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_count: Option<bool>,
}

impl SettingsForm {
    /// Pre-populate the form from the stored settings
    pub fn from_store(store: &dyn SettingsStore) -> Self {
        let text = |key: &str| store.read(key).filter(|v| !v.is_empty());
        let flag = |key: &str| text(key).and_then(|v| parse_bool(&v));

        Self {
            minutes: text(keys::MINUTES).map(MinutesInput::Text),
            colour: text(keys::COLOUR),
            background: text(keys::BACKGROUND),
            paused: text(keys::PAUSED),
            paused_flash: flag(keys::PAUSED_FLASH),
            message: text(keys::MESSAGE),
            alarm_sound: text(keys::ALARM_SOUND),
            autostart: flag(keys::AUTOSTART),
            negative_count: flag(keys::NEGATIVE_COUNT),
        }
    }

    /// Validate every field, then write them all as one batch.
    ///
    /// Nothing is written if any field is invalid.
    pub fn apply(&self, store: &mut dyn SettingsStore) -> Result<(), SettingsError> {
        let writes = self.validated()?;
        store.write_batch(&writes)?;
        info!("Committed {} settings", writes.len());
        Ok(())
    }

    /// Handle the dialog closing. Returns true when settings were written.
    pub fn close(
        &self,
        action: CloseAction,
        store: &mut dyn SettingsStore,
    ) -> Result<bool, SettingsError> {
        match action {
            CloseAction::Commit => self.apply(store).map(|()| true),
            CloseAction::Cancel => {
                debug!("Settings dialog cancelled, nothing written");
                Ok(false)
            }
        }
    }

    fn validated(&self) -> Result<Vec<(&'static str, String)>, SettingsError> {
        let mut writes = Vec::new();

        if let Some(minutes) = &self.minutes {
            let raw = minutes.as_setting();
            parse_minutes(&raw)?;
            writes.push((keys::MINUTES, raw));
        }

        for (key, value) in [
            (keys::COLOUR, &self.colour),
            (keys::BACKGROUND, &self.background),
            (keys::PAUSED, &self.paused),
        ] {
            if let Some(value) = value {
                let colour = Colour::parse(value).ok_or_else(|| SettingsError::InvalidColour {
                    key,
                    value: value.clone(),
                })?;
                writes.push((key, colour.hex().to_string()));
            }
        }

        for (key, value) in [
            (keys::PAUSED_FLASH, self.paused_flash),
            (keys::AUTOSTART, self.autostart),
            (keys::NEGATIVE_COUNT, self.negative_count),
        ] {
            if let Some(value) = value {
                writes.push((key, value.to_string()));
            }
        }

        if let Some(message) = &self.message {
            writes.push((keys::MESSAGE, message.clone()));
        }
        if let Some(sound) = &self.alarm_sound {
            writes.push((keys::ALARM_SOUND, sound.trim().to_string()));
        }

        Ok(writes)
    }
}
