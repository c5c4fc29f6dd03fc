//! Typed timer configuration read from the settings store

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{SettingsError, SettingsStore};

/// Settings keys and their first-run defaults
pub mod keys {
    pub const MINUTES: &str = "Minutes";
    pub const COLOUR: &str = "Colour";
    pub const BACKGROUND: &str = "Background";
    pub const PAUSED: &str = "Paused";
    pub const PAUSED_FLASH: &str = "PausedFlash";
    pub const MESSAGE: &str = "Message";
    pub const ALARM_SOUND: &str = "AlarmSound";
    pub const AUTOSTART: &str = "Autostart";
    pub const NEGATIVE_COUNT: &str = "NegativeCount";

    /// `(key, default)` pairs in the order they are populated
    pub const DEFAULTS: [(&str, &str); 9] = [
        (MINUTES, "25"),
        (COLOUR, "ffffff"),
        (BACKGROUND, "000000"),
        (PAUSED, "ff0000"),
        (PAUSED_FLASH, "true"),
        (MESSAGE, "Take a break!"),
        (ALARM_SOUND, "alarm_clock_bell"),
        (AUTOSTART, "true"),
        (NEGATIVE_COUNT, "true"),
    ];

    pub fn default_for(key: &str) -> &'static str {
        DEFAULTS
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
            .unwrap_or("")
    }
}

/// A 6-digit lowercase hex colour, stored without a leading `#`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Colour(String);

impl Colour {
    /// Parse `rgb`, `rrggbb`, `#rgb` or `#rrggbb` (any case)
    pub fn parse(input: &str) -> Option<Self> {
        let hex = input.trim().trim_start_matches('#');
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        match hex.len() {
            6 => Some(Self(hex.to_ascii_lowercase())),
            3 => Some(Self(
                hex.chars()
                    .flat_map(|c| [c, c])
                    .collect::<String>()
                    .to_ascii_lowercase(),
            )),
            _ => None,
        }
    }

    /// The bare hex digits, e.g. `ffffff`
    pub fn hex(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Colour {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("not a hex colour: {:?}", value))
    }
}

impl From<Colour> for String {
    fn from(colour: Colour) -> Self {
        colour.0
    }
}

/// Immutable snapshot of the timer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerConfig {
    pub duration_seconds: i64,
    pub autostart: bool,
    pub negative_count_enabled: bool,
    pub text_color: Colour,
    pub background_color: Colour,
    pub paused_color: Colour,
    pub paused_flash_enabled: bool,
    pub alarm_sound_id: String,
    pub message: String,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self::read_from(&super::MemoryStore::new())
    }
}

impl TimerConfig {
    /// Populate absent keys with defaults, then read the configuration.
    ///
    /// Only store write failures are returned; malformed values fall back to
    /// their defaults.
    pub fn load(store: &mut dyn SettingsStore) -> Result<Self, SettingsError> {
        populate_defaults(store)?;
        Ok(Self::read_from(store))
    }

    /// Read the configuration without touching the store
    pub fn read_from(store: &dyn SettingsStore) -> Self {
        let minutes = setting(store, keys::MINUTES);
        let duration_seconds = parse_minutes(&minutes).unwrap_or_else(|e| {
            warn!("{}, using default", e);
            parse_minutes(keys::default_for(keys::MINUTES)).unwrap_or(0)
        });

        Self {
            duration_seconds,
            autostart: read_bool(store, keys::AUTOSTART),
            negative_count_enabled: read_bool(store, keys::NEGATIVE_COUNT),
            text_color: read_colour(store, keys::COLOUR),
            background_color: read_colour(store, keys::BACKGROUND),
            paused_color: read_colour(store, keys::PAUSED),
            paused_flash_enabled: read_bool(store, keys::PAUSED_FLASH),
            alarm_sound_id: setting(store, keys::ALARM_SOUND),
            message: setting(store, keys::MESSAGE),
        }
    }

    /// Relative path of the audio asset for the configured alarm
    pub fn alarm_sound_path(&self) -> String {
        format!("audio/{}.wav", self.alarm_sound_id)
    }
}

/// Write the default for every key that is absent or empty
pub fn populate_defaults(store: &mut dyn SettingsStore) -> Result<(), SettingsError> {
    for (key, default) in keys::DEFAULTS {
        if store.read(key).map_or(true, |v| v.is_empty()) {
            debug!("Populating default setting {}={}", key, default);
            store.write(key, default)?;
        }
    }
    Ok(())
}

/// Convert a minutes string into whole seconds, flooring any fraction
pub fn parse_minutes(input: &str) -> Result<i64, SettingsError> {
    let minutes: f64 = input
        .trim()
        .parse()
        .map_err(|_| SettingsError::InvalidMinutes(input.to_string()))?;

    if !minutes.is_finite() || minutes < 0.0 {
        return Err(SettingsError::InvalidMinutes(input.to_string()));
    }

    Ok((minutes * 60.0).floor() as i64)
}

pub fn parse_bool(input: &str) -> Option<bool> {
    match input.trim().to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Stored value, or the default when absent or empty
fn setting(store: &dyn SettingsStore, key: &str) -> String {
    store
        .read(key)
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| keys::default_for(key).to_string())
}

fn read_bool(store: &dyn SettingsStore, key: &str) -> bool {
    let raw = setting(store, key);
    parse_bool(&raw).unwrap_or_else(|| {
        warn!("Setting {} has non-boolean value {:?}, using default", key, raw);
        parse_bool(keys::default_for(key)).unwrap_or(false)
    })
}

fn read_colour(store: &dyn SettingsStore, key: &str) -> Colour {
    let raw = setting(store, key);
    Colour::parse(&raw).unwrap_or_else(|| {
        warn!("Setting {} has invalid colour {:?}, using default", key, raw);
        Colour(keys::default_for(key).to_string())
    })
}
