//! Key/value settings stores

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use super::SettingsError;

/// String key/value storage backing the widget settings.
///
/// An empty string is treated the same as an absent key by readers.
pub trait SettingsStore: Send {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), SettingsError>;

    /// Write several values at once. Stores that persist override this so a
    /// failure leaves every value unchanged.
    fn write_batch(&mut self, entries: &[(&str, String)]) -> Result<(), SettingsError> {
        for (key, value) in entries {
            self.write(key, value)?;
        }
        Ok(())
    }
}

/// In-memory store, used for tests and ephemeral sessions
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with the given pairs
    pub fn with_values<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl SettingsStore for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON file store holding a flat object of settings.
///
/// Values are kept as strings; numbers and booleans in the file are read as
/// their textual form. The whole map is rewritten on every write using a
/// temp file plus rename, and memory is only updated once that succeeds.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file yields an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref().to_path_buf();
        let values = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            if contents.trim().is_empty() {
                BTreeMap::new()
            } else {
                settings_from_json(serde_json::from_str(&contents)?)
            }
        } else {
            info!("Settings file {} not found, starting with empty settings", path.display());
            BTreeMap::new()
        };

        debug!("Loaded {} settings from {}", values.len(), path.display());
        Ok(Self { path, values })
    }

    fn persist(&self, values: &BTreeMap<String, String>) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(values)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Flatten scalar JSON values to strings; anything else is dropped so the
/// reader falls back to its default.
fn settings_from_json(object: Map<String, Value>) -> BTreeMap<String, String> {
    object
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::String(s) => Some((key, s)),
            Value::Number(n) => Some((key, n.to_string())),
            Value::Bool(b) => Some((key, b.to_string())),
            Value::Null => None,
            other => {
                warn!("Ignoring setting {} with non-scalar value {}", key, other);
                None
            }
        })
        .collect()
}

impl SettingsStore for JsonFileStore {
    fn read(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.write_batch(&[(key, value.to_string())])
    }

    fn write_batch(&mut self, entries: &[(&str, String)]) -> Result<(), SettingsError> {
        let mut values = self.values.clone();
        for (key, value) in entries {
            values.insert(key.to_string(), value.clone());
        }
        self.persist(&values)?;
        self.values = values;
        Ok(())
    }
}
