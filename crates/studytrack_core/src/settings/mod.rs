//! Generic key-value settings surface.
//!
//! # Responsibility
//! - Define the settings contract used for user-editable configuration.
//! - Provide an in-memory implementation for tests and a JSON-file
//!   implementation for desktop-style deployments.
//!
//! Platform-native backends (SharedPreferences, NSUserDefaults, registry)
//! remain collaborators behind the `AppSettings` trait.

use serde_json::Value;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub type SettingsResult<T> = Result<T, SettingsError>;

#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Serde(serde_json::Error),
}

impl Display for SettingsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "settings io failure: {err}"),
            Self::Serde(err) => write!(f, "settings serialization failure: {err}"),
        }
    }
}

impl Error for SettingsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Serde(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value)
    }
}

/// Key-value settings store for user-editable configuration.
///
/// Reads fall back to the caller-supplied default when the key is absent or
/// holds a value of a different type. Writes persist immediately.
pub trait AppSettings: Send + Sync {
    fn get_string(&self, key: &str, default: &str) -> String;
    fn put_string(&self, key: &str, value: &str) -> SettingsResult<()>;
    fn get_bool(&self, key: &str, default: bool) -> bool;
    fn put_bool(&self, key: &str, value: bool) -> SettingsResult<()>;
    fn get_int(&self, key: &str, default: i64) -> i64;
    fn put_int(&self, key: &str, value: i64) -> SettingsResult<()>;
    fn remove(&self, key: &str) -> SettingsResult<()>;
}

/// Volatile settings store; the default for tests and in-memory apps.
#[derive(Default)]
pub struct MemorySettings {
    values: Mutex<BTreeMap<String, Value>>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self, key: &str) -> Option<Value> {
        self.values
            .lock()
            .ok()
            .and_then(|values| values.get(key).cloned())
    }

    fn write(&self, key: &str, value: Value) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), value);
        }
    }
}

impl AppSettings for MemorySettings {
    fn get_string(&self, key: &str, default: &str) -> String {
        match self.read(key) {
            Some(Value::String(value)) => value,
            _ => default.to_string(),
        }
    }

    fn put_string(&self, key: &str, value: &str) -> SettingsResult<()> {
        self.write(key, Value::String(value.to_string()));
        Ok(())
    }

    fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.read(key) {
            Some(Value::Bool(value)) => value,
            _ => default,
        }
    }

    fn put_bool(&self, key: &str, value: bool) -> SettingsResult<()> {
        self.write(key, Value::Bool(value));
        Ok(())
    }

    fn get_int(&self, key: &str, default: i64) -> i64 {
        match self.read(key) {
            Some(Value::Number(value)) => value.as_i64().unwrap_or(default),
            _ => default,
        }
    }

    fn put_int(&self, key: &str, value: i64) -> SettingsResult<()> {
        self.write(key, Value::Number(value.into()));
        Ok(())
    }

    fn remove(&self, key: &str) -> SettingsResult<()> {
        if let Ok(mut values) = self.values.lock() {
            values.remove(key);
        }
        Ok(())
    }
}

/// Settings store persisted as a single JSON object on disk.
///
/// The whole map is rewritten on every put, which keeps the file trivially
/// consistent for the handful of keys this layer manages.
pub struct JsonFileSettings {
    path: PathBuf,
    values: Mutex<BTreeMap<String, Value>>,
}

impl JsonFileSettings {
    /// Opens (or creates) a JSON settings file at `path`.
    ///
    /// # Errors
    /// - Returns an error when the file exists but cannot be read or parsed.
    pub fn open(path: impl AsRef<Path>) -> SettingsResult<Self> {
        let path = path.as_ref().to_path_buf();
        let values = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            if raw.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&raw)?
            }
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    fn read(&self, key: &str) -> Option<Value> {
        self.values
            .lock()
            .ok()
            .and_then(|values| values.get(key).cloned())
    }

    fn mutate(
        &self,
        apply: impl FnOnce(&mut BTreeMap<String, Value>),
    ) -> SettingsResult<()> {
        let mut values = match self.values.lock() {
            Ok(values) => values,
            Err(poisoned) => poisoned.into_inner(),
        };
        apply(&mut values);
        let serialized = serde_json::to_string_pretty(&*values)?;
        std::fs::write(&self.path, serialized)?;
        Ok(())
    }
}

impl AppSettings for JsonFileSettings {
    fn get_string(&self, key: &str, default: &str) -> String {
        match self.read(key) {
            Some(Value::String(value)) => value,
            _ => default.to_string(),
        }
    }

    fn put_string(&self, key: &str, value: &str) -> SettingsResult<()> {
        self.mutate(|values| {
            values.insert(key.to_string(), Value::String(value.to_string()));
        })
    }

    fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.read(key) {
            Some(Value::Bool(value)) => value,
            _ => default,
        }
    }

    fn put_bool(&self, key: &str, value: bool) -> SettingsResult<()> {
        self.mutate(|values| {
            values.insert(key.to_string(), Value::Bool(value));
        })
    }

    fn get_int(&self, key: &str, default: i64) -> i64 {
        match self.read(key) {
            Some(Value::Number(value)) => value.as_i64().unwrap_or(default),
            _ => default,
        }
    }

    fn put_int(&self, key: &str, value: i64) -> SettingsResult<()> {
        self.mutate(|values| {
            values.insert(key.to_string(), Value::Number(value.into()));
        })
    }

    fn remove(&self, key: &str) -> SettingsResult<()> {
        self.mutate(|values| {
            values.remove(key);
        })
    }
}
