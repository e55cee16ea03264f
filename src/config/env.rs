//! Environment variable bindings for the config keys.
//!
//! Each recognized key is bound to one variable. Empty values are treated
//! the same as an unset variable.

use super::types::{KEY_DUPLICACY_PATH, KEY_LOCK_DIRECTORY, KEY_LOG_DIRECTORY, KEY_LOG_FILE_COUNT};
use crate::error::{ConfigError, ConfigResult};
use serde_json::{Map, Value};

/// Environment variable overriding `duplicacypath`.
pub const ENV_DUPLICACY_PATH: &str = "DUPLICACY_UTIL_DUPLICACY_PATH";
/// Environment variable overriding `lockdirectory`.
pub const ENV_LOCK_DIRECTORY: &str = "DUPLICACY_UTIL_LOCK_DIRECTORY";
/// Environment variable overriding `logdirectory`.
pub const ENV_LOG_DIRECTORY: &str = "DUPLICACY_UTIL_LOG_DIRECTORY";
/// Environment variable overriding `logfilecount`.
pub const ENV_LOG_FILE_COUNT: &str = "DUPLICACY_UTIL_LOG_FILE_COUNT";

/// Raw environment overrides, captured once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    pub duplicacy_path: Option<String>,
    pub lock_directory: Option<String>,
    pub log_directory: Option<String>,
    pub log_file_count: Option<String>,
}

impl EnvOverrides {
    /// Create empty overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Capture overrides through an arbitrary lookup function.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|v: &String| !v.is_empty());
        Self {
            duplicacy_path: get(ENV_DUPLICACY_PATH),
            lock_directory: get(ENV_LOCK_DIRECTORY),
            log_directory: get(ENV_LOG_DIRECTORY),
            log_file_count: get(ENV_LOG_FILE_COUNT),
        }
    }

    pub fn with_duplicacy_path(mut self, path: impl Into<String>) -> Self {
        self.duplicacy_path = Some(path.into());
        self
    }

    pub fn with_lock_directory(mut self, dir: impl Into<String>) -> Self {
        self.lock_directory = Some(dir.into());
        self
    }

    pub fn with_log_directory(mut self, dir: impl Into<String>) -> Self {
        self.log_directory = Some(dir.into());
        self
    }

    pub fn with_log_file_count(mut self, count: impl Into<String>) -> Self {
        self.log_file_count = Some(count.into());
        self
    }

    /// Whether any override is present.
    pub fn is_empty(&self) -> bool {
        self.duplicacy_path.is_none()
            && self.lock_directory.is_none()
            && self.log_directory.is_none()
            && self.log_file_count.is_none()
    }

    /// Convert to an overlay layer keyed by config key names.
    pub fn to_layer(&self) -> ConfigResult<Value> {
        let mut layer = Map::new();

        let strings = [
            (KEY_DUPLICACY_PATH, &self.duplicacy_path),
            (KEY_LOCK_DIRECTORY, &self.lock_directory),
            (KEY_LOG_DIRECTORY, &self.log_directory),
        ];
        for (key, value) in strings {
            if let Some(value) = value {
                layer.insert(key.to_string(), Value::String(value.clone()));
            }
        }

        if let Some(raw) = &self.log_file_count {
            let count: i64 = raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: ENV_LOG_FILE_COUNT.to_string(),
                value: raw.clone(),
            })?;
            layer.insert(KEY_LOG_FILE_COUNT.to_string(), Value::from(count));
        }

        Ok(Value::Object(layer))
    }
}
