//! Configuration types and defaults.

use serde::Serialize;
use std::path::{Path, PathBuf};

/// Config key for the duplicacy binary path.
pub const KEY_DUPLICACY_PATH: &str = "duplicacypath";
/// Config key for the lock directory.
pub const KEY_LOCK_DIRECTORY: &str = "lockdirectory";
/// Config key for the log directory.
pub const KEY_LOG_DIRECTORY: &str = "logdirectory";
/// Config key for the number of log files to retain.
pub const KEY_LOG_FILE_COUNT: &str = "logfilecount";

/// All recognized top-level keys.
pub const KNOWN_KEYS: [&str; 4] = [
    KEY_DUPLICACY_PATH,
    KEY_LOCK_DIRECTORY,
    KEY_LOG_DIRECTORY,
    KEY_LOG_FILE_COUNT,
];

/// Name of the per-user state directory under the home directory.
pub const APP_DIR_NAME: &str = ".duplicacy-util";

/// Minimum number of log files that must be retained.
pub const MIN_LOG_FILE_COUNT: i64 = 2;

fn default_binary_path() -> PathBuf {
    PathBuf::from("duplicacy")
}

fn default_log_file_count() -> i64 {
    5
}

/// Global settings resolved from defaults, config file, and environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedConfig {
    /// Path or bare name of the duplicacy executable.
    #[serde(rename = "duplicacypath")]
    pub binary_path: PathBuf,

    /// Directory for lock files. Must already exist.
    #[serde(rename = "lockdirectory")]
    pub lock_directory: PathBuf,

    /// Directory for log files. Created on demand.
    #[serde(rename = "logdirectory")]
    pub log_directory: PathBuf,

    /// Number of log files to retain.
    #[serde(rename = "logfilecount")]
    pub log_file_retain_count: i64,

    /// Config file the settings were read from, if any.
    #[serde(skip)]
    pub config_file: Option<PathBuf>,
}

impl ResolvedConfig {
    /// Hardcoded defaults rooted at `home`.
    pub fn defaults(home: &Path) -> Self {
        let app_dir = home.join(APP_DIR_NAME);
        Self {
            binary_path: default_binary_path(),
            log_directory: app_dir.join("log"),
            lock_directory: app_dir,
            log_file_retain_count: default_log_file_count(),
            config_file: None,
        }
    }

    /// Get the config file path that was used.
    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_rooted_at_home() {
        let config = ResolvedConfig::defaults(Path::new("/home/alice"));

        assert_eq!(config.binary_path, PathBuf::from("duplicacy"));
        assert_eq!(
            config.lock_directory,
            PathBuf::from("/home/alice/.duplicacy-util")
        );
        assert_eq!(
            config.log_directory,
            PathBuf::from("/home/alice/.duplicacy-util/log")
        );
        assert_eq!(config.log_file_retain_count, 5);
        assert!(config.config_file().is_none());
    }

    #[test]
    fn test_serializes_with_file_key_names() {
        let config = ResolvedConfig::defaults(Path::new("/home/alice"));
        let value = serde_json::to_value(&config).unwrap();
        let obj = value.as_object().unwrap();

        for key in KNOWN_KEYS {
            assert!(obj.contains_key(key), "missing key {key}");
        }
        assert_eq!(obj.len(), KNOWN_KEYS.len());
    }
}
