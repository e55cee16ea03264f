//! Configuration resolver with layered overrides.
//!
//! Resolves the global settings from three layers, overlaid key by key (see
//! [`super::merge`]):
//! 1. **Defaults** - rooted at the user's home directory
//! 2. **File** - an explicit file, or `duplicacy-util.<ext>` found by search
//! 3. **Environment** - the `DUPLICACY_UTIL_*` bindings
//!
//! Defaults stay typed; only the file and environment layers go through
//! JSON, so a home directory that is not valid UTF-8 still resolves.

use super::env::EnvOverrides;
use super::files::{find_config_file, read_config_file};
use super::merge::{lowercase_keys, overlay_all};
use super::types::{
    APP_DIR_NAME, KEY_DUPLICACY_PATH, KEY_LOCK_DIRECTORY, KEY_LOG_DIRECTORY, KEY_LOG_FILE_COUNT,
    ResolvedConfig,
};
use crate::error::{ConfigError, ConfigResult};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Directories used to locate the config file.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// The user's home directory; defaults are rooted here.
    pub home: PathBuf,
    /// Directories searched for an implicit config file, in order.
    pub search_dirs: Vec<PathBuf>,
}

impl ConfigPaths {
    /// Discover paths from the current user's home directory.
    pub fn discover() -> ConfigResult<Self> {
        Self::from_home_dir(dirs::home_dir())
    }

    /// Build paths from the result of a home directory lookup.
    pub fn from_home_dir(home: Option<PathBuf>) -> ConfigResult<Self> {
        let home = home.ok_or(ConfigError::HomeDir)?;
        Ok(Self::with_home(home))
    }

    /// Search `home`, then `home/.duplicacy-util`.
    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        let home = home.into();
        let search_dirs = vec![home.clone(), home.join(APP_DIR_NAME)];
        Self { home, search_dirs }
    }
}

/// Resolves [`ResolvedConfig`] from defaults, a config file, and the environment.
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    paths: ConfigPaths,
    env: EnvOverrides,
}

impl ConfigResolver {
    /// Resolver for the current user and process environment.
    pub fn discover() -> ConfigResult<Self> {
        Ok(Self::new(ConfigPaths::discover()?).with_env(EnvOverrides::from_env()))
    }

    /// Resolver with explicit paths and no environment overrides.
    pub fn new(paths: ConfigPaths) -> Self {
        Self {
            paths,
            env: EnvOverrides::default(),
        }
    }

    /// Set the environment overrides.
    pub fn with_env(mut self, env: EnvOverrides) -> Self {
        self.env = env;
        self
    }

    pub fn paths(&self) -> &ConfigPaths {
        &self.paths
    }

    /// Resolve the global settings.
    ///
    /// An empty `explicit_path` counts as absent. When a path is given the
    /// file must exist and parse; otherwise a missing or broken config file
    /// leaves the defaults in place.
    pub fn resolve(&self, explicit_path: Option<&Path>) -> ConfigResult<ResolvedConfig> {
        let explicit_path = explicit_path.filter(|p| !p.as_os_str().is_empty());

        let mut layers = Vec::new();

        let config_file = match explicit_path {
            Some(path) => {
                let layer = read_config_file(path).inspect_err(|e| {
                    debug!(path = %path.display(), error = %e, "Explicit config file failed to load");
                })?;
                layers.push(file_layer(layer));
                Some(path.to_path_buf())
            }
            None => self.load_implicit(&mut layers),
        };

        if let Some(ref path) = config_file {
            info!(path = %path.display(), "Using global config");
        }

        if !self.env.is_empty() {
            debug!(env = ?self.env, "Applying environment overrides");
        }
        layers.push(self.env.to_layer()?);

        // Unset values never survive the overlay, so any key present here
        // overrides its default.
        let merged = match overlay_all(layers) {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        let mut config = ResolvedConfig::defaults(&self.paths.home);
        if let Some(path) = field(&merged, KEY_DUPLICACY_PATH)? {
            config.binary_path = path;
        }
        if let Some(dir) = field(&merged, KEY_LOCK_DIRECTORY)? {
            config.lock_directory = dir;
        }
        if let Some(dir) = field(&merged, KEY_LOG_DIRECTORY)? {
            config.log_directory = dir;
        }
        if let Some(count) = field(&merged, KEY_LOG_FILE_COUNT)? {
            config.log_file_retain_count = count;
        }
        config.config_file = config_file;

        Ok(config)
    }

    /// Search for an implicit config file and push its layer if it loads.
    fn load_implicit(&self, layers: &mut Vec<Value>) -> Option<PathBuf> {
        let Some(path) = find_config_file(&self.paths.search_dirs) else {
            debug!(dirs = ?self.paths.search_dirs, "No config file found, using defaults");
            return None;
        };

        match read_config_file(&path) {
            Ok(layer) => {
                layers.push(file_layer(layer));
                Some(path)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Ignoring unreadable config file");
                None
            }
        }
    }
}

/// Normalize a parsed config file into an overlay layer.
///
/// Keys are lowercased and a quoted integer count (`logfilecount: "3"`) is
/// read as a number, so `"0"` is unset like `0`.
fn file_layer(layer: Value) -> Value {
    let mut layer = lowercase_keys(layer);
    if let Some(count) = layer.get_mut(KEY_LOG_FILE_COUNT)
        && let Some(n) = count.as_str().and_then(|s| s.trim().parse::<i64>().ok())
    {
        *count = Value::from(n);
    }
    layer
}

/// Deserialize one key of the merged settings, if present.
fn field<T: DeserializeOwned>(merged: &Map<String, Value>, key: &str) -> ConfigResult<Option<T>> {
    merged
        .get(key)
        .map(|value| serde_json::from_value(value.clone()))
        .transpose()
        .map_err(|e| ConfigError::invalid_value(key, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_with_home_search_order() {
        let paths = ConfigPaths::with_home("/home/bob");
        assert_eq!(
            paths.search_dirs,
            vec![
                PathBuf::from("/home/bob"),
                PathBuf::from("/home/bob/.duplicacy-util")
            ]
        );
    }

    #[test]
    fn test_missing_home_is_home_dir_error() {
        let err = ConfigPaths::from_home_dir(None).unwrap_err();
        assert!(matches!(err, ConfigError::HomeDir));
    }

    #[test]
    fn test_from_home_dir() {
        let paths = ConfigPaths::from_home_dir(Some(PathBuf::from("/home/bob"))).unwrap();
        assert_eq!(paths.home, PathBuf::from("/home/bob"));
        assert_eq!(paths.search_dirs.len(), 2);
    }

    #[test]
    fn test_file_layer_reads_quoted_count() {
        let layer = file_layer(serde_json::json!({"LogFileCount": " 3 ", "lockdirectory": "7"}));
        assert_eq!(
            layer,
            serde_json::json!({"logfilecount": 3, "lockdirectory": "7"})
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_home_resolves() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let home = PathBuf::from(OsStr::from_bytes(b"/nonexistent/h\xffome"));
        let resolver = ConfigResolver::new(ConfigPaths::with_home(&home));

        let config = resolver.resolve(None).unwrap();
        assert_eq!(config, ResolvedConfig::defaults(&home));
    }

    #[test]
    fn test_defaults_only() {
        let temp = TempDir::new().unwrap();
        let resolver = ConfigResolver::new(ConfigPaths::with_home(temp.path()));

        let config = resolver.resolve(None).unwrap();
        assert_eq!(config, ResolvedConfig::defaults(temp.path()));
    }

    #[test]
    fn test_empty_explicit_path_means_search() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("duplicacy-util.yaml"), "logfilecount: 9\n").unwrap();
        let resolver = ConfigResolver::new(ConfigPaths::with_home(temp.path()));

        let config = resolver.resolve(Some(Path::new(""))).unwrap();
        assert_eq!(config.log_file_retain_count, 9);
    }

    #[test]
    fn test_wrong_type_is_invalid_value() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("cfg.yaml");
        std::fs::write(&file, "logfilecount: many\n").unwrap();
        let resolver = ConfigResolver::new(ConfigPaths::with_home(temp.path()));

        let err = resolver.resolve(Some(&file)).unwrap_err();
        match err {
            ConfigError::InvalidValue { key, .. } => assert_eq!(key, KEY_LOG_FILE_COUNT),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_env_beats_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("cfg.json");
        std::fs::write(&file, r#"{"logdirectory": "/from/file", "logfilecount": 3}"#).unwrap();
        let resolver = ConfigResolver::new(ConfigPaths::with_home(temp.path()))
            .with_env(EnvOverrides::new().with_log_directory("/from/env"));

        let config = resolver.resolve(Some(&file)).unwrap();
        assert_eq!(config.log_directory, PathBuf::from("/from/env"));
        assert_eq!(config.log_file_retain_count, 3);
    }
}
