//! Config file discovery and parsing.
//!
//! The config file is named `duplicacy-util` with any supported extension.
//! Discovery walks the search directories in order and, within each
//! directory, tries extensions in [`SUPPORTED_EXTENSIONS`] order. The first
//! regular file found wins.

use crate::error::{ConfigError, ConfigResult};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Base name (without extension) of the config file.
pub const CONFIG_FILE_NAME: &str = "duplicacy-util";

/// Extensions tried during discovery, in priority order.
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["json", "toml", "yaml", "yml"];

/// On-disk format of a config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
    Yaml,
}

impl ConfigFormat {
    /// Determine the format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(ConfigFormat::Json),
            "toml" => Some(ConfigFormat::Toml),
            "yaml" | "yml" => Some(ConfigFormat::Yaml),
            _ => None,
        }
    }

    /// Determine the format of `path`, failing for unknown extensions.
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::from_extension(&ext).ok_or_else(|| ConfigError::UnsupportedConfigType {
            path: path.to_path_buf(),
            extension: ext,
        })
    }

    /// Parse `content` into a JSON value.
    fn parse(self, content: &str) -> Result<Value, String> {
        match self {
            ConfigFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            ConfigFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
            ConfigFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        }
    }
}

impl std::fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigFormat::Json => write!(f, "json"),
            ConfigFormat::Toml => write!(f, "toml"),
            ConfigFormat::Yaml => write!(f, "yaml"),
        }
    }
}

/// Search `dirs` for `duplicacy-util.<ext>`, returning the first match.
pub fn find_config_file(dirs: &[PathBuf]) -> Option<PathBuf> {
    for dir in dirs {
        for ext in SUPPORTED_EXTENSIONS {
            let candidate = dir.join(format!("{CONFIG_FILE_NAME}.{ext}"));
            if candidate.is_file() {
                return Some(candidate);
            }
            debug!(path = %candidate.display(), "Config candidate not found");
        }
    }
    None
}

/// Read and parse a config file into a JSON object.
///
/// An empty file yields an empty object. A file whose top-level value is not
/// a mapping is a parse error.
pub fn read_config_file(path: &Path) -> ConfigResult<Value> {
    let format = ConfigFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ConfigFileRead {
        path: path.to_path_buf(),
        source,
    })?;

    if content.trim().is_empty() {
        return Ok(Value::Object(Map::new()));
    }

    match format.parse(&content) {
        Ok(Value::Object(map)) => Ok(Value::Object(map)),
        Ok(Value::Null) => Ok(Value::Object(Map::new())),
        Ok(_) => Err(ConfigError::parse(
            path,
            "top-level value must be a mapping of keys to values",
        )),
        Err(message) => Err(ConfigError::ConfigFileParse {
            path: path.to_path_buf(),
            message,
        }),
    }
}
