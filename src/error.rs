//! Structured error types for configuration bootstrap.

use serde::Serialize;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Resolution errors
    HomeDirUnavailable,
    ConfigFileError,
    InvalidValue,

    // Validation errors
    BinaryNotFound,
    PathNotFound,
    RetainCountTooLow,
}

impl ErrorCode {
    /// Process exit status used by the binary for this class of failure.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorCode::HomeDirUnavailable => 2,
            ErrorCode::ConfigFileError | ErrorCode::InvalidValue => 3,
            ErrorCode::BinaryNotFound => 4,
            ErrorCode::PathNotFound => 5,
            ErrorCode::RetainCountTooLow => 6,
        }
    }
}

/// Failure while resolving or validating the global configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to determine home directory")]
    HomeDir,

    #[error("failed to read config file {}: {source}", .path.display())]
    ConfigFileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {}: {message}", .path.display())]
    ConfigFileParse { path: PathBuf, message: String },

    #[error("unsupported config type {extension:?} for {}", .path.display())]
    UnsupportedConfigType { path: PathBuf, extension: String },

    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("environment variable {var} has invalid value {value:?}: expected an integer")]
    InvalidEnv { var: String, value: String },

    #[error("exec: {name:?}: executable file not found in $PATH")]
    BinaryNotFound { name: String },

    #[error("stat {}: {source}", .path.display())]
    PathNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("logfilecount must have at least two log files saved (got {count})")]
    RetainCountTooLow { count: i64 },
}

impl ConfigError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ConfigError::HomeDir => ErrorCode::HomeDirUnavailable,
            ConfigError::ConfigFileRead { .. }
            | ConfigError::ConfigFileParse { .. }
            | ConfigError::UnsupportedConfigType { .. } => ErrorCode::ConfigFileError,
            ConfigError::InvalidValue { .. } | ConfigError::InvalidEnv { .. } => {
                ErrorCode::InvalidValue
            }
            ConfigError::BinaryNotFound { .. } => ErrorCode::BinaryNotFound,
            ConfigError::PathNotFound { .. } => ErrorCode::PathNotFound,
            ConfigError::RetainCountTooLow { .. } => ErrorCode::RetainCountTooLow,
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.code().exit_code()
    }

    // Convenience constructors

    pub fn parse(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        ConfigError::ConfigFileParse {
            path: path.into(),
            message: err.to_string(),
        }
    }

    pub fn invalid_value(key: &str, err: impl std::fmt::Display) -> Self {
        ConfigError::InvalidValue {
            key: key.to_string(),
            message: err.to_string(),
        }
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
