//! Validation of resolved settings against the running environment.
//!
//! Checks run in a fixed order and stop at the first failure:
//! 1. the duplicacy binary resolves on the search path
//! 2. the lock directory exists
//! 3. the log directory exists (created first if absent)
//! 4. at least [`MIN_LOG_FILE_COUNT`] log files are retained

use crate::config::{MIN_LOG_FILE_COUNT, ResolvedConfig};
use crate::error::{ConfigError, ConfigResult};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Validates a [`ResolvedConfig`].
#[derive(Debug, Clone)]
pub struct ConfigValidator {
    /// Value of `PATH` used to resolve bare executable names.
    search_path: Option<OsString>,
}

impl ConfigValidator {
    /// Validator using the process `PATH`.
    pub fn new() -> Self {
        Self {
            search_path: std::env::var_os("PATH"),
        }
    }

    /// Validator using an explicit search path.
    pub fn with_search_path(search_path: impl Into<OsString>) -> Self {
        Self {
            search_path: Some(search_path.into()),
        }
    }

    /// Check that `config` describes a usable environment.
    pub fn validate(&self, config: &ResolvedConfig) -> ConfigResult<()> {
        let binary = look_path(&config.binary_path, self.search_path.as_deref())
            .inspect_err(|e| debug!(error = %e, "duplicacy binary not found"))?;
        debug!(binary = %binary.display(), "Resolved duplicacy binary");

        verify_path_exists(&config.lock_directory)?;

        if let Err(e) = create_log_dir(&config.log_directory) {
            debug!(path = %config.log_directory.display(), error = %e, "Could not create log directory");
        }
        verify_path_exists(&config.log_directory)?;

        if config.log_file_retain_count < MIN_LOG_FILE_COUNT {
            let err = ConfigError::RetainCountTooLow {
                count: config.log_file_retain_count,
            };
            debug!(error = %err, "Invalid log file count");
            return Err(err);
        }

        Ok(())
    }
}

impl Default for ConfigValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Locate an executable the way a shell would.
///
/// A name with more than one path component is checked directly. A bare name
/// is looked up in each absolute directory of `search_path`; empty and
/// relative entries are skipped so the current directory is never searched
/// implicitly.
pub fn look_path(name: &Path, search_path: Option<&OsStr>) -> ConfigResult<PathBuf> {
    let not_found = || ConfigError::BinaryNotFound {
        name: name.display().to_string(),
    };

    if name.as_os_str().is_empty() {
        return Err(not_found());
    }

    if name.components().count() > 1 {
        return if is_executable(name) {
            Ok(name.to_path_buf())
        } else {
            Err(not_found())
        };
    }

    search_path
        .into_iter()
        .flat_map(|paths| std::env::split_paths(paths))
        .filter(|dir| {
            let absolute = dir.is_absolute();
            if !absolute {
                debug!(dir = %dir.display(), "Skipping relative search path entry");
            }
            absolute
        })
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
        .ok_or_else(not_found)
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

fn verify_path_exists(path: &Path) -> ConfigResult<()> {
    std::fs::metadata(path)
        .map(|_| ())
        .map_err(|source| ConfigError::PathNotFound {
            path: path.to_path_buf(),
            source,
        })
        .inspect_err(|e| debug!(error = %e, "Required directory missing"))
}

#[cfg(unix)]
fn create_log_dir(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    std::fs::DirBuilder::new()
        .recursive(true)
        .mode(0o755)
        .create(path)
}

#[cfg(not(unix))]
fn create_log_dir(path: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(path)
}
