//! Global configuration resolution.
//!
//! Settings are resolved from three layers, lowest to highest priority:
//! 1. **Defaults** - `duplicacy`, `~/.duplicacy-util`, `~/.duplicacy-util/log`, `5`
//! 2. **File** - an explicit path, or `duplicacy-util.{json,toml,yaml,yml}`
//!    found in `~` then `~/.duplicacy-util`
//! 3. **Environment** - variables bound to each key
//!
//! Empty strings and zero never override a lower layer.
//!
//! ## Keys
//! - `duplicacypath` - duplicacy executable (path or bare name)
//! - `lockdirectory` - lock directory, must already exist
//! - `logdirectory` - log directory, created on demand
//! - `logfilecount` - number of log files to retain (at least 2)
//!
//! ## Environment Variables
//! - `DUPLICACY_UTIL_DUPLICACY_PATH`
//! - `DUPLICACY_UTIL_LOCK_DIRECTORY`
//! - `DUPLICACY_UTIL_LOG_DIRECTORY`
//! - `DUPLICACY_UTIL_LOG_FILE_COUNT`

mod env;
mod files;
mod loader;
mod merge;
mod types;

pub use env::{
    ENV_DUPLICACY_PATH, ENV_LOCK_DIRECTORY, ENV_LOG_DIRECTORY, ENV_LOG_FILE_COUNT, EnvOverrides,
};
pub use files::{
    CONFIG_FILE_NAME, ConfigFormat, SUPPORTED_EXTENSIONS, find_config_file, read_config_file,
};
pub use loader::{ConfigPaths, ConfigResolver};
pub use merge::{is_unset, lowercase_keys, overlay, overlay_all};
pub use types::*;
