//! duplicacy-util configuration bootstrap.
//!
//! Resolves and validates the global settings used to drive the `duplicacy`
//! backup engine: where the binary lives, where lock and log files go, and
//! how many log files to keep.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod validate;

use config::{ConfigResolver, ResolvedConfig};
use error::ConfigResult;
use std::path::Path;
use validate::ConfigValidator;

/// Resolve the global settings and verify they are usable.
///
/// `explicit_path` is the config file given on the command line, if any.
/// Returns the first error encountered.
pub fn load_global_config(explicit_path: Option<&Path>) -> ConfigResult<ResolvedConfig> {
    let config = ConfigResolver::discover()?.resolve(explicit_path)?;
    ConfigValidator::new().validate(&config)?;
    Ok(config)
}
