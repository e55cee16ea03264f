//! CLI command definitions for duplicacy-util.
//!
//! This module defines the CLI structure using clap's derive macros.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Environment variable naming an explicit config file.
pub const ENV_CONFIG: &str = "DUPLICACY_UTIL_CONFIG";

/// Wrapper around the duplicacy backup engine
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (default: search ~ and ~/.duplicacy-util)
    #[arg(short, long, global = true, env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Resolve and validate the global configuration (default)
    Check,

    /// Print the resolved configuration without validating it
    Show,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_config_and_command() {
        let cli = Cli::try_parse_from(["duplicacy-util", "--config", "/etc/du.yaml", "show"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/etc/du.yaml")));
        assert_eq!(cli.command, Some(Command::Show));
        assert_eq!(cli.log, "2");
    }

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::try_parse_from(["duplicacy-util", "-v", "--log", "off"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.log, "off");
        assert!(cli.command.is_none());
    }
}
