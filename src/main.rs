//! duplicacy-util
//!
//! Resolves and validates the global configuration before any backup work.

use anyhow::Result;
use clap::Parser;
use duplicacy_util::cli::{Cli, Command};
use duplicacy_util::config::{ConfigResolver, ResolvedConfig};
use duplicacy_util::error::ConfigError;
use duplicacy_util::logging::{self, LogTarget};
use duplicacy_util::validate::ConfigValidator;
use std::process::ExitCode;
use tracing::debug;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            // Config failures carry their own exit status
            let code = e
                .downcast_ref::<ConfigError>()
                .map_or(1, |err| err.exit_code());
            ExitCode::from(code as u8)
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    logging::init(&LogTarget::parse(&cli.log), cli.verbose)?;

    let config = ConfigResolver::discover()?.resolve(cli.config.as_deref())?;

    match cli.command.unwrap_or(Command::Check) {
        Command::Check => {
            if let Some(path) = config.config_file() {
                println!("Using global config: {}", path.display());
            }
            ConfigValidator::new().validate(&config)?;
            debug!(?config, "Global configuration is valid");
        }
        Command::Show => {
            // stdout carries only the YAML document
            if let Some(path) = config.config_file() {
                eprintln!("Using global config: {}", path.display());
            }
            print_config(&config)?;
        }
    }

    Ok(())
}

fn print_config(config: &ResolvedConfig) -> Result<()> {
    print!("{}", serde_yaml::to_string(config)?);
    Ok(())
}
