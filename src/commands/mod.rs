//! Command implementations for taskprompt.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations, and builds the effective config from the config file,
//! the environment, and the global flags (in increasing precedence).

mod render;
mod templates;

use crate::cli::{Cli, Command};
use taskprompt::config::PromptConfig;
use taskprompt::error::Result;
use tracing::debug;

/// Dispatch a command to its implementation.
pub fn dispatch(cli: Cli) -> Result<()> {
    let config = build_config(&cli)?;
    debug!(
        templates_use = %config.templates_use,
        data_dir = ?config.data_dir,
        builtin_dir = %config.builtin_dir.display(),
        "effective config"
    );

    match cli.command {
        Command::Render(args) => {
            println!("{}", render::cmd_render(config, &args)?);
            Ok(())
        }
        Command::Resolve(args) => {
            println!("{}", templates::cmd_resolve(&config, &args)?);
            Ok(())
        }
        Command::Check => {
            let report = templates::cmd_check(&config);
            for line in &report.lines {
                println!("{}", line);
            }
            match report.missing.into_iter().next() {
                Some(err) => Err(err),
                None => Ok(()),
            }
        }
        Command::Operations => {
            print!("{}", templates::cmd_operations());
            Ok(())
        }
    }
}

/// Load the config file (if any), then layer the environment and flags.
fn build_config(cli: &Cli) -> Result<PromptConfig> {
    let base = match &cli.config {
        Some(path) => PromptConfig::load(path)?,
        None => PromptConfig::default(),
    };
    apply_flags(base.with_env()?, cli)
}

/// Apply global flags over an already layered config.
fn apply_flags(mut config: PromptConfig, cli: &Cli) -> Result<PromptConfig> {
    if let Some(set) = &cli.templates_use {
        config.templates_use = set.clone();
    }
    if let Some(dir) = &cli.data_dir {
        config.data_dir = Some(dir.clone());
    }
    if let Some(dir) = &cli.builtin_dir {
        config.builtin_dir = dir.clone();
    }
    if cli.strict {
        config.strict_placeholders = true;
    }
    config.validate()?;
    Ok(config)
}
