//! `evmbench-csv` config.
//!
//! Command line arguments take priority over the
//! config file, which takes priority over the defaults.
//!
//! The input files are fixed, see [`crate::constants`].

use std::{fs::read_to_string, path::Path};

use anyhow::Context as _;
use clap::Parser;
use serde::Deserialize;
use tracing::debug;

mod args;
mod tracing_config;

pub use args::Args;
pub use tracing_config::TracingConfig;

/// Reads the args & config file, returning a [`Config`].
///
/// # Errors
/// Returns an error if `--config-file` was given
/// and the file cannot be read or is not a valid [`Config`].
pub fn read_config_and_args() -> anyhow::Result<Config> {
    let args = Args::parse();

    let config = match &args.config_file {
        Some(config_file) => Config::read_from_path(config_file)?,
        None => Config::default(),
    };

    Ok(args.apply_args(config))
}

/// The config for all of `evmbench-csv`.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    /// Configuration for the logging system, tracing.
    pub tracing: TracingConfig,
}

impl Config {
    /// Attempts to read a config file in [`toml`] format from the given [`Path`].
    ///
    /// # Errors
    /// Will return an [`Err`] if the file cannot be read or if the file is not a valid [`toml`] config.
    pub fn read_from_path(file: impl AsRef<Path>) -> anyhow::Result<Self> {
        let file = file.as_ref();

        let file_text = read_to_string(file)
            .with_context(|| format!("failed to read config file: {}", file.display()))?;

        let config = toml::from_str(&file_text)
            .with_context(|| format!("failed to parse config file: {}", file.display()))?;

        debug!("using config at: {}", file.display());

        Ok(config)
    }
}
