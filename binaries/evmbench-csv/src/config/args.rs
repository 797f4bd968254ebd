use std::{path::PathBuf, str::FromStr};

use tracing::level_filters::LevelFilter;

use super::Config;

/// `evmbench-csv` args.
///
/// Reads `geth_bench_output.log` and `evmone_bench_output.log` from the
/// current directory and prints a CSV comparison table to stdout.
#[derive(clap::Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// The minimum log level written to stderr.
    ///
    /// Overrides `tracing.level` from the config file.
    /// One of "off", "error", "warn", "info", "debug", "trace".
    #[arg(long, value_parser = LevelFilter::from_str)]
    pub log_level: Option<LevelFilter>,

    /// The PATH of an `evmbench-csv` TOML config file.
    #[arg(long)]
    pub config_file: Option<PathBuf>,
}

impl Args {
    /// Apply the [`Args`] to the given [`Config`].
    pub const fn apply_args(&self, mut config: Config) -> Config {
        if let Some(level) = self.log_level {
            config.tracing.level = level;
        }

        config
    }
}
