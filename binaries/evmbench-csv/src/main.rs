#![doc = include_str!("../README.md")]
#![allow(
    unused_crate_dependencies,
    reason = "the binary only uses the library's public API"
)]

use std::{io, path::Path};

use anyhow::Context as _;

use evmbench_csv::{config, logging};

fn main() -> anyhow::Result<()> {
    let config = config::read_config_and_args()?;

    logging::init_logging(&config.tracing);

    evmbench_csv::run(Path::new("."), io::stdout().lock())
        .context("failed to build the benchmark comparison report")
}
