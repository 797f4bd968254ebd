#![doc = include_str!("../README.md")]

pub mod config;
pub mod constants;
pub mod error;
pub mod evmone;
pub mod geth;
pub mod logging;
pub mod report;
pub mod timings;

use std::{
    fs,
    io::{BufWriter, Write},
    path::Path,
};

use tracing::{debug, info};

use crate::{
    constants::{EVMONE_LOG_FILE, GETH_LOG_FILE},
    error::EvmbenchError,
};

/// What `main()` does:
/// 1. Read both input files from `dir`
/// 2. Parse the `geth` trace log into the reference timings
/// 3. Parse the `evmone` report into the baseline and advanced timings
/// 4. Reconcile all three and write the CSV report to `out`
///
/// Nothing is written to `out` unless every step before 4 succeeds.
///
/// # Errors
/// Returns the first error hit, there is no partial report.
pub fn run<W: Write>(dir: &Path, out: W) -> Result<(), EvmbenchError> {
    let geth_log = read_input(dir, GETH_LOG_FILE)?;
    let evmone_log = read_input(dir, EVMONE_LOG_FILE)?;

    let reference = geth::parse_trace_log(&geth_log)?;
    let (baseline, advanced) = evmone::parse_benchmark_report(&evmone_log)?;

    let rows = report::reconcile(&reference, &baseline, &advanced)?;
    report::write_csv(BufWriter::new(out), &rows)?;

    info!("wrote {} benchmarks", rows.len());

    Ok(())
}

/// Read an input file fully into memory.
fn read_input(dir: &Path, file: &str) -> Result<String, EvmbenchError> {
    let path = dir.join(file);
    debug!("reading {}", path.display());

    fs::read_to_string(&path).map_err(|source| EvmbenchError::Read { path, source })
}
