use std::{io, path::PathBuf};

use evmbench_helper::duration::ParseError;

/// An unrecoverable error while building the report.
#[derive(Debug, thiserror::Error)]
pub enum EvmbenchError {
    /// An input did not have the expected structure.
    #[error("malformed {input_name}: {reason}")]
    MalformedInput {
        /// The input file the error came from.
        input_name: &'static str,
        /// What was wrong.
        reason: String,
    },

    /// A duration string did not follow the shorthand duration grammar.
    #[error("invalid duration {duration:?} in {input_name}")]
    Duration {
        /// The input file the error came from.
        input_name: &'static str,
        /// The offending duration string.
        duration: String,
        source: ParseError,
    },

    /// The `evmone` report is not valid JSON or is missing fields.
    #[error("failed to parse {input_name} as a benchmark report")]
    Json {
        /// The input file the error came from.
        input_name: &'static str,
        source: serde_json::Error,
    },

    /// `geth` benchmarks are missing from an `evmone` run.
    #[error("{} geth-evm benchmark(s) missing from {against}: {missing:?}", missing.len())]
    Reconciliation {
        /// The report column the benchmarks are missing from.
        against: &'static str,
        /// The missing benchmark names, in `geth` log order.
        missing: Vec<String>,
    },

    /// An input file could not be read.
    #[error("failed to read {}", path.display())]
    Read { path: PathBuf, source: io::Error },

    /// The report could not be written.
    #[error("failed to write report")]
    Write(#[from] io::Error),
}
