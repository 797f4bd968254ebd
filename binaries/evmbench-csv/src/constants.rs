//! General constants used throughout `evmbench-csv`.

/// The `geth evm --bench` trace log, read from the current directory.
pub const GETH_LOG_FILE: &str = "geth_bench_output.log";

/// The `evmone-bench` JSON report, read from the current directory.
pub const EVMONE_LOG_FILE: &str = "evmone_bench_output.log";

/// Separator between the segments of a benchmark path, in both inputs.
pub const PATH_SEPARATOR: char = '/';

/// The first line of the report.
pub const CSV_HEADER: &str = "benchmark,geth-evm,evmone-baseline,evmone-advanced";

/// Separator between the fields of a report row.
///
/// The header uses a bare `,`, rows have a space after it.
pub const CSV_SEPARATOR: &str = ", ";

