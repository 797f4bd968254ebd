//! `evmone-bench` JSON report parsing.
//!
//! `evmone-bench --benchmark_format=json` writes a Google Benchmark report
//! where every benchmark runs twice, once per interpreter [`Strategy`]:
//!
//! ```json
//! {
//!   "benchmarks": [
//!     { "name": "baseline/execute/synth/add/min_stack", "cpu_time": 1034.5, "time_unit": "ns" },
//!     { "name": "advanced/execute/synth/add/min_stack", "cpu_time": 2011.0, "time_unit": "ns" }
//!   ]
//! }
//! ```
//!
//! Only `name`, `cpu_time` and `time_unit` are read, other fields are ignored.

use std::fmt;

use serde::Deserialize;
use tracing::{debug, trace};

use evmbench_helper::duration::parse_millis;

use crate::{
    constants::{EVMONE_LOG_FILE, PATH_SEPARATOR},
    error::EvmbenchError,
    timings::Timings,
};

//---------------------------------------------------------------------------------------------------- Constants
/// The strategy tag selecting [`Strategy::Advanced`].
pub const ADVANCED_TAG: &str = "advanced";

/// Index of the first path segment that is part of the benchmark name.
pub const BENCHMARK_NAME_SEGMENT: usize = 3;

/// Joins the two name segments of a benchmark, e.g. `add` + `min_stack`.
pub const BENCHMARK_NAME_JOINER: char = '_';

//---------------------------------------------------------------------------------------------------- Strategy
/// The `evmone` interpreter a benchmark ran on.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// The baseline interpreter, and any tag other than [`ADVANCED_TAG`].
    Baseline,
    /// The advanced interpreter.
    Advanced,
}

impl Strategy {
    /// Map the first segment of a benchmark name to its [`Strategy`].
    ///
    /// ```rust
    /// # use evmbench_csv::evmone::Strategy;
    /// assert_eq!(Strategy::from_tag("advanced"), Strategy::Advanced);
    /// assert_eq!(Strategy::from_tag("baseline"), Strategy::Baseline);
    /// assert_eq!(Strategy::from_tag("anything"), Strategy::Baseline);
    /// ```
    pub fn from_tag(tag: &str) -> Self {
        if tag == ADVANCED_TAG {
            Self::Advanced
        } else {
            Self::Baseline
        }
    }

    /// The report column holding this strategy's timings.
    pub const fn column(self) -> &'static str {
        match self {
            Self::Baseline => "evmone-baseline",
            Self::Advanced => "evmone-advanced",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

//---------------------------------------------------------------------------------------------------- Report
/// Subset of a Google Benchmark JSON report.
#[derive(Debug, Clone, Deserialize)]
struct BenchmarkReport {
    benchmarks: Vec<BenchmarkEntry>,
}

/// Subset of a single Google Benchmark run.
#[derive(Debug, Clone, Deserialize)]
struct BenchmarkEntry {
    /// `/` separated, e.g. `advanced/execute/synth/add/min_stack`.
    name: String,
    cpu_time: f64,
    /// e.g. `ns`, `us`, `ms`.
    time_unit: String,
}

//---------------------------------------------------------------------------------------------------- Public API
/// Parse an `evmone` JSON report into `(baseline, advanced)` timings.
///
/// If a benchmark name appears more than once within
/// the same [`Strategy`] the last entry wins.
///
/// # Errors
/// - the report is not JSON, or an entry lacks `name`, `cpu_time` or `time_unit`
/// - a name is too short, see [`benchmark_name`]
/// - `cpu_time` + `time_unit` is not a valid shorthand duration
pub fn parse_benchmark_report(report: &str) -> Result<(Timings, Timings), EvmbenchError> {
    let report = serde_json::from_str::<BenchmarkReport>(report).map_err(|source| {
        EvmbenchError::Json {
            input_name: EVMONE_LOG_FILE,
            source,
        }
    })?;

    let mut baseline = Timings::new();
    let mut advanced = Timings::new();

    for BenchmarkEntry {
        name,
        cpu_time,
        time_unit,
    } in report.benchmarks
    {
        let (strategy, benchmark) = benchmark_name(&name)?;

        let duration = format!("{cpu_time}{time_unit}");
        let millis = parse_millis(&duration).map_err(|source| EvmbenchError::Duration {
            input_name: EVMONE_LOG_FILE,
            duration,
            source,
        })?;

        trace!("evmone: {name} -> {strategy}: {benchmark} -> {millis}ms");

        let timings = match strategy {
            Strategy::Baseline => &mut baseline,
            Strategy::Advanced => &mut advanced,
        };

        if let Some(previous) = timings.insert(benchmark, millis) {
            debug!("evmone: {name} appears more than once in {strategy}, replacing {previous}ms with {millis}ms");
        }
    }

    debug!(
        "evmone: parsed {} baseline and {} advanced benchmarks",
        baseline.len(),
        advanced.len()
    );

    Ok((baseline, advanced))
}

/// Split an `evmone` benchmark name into its [`Strategy`] and report name.
///
/// Segments from [`BENCHMARK_NAME_SEGMENT`] onward form the name:
/// one segment is used as is, otherwise the first two are joined
/// with [`BENCHMARK_NAME_JOINER`] and the rest are dropped.
///
/// ```rust
/// # use evmbench_csv::evmone::{benchmark_name, Strategy};
/// assert_eq!(
///     benchmark_name("advanced/execute/synth/add/min_stack").unwrap(),
///     (Strategy::Advanced, "add_min_stack".to_string()),
/// );
/// assert_eq!(
///     benchmark_name("baseline/execute/main/blake2b").unwrap(),
///     (Strategy::Baseline, "blake2b".to_string()),
/// );
/// assert!(benchmark_name("baseline/execute/main").is_err());
/// ```
///
/// # Errors
/// Returns [`EvmbenchError::MalformedInput`] if `name`
/// has no segment at [`BENCHMARK_NAME_SEGMENT`].
pub fn benchmark_name(name: &str) -> Result<(Strategy, String), EvmbenchError> {
    let segments = name.split(PATH_SEPARATOR).collect::<Vec<&str>>();

    // `split` always yields at least one segment.
    let strategy = Strategy::from_tag(segments[0]);

    let benchmark = match segments.get(BENCHMARK_NAME_SEGMENT..).unwrap_or_default() {
        [] => {
            return Err(EvmbenchError::MalformedInput {
                input_name: EVMONE_LOG_FILE,
                reason: format!(
                    "benchmark name {name:?} has no segment at index {BENCHMARK_NAME_SEGMENT}"
                ),
            })
        }
        [only] => (*only).to_owned(),
        [first, second, ..] => format!("{first}{BENCHMARK_NAME_JOINER}{second}"),
    };

    Ok((strategy, benchmark))
}
