//! Reconciling the three timing sets and writing the CSV report.

use std::{
    fmt,
    io::{self, Write},
};

use tracing::debug;

use crate::{
    constants::{CSV_HEADER, CSV_SEPARATOR},
    error::EvmbenchError,
    evmone::Strategy,
    timings::Timings,
};

//---------------------------------------------------------------------------------------------------- Row
/// A single benchmark in the report, all times in milliseconds.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Row<'a> {
    pub name: &'a str,
    pub geth: f64,
    pub baseline: f64,
    pub advanced: f64,
}

impl fmt::Display for Row<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            name,
            geth,
            baseline,
            advanced,
        } = self;

        write!(
            f,
            "{name}{CSV_SEPARATOR}{geth}{CSV_SEPARATOR}{baseline}{CSV_SEPARATOR}{advanced}"
        )
    }
}

//---------------------------------------------------------------------------------------------------- Public API
/// Join the `geth` timings with both `evmone` runs.
///
/// Returns one [`Row`] per `reference` benchmark, in `reference` order.
///
/// Only `reference` is checked: benchmarks that exist in
/// `baseline` or `advanced` but not in `reference` are ignored.
///
/// # Errors
/// Returns [`EvmbenchError::Reconciliation`] listing every `reference`
/// benchmark missing from `baseline`, or if there are none, from `advanced`.
pub fn reconcile<'a>(
    reference: &'a Timings,
    baseline: &Timings,
    advanced: &Timings,
) -> Result<Vec<Row<'a>>, EvmbenchError> {
    let mut rows = Vec::with_capacity(reference.len());
    let mut missing_baseline = Vec::new();
    let mut missing_advanced = Vec::new();

    for (name, &geth) in reference {
        match (baseline.get(name), advanced.get(name)) {
            (Some(&baseline), Some(&advanced)) => rows.push(Row {
                name,
                geth,
                baseline,
                advanced,
            }),
            (baseline, advanced) => {
                if baseline.is_none() {
                    missing_baseline.push(name.clone());
                }
                if advanced.is_none() {
                    missing_advanced.push(name.clone());
                }
            }
        }
    }

    for (strategy, missing) in [
        (Strategy::Baseline, missing_baseline),
        (Strategy::Advanced, missing_advanced),
    ] {
        if !missing.is_empty() {
            return Err(EvmbenchError::Reconciliation {
                against: strategy.column(),
                missing,
            });
        }
    }

    let ignored = |timings: &Timings| timings.keys().filter(|k| !reference.contains_key(*k)).count();
    debug!(
        "report: {} rows, ignoring {} baseline-only and {} advanced-only benchmarks",
        rows.len(),
        ignored(baseline),
        ignored(advanced),
    );

    Ok(rows)
}

/// Write the CSV report: [`CSV_HEADER`] followed by one line per [`Row`].
///
/// ```rust
/// # use evmbench_csv::report::{write_csv, Row};
/// let rows = [Row { name: "add", geth: 0.0005, baseline: 0.001, advanced: 0.002 }];
///
/// let mut csv = Vec::new();
/// write_csv(&mut csv, &rows).unwrap();
///
/// assert_eq!(
///     String::from_utf8(csv).unwrap(),
///     "benchmark,geth-evm,evmone-baseline,evmone-advanced\nadd, 0.0005, 0.001, 0.002\n",
/// );
/// ```
///
/// # Errors
/// Returns any error from `writer`.
pub fn write_csv<W: Write>(mut writer: W, rows: &[Row<'_>]) -> io::Result<()> {
    writeln!(writer, "{CSV_HEADER}")?;

    for row in rows {
        writeln!(writer, "{row}")?;
    }

    writer.flush()
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    fn timings(entries: &[(&str, f64)]) -> Timings {
        entries
            .iter()
            .map(|(name, millis)| ((*name).to_owned(), *millis))
            .collect()
    }

    fn csv(rows: &[Row<'_>]) -> String {
        let mut csv = Vec::new();
        write_csv(&mut csv, rows).unwrap();
        String::from_utf8(csv).unwrap()
    }

    #[test]
    fn rows_follow_reference_order() {
        let reference = timings(&[("mul", 3.0), ("add", 0.0005), ("sub", 1.25)]);
        let baseline = timings(&[("add", 0.001), ("sub", 2.5), ("mul", 4.0)]);
        let advanced = timings(&[("sub", 0.5), ("mul", 1e-7), ("add", 0.002)]);

        let rows = reconcile(&reference, &baseline, &advanced).unwrap();

        assert_eq!(rows.len(), reference.len());
        assert_eq!(
            csv(&rows),
            "benchmark,geth-evm,evmone-baseline,evmone-advanced\n\
             mul, 3, 4, 0.0000001\n\
             add, 0.0005, 0.001, 0.002\n\
             sub, 1.25, 2.5, 0.5\n"
        );
    }

    #[test]
    fn empty_reference() {
        let reference = Timings::new();
        let rows = reconcile(&reference, &timings(&[("add", 1.0)]), &Timings::new()).unwrap();

        assert!(rows.is_empty());
        assert_eq!(csv(&rows), "benchmark,geth-evm,evmone-baseline,evmone-advanced\n");
    }

    #[test]
    fn extra_evmone_benchmarks_are_ignored() {
        let reference = timings(&[("add", 1.0)]);
        let baseline = timings(&[("add", 2.0), ("mul", 5.0)]);
        let advanced = timings(&[("exp", 6.0), ("add", 3.0)]);

        let rows = reconcile(&reference, &baseline, &advanced).unwrap();

        assert_eq!(
            rows,
            vec![Row {
                name: "add",
                geth: 1.0,
                baseline: 2.0,
                advanced: 3.0,
            }]
        );
    }

    #[test]
    fn missing_from_baseline() {
        let reference = timings(&[("add", 1.0), ("mul", 1.0), ("sub", 1.0)]);
        let baseline = timings(&[("mul", 1.0)]);
        let advanced = timings(&[("mul", 1.0)]);

        let Err(EvmbenchError::Reconciliation { against, missing }) =
            reconcile(&reference, &baseline, &advanced)
        else {
            panic!("expected a reconciliation error");
        };

        assert_eq!(against, "evmone-baseline");
        assert_eq!(missing, ["add", "sub"]);
    }

    #[test]
    fn missing_from_advanced() {
        let reference = timings(&[("add", 1.0), ("mul", 1.0)]);
        let baseline = timings(&[("add", 1.0), ("mul", 1.0)]);
        let advanced = timings(&[("add", 1.0)]);

        let Err(EvmbenchError::Reconciliation { against, missing }) =
            reconcile(&reference, &baseline, &advanced)
        else {
            panic!("expected a reconciliation error");
        };

        assert_eq!(against, "evmone-advanced");
        assert_eq!(missing, ["mul"]);
    }
}
