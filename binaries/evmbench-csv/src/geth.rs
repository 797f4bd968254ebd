//! `geth evm --bench` trace log parsing.
//!
//! The log is a sequence of trace blocks, one per benchmark run,
//! each starting at a [`TRACE_MARKER`]:
//!
//! ```text
//! 0x<output> bench/<name>/<input>
//! EVM gas used:    <gas>
//! execution time:  <elapsed>
//! allocations:     <count>
//! ...
//! ```
//!
//! Empty lines are ignored, then:
//! - line [`TRACE_HEADER_LINE`] is a [`PATH_SEPARATOR`] separated path,
//!   segment [`TRACE_NAME_SEGMENT`] of it is the benchmark name
//! - line [`TRACE_ELAPSED_LINE`] is a [`TRACE_ELAPSED_LABEL_LEN`] character
//!   label followed by the elapsed time as a shorthand duration string
//!
//! The last block in the log is treated as incomplete and skipped.

use evmbench_helper::duration::parse_millis;
use tracing::{debug, trace};

use crate::{
    constants::{GETH_LOG_FILE, PATH_SEPARATOR},
    error::EvmbenchError,
    timings::Timings,
};

//---------------------------------------------------------------------------------------------------- Constants
/// The token that starts every trace block.
pub const TRACE_MARKER: &str = "0x";

/// Index of the (non-empty) line holding the benchmark path.
pub const TRACE_HEADER_LINE: usize = 0;

/// Index of the path segment holding the benchmark name.
pub const TRACE_NAME_SEGMENT: usize = 1;

/// Index of the (non-empty) line holding the elapsed time.
pub const TRACE_ELAPSED_LINE: usize = 2;

/// Length in characters of the fixed-width label in front of the elapsed time.
///
/// `"execution time:  "`.
pub const TRACE_ELAPSED_LABEL_LEN: usize = 17;

//---------------------------------------------------------------------------------------------------- Public API
/// Parse a whole `geth` trace log into benchmark name -> milliseconds.
///
/// If a benchmark name appears more than once the last block wins.
///
/// # Errors
/// Any malformed block fails the whole log, see [`parse_trace_block`].
pub fn parse_trace_log(log: &str) -> Result<Timings, EvmbenchError> {
    let mut blocks = log
        .split(TRACE_MARKER)
        .filter(|block| !block.is_empty())
        .collect::<Vec<&str>>();

    // The trailing block is incomplete.
    blocks.pop();

    let mut timings = Timings::with_capacity(blocks.len());

    for block in blocks {
        let (name, millis) = parse_trace_block(block)?;
        trace!("geth: {name} -> {millis}ms");

        if let Some(previous) = timings.insert(name.to_owned(), millis) {
            debug!("geth: {name} appears more than once, replacing {previous}ms with {millis}ms");
        }
    }

    debug!("geth: parsed {} benchmarks", timings.len());

    Ok(timings)
}

/// Parse a single trace block (the text after a [`TRACE_MARKER`]).
///
/// Returns the benchmark name and its elapsed time in milliseconds.
///
/// # Errors
/// - the block has fewer non-empty lines than needed
/// - the header line has no name segment
/// - the elapsed time is not a valid shorthand duration
pub fn parse_trace_block(block: &str) -> Result<(&str, f64), EvmbenchError> {
    let lines = block
        .split('\n')
        .filter(|line| !line.is_empty())
        .collect::<Vec<&str>>();

    if lines.len() <= TRACE_ELAPSED_LINE {
        return Err(malformed(format!(
            "trace block has {} non-empty line(s), expected at least {}: {block:?}",
            lines.len(),
            TRACE_ELAPSED_LINE + 1,
        )));
    }

    let header = lines[TRACE_HEADER_LINE];
    let name = header
        .split(PATH_SEPARATOR)
        .nth(TRACE_NAME_SEGMENT)
        .ok_or_else(|| malformed(format!("no benchmark name in trace header {header:?}")))?;

    let elapsed = skip_label(lines[TRACE_ELAPSED_LINE]);
    let millis = parse_millis(elapsed).map_err(|source| EvmbenchError::Duration {
        input_name: GETH_LOG_FILE,
        duration: elapsed.to_owned(),
        source,
    })?;

    Ok((name, millis))
}

//---------------------------------------------------------------------------------------------------- Private
/// Returns `line` without its first [`TRACE_ELAPSED_LABEL_LEN`] characters.
///
/// A line no longer than the label yields an empty string.
fn skip_label(line: &str) -> &str {
    line.char_indices()
        .nth(TRACE_ELAPSED_LABEL_LEN)
        .map_or("", |(i, _)| &line[i..])
}

fn malformed(reason: String) -> EvmbenchError {
    EvmbenchError::MalformedInput {
        input_name: GETH_LOG_FILE,
        reason,
    }
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
#[allow(clippy::float_cmp, reason = "parsed timings are compared to exact expected values")]
mod test {
    use evmbench_helper::duration::ParseError;
    use pretty_assertions::assert_eq;

    use super::*;

    /// Format a trace block the way `geth evm --bench` prints it.
    fn block(path: &str, elapsed: &str) -> String {
        format!(
            "{TRACE_MARKER}{path}\nEVM gas used:    21000\nexecution time:  {elapsed}\nallocations:     12\nallocated bytes: 3072\n"
        )
    }

    #[test]
    fn label_is_17_characters() {
        assert_eq!("execution time:  ".chars().count(), TRACE_ELAPSED_LABEL_LEN);
        assert_eq!("EVM gas used:    ".chars().count(), TRACE_ELAPSED_LABEL_LEN);
    }

    #[test]
    fn trailing_block_is_skipped() {
        let log = [
            block("00 bench/add/a", "500ns"),
            block("00 bench/mul/a", "1.5µs"),
            block("00 bench/sub/a", "2ms"),
        ]
        .concat();

        let timings = parse_trace_log(&log).unwrap();

        assert_eq!(
            timings.into_iter().collect::<Vec<_>>(),
            vec![("add".to_owned(), 0.0005), ("mul".to_owned(), 0.0015)],
        );
    }

    #[test]
    fn text_before_first_marker_is_a_block() {
        // Only the empty prefix is dropped, leading text is treated like any other block.
        let log = format!("{}{}", block("00 bench/add/a", "1ms"), "0x\n");
        let timings = parse_trace_log(&log).unwrap();
        assert_eq!(timings.get("add"), Some(&1.0));

        let log = format!("preamble\n{log}");
        assert!(matches!(
            parse_trace_log(&log),
            Err(EvmbenchError::MalformedInput { .. })
        ));
    }

    #[test]
    fn last_duplicate_wins_in_first_position() {
        let log = [
            block("00 bench/add/a", "1ms"),
            block("00 bench/mul/a", "2ms"),
            block("00 bench/add/b", "3ms"),
            block("00 bench/incomplete", ""),
        ]
        .concat();

        let timings = parse_trace_log(&log).unwrap();

        assert_eq!(
            timings.into_iter().collect::<Vec<_>>(),
            vec![("add".to_owned(), 3.0), ("mul".to_owned(), 2.0)],
        );
    }

    #[test]
    fn empty_lines_are_ignored() {
        let log = "0x00 bench/add/a\n\n\nEVM gas used:    1\n\nexecution time:  2s\n0x\n";
        assert_eq!(parse_trace_log(log).unwrap().get("add"), Some(&2_000.0));
    }

    #[test]
    fn empty_log() {
        assert!(parse_trace_log("").unwrap().is_empty());
        assert!(parse_trace_log(&block("00 bench/add/a", "1ms")).unwrap().is_empty());
    }

    #[test]
    fn block_too_short() {
        let err = parse_trace_block("00 bench/add/a\nEVM gas used:    1\n").unwrap_err();
        assert!(matches!(err, EvmbenchError::MalformedInput { .. }), "{err}");
    }

    #[test]
    fn header_without_name() {
        let err = parse_trace_block("00 bench\nEVM gas used:    1\nexecution time:  1ms\n")
            .unwrap_err();
        assert!(matches!(err, EvmbenchError::MalformedInput { .. }), "{err}");
    }

    #[test]
    fn invalid_elapsed() {
        let EvmbenchError::Duration {
            duration, source, ..
        } = parse_trace_block("00 bench/add\nEVM gas used:    1\nexecution time:  1 ms\n")
            .unwrap_err()
        else {
            panic!("expected a duration error");
        };

        assert_eq!(duration, "1 ms");
        assert_eq!(source, ParseError::UnknownUnit(" ms".into()));
    }

    #[test]
    fn elapsed_line_no_longer_than_label() {
        let EvmbenchError::Duration {
            duration, source, ..
        } = parse_trace_block("00 bench/add\nEVM gas used:    1\nexecution time:\n").unwrap_err()
        else {
            panic!("expected a duration error");
        };

        assert_eq!(duration, "");
        assert_eq!(source, ParseError::Empty);
    }

    #[test]
    fn label_offset_counts_characters() {
        // A multi-byte label character must not shift the offset.
        let (name, millis) =
            parse_trace_block("00 bench/add\nEVM gas used:    1\nexécution time:  7µs\n").unwrap();

        assert_eq!(name, "add");
        assert_eq!(millis, 0.007);
    }
}
