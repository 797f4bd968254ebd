//! Shorthand duration parsing.
//!
//! Parses the compact duration strings printed by Go programs
//! (e.g. `geth`) with `time.Duration::String`, such as `1.5ms`,
//! `300µs` or `1h15m30.5s`, into an integer nanosecond count.
//!
//! The grammar is the one accepted by Go's `time.ParseDuration`:
//! an optional sign followed by one or more `<decimal><unit>` terms
//! which are summed together.
//!
//! | Unit            | Nanoseconds       |
//! |-----------------|-------------------|
//! | `ns`            | 1                 |
//! | `us`, `µs`, `μs`| 1_000             |
//! | `ms`            | 1_000_000         |
//! | `s`             | 1_000_000_000     |
//! | `m`             | 60_000_000_000    |
//! | `h`             | 3_600_000_000_000 |

//---------------------------------------------------------------------------------------------------- Use
use thiserror::Error;

//---------------------------------------------------------------------------------------------------- Constants
/// Nanoseconds in a millisecond.
pub const NANOS_PER_MILLI: f64 = 1_000_000.0;

/// `1 << 63`, the magnitude of [`i64::MIN`].
///
/// Every intermediate value is kept at or below this.
const MAX_MAGNITUDE: u64 = 1 << 63;

/// Recognized unit suffixes and their length in nanoseconds.
const UNITS: [(&str, u64); 8] = [
    ("ns", 1),
    ("us", 1_000),
    ("\u{b5}s", 1_000),  // U+00B5 micro sign
    ("\u{3bc}s", 1_000), // U+03BC greek small letter mu
    ("ms", 1_000_000),
    ("s", 1_000_000_000),
    ("m", 60_000_000_000),
    ("h", 3_600_000_000_000),
];

//---------------------------------------------------------------------------------------------------- ParseError
/// An error parsing a shorthand duration string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input was an empty string.
    #[error("empty duration")]
    Empty,

    /// The input does not follow the `[-+]?(<decimal><unit>)+` grammar.
    #[error("invalid duration")]
    Invalid,

    /// A number was not followed by a unit, e.g. `3`.
    #[error("missing unit in duration")]
    MissingUnit,

    /// A number was followed by an unrecognized unit, e.g. `3d`.
    #[error("unknown unit {0:?} in duration")]
    UnknownUnit(String),

    /// The duration does not fit in an [`i64`] count of nanoseconds.
    #[error("duration overflows i64 nanoseconds")]
    Overflow,
}

//---------------------------------------------------------------------------------------------------- Public API
/// Parse a shorthand duration string into nanoseconds.
///
/// ```rust
/// # use evmbench_helper::duration::*;
/// assert_eq!(parse_nanos("0"), Ok(0));
/// assert_eq!(parse_nanos("500ns"), Ok(500));
/// assert_eq!(parse_nanos("1.5µs"), Ok(1_500));
/// assert_eq!(parse_nanos("1m30s"), Ok(90_000_000_000));
/// assert_eq!(parse_nanos("-2ms"), Ok(-2_000_000));
///
/// assert_eq!(parse_nanos(""), Err(ParseError::Empty));
/// assert_eq!(parse_nanos("3"), Err(ParseError::MissingUnit));
/// assert_eq!(parse_nanos("3d"), Err(ParseError::UnknownUnit("d".into())));
/// ```
///
/// # Errors
/// Returns a [`ParseError`] if `s` is not a valid duration
/// or if it does not fit in an [`i64`] count of nanoseconds.
pub fn parse_nanos(s: &str) -> Result<i64, ParseError> {
    if s.is_empty() {
        return Err(ParseError::Empty);
    }

    let (negative, mut rest) = match s.as_bytes()[0] {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };

    // A bare zero is the only unit-less input allowed.
    if rest == "0" {
        return Ok(0);
    }
    if rest.is_empty() {
        return Err(ParseError::Invalid);
    }

    let mut total: u64 = 0;
    while !rest.is_empty() {
        let (nanos, tail) = parse_term(rest)?;
        total = total
            .checked_add(nanos)
            .filter(|total| *total <= MAX_MAGNITUDE)
            .ok_or(ParseError::Overflow)?;
        rest = tail;
    }

    if negative {
        // `total <= 1 << 63` so this cannot wrap past `i64::MIN`.
        Ok(0_i64.wrapping_sub_unsigned(total))
    } else {
        i64::try_from(total).map_err(|_| ParseError::Overflow)
    }
}

/// Parse a shorthand duration string into milliseconds.
///
/// This is [`parse_nanos`] followed by [`nanos_to_millis`].
///
/// ```rust
/// # use evmbench_helper::duration::*;
/// assert_eq!(parse_millis("2s"), Ok(2_000.0));
/// assert_eq!(parse_millis("500ns"), Ok(0.0005));
/// ```
///
/// # Errors
/// Same as [`parse_nanos`].
pub fn parse_millis(s: &str) -> Result<f64, ParseError> {
    parse_nanos(s).map(nanos_to_millis)
}

/// Convert nanoseconds into (fractional) milliseconds.
///
/// ```rust
/// # use evmbench_helper::duration::*;
/// assert_eq!(nanos_to_millis(1_000_000), 1.0);
/// assert_eq!(nanos_to_millis(1_000), 0.001);
/// assert_eq!(nanos_to_millis(-2_500_000), -2.5);
/// ```
#[inline]
#[expect(
    clippy::cast_precision_loss,
    reason = "benchmark timings are far below 2^53 nanoseconds"
)]
pub fn nanos_to_millis(nanos: i64) -> f64 {
    nanos as f64 / NANOS_PER_MILLI
}

//---------------------------------------------------------------------------------------------------- Private
/// Returns the length of `unit` in nanoseconds.
fn unit_nanos(unit: &str) -> Option<u64> {
    UNITS
        .iter()
        .find_map(|(name, nanos)| (*name == unit).then_some(*nanos))
}

/// Parse a single `<decimal><unit>` term off the front of `s`.
///
/// Returns the term in nanoseconds and the unparsed remainder.
#[expect(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "the fractional part is applied in floating point and truncated"
)]
fn parse_term(s: &str) -> Result<(u64, &str), ParseError> {
    if !s.starts_with(|c: char| c == '.' || c.is_ascii_digit()) {
        return Err(ParseError::Invalid);
    }

    let (int, rest) = leading_int(s)?;
    let has_int = rest.len() != s.len();

    let (frac, scale, rest, has_frac) = match rest.strip_prefix('.') {
        Some(after_dot) => {
            let (frac, scale, rest) = leading_fraction(after_dot);
            (frac, scale, rest, rest.len() != after_dot.len())
        }
        None => (0, 1.0, rest, false),
    };

    // `.` alone is not a number.
    if !has_int && !has_frac {
        return Err(ParseError::Invalid);
    }

    let unit_len = rest
        .find(|c: char| c == '.' || c.is_ascii_digit())
        .unwrap_or(rest.len());
    if unit_len == 0 {
        return Err(ParseError::MissingUnit);
    }

    let (unit, rest) = rest.split_at(unit_len);
    let unit = unit_nanos(unit).ok_or_else(|| ParseError::UnknownUnit(unit.to_owned()))?;

    if int > MAX_MAGNITUDE / unit {
        return Err(ParseError::Overflow);
    }

    let mut nanos = int * unit;
    if frac > 0 {
        // Cannot overflow a `u64`: `nanos <= 1 << 63` and the fraction is below `unit`.
        nanos += (frac as f64 * (unit as f64 / scale)) as u64;
        if nanos > MAX_MAGNITUDE {
            return Err(ParseError::Overflow);
        }
    }

    Ok((nanos, rest))
}

/// Consume the leading `[0-9]*` of `s`.
fn leading_int(s: &str) -> Result<(u64, &str), ParseError> {
    let digits = s.bytes().take_while(u8::is_ascii_digit).count();

    let mut x: u64 = 0;
    for b in s[..digits].bytes() {
        x = x
            .checked_mul(10)
            .and_then(|x| x.checked_add(u64::from(b - b'0')))
            .filter(|x| *x <= MAX_MAGNITUDE)
            .ok_or(ParseError::Overflow)?;
    }

    Ok((x, &s[digits..]))
}

/// Consume the leading `[0-9]*` of `s` as the digits after a decimal point.
///
/// Returns the digits as an integer, the power of ten they are scaled by
/// and the remainder. Digits past the precision of a `u64` are consumed
/// but ignored.
fn leading_fraction(s: &str) -> (u64, f64, &str) {
    let digits = s.bytes().take_while(u8::is_ascii_digit).count();

    let mut x: u64 = 0;
    let mut scale = 1.0;
    let mut overflow = false;

    for b in s[..digits].bytes() {
        if overflow {
            continue;
        }

        match x
            .checked_mul(10)
            .and_then(|x| x.checked_add(u64::from(b - b'0')))
            .filter(|x| *x <= MAX_MAGNITUDE)
        {
            Some(y) => {
                x = y;
                scale *= 10.0;
            }
            None => overflow = true,
        }
    }

    (x, scale, &s[digits..])
}
