//! Timespan parsing
//!
//! Parses systemd-style time span strings (`"2h 30min"`, `"1.5h"`,
//! `"55s500ms"`) into a [`chrono::TimeDelta`]. A span is a sequence of
//! numeric groups, each with an optional fraction and an optional unit;
//! separating spaces may be omitted and all groups are added together.

use chrono::TimeDelta;
use tempus_domain::constants::{
    NANOS_PER_DAY, NANOS_PER_HOUR, NANOS_PER_MICROSECOND, NANOS_PER_MILLISECOND, NANOS_PER_MINUTE,
    NANOS_PER_MONTH, NANOS_PER_SECOND, NANOS_PER_WEEK, NANOS_PER_YEAR,
};
use tempus_domain::{Result, TimeParseError};

use crate::scan::{read_fraction, read_int, read_word, skip_spaces};

/// Parse a time span string into a signed duration.
///
/// Numeric values can include decimal points; if no unit is given, seconds
/// are assumed. Unit names are case-sensitive and only English names are
/// accepted:
///
/// - `nsec`, `ns`
/// - `usec`, `us`, `µs`, `μs`
/// - `msec`, `ms`
/// - `seconds`, `second`, `sec`, `s`
/// - `minutes`, `minute`, `min`, `m`
/// - `hours`, `hour`, `hr`, `h`
/// - `days`, `day`, `d`
/// - `weeks`, `week`, `w`
/// - `months`, `month`, `M` (30.4375 days)
/// - `years`, `year`, `y` (365.25 days)
///
/// # Examples
///
/// ```
/// use chrono::TimeDelta;
/// use tempus_core::parse_timespan;
///
/// assert_eq!(parse_timespan("2h 30min").unwrap(), TimeDelta::seconds(9_000));
/// assert_eq!(parse_timespan("1.5h").unwrap(), TimeDelta::seconds(5_400));
/// assert_eq!(parse_timespan("55s500ms").unwrap(), TimeDelta::milliseconds(55_500));
/// assert_eq!(parse_timespan("60").unwrap(), TimeDelta::seconds(60));
/// ```
pub fn parse_timespan(input: &str) -> Result<TimeDelta> {
    match input {
        "" => {
            return Err(TimeParseError::EmptyInput(
                "expected time span, got empty string".to_string(),
            ))
        }
        "0" => return Ok(TimeDelta::zero()),
        _ => {}
    }

    let bytes = input.as_bytes();
    let mut total: i64 = 0;
    let mut found_any = false;
    let mut i = 0;

    while i < bytes.len() {
        i = skip_spaces(input, i);
        if i >= bytes.len() {
            break;
        }

        // read number; the integer part may be omitted only when a
        // fraction follows
        let mut value: i64 = 0;
        if bytes[i].is_ascii_digit() {
            (value, i) = read_int(input, i)?;
        } else if bytes[i] != b'.' {
            let got: String = input[i..].chars().take(1).collect();
            return Err(TimeParseError::MalformedNumber(format!(
                "expected number, got {got:?} in {input:?}"
            )));
        }
        let mut frac_nanos: u32 = 0;
        if i < bytes.len() && bytes[i] == b'.' {
            i += 1;
            (frac_nanos, i) = read_fraction(input, i)?;
        }

        i = skip_spaces(input, i);

        // read unit
        let (word, next) = read_word(input, i);
        i = next;
        let scale = if word.is_empty() { NANOS_PER_SECOND } else { unit_scale(word, input)? };

        total = value
            .checked_mul(scale)
            .and_then(|v| total.checked_add(v))
            .ok_or_else(|| overflow(input))?;
        if frac_nanos > 0 {
            // the fraction is nanoseconds of one second; rescale it to
            // nanoseconds of one unit
            let extra = if scale >= NANOS_PER_SECOND {
                i64::from(frac_nanos).checked_mul(scale / NANOS_PER_SECOND)
            } else {
                Some(i64::from(frac_nanos) / (NANOS_PER_SECOND / scale))
            };
            total = extra.and_then(|e| total.checked_add(e)).ok_or_else(|| overflow(input))?;
        }
        found_any = true;
    }

    if !found_any {
        return Err(TimeParseError::EmptyInput(format!("expected time span, got {input:?}")));
    }

    Ok(TimeDelta::nanoseconds(total))
}

/// Map a unit spelling to its scale in nanoseconds.
///
/// Exact match only: no prefix matching, and spellings are case-sensitive,
/// so `"5H"` and `"5Months"` are rejected.
fn unit_scale(word: &str, input: &str) -> Result<i64> {
    if word.starts_with('.') {
        // a second decimal point inside a group ends up here as a word
        return Err(TimeParseError::MalformedNumber(format!(
            "unexpected {word:?} after number in {input:?}"
        )));
    }
    match word {
        "ns" | "nsec" => Ok(1),
        // the first is the micro sign (U+00B5), the second the Greek
        // letter mu (U+03BC)
        "us" | "µs" | "μs" | "usec" => Ok(NANOS_PER_MICROSECOND),
        "ms" | "msec" => Ok(NANOS_PER_MILLISECOND),
        "s" | "sec" | "second" | "seconds" => Ok(NANOS_PER_SECOND),
        "m" | "min" | "minute" | "minutes" => Ok(NANOS_PER_MINUTE),
        "h" | "hr" | "hour" | "hours" => Ok(NANOS_PER_HOUR),
        "d" | "day" | "days" => Ok(NANOS_PER_DAY),
        "w" | "week" | "weeks" => Ok(NANOS_PER_WEEK),
        "M" | "month" | "months" => Ok(NANOS_PER_MONTH),
        "y" | "year" | "years" => Ok(NANOS_PER_YEAR),
        _ => Err(TimeParseError::UnknownUnit(format!("expected unit, got {word:?} in {input:?}"))),
    }
}

fn overflow(input: &str) -> TimeParseError {
    TimeParseError::MalformedNumber(format!("time span out of range in {input:?}"))
}
