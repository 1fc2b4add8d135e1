//! Time-of-day sub-parser
//!
//! Parses `HH`, `HH:MM`, `HH:MM:SS`, or `HH:MM:SS.fraction` at a cursor.
//! Minute, second, and fraction default to zero when absent; a fraction is
//! only recognized after an explicit seconds field.

use chrono::NaiveTime;
use tempus_domain::{Result, TimeParseError};

use crate::scan::{read_fraction, read_int};

/// Parse a time of day at `pos` and return it with the cursor after the
/// last consumed field.
pub(crate) fn parse_time(input: &str, pos: usize) -> Result<(NaiveTime, usize)> {
    let bytes = input.as_bytes();
    if pos >= bytes.len() {
        return Err(TimeParseError::MalformedNumber(format!(
            "expected time (HH:MM or HH:MM:SS) in {input:?}"
        )));
    }

    let mut minute: i64 = 0;
    let mut second: i64 = 0;
    let mut nanos: u32 = 0;

    // parse hour
    let (hour, mut i) = read_int(input, pos)?;
    if hour > 23 {
        return Err(TimeParseError::CalendarFieldOutOfRange(format!(
            "expected hour in range 0-23, got {hour} in {input:?}"
        )));
    }

    // parse minute
    if i < bytes.len() && bytes[i] == b':' {
        (minute, i) = read_int(input, i + 1)?;
        if minute > 59 {
            return Err(TimeParseError::CalendarFieldOutOfRange(format!(
                "expected minute in range 0-59, got {minute} in {input:?}"
            )));
        }

        // parse second
        if i < bytes.len() && bytes[i] == b':' {
            (second, i) = read_int(input, i + 1)?;
            if second > 59 {
                return Err(TimeParseError::CalendarFieldOutOfRange(format!(
                    "expected second in range 0-59, got {second} in {input:?}"
                )));
            }

            if i < bytes.len() && bytes[i] == b'.' {
                (nanos, i) = read_fraction(input, i + 1)?;
            }
        }
    }

    let time = NaiveTime::from_hms_nano_opt(hour as u32, minute as u32, second as u32, nanos)
        .ok_or_else(|| {
            TimeParseError::CalendarFieldOutOfRange(format!("invalid time of day in {input:?}"))
        })?;
    Ok((time, i))
}
