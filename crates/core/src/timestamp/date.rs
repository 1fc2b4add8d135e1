//! Calendar date sub-parser
//!
//! Parses `YYYY-MM-DD` or `YY-MM-DD` at a cursor. Two-digit years map into
//! the range 1969-2068 (00-68 is 2000-2068, 69-99 is 1969-1999). Whether
//! the year token had at least three digits is reported as `full_year`,
//! which gates the RFC 3339 `T` separator downstream: with a two-digit
//! year, `T` would be ambiguous with a time field.

use tempus_domain::constants::TWO_DIGIT_YEAR_PIVOT;
use tempus_domain::{Result, TimeParseError};

use crate::scan::read_int;

/// Fields of a successfully parsed date token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ParsedDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub full_year: bool,
    pub next: usize,
}

/// Parse a date at `pos`. Day is range-checked only against the generic
/// 1-31 maximum; month-length validation belongs to calendar construction.
pub(crate) fn parse_date(input: &str, pos: usize) -> Result<ParsedDate> {
    let bytes = input.as_bytes();
    if pos >= bytes.len() {
        return Err(malformed_date(input));
    }

    // parse year
    let (raw_year, mut i) = read_int(input, pos)?;
    let full_year = i - pos >= 3;
    let year = if full_year {
        raw_year
    } else if raw_year <= TWO_DIGIT_YEAR_PIVOT {
        raw_year + 2000
    } else {
        raw_year + 1900
    };
    let year = i32::try_from(year).map_err(|_| {
        TimeParseError::CalendarFieldOutOfRange(format!("year {year} out of range in {input:?}"))
    })?;

    if i >= bytes.len() || bytes[i] != b'-' {
        return Err(malformed_date(input));
    }
    i += 1;

    // parse month
    let (month, mut i) = read_int(input, i)?;
    if !(1..=12).contains(&month) {
        return Err(TimeParseError::CalendarFieldOutOfRange(format!(
            "expected month in range 1-12, got {month} in {input:?}"
        )));
    }

    if i >= bytes.len() || bytes[i] != b'-' {
        return Err(malformed_date(input));
    }
    i += 1;

    // parse day
    let (day, i) = read_int(input, i)?;
    if !(1..=31).contains(&day) {
        return Err(TimeParseError::CalendarFieldOutOfRange(format!(
            "expected day in range 1-31, got {day} in {input:?}"
        )));
    }

    Ok(ParsedDate { year, month: month as u32, day: day as u32, full_year, next: i })
}

fn malformed_date(input: &str) -> TimeParseError {
    TimeParseError::MalformedNumber(format!("expected date (YYYY-MM-DD or YY-MM-DD) in {input:?}"))
}
