//! Timezone sub-parser
//!
//! Three forms, tried in order at a cursor:
//!
//! 1. literal `Z` or `UTC`, recognized only when they are the entire
//!    remainder of the input;
//! 2. a UTC offset: `±HH`, `±HH:MM`, or packed `±HHMM`;
//! 3. an IANA zone name (maximal non-space run), resolved through the
//!    [`ZoneResolver`] port.

use chrono::FixedOffset;
use tempus_domain::constants::MAX_ZONE_OFFSET_SECS;
use tempus_domain::{Result, TimeParseError, Zone};

use crate::scan::{read_int, read_until_space};
use crate::tz::ZoneResolver;

/// Parse a timezone at `pos` and return it with the cursor after the
/// consumed token.
pub(crate) fn parse_zone<R: ZoneResolver>(
    input: &str,
    pos: usize,
    resolver: &R,
) -> Result<(Zone, usize)> {
    let bytes = input.as_bytes();
    if pos >= bytes.len() {
        return Err(TimeParseError::UnknownTimezone(format!("expected timezone in {input:?}")));
    }

    // literal UTC, whole remainder only
    match &input[pos..] {
        "Z" => return Ok((Zone::Utc, pos + 1)),
        "UTC" => return Ok((Zone::Utc, pos + 3)),
        _ => {}
    }

    // offset format: +05:30, +0530, +05, -05:30, ...
    if bytes[pos] == b'+' || bytes[pos] == b'-' {
        let sign: i64 = if bytes[pos] == b'-' { -1 } else { 1 };
        let (num, i) = read_int(input, pos + 1)?;
        let digits = i - (pos + 1);

        return match digits {
            2 => {
                let hours = num;
                if i < bytes.len() && bytes[i] == b':' {
                    let minutes_start = i + 1;
                    let (minutes, i) = read_int(input, minutes_start)?;
                    if i - minutes_start != 2 {
                        return Err(TimeParseError::MalformedOffset(format!(
                            "expected 2-digit offset minutes, got {} digits in {input:?}",
                            i - minutes_start
                        )));
                    }
                    let secs = offset_secs(hours, minutes, input)?;
                    Ok((fixed_zone(sign * secs, input)?, i))
                } else {
                    let secs = offset_secs(hours, 0, input)?;
                    Ok((fixed_zone(sign * secs, input)?, i))
                }
            }
            4 => {
                let secs = offset_secs(num / 100, num % 100, input)?;
                Ok((fixed_zone(sign * secs, input)?, i))
            }
            _ => Err(TimeParseError::MalformedOffset(format!(
                "expected 2- or 4-digit offset, got {digits} digits in {input:?}"
            ))),
        };
    }

    // IANA timezone database name
    let (name, i) = read_until_space(input, pos);
    if name.is_empty() {
        return Err(TimeParseError::UnknownTimezone(format!("expected timezone in {input:?}")));
    }
    match resolver.resolve(name) {
        Some(zone) => Ok((zone, i)),
        None => Err(TimeParseError::UnknownTimezone(format!("{name:?} in {input:?}"))),
    }
}

/// Combine offset hours and minutes into seconds, enforcing the minute and
/// magnitude bounds.
fn offset_secs(hours: i64, minutes: i64, input: &str) -> Result<i64> {
    if minutes >= 60 {
        return Err(TimeParseError::OffsetOutOfRange(format!(
            "offset minutes out of range 0-59, got {minutes} in {input:?}"
        )));
    }
    let secs = hours * 3_600 + minutes * 60;
    if secs >= MAX_ZONE_OFFSET_SECS {
        return Err(TimeParseError::OffsetOutOfRange(format!(
            "offset magnitude must be below 24h, got {secs} seconds in {input:?}"
        )));
    }
    Ok(secs)
}

fn fixed_zone(secs: i64, input: &str) -> Result<Zone> {
    let offset = FixedOffset::east_opt(secs as i32).ok_or_else(|| {
        TimeParseError::OffsetOutOfRange(format!("offset {secs} seconds in {input:?}"))
    })?;
    Ok(Zone::Fixed(offset))
}
