//! Timestamp parsing
//!
//! Parses systemd-style timestamp strings into absolute instants. The
//! orchestrator classifies the input into one of five forms by a cheap
//! leading/trailing inspection — named `now`, Unix epoch (`@...`),
//! relative offset (`+...`/`-...`/`... ago`/`... left`), named day token
//! (`today`/`yesterday`/`tomorrow`), or the general civil form — and then
//! drives the date, time, weekday, and timezone sub-parsers in a fixed
//! order, enforcing end-of-input and weekday/date consistency.

mod date;
mod time;
mod weekday;
mod timezone;

use chrono::{
    DateTime, Datelike, Days, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc,
    Weekday,
};
use tempus_common::{Clock, SystemClock};
use tempus_domain::{Result, TimeParseError, Zone};

use crate::scan::{read_fraction, read_int, skip_spaces};
use crate::timespan::parse_timespan;
use crate::tz::{IanaResolver, ZoneResolver};

/// Timestamp parser with injectable collaborators.
///
/// The zone resolver answers IANA name lookups; the clock supplies the
/// reference instant when the caller does not. The defaults — the bundled
/// IANA database and the system wall clock — are what
/// [`parse_timestamp`]/[`parse_timestamp_at`] use.
#[derive(Debug, Clone, Default)]
pub struct TimestampParser<R = IanaResolver, C = SystemClock> {
    resolver: R,
    clock: C,
}

impl TimestampParser {
    /// Create a parser with the default collaborators.
    pub fn new() -> Self {
        Self { resolver: IanaResolver, clock: SystemClock }
    }
}

impl<R: ZoneResolver, C: Clock> TimestampParser<R, C> {
    /// Replace the zone resolver.
    pub fn with_resolver<R2: ZoneResolver>(self, resolver: R2) -> TimestampParser<R2, C> {
        TimestampParser { resolver, clock: self.clock }
    }

    /// Replace the clock.
    pub fn with_clock<C2: Clock>(self, clock: C2) -> TimestampParser<R, C2> {
        TimestampParser { resolver: self.resolver, clock }
    }

    /// Parse a timestamp against the clock's current instant.
    pub fn parse(&self, input: &str) -> Result<DateTime<FixedOffset>> {
        self.parse_at(input, self.clock.now())
    }

    /// Parse a timestamp against an explicit reference instant.
    ///
    /// The reference resolves relative offsets and the day tokens, and
    /// supplies defaults for omitted date fields and the timezone.
    pub fn parse_at(
        &self,
        input: &str,
        reference: DateTime<FixedOffset>,
    ) -> Result<DateTime<FixedOffset>> {
        tracing::trace!(input = %input, "timestamp.parse");

        match input {
            "" => {
                return Err(TimeParseError::EmptyInput(
                    "expected timestamp, got empty string".to_string(),
                ))
            }
            // exact match only; any surrounding text falls through
            "now" => return Ok(reference),
            _ => {}
        }

        // unix epoch
        if let Some(payload) = input.strip_prefix('@') {
            return parse_epoch(payload, input);
        }

        // relative offsets
        if let Some(rest) = input.strip_prefix('-') {
            let span = parse_timespan(rest)?;
            return checked_offset(reference, span, false, input);
        }
        if let Some(rest) = input.strip_prefix('+') {
            let span = parse_timespan(rest)?;
            return checked_offset(reference, span, true, input);
        }
        if let Some(head) = input.strip_suffix(" ago") {
            let span = parse_timespan(head)?;
            return checked_offset(reference, span, false, input);
        }
        if let Some(head) = input.strip_suffix(" left") {
            let span = parse_timespan(head)?;
            return checked_offset(reference, span, true, input);
        }

        // named day tokens bind eagerly on a lowercase prefix
        if let Some((token_len, day_delta)) = named_token(input) {
            return self.resolve_token(input, token_len, day_delta, reference);
        }

        self.parse_civil(input, reference)
    }

    /// Resolve `today`/`yesterday`/`tomorrow` with an optional trailing
    /// timezone. The timezone changes which civil date counts as "today",
    /// it does not shift an already-computed date.
    fn resolve_token(
        &self,
        input: &str,
        token_len: usize,
        day_delta: i64,
        reference: DateTime<FixedOffset>,
    ) -> Result<DateTime<FixedOffset>> {
        let bytes = input.as_bytes();
        let mut zone = Zone::Fixed(*reference.offset());

        if token_len < bytes.len() {
            let i = skip_spaces(input, token_len);
            if i < bytes.len() {
                let (parsed, next) = timezone::parse_zone(input, i, &self.resolver)?;
                zone = parsed;
                if next < bytes.len() {
                    return Err(TimeParseError::TrailingInput(format!(
                        "unexpected {:?} in {input:?}",
                        &input[next..]
                    )));
                }
            }
        }

        let today = reference_date_in_zone(reference, zone);
        let date = shift_days(today, day_delta).ok_or_else(|| {
            TimeParseError::CalendarFieldOutOfRange(format!("date out of range in {input:?}"))
        })?;
        resolve_local(date.and_time(NaiveTime::MIN), zone, input)
    }

    /// Parse the general civil form: `[weekday] [date] [T|space] [time]
    /// [timezone]`, every part optional but at least one of date/time
    /// required.
    fn parse_civil(
        &self,
        input: &str,
        reference: DateTime<FixedOffset>,
    ) -> Result<DateTime<FixedOffset>> {
        let bytes = input.as_bytes();
        let mut i = 0;

        // optional weekday
        let mut expected_weekday: Option<Weekday> = None;
        if let Some((parsed, next)) = weekday::parse_weekday(input, i) {
            expected_weekday = Some(parsed);
            i = skip_spaces(input, next);
        }

        // a digit run is a date when the first separator within five
        // characters is a dash, a time when it is a colon
        let (found_colon, found_dash) = classify_digit_run(bytes, i);

        let mut date = reference.date_naive();
        let mut time = NaiveTime::MIN;
        let mut zone = Zone::Fixed(*reference.offset());

        if i < bytes.len() && found_dash && !found_colon {
            let parsed = date::parse_date(input, i)?;
            i = parsed.next;
            date = NaiveDate::from_ymd_opt(parsed.year, parsed.month, parsed.day).ok_or_else(
                || {
                    TimeParseError::CalendarFieldOutOfRange(format!(
                        "no such calendar date {:04}-{:02}-{:02} in {input:?}",
                        parsed.year, parsed.month, parsed.day
                    ))
                },
            )?;

            // 'T' separator, or spaces before the time
            if i < bytes.len() && bytes[i] == b'T' {
                if !parsed.full_year {
                    return Err(TimeParseError::AmbiguousTimeFormat(format!(
                        "'T' separator requires a 4-digit year in {input:?}"
                    )));
                }
                i += 1;
            } else {
                i = skip_spaces(input, i);
            }
        }

        let digit_here = i < bytes.len() && bytes[i].is_ascii_digit();
        let (next_colon, next_dash) = classify_digit_run(bytes, i);
        if digit_here && !(next_dash && !next_colon) {
            // a bare time needs a colon to disambiguate it from a span
            if !found_dash && !found_colon {
                return Err(TimeParseError::AmbiguousTimeFormat(format!(
                    "expected ':' in time-only format in {input:?}"
                )));
            }
            let (parsed, next) = time::parse_time(input, i)?;
            time = parsed;
            i = skip_spaces(input, next);

            // optional timezone after the time, directly affixed or
            // space-separated
            if i < bytes.len()
                && (bytes[i] == b'+' || bytes[i] == b'-' || bytes[i].is_ascii_alphabetic())
            {
                let (parsed, next) = timezone::parse_zone(input, i, &self.resolver)?;
                zone = parsed;
                i = next;
            }
        } else if !digit_here && i < bytes.len() {
            // timezone after a date with no time, or a bare timezone
            let (parsed, next) = timezone::parse_zone(input, i, &self.resolver)?;
            zone = parsed;
            i = next;
        }

        if i < bytes.len() {
            return Err(TimeParseError::TrailingInput(format!(
                "unexpected {:?} in {input:?}",
                &input[i..]
            )));
        }
        if expected_weekday.is_some() && !found_dash {
            return Err(TimeParseError::WeekdayRequiresDate(format!(
                "expected date after weekday in {input:?}"
            )));
        }
        if let Some(expected) = expected_weekday {
            if date.weekday() != expected {
                return Err(TimeParseError::WeekdayMismatch(format!(
                    "expected {expected} for {date}, got {} in {input:?}",
                    date.weekday()
                )));
            }
        }

        resolve_local(date.and_time(time), zone, input)
    }
}

/// Parse a timestamp string against the system wall clock.
///
/// Equivalent to [`parse_timestamp_at`] with the current local time as the
/// reference. Callers that need determinism should pass an explicit
/// reference instead.
///
/// # Examples
///
/// ```
/// use tempus_core::parse_timestamp;
///
/// assert!(parse_timestamp("now").is_ok());
/// assert!(parse_timestamp("@1395716396").is_ok());
/// assert!(parse_timestamp("not a timestamp").is_err());
/// ```
pub fn parse_timestamp(input: &str) -> Result<DateTime<FixedOffset>> {
    TimestampParser::new().parse(input)
}

/// Parse a timestamp string against an explicit reference instant.
///
/// # Examples
///
/// ```
/// use chrono::{TimeDelta, TimeZone, Utc};
/// use tempus_core::parse_timestamp_at;
///
/// let reference = Utc.with_ymd_and_hms(2009, 11, 10, 23, 0, 0).unwrap().fixed_offset();
///
/// let parsed = parse_timestamp_at("2009-11-10 18:15:22", reference).unwrap();
/// assert_eq!(parsed, Utc.with_ymd_and_hms(2009, 11, 10, 18, 15, 22).unwrap());
///
/// let parsed = parse_timestamp_at("+5s", reference).unwrap();
/// assert_eq!(parsed, reference + TimeDelta::seconds(5));
/// ```
pub fn parse_timestamp_at(
    input: &str,
    reference: DateTime<FixedOffset>,
) -> Result<DateTime<FixedOffset>> {
    TimestampParser::new().parse_at(input, reference)
}

/// Match a lowercase day token at the start of the input. Tokens bind on
/// the prefix alone; whatever follows must be a timezone or nothing.
fn named_token(input: &str) -> Option<(usize, i64)> {
    [("today", 0_i64), ("yesterday", -1), ("tomorrow", 1)]
        .into_iter()
        .find(|(token, _)| input.starts_with(token))
        .map(|(token, day_delta)| (token.len(), day_delta))
}

/// Parse the payload of an `@`-prefixed Unix epoch timestamp: an integer
/// second count with an optional fraction, and nothing else.
fn parse_epoch(payload: &str, input: &str) -> Result<DateTime<FixedOffset>> {
    if payload.is_empty() {
        return Err(TimeParseError::MalformedNumber(format!(
            "expected number after '@' in {input:?}"
        )));
    }
    let bytes = payload.as_bytes();
    let (secs, mut i) = read_int(payload, 0)?;
    let mut nanos: u32 = 0;
    if i < bytes.len() && bytes[i] == b'.' {
        (nanos, i) = read_fraction(payload, i + 1)?;
    }
    if i < bytes.len() {
        return Err(TimeParseError::TrailingInput(format!(
            "unexpected {:?} in {input:?}",
            &payload[i..]
        )));
    }
    DateTime::from_timestamp(secs, nanos).map(|instant| instant.fixed_offset()).ok_or_else(|| {
        TimeParseError::CalendarFieldOutOfRange(format!("unix timestamp out of range in {input:?}"))
    })
}

/// Shift the reference by a span, in either direction, without wrapping.
fn checked_offset(
    reference: DateTime<FixedOffset>,
    span: chrono::TimeDelta,
    forward: bool,
    input: &str,
) -> Result<DateTime<FixedOffset>> {
    let shifted =
        if forward { reference.checked_add_signed(span) } else { reference.checked_sub_signed(span) };
    shifted.ok_or_else(|| {
        TimeParseError::CalendarFieldOutOfRange(format!(
            "resulting timestamp out of range in {input:?}"
        ))
    })
}

/// Look ahead from a digit for the first `:` or `-` within five
/// characters. Returns `(found_colon, found_dash)`; both are false when
/// the cursor is not on a digit.
fn classify_digit_run(bytes: &[u8], pos: usize) -> (bool, bool) {
    let mut colon = false;
    let mut dash = false;
    if pos < bytes.len() && bytes[pos].is_ascii_digit() {
        let end = bytes.len().min(pos + 5);
        for &b in &bytes[pos..end] {
            match b {
                b':' => {
                    colon = true;
                    break;
                }
                b'-' => {
                    dash = true;
                    break;
                }
                _ => {}
            }
        }
    }
    (colon, dash)
}

/// The reference's civil date as observed in a zone.
fn reference_date_in_zone(reference: DateTime<FixedOffset>, zone: Zone) -> NaiveDate {
    match zone {
        Zone::Utc => reference.with_timezone(&Utc).date_naive(),
        Zone::Fixed(offset) => reference.with_timezone(&offset).date_naive(),
        Zone::Named(tz) => reference.with_timezone(&tz).date_naive(),
    }
}

fn shift_days(date: NaiveDate, delta: i64) -> Option<NaiveDate> {
    if delta >= 0 {
        date.checked_add_days(Days::new(delta.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(delta.unsigned_abs()))
    }
}

/// Combine civil fields with a zone into an absolute instant. Ambiguous
/// local times take the earlier interpretation; nonexistent local times
/// (DST gaps) are rejected.
fn resolve_local(
    naive: NaiveDateTime,
    zone: Zone,
    input: &str,
) -> Result<DateTime<FixedOffset>> {
    let resolved = match zone {
        Zone::Utc => Some(Utc.from_utc_datetime(&naive).fixed_offset()),
        Zone::Fixed(offset) => offset.from_local_datetime(&naive).earliest(),
        Zone::Named(tz) => tz.from_local_datetime(&naive).earliest().map(|dt| dt.fixed_offset()),
    };
    resolved.ok_or_else(|| {
        TimeParseError::CalendarFieldOutOfRange(format!(
            "time does not exist in the resolved timezone in {input:?}"
        ))
    })
}
