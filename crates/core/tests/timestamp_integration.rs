//! Integration tests for timestamp parsing.
//!
//! These tests drive the public timestamp API through every accepted form
//! (civil dates and times, weekdays, timezones, day tokens, relative
//! offsets, Unix epoch) against a pinned reference instant, plus the
//! documented rejection and edge-case behavior.

use anyhow::Result;
use chrono::{DateTime, FixedOffset, TimeDelta, TimeZone, Utc};
use tempus_core::{parse_timestamp_at, MockClock, TimeParseError, TimestampParser};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_env_filter("trace").with_test_writer().try_init();
}

/// 2009-11-10 23:00:00 UTC, as a fixed-offset instant at +00:00.
fn reference() -> DateTime<FixedOffset> {
    Utc.with_ymd_and_hms(2009, 11, 10, 23, 0, 0).unwrap().fixed_offset()
}

fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
}

/// Verifies civil dates, including the two-digit year mapping.
#[test]
fn test_civil_dates() -> Result<()> {
    init_tracing();
    let r = reference();

    assert_eq!(parse_timestamp_at("2009-11-10", r)?, utc(2009, 11, 10, 0, 0, 0));
    assert_eq!(parse_timestamp_at("09-11-10", r)?, utc(2009, 11, 10, 0, 0, 0));
    assert_eq!(parse_timestamp_at("00-01-01", r)?, utc(2000, 1, 1, 0, 0, 0));
    assert_eq!(parse_timestamp_at("68-12-31", r)?, utc(2068, 12, 31, 0, 0, 0));
    assert_eq!(parse_timestamp_at("69-01-01", r)?, utc(1969, 1, 1, 0, 0, 0));
    assert_eq!(parse_timestamp_at("99-01-01", r)?, utc(1999, 1, 1, 0, 0, 0));
    Ok(())
}

/// Verifies combined date and time forms, with space and `T` separators.
#[test]
fn test_civil_datetimes() -> Result<()> {
    init_tracing();
    let r = reference();

    assert_eq!(parse_timestamp_at("2009-11-10 18:15:22", r)?, utc(2009, 11, 10, 18, 15, 22));
    assert_eq!(parse_timestamp_at("2009-11-10 18:15", r)?, utc(2009, 11, 10, 18, 15, 0));
    assert_eq!(parse_timestamp_at("2009-11-10 18", r)?, utc(2009, 11, 10, 18, 0, 0));
    assert_eq!(parse_timestamp_at("2009-11-10T18:15:22", r)?, utc(2009, 11, 10, 18, 15, 22));
    assert_eq!(parse_timestamp_at("2009-11-10T18:15:22Z", r)?, utc(2009, 11, 10, 18, 15, 22));
    assert_eq!(
        parse_timestamp_at("2009-11-10 11:12:13.654321", r)?,
        utc(2009, 11, 10, 11, 12, 13) + TimeDelta::nanoseconds(654_321_000)
    );
    Ok(())
}

/// Verifies the `T` separator requires a four-digit year, and that a
/// trailing `T` with no time still parses as midnight.
#[test]
fn test_t_separator_rules() {
    let r = reference();

    assert!(matches!(
        parse_timestamp_at("69-01-01T10:00", r),
        Err(TimeParseError::AmbiguousTimeFormat(_))
    ));
    // a dangling separator leaves the defaulted midnight in place
    assert_eq!(parse_timestamp_at("2009-11-10T", r).unwrap(), utc(2009, 11, 10, 0, 0, 0));
}

/// Verifies bare times default the date from the reference and demand a
/// colon to disambiguate from a span.
#[test]
fn test_time_only() -> Result<()> {
    let r = reference();

    assert_eq!(parse_timestamp_at("18:15:22", r)?, utc(2009, 11, 10, 18, 15, 22));
    assert_eq!(parse_timestamp_at("18:15", r)?, utc(2009, 11, 10, 18, 15, 0));
    assert_eq!(
        parse_timestamp_at("11:12:13.5", r)?,
        utc(2009, 11, 10, 11, 12, 13) + TimeDelta::nanoseconds(500_000_000)
    );

    assert!(matches!(
        parse_timestamp_at("1815", r),
        Err(TimeParseError::AmbiguousTimeFormat(_))
    ));
    assert!(matches!(
        parse_timestamp_at("60", r),
        Err(TimeParseError::AmbiguousTimeFormat(_))
    ));
    Ok(())
}

/// Verifies weekday prefixes: abbreviated, full, case-insensitive, and the
/// cross-check against the resolved date.
#[test]
fn test_weekdays() -> Result<()> {
    let r = reference();

    // 2009-11-10 is a Tuesday
    assert_eq!(parse_timestamp_at("Tue 2009-11-10", r)?, utc(2009, 11, 10, 0, 0, 0));
    assert_eq!(parse_timestamp_at("tuesday 2009-11-10", r)?, utc(2009, 11, 10, 0, 0, 0));
    assert_eq!(parse_timestamp_at("TUE 2009-11-10", r)?, utc(2009, 11, 10, 0, 0, 0));
    // no space needed between weekday and date
    assert_eq!(parse_timestamp_at("Tuesday2009-11-10", r)?, utc(2009, 11, 10, 0, 0, 0));
    assert_eq!(
        parse_timestamp_at("Tue 2009-11-10 18:15:22 UTC", r)?,
        utc(2009, 11, 10, 18, 15, 22)
    );

    // the full week around the reference
    let week = [
        ("Mon", 9),
        ("Tue", 10),
        ("Wed", 11),
        ("Thu", 12),
        ("Fri", 13),
        ("Sat", 14),
        ("Sun", 15),
    ];
    for (name, day) in week {
        let input = format!("{name} 2009-11-{day:02}");
        assert_eq!(
            parse_timestamp_at(&input, r)?,
            utc(2009, 11, day, 0, 0, 0),
            "weekday mismatch for {input}"
        );
    }

    assert!(matches!(
        parse_timestamp_at("Mon 2009-11-10", r),
        Err(TimeParseError::WeekdayMismatch(_))
    ));
    assert!(matches!(
        parse_timestamp_at("Wed", r),
        Err(TimeParseError::WeekdayRequiresDate(_))
    ));
    assert!(matches!(
        parse_timestamp_at("Mon 18:15", r),
        Err(TimeParseError::WeekdayRequiresDate(_))
    ));
    Ok(())
}

/// Verifies timezone handling after times and dates, including named
/// zones, offsets, and the offset carried on the returned instant.
#[test]
fn test_timezones() -> Result<()> {
    init_tracing();
    let r = reference();

    let with_offset = parse_timestamp_at("18:15:22 +05:30", r)?;
    assert_eq!(with_offset, utc(2009, 11, 10, 12, 45, 22));
    assert_eq!(with_offset.offset().local_minus_utc(), 5 * 3_600 + 30 * 60);

    assert_eq!(parse_timestamp_at("18:15 -0800", r)?, utc(2009, 11, 11, 2, 15, 0));
    assert_eq!(parse_timestamp_at("2009-11-10 18:15:22 UTC", r)?, utc(2009, 11, 10, 18, 15, 22));

    // Amsterdam is CET (+01:00) in November
    assert_eq!(
        parse_timestamp_at("18:15:22 Europe/Amsterdam", r)?,
        utc(2009, 11, 10, 17, 15, 22)
    );
    // timezone directly after a date-only timestamp
    assert_eq!(parse_timestamp_at("2009-11-10 Asia/Tokyo", r)?, utc(2009, 11, 9, 15, 0, 0));
    // a bare zone name is a valid timestamp: the reference date at
    // midnight on that zone's local clock
    assert_eq!(parse_timestamp_at("Europe/Amsterdam", r)?, utc(2009, 11, 9, 23, 0, 0));

    assert!(matches!(
        parse_timestamp_at("2009-11-10 Mars/Olympus", r),
        Err(TimeParseError::UnknownTimezone(_))
    ));
    assert!(matches!(
        parse_timestamp_at("18:15 foo", r),
        Err(TimeParseError::UnknownTimezone(_))
    ));
    Ok(())
}

/// Verifies the offset may be affixed directly to the time with no
/// separating space, which this grammar deliberately accepts even though
/// systemd's own specification asks for a space in some contexts.
#[test]
fn test_offset_affixed_without_space() -> Result<()> {
    let r = reference();

    let affixed = parse_timestamp_at("18:15:22+05:30", r)?;
    assert_eq!(affixed, parse_timestamp_at("18:15:22 +05:30", r)?);
    assert_eq!(affixed.offset().local_minus_utc(), 5 * 3_600 + 30 * 60);

    assert_eq!(
        parse_timestamp_at("2009-11-10+01:00", r)?,
        utc(2009, 11, 9, 23, 0, 0)
    );
    Ok(())
}

/// Verifies calendar field bounds and offset bounds are rejected with
/// their documented categories.
#[test]
fn test_boundary_rejection() {
    let r = reference();

    let out_of_range = ["24:00:00", "18:60:00", "18:15:60", "2009-13-01", "2009-00-01", "2009-11-32"];
    for input in out_of_range {
        assert!(
            matches!(
                parse_timestamp_at(input, r),
                Err(TimeParseError::CalendarFieldOutOfRange(_))
            ),
            "{input:?} should be out of range"
        );
    }

    assert!(matches!(
        parse_timestamp_at("18:15 +99:00", r),
        Err(TimeParseError::OffsetOutOfRange(_))
    ));
    // chrono's representable offset range is exclusive of 24h, so exactly
    // +24:00 is rejected where the systemd grammar would allow it
    assert!(matches!(
        parse_timestamp_at("18:15 +24:00", r),
        Err(TimeParseError::OffsetOutOfRange(_))
    ));
    assert!(matches!(
        parse_timestamp_at("18:15 +05:3", r),
        Err(TimeParseError::MalformedOffset(_))
    ));
}

/// Verifies the engine defers month-length and leap-year validation to
/// calendar construction and surfaces its rejection.
#[test]
fn test_invalid_calendar_dates() {
    let r = reference();

    assert!(matches!(
        parse_timestamp_at("2009-02-30", r),
        Err(TimeParseError::CalendarFieldOutOfRange(_))
    ));
    assert!(matches!(
        parse_timestamp_at("2009-02-29", r),
        Err(TimeParseError::CalendarFieldOutOfRange(_))
    ));
    // 2008 was a leap year
    assert_eq!(parse_timestamp_at("2008-02-29", r).unwrap(), utc(2008, 2, 29, 0, 0, 0));
}

/// Verifies daylight-saving edge cases in named zones: nonexistent local
/// times are rejected, ambiguous ones take the earlier interpretation.
#[test]
fn test_dst_edges() {
    let r = reference();

    // Amsterdam sprang forward 2009-03-29 02:00 -> 03:00; 02:30 never
    // happened on that local clock
    assert!(matches!(
        parse_timestamp_at("2009-03-29 02:30 Europe/Amsterdam", r),
        Err(TimeParseError::CalendarFieldOutOfRange(_))
    ));

    // Amsterdam fell back 2009-10-25 03:00 -> 02:00; 02:30 happened twice
    // and the earlier (+02:00 summer time) reading wins
    let ambiguous = parse_timestamp_at("2009-10-25 02:30 Europe/Amsterdam", r).unwrap();
    assert_eq!(ambiguous, utc(2009, 10, 25, 0, 30, 0));
    assert_eq!(ambiguous.offset().local_minus_utc(), 2 * 3_600);
}

/// Verifies unconsumed input after a complete timestamp is rejected,
/// including a second date-shaped run.
#[test]
fn test_trailing_input() {
    let r = reference();

    assert!(matches!(
        parse_timestamp_at("2009-11-10 2009-11-10", r),
        Err(TimeParseError::TrailingInput(_))
    ));
    assert!(matches!(
        parse_timestamp_at("2009-11-10 18:15:22 UTC foo", r),
        Err(TimeParseError::TrailingInput(_))
    ));
    assert!(matches!(
        parse_timestamp_at("18:15:22 99", r),
        Err(TimeParseError::TrailingInput(_))
    ));
}

/// Verifies the defaults for omitted fields come from the reference's own
/// offset, not from UTC.
#[test]
fn test_defaults_follow_reference_offset() -> Result<()> {
    // 2009-11-10 23:00:00 at +05:00 is 18:00:00 UTC
    let plus_five = FixedOffset::east_opt(5 * 3_600).unwrap();
    let r = plus_five
        .with_ymd_and_hms(2009, 11, 10, 23, 0, 0)
        .single()
        .expect("fixed-offset civil time is unambiguous");

    // "today" is Nov 10 on the +05:00 clock; midnight there is Nov 9
    // 19:00 UTC
    assert_eq!(parse_timestamp_at("today", r)?, utc(2009, 11, 9, 19, 0, 0));
    // a bare time keeps the reference's date and offset
    let evening = parse_timestamp_at("18:15", r)?;
    assert_eq!(evening, utc(2009, 11, 10, 13, 15, 0));
    assert_eq!(evening.offset().local_minus_utc(), 5 * 3_600);
    Ok(())
}

/// Verifies the day tokens observe an explicit timezone when deciding
/// which civil date is "today".
#[test]
fn test_tokens_versus_bare_zone() -> Result<()> {
    let r = reference();

    // 23:00 UTC is already Nov 11 in Tokyo, so "today Asia/Tokyo" is a
    // different instant than the bare zone form, whose date defaults from
    // the reference's own offset
    assert_eq!(parse_timestamp_at("today Asia/Tokyo", r)?, utc(2009, 11, 10, 15, 0, 0));
    assert_eq!(parse_timestamp_at("Asia/Tokyo", r)?, utc(2009, 11, 9, 15, 0, 0));
    assert_eq!(parse_timestamp_at("tomorrow Pacific/Auckland", r)?, utc(2009, 11, 11, 11, 0, 0));
    Ok(())
}

/// Verifies a parser wired to a mock clock resolves clock-relative forms
/// deterministically.
#[test]
fn test_parser_with_mock_clock() {
    let clock = MockClock::at(reference());
    let parser = TimestampParser::new().with_clock(clock.clone());

    assert_eq!(parser.parse("now").unwrap(), reference());
    assert_eq!(parser.parse("18:15").unwrap(), utc(2009, 11, 10, 18, 15, 0));

    clock.advance(TimeDelta::days(1));
    assert_eq!(parser.parse("18:15").unwrap(), utc(2009, 11, 11, 18, 15, 0));
    assert_eq!(parser.parse("yesterday").unwrap(), utc(2009, 11, 10, 0, 0, 0));
}
