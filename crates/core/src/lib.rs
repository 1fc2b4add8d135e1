//! # Tempus Core
//!
//! Parsing engine for systemd-style time expressions, as described in the
//! `systemd.time(7)` man page: relative time spans (`"1.5h"`,
//! `"2h 30min"`, `"55s500ms"`) and absolute timestamps (`"now"`,
//! `"tomorrow UTC"`, `"Tue 2009-11-10 18:15:22"`, `"+3h30min"`,
//! `"@1395716396"`).
//!
//! This crate contains:
//! - Scanning primitives operating on index ranges over immutable text
//! - The timespan grammar and its unit table
//! - The timestamp grammar with date, time, weekday, and timezone
//!   sub-parsers
//! - Collaborator ports (timezone database lookup, wall clock)
//!
//! ## Architecture Principles
//! - Only depends on `tempus-common` and `tempus-domain`
//! - Purely functional: every call is a stateless translation of a string
//!   into a value or an error
//! - External capabilities (timezone database, clock) via traits
//!
//! ## Usage
//!
//! ```
//! use chrono::{TimeDelta, TimeZone, Utc};
//! use tempus_core::{parse_timespan, parse_timestamp_at};
//!
//! let span = parse_timespan("2h 30min").unwrap();
//! assert_eq!(span, TimeDelta::seconds(9_000));
//!
//! let reference = Utc.with_ymd_and_hms(2009, 11, 10, 23, 0, 0).unwrap().fixed_offset();
//! let instant = parse_timestamp_at("Tue 2009-11-10 18:15:22 UTC", reference).unwrap();
//! assert_eq!(instant, Utc.with_ymd_and_hms(2009, 11, 10, 18, 15, 22).unwrap());
//! ```

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

mod scan;
pub mod timespan;
pub mod timestamp;
pub mod tz;

// Re-export the public surface
pub use timespan::parse_timespan;
pub use timestamp::{parse_timestamp, parse_timestamp_at, TimestampParser};
pub use tz::{IanaResolver, ZoneResolver};
// Re-export domain and clock types callers need alongside the parsers
pub use tempus_common::{Clock, MockClock, SystemClock};
pub use tempus_domain::{TimeParseError, Zone};
