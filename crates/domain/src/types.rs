//! Domain types and models

use chrono::FixedOffset;
use chrono_tz::Tz;

/// A resolved timezone for a parsed timestamp.
///
/// Fixed offsets carry no identity beyond their offset seconds; named
/// zones are entries of the IANA timezone database and resolve to a
/// concrete offset only once combined with a civil date and time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    /// Coordinated Universal Time (`Z` or `UTC` in the grammar).
    Utc,
    /// A fixed UTC offset (`+05:30`, `-0800`, `+05`).
    Fixed(FixedOffset),
    /// An IANA timezone database entry (`Europe/Amsterdam`).
    Named(Tz),
}
