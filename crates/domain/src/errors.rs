//! Error types used throughout the workspace

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Tempus parsing operations
///
/// Every failure mode of the timespan and timestamp grammars maps onto
/// exactly one of these variants. The payload is a human-readable detail
/// string that embeds the offending input fragment.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "detail")]
pub enum TimeParseError {
    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("Malformed number: {0}")]
    MalformedNumber(String),

    #[error("Unknown unit: {0}")]
    UnknownUnit(String),

    #[error("Calendar field out of range: {0}")]
    CalendarFieldOutOfRange(String),

    #[error("Malformed timezone offset: {0}")]
    MalformedOffset(String),

    #[error("Timezone offset out of range: {0}")]
    OffsetOutOfRange(String),

    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    #[error("Ambiguous time format: {0}")]
    AmbiguousTimeFormat(String),

    #[error("Weekday requires a date: {0}")]
    WeekdayRequiresDate(String),

    #[error("Weekday mismatch: {0}")]
    WeekdayMismatch(String),

    #[error("Trailing input: {0}")]
    TrailingInput(String),
}

/// Result type alias for Tempus operations
pub type Result<T> = std::result::Result<T, TimeParseError>;
