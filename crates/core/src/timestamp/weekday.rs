//! Weekday sub-parser
//!
//! Matches abbreviated ("Tue") or full ("Tuesday") English weekday names,
//! case-insensitively. Anything else is "not found" rather than an error:
//! the cursor stays put and the orchestrator tries other interpretations.

use chrono::Weekday;

use crate::scan::read_word;

/// Parse a weekday name at `pos`. Returns the weekday and the cursor after
/// the name, or `None` when the word is not a weekday.
pub(crate) fn parse_weekday(input: &str, pos: usize) -> Option<(Weekday, usize)> {
    let (word, next) = read_word(input, pos);
    if word.is_empty() {
        return None;
    }

    let weekday = match word.to_ascii_lowercase().as_str() {
        "mon" | "monday" => Weekday::Mon,
        "tue" | "tuesday" => Weekday::Tue,
        "wed" | "wednesday" => Weekday::Wed,
        "thu" | "thursday" => Weekday::Thu,
        "fri" | "friday" => Weekday::Fri,
        "sat" | "saturday" => Weekday::Sat,
        "sun" | "sunday" => Weekday::Sun,
        _ => return None,
    };
    Some((weekday, next))
}
