//! Clock-time helpers.
//!
//! Times travel through the UI as text: `<input type="time">` yields
//! 24-hour `"HH:MM"` (or `"HH:MM:SS"`), while the server renders table
//! cells as 12-hour `"hh:mm AM"`. Both are reduced to minutes since
//! midnight so ranges can be compared numerically.

use chrono::format::ParseErrorKind;
use chrono::{NaiveTime, Timelike};

use crate::error::TimeParseError;

pub const MINUTES_PER_HOUR: u32 = 60;
pub const MINUTES_PER_DAY: u32 = 24 * MINUTES_PER_HOUR;

const TWELVE_HOUR: &str = "%I:%M %p";
const TWENTY_FOUR_HOUR: &str = "%H:%M";
const TWENTY_FOUR_HOUR_SECONDS: &str = "%H:%M:%S";

/// Parse `"HH:MM"`, `"HH:MM:SS"` or `"hh:mm AM|PM"` into minutes since midnight
pub fn parse_minutes(text: &str) -> Result<u32, TimeParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(TimeParseError::Empty);
    }

    let format = if text.contains(char::is_whitespace) {
        TWELVE_HOUR
    } else if text.matches(':').count() == 2 {
        TWENTY_FOUR_HOUR_SECONDS
    } else {
        TWENTY_FOUR_HOUR
    };

    match NaiveTime::parse_from_str(text, format) {
        Ok(time) => Ok(time.num_seconds_from_midnight() / 60),
        Err(e) if e.kind() == ParseErrorKind::OutOfRange => Err(TimeParseError::OutOfRange(text.to_string())),
        Err(_) => Err(TimeParseError::InvalidFormat(text.to_string())),
    }
}

/// Parse a displayed `"start - end"` range into a minute interval
pub fn parse_range(text: &str) -> Result<(u32, u32), TimeParseError> {
    let (start, end) = text
        .split_once(" - ")
        .ok_or_else(|| TimeParseError::InvalidRange(text.to_string()))?;
    Ok((parse_minutes(start)?, parse_minutes(end)?))
}

/// Format an hour of the day as `"hh:00 AM"`; hour 24 wraps to midnight
pub fn format_hour_12(hour: u32) -> String {
    format_minutes_12(hour * MINUTES_PER_HOUR)
}

/// Format minutes since midnight as `"hh:mm AM"`
pub fn format_minutes_12(minutes: u32) -> String {
    let minutes = minutes % MINUTES_PER_DAY;
    NaiveTime::from_hms_opt(minutes / MINUTES_PER_HOUR, minutes % MINUTES_PER_HOUR, 0)
        .map(|time| time.format(TWELVE_HOUR).to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_24_hour() {
        assert_eq!(parse_minutes("00:00"), Ok(0));
        assert_eq!(parse_minutes("09:30"), Ok(570));
        assert_eq!(parse_minutes("23:59"), Ok(1439));
        assert_eq!(parse_minutes("13:05:00"), Ok(785));
    }

    #[test]
    fn test_parse_12_hour() {
        assert_eq!(parse_minutes("10:30 AM"), Ok(630));
        assert_eq!(parse_minutes("01:00 PM"), Ok(780));
        assert_eq!(parse_minutes("12:00 PM"), Ok(720));
        assert_eq!(parse_minutes("12:15 AM"), Ok(15));
        assert_eq!(parse_minutes("7:45 pm"), Ok(1185));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_minutes(""), Err(TimeParseError::Empty));
        assert!(matches!(parse_minutes("noon"), Err(TimeParseError::InvalidFormat(_))));
        assert!(matches!(parse_minutes("24:00"), Err(TimeParseError::OutOfRange(_))));
        assert!(matches!(parse_minutes("10:60"), Err(TimeParseError::OutOfRange(_))));
        assert!(matches!(parse_minutes("13:00 PM"), Err(TimeParseError::OutOfRange(_))));
        assert!(matches!(parse_minutes("10:00 XM"), Err(TimeParseError::InvalidFormat(_))));
    }

    #[test]
    fn test_parse_range() {
        assert_eq!(parse_range("09:00 AM - 10:30 AM"), Ok((540, 630)));
        assert_eq!(parse_range("11:00 AM - 01:00 PM"), Ok((660, 780)));
        assert!(matches!(parse_range("09:00 AM"), Err(TimeParseError::InvalidRange(_))));
    }

    #[test]
    fn test_format_hour_12() {
        assert_eq!(format_hour_12(0), "12:00 AM");
        assert_eq!(format_hour_12(9), "09:00 AM");
        assert_eq!(format_hour_12(12), "12:00 PM");
        assert_eq!(format_hour_12(13), "01:00 PM");
        assert_eq!(format_hour_12(24), "12:00 AM");
    }

    #[test]
    fn test_format_minutes_12() {
        assert_eq!(format_minutes_12(630), "10:30 AM");
        assert_eq!(format_minutes_12(780), "01:00 PM");
        assert_eq!(format_minutes_12(5), "12:05 AM");
    }
}
