//! Date, time and duration parsing for command-line input.

use chrono::{Datelike, Days, NaiveDate, NaiveTime, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::MypaError;

static TIME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    // 9:00, 14:30, 9am, 2:30pm
    Regex::new(r"^(?P<hour>\d{1,2})(?::(?P<minute>\d{2}))?\s*(?P<meridiem>am|pm)?$")
        .unwrap_or_else(|e| panic!("Invalid time regex: {e}"))
});

static DURATION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    // 25, 25m, 1h, 1h30m
    Regex::new(r"^(?:(?P<hours>\d+)\s*h)?\s*(?:(?P<minutes>\d+)\s*(?:m|min)?)?$")
        .unwrap_or_else(|e| panic!("Invalid duration regex: {e}"))
});

/// Parse a date relative to `today`.
///
/// Supports:
/// - `today`, `tomorrow`, `yesterday`
/// - `monday`, `next friday` (next occurrence)
/// - `in 3 days`, `in 2 weeks`
/// - `2024-12-15` (ISO format)
///
/// # Errors
///
/// Returns [`MypaError::Parse`] if the input matches none of the above.
pub fn parse_date(input: &str, today: NaiveDate) -> Result<NaiveDate, MypaError> {
    let input = input.trim().to_lowercase();

    let parsed = match input.as_str() {
        "today" => Some(today),
        "tomorrow" => today.checked_add_days(Days::new(1)),
        "yesterday" => today.checked_sub_days(Days::new(1)),
        other => parse_relative_offset(other, today)
            .or_else(|| parse_weekday(other, today))
            .or_else(|| NaiveDate::parse_from_str(other, "%Y-%m-%d").ok()),
    };

    parsed.ok_or_else(|| MypaError::Parse(format!("unrecognised date '{input}'")))
}

/// Parse "in X days/weeks" patterns.
fn parse_relative_offset(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    if parts.len() != 3 || parts[0] != "in" {
        return None;
    }

    let amount: u64 = parts[1].parse().ok()?;
    let days = match parts[2].trim_end_matches('s') {
        "day" => amount,
        "week" => amount * 7,
        _ => return None,
    };
    today.checked_add_days(Days::new(days))
}

/// Parse weekday names. The same weekday as today means a week out.
fn parse_weekday(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let day_str = input.strip_prefix("next ").unwrap_or(input);

    let target = match day_str {
        "monday" | "mon" => Weekday::Mon,
        "tuesday" | "tue" | "tues" => Weekday::Tue,
        "wednesday" | "wed" => Weekday::Wed,
        "thursday" | "thu" | "thur" | "thurs" => Weekday::Thu,
        "friday" | "fri" => Weekday::Fri,
        "saturday" | "sat" => Weekday::Sat,
        "sunday" | "sun" => Weekday::Sun,
        _ => return None,
    };

    let mut days_until =
        (7 + target.num_days_from_monday() - today.weekday().num_days_from_monday()) % 7;
    if days_until == 0 {
        days_until = 7;
    }
    today.checked_add_days(Days::new(u64::from(days_until)))
}

/// Parse a time of day.
///
/// Accepts `9:00`, `14:30`, `9am`, `2:30pm`, and the words `morning`,
/// `noon`, `afternoon`, `evening`.
///
/// # Errors
///
/// Returns [`MypaError::Parse`] for anything else, including out-of-range
/// hours and minutes.
pub fn parse_time(input: &str) -> Result<NaiveTime, MypaError> {
    let input = input.trim().to_lowercase();
    let invalid = || MypaError::Parse(format!("unrecognised time '{input}'"));

    match input.as_str() {
        "morning" => return NaiveTime::from_hms_opt(9, 0, 0).ok_or_else(invalid),
        "noon" | "midday" => return NaiveTime::from_hms_opt(12, 0, 0).ok_or_else(invalid),
        "afternoon" => return NaiveTime::from_hms_opt(14, 0, 0).ok_or_else(invalid),
        "evening" => return NaiveTime::from_hms_opt(18, 0, 0).ok_or_else(invalid),
        _ => {}
    }

    let caps = TIME_PATTERN.captures(&input).ok_or_else(invalid)?;
    let mut hour: u32 = caps["hour"].parse().map_err(|_| invalid())?;
    let minute: u32 = caps
        .name("minute")
        .map_or(Ok(0), |m| m.as_str().parse())
        .map_err(|_| invalid())?;

    match caps.name("meridiem").map(|m| m.as_str()) {
        Some(_) if hour == 0 || hour > 12 => return Err(invalid()),
        Some("pm") if hour < 12 => hour += 12,
        Some("am") if hour == 12 => hour = 0,
        // A bare hour needs minutes to be unambiguous
        None if caps.name("minute").is_none() => return Err(invalid()),
        _ => {}
    }

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid)
}

/// Parse a duration into whole minutes.
///
/// Accepts `25`, `25m`, `25min`, `1h`, `1h30m`, `1h30`.
///
/// # Errors
///
/// Returns [`MypaError::Parse`] for unrecognised input or a zero duration.
pub fn parse_duration_minutes(input: &str) -> Result<u32, MypaError> {
    let input = input.trim().to_lowercase();
    let invalid = || MypaError::Parse(format!("unrecognised duration '{input}'"));

    if input.is_empty() {
        return Err(invalid());
    }

    let caps = DURATION_PATTERN.captures(&input).ok_or_else(invalid)?;
    let hours: u32 = caps
        .name("hours")
        .map_or(Ok(0), |m| m.as_str().parse())
        .map_err(|_| invalid())?;
    let minutes: u32 = caps
        .name("minutes")
        .map_or(Ok(0), |m| m.as_str().parse())
        .map_err(|_| invalid())?;

    let total = hours
        .checked_mul(60)
        .and_then(|h| h.checked_add(minutes))
        .ok_or_else(invalid)?;
    if total == 0 {
        return Err(MypaError::Parse("duration must be at least a minute".to_string()));
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    // A Wednesday
    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 15).unwrap()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_parse_relative_words() {
        assert_eq!(parse_date("today", today()).unwrap(), today());
        assert_eq!(parse_date("Tomorrow", today()).unwrap(), ymd(2024, 5, 16));
        assert_eq!(parse_date("yesterday", today()).unwrap(), ymd(2024, 5, 14));
    }

    #[test]
    fn test_parse_relative_offset() {
        assert_eq!(parse_date("in 3 days", today()).unwrap(), ymd(2024, 5, 18));
        assert_eq!(parse_date("in 2 weeks", today()).unwrap(), ymd(2024, 5, 29));
    }

    #[test]
    fn test_parse_weekday() {
        assert_eq!(parse_date("friday", today()).unwrap(), ymd(2024, 5, 17));
        assert_eq!(parse_date("next mon", today()).unwrap(), ymd(2024, 5, 20));
        assert_eq!(parse_date("wednesday", today()).unwrap(), ymd(2024, 5, 22));
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(parse_date("2024-12-15", today()).unwrap(), ymd(2024, 12, 15));
        assert!(parse_date("2024-13-01", today()).is_err());
        assert!(parse_date("someday", today()).is_err());
    }

    #[test]
    fn test_parse_time_24hour() {
        assert_eq!(parse_time("9:00").unwrap(), hm(9, 0));
        assert_eq!(parse_time("14:30").unwrap(), hm(14, 30));
        assert!(parse_time("24:00").is_err());
        assert!(parse_time("9:75").is_err());
    }

    #[test]
    fn test_parse_time_12hour() {
        assert_eq!(parse_time("9am").unwrap(), hm(9, 0));
        assert_eq!(parse_time("2:30pm").unwrap(), hm(14, 30));
        assert_eq!(parse_time("12am").unwrap(), hm(0, 0));
        assert_eq!(parse_time("12pm").unwrap(), hm(12, 0));
        assert_eq!(parse_time("3 PM").unwrap(), hm(15, 0));
        assert!(parse_time("13pm").is_err());
    }

    #[test]
    fn test_parse_time_words_and_garbage() {
        assert_eq!(parse_time("noon").unwrap(), hm(12, 0));
        assert_eq!(parse_time("evening").unwrap(), hm(18, 0));
        assert!(parse_time("9").is_err());
        assert!(parse_time("later").is_err());
    }

    #[test]
    fn test_parse_duration_minutes() {
        assert_eq!(parse_duration_minutes("25").unwrap(), 25);
        assert_eq!(parse_duration_minutes("25m").unwrap(), 25);
        assert_eq!(parse_duration_minutes("45min").unwrap(), 45);
        assert_eq!(parse_duration_minutes("1h").unwrap(), 60);
        assert_eq!(parse_duration_minutes("1h30m").unwrap(), 90);
        assert_eq!(parse_duration_minutes("2h15").unwrap(), 135);
    }

    #[test]
    fn test_parse_duration_rejects() {
        assert!(parse_duration_minutes("").is_err());
        assert!(parse_duration_minutes("0").is_err());
        assert!(parse_duration_minutes("soon").is_err());
        assert!(parse_duration_minutes("1d").is_err());
    }
}
