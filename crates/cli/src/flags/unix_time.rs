use std::error::Error;
use std::fmt::Display;

use chrono::DateTime;
use chrono::Month;
use chrono::NaiveDate;
use chrono::Utc;
use chrono::Weekday;

/// The layout of the default output of the Unix `date` command.
pub(crate) const UNIX_DATE_LAYOUT: &str = "Mon Jan _2 15:04:05 MST 2006";

const FORMAT: &str = "%a %b %e %H:%M:%S UTC %Y";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct UnixTimeError {
    input: String,
    reason: &'static str,
}

impl UnixTimeError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_owned(),
            reason,
        }
    }
}

impl Display for UnixTimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "failed to parse \"{input}\" as \"{UNIX_DATE_LAYOUT}\": {reason}",
            input = self.input,
            reason = self.reason
        )
    }
}

impl Error for UnixTimeError {}

/// Parses a time in the format of the Unix `date` command,
/// e.g. `Sat Feb  4 10:08:05 UTC 2017`.
///
/// Zone abbreviations do not identify an offset unambiguously, so any
/// well-formed abbreviation is read as UTC.
pub(crate) fn parse_unix_time(input: &str) -> Result<DateTime<Utc>, UnixTimeError> {
    let error = |reason| UnixTimeError::new(input, reason);

    let fields: Vec<&str> = input.split_whitespace().collect();
    let [weekday, month, day, clock, zone, year] = fields[..] else {
        return Err(error("expected six fields"));
    };

    if weekday.len() != 3 || weekday.parse::<Weekday>().is_err() {
        return Err(error("invalid weekday"));
    }

    let month = match month.parse::<Month>() {
        Ok(parsed) if month.len() == 3 => parsed,
        _ => return Err(error("invalid month")),
    };

    let day = number(day, 1..=2).ok_or_else(|| error("invalid day of month"))?;

    let [hour, minute, second] = clock.split(':').collect::<Vec<_>>()[..] else {
        return Err(error("invalid clock"));
    };
    let hour = number(hour, 1..=2).ok_or_else(|| error("invalid hour"))?;
    let minute = number(minute, 2..=2).ok_or_else(|| error("invalid minute"))?;
    let second = number(second, 2..=2).ok_or_else(|| error("invalid second"))?;

    if !is_zone_abbreviation(zone) {
        return Err(error("invalid time zone"));
    }

    let year = number(year, 4..=4).ok_or_else(|| error("invalid year"))?;

    NaiveDate::from_ymd_opt(year as i32, month.number_from_month(), day)
        .ok_or_else(|| error("day out of range"))?
        .and_hms_opt(hour, minute, second)
        .map(|datetime| datetime.and_utc())
        .ok_or_else(|| error("time out of range"))
}

/// Formats a time the way [parse_unix_time] reads it.
pub(crate) fn format_unix_time(time: DateTime<Utc>) -> String {
    time.format(FORMAT).to_string()
}

fn number(field: &str, digits: std::ops::RangeInclusive<usize>) -> Option<u32> {
    if !digits.contains(&field.len()) || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    field.parse().ok()
}

fn is_zone_abbreviation(zone: &str) -> bool {
    (3..=5).contains(&zone.len()) && zone.bytes().all(|b| b.is_ascii_uppercase())
}
