use std::error::Error;
use std::fmt::Display;

use chrono::TimeDelta;

const NANOSECOND: u128 = 1;
const MICROSECOND: u128 = 1_000 * NANOSECOND;
const MILLISECOND: u128 = 1_000 * MICROSECOND;
const SECOND: u128 = 1_000 * MILLISECOND;
const MINUTE: u128 = 60 * SECOND;
const HOUR: u128 = 60 * MINUTE;
const DAY: u128 = 24 * HOUR;

// More fraction digits than this cannot change the result at nanosecond precision.
const MAX_FRACTION_DIGITS: usize = 18;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DurationError {
    Invalid(String),
    MissingUnit(String),
    UnknownUnit { unit: String, input: String },
    Overflow(String),
}

impl Display for DurationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DurationError::Invalid(input) => write!(f, "invalid duration \"{input}\""),
            DurationError::MissingUnit(input) => {
                write!(f, "missing unit in duration \"{input}\"")
            }
            DurationError::UnknownUnit { unit, input } => {
                write!(f, "unknown unit \"{unit}\" in duration \"{input}\"")
            }
            DurationError::Overflow(input) => write!(f, "duration \"{input}\" is out of range"),
        }
    }
}

impl Error for DurationError {}

/// Parses a duration such as `1h30m` or `1.5d`.
///
/// The syntax is a possibly signed sequence of decimal numbers, each with
/// an optional fraction and a unit: `ns`, `us` (or `µs`), `ms`, `s`, `m`,
/// `h` and `d`. The components are summed up, so a unit may appear more
/// than once: `1h2h` is three hours.
pub(crate) fn parse_duration(input: &str) -> Result<TimeDelta, DurationError> {
    let invalid = || DurationError::Invalid(input.to_owned());
    let overflow = || DurationError::Overflow(input.to_owned());

    let (negative, mut rest) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };

    if rest == "0" {
        return Ok(TimeDelta::zero());
    }
    if rest.is_empty() {
        return Err(invalid());
    }

    let limit = i64::MAX as u128 + u128::from(negative);
    let mut total: u128 = 0;

    while !rest.is_empty() {
        let int_len = leading_digits(rest);
        let (int_part, tail) = rest.split_at(int_len);
        rest = tail;

        let mut fraction = "";
        if let Some(tail) = rest.strip_prefix('.') {
            let fraction_len = leading_digits(tail);
            (fraction, rest) = tail.split_at(fraction_len);
        }

        if int_part.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }

        let unit_len = rest
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(rest.len());
        let (unit, tail) = rest.split_at(unit_len);
        rest = tail;

        let unit_nanos = match unit {
            "" => return Err(DurationError::MissingUnit(input.to_owned())),
            "ns" => NANOSECOND,
            "us" | "µs" | "μs" => MICROSECOND,
            "ms" => MILLISECOND,
            "s" => SECOND,
            "m" => MINUTE,
            "h" => HOUR,
            "d" => DAY,
            _ => {
                return Err(DurationError::UnknownUnit {
                    unit: unit.to_owned(),
                    input: input.to_owned(),
                });
            }
        };

        let int: u128 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().map_err(|_| overflow())?
        };
        let mut value = int.checked_mul(unit_nanos).ok_or_else(overflow)?;

        if !fraction.is_empty() {
            let digits = &fraction[..fraction.len().min(MAX_FRACTION_DIGITS)];
            let scale = 10u128.pow(digits.len() as u32);
            let numerator: u128 = digits.parse().map_err(|_| invalid())?;
            value += numerator * unit_nanos / scale;
        }

        total = total.checked_add(value).ok_or_else(overflow)?;
        if total > limit {
            return Err(overflow());
        }
    }

    let nanos = if negative {
        -(total as i128)
    } else {
        total as i128
    };
    let nanos = i64::try_from(nanos).map_err(|_| overflow())?;

    Ok(TimeDelta::nanoseconds(nanos))
}

fn leading_digits(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}

/// Formats a duration the way it is accepted on the command line,
/// e.g. `26h0m0s`, `1m30s` or `500ms`.
pub(crate) fn format_duration(delta: TimeDelta) -> String {
    let nanos = i128::from(delta.num_seconds()) * SECOND as i128
        + i128::from(delta.subsec_nanos());
    let sign = if nanos < 0 { "-" } else { "" };
    let nanos = nanos.unsigned_abs();

    if nanos == 0 {
        return String::from("0s");
    }

    if nanos < SECOND {
        let (unit, unit_nanos) = match nanos {
            n if n < MICROSECOND => ("ns", NANOSECOND),
            n if n < MILLISECOND => ("µs", MICROSECOND),
            _ => ("ms", MILLISECOND),
        };
        return format!("{sign}{}{unit}", decimal(nanos, unit_nanos));
    }

    let hours = nanos / HOUR;
    let minutes = nanos % HOUR / MINUTE;
    let seconds = decimal(nanos % MINUTE, SECOND);

    let mut formatted = String::from(sign);
    if hours > 0 {
        formatted.push_str(&format!("{hours}h"));
    }
    if hours > 0 || minutes > 0 {
        formatted.push_str(&format!("{minutes}m"));
    }
    formatted.push_str(&format!("{seconds}s"));

    formatted
}

fn decimal(value: u128, unit: u128) -> String {
    let int = value / unit;
    let fraction = value % unit;

    if fraction == 0 {
        return int.to_string();
    }

    let width = unit.ilog10() as usize;
    let fraction = format!("{fraction:0width$}");

    format!("{int}.{}", fraction.trim_end_matches('0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_durations() {
        let hour = TimeDelta::hours(1);
        let tests = [
            ("1h30.5m3s", hour + TimeDelta::minutes(30) + TimeDelta::seconds(33)),
            ("1h", hour),
            ("1h2h", hour * 3),
            ("30m1h", hour + TimeDelta::minutes(30)),
            ("1d", hour * 24),
            ("0.50d", hour * 12),
            (".5d", hour * 12),
            ("1d1h", hour * 25),
            ("1h1d", hour * 25),
            ("1h1d60m", hour * 26),
            ("2d2d", hour * 96),
            ("1.h", hour),
            ("1500ms", TimeDelta::milliseconds(1500)),
            ("3us", TimeDelta::microseconds(3)),
            ("3µs", TimeDelta::microseconds(3)),
            ("10ns", TimeDelta::nanoseconds(10)),
            ("0", TimeDelta::zero()),
            ("+5m", TimeDelta::minutes(5)),
            ("-5m", TimeDelta::minutes(-5)),
        ];

        for (input, expected) in tests {
            assert_eq!(parse_duration(input), Ok(expected), "parsing \"{input}\"");
        }
    }

    #[test]
    fn parse_invalid_durations() {
        let tests = ["", "bla", "1", "1x", ".d", "h", "-", "1h-1m", "1h 1m"];

        for input in tests {
            assert!(parse_duration(input).is_err(), "parsing \"{input}\" should fail");
        }
    }

    #[test]
    fn parse_reports_unit_errors() {
        assert_eq!(
            parse_duration("1"),
            Err(DurationError::MissingUnit(String::from("1")))
        );
        assert_eq!(
            parse_duration("3w"),
            Err(DurationError::UnknownUnit {
                unit: String::from("w"),
                input: String::from("3w")
            })
        );
    }

    #[test]
    fn parse_overflow_fails() {
        assert_eq!(
            parse_duration("9999999999h"),
            Err(DurationError::Overflow(String::from("9999999999h")))
        );
        assert!(parse_duration("99999999999999999999999999999999999999999h").is_err());
    }

    #[test]
    fn format_durations() {
        assert_eq!(format_duration(TimeDelta::hours(26)), "26h0m0s");
        assert_eq!(format_duration(TimeDelta::seconds(90)), "1m30s");
        assert_eq!(format_duration(TimeDelta::milliseconds(500)), "500ms");
        assert_eq!(format_duration(TimeDelta::milliseconds(1500)), "1.5s");
        assert_eq!(format_duration(TimeDelta::microseconds(1500)), "1.5ms");
        assert_eq!(format_duration(TimeDelta::zero()), "0s");
        assert_eq!(format_duration(TimeDelta::minutes(-5)), "-5m0s");
    }

    #[test]
    fn formatted_duration_parses_back() {
        for input in ["26h0m0s", "1h30m33s", "12m0.5s", "250ms"] {
            let parsed = parse_duration(input).unwrap();

            assert_eq!(format_duration(parsed), input);
        }
    }
}
