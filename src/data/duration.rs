use std::time::Duration;

use thiserror::Error;

const SECOND: f64 = 1_000.0;
const MINUTE: f64 = 60.0 * SECOND;
const HOUR: f64 = 60.0 * MINUTE;
const DAY: f64 = 24.0 * HOUR;
const WEEK: f64 = 7.0 * DAY;
const YEAR: f64 = 365.25 * DAY;
const MONTH: f64 = YEAR / 12.0;

/// Unit name to milliseconds multiplier
const UNITS: &[(&[&str], f64)] = &[
    (&["ms", "msec", "msecs", "milli", "millis", "millisecond", "milliseconds"], 1.0),
    (&["s", "sec", "secs", "second", "seconds"], SECOND),
    (&["m", "min", "mins", "minute", "minutes"], MINUTE),
    (&["h", "hr", "hrs", "hour", "hours"], HOUR),
    (&["d", "day", "days"], DAY),
    (&["w", "wk", "wks", "week", "weeks"], WEEK),
    (&["mth", "mths", "month", "months"], MONTH),
    (&["y", "yr", "yrs", "year", "years"], YEAR),
];

fn unit_multiplier(unit: &str) -> Option<f64> {
    UNITS
        .iter()
        .find(|(names, _)| names.contains(&unit))
        .map(|(_, multiplier)| *multiplier)
}

/// Why a relative-time expression was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    #[error("empty duration")]
    Empty,

    #[error("expected a number before '{0}'")]
    MissingNumber(String),

    #[error("missing unit after '{0}'")]
    MissingUnit(String),

    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    #[error("unknown unit '{0}'")]
    UnknownUnit(String),

    #[error("duration out of range")]
    OutOfRange,

    #[error("duration must not be negative")]
    Negative,
}

/// Largest magnitude (exclusive) representable as `i64` milliseconds.
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// Parse a relative-time expression like "2h", "30m", "1h 30m" or "1.5d"
/// into a signed millisecond count.
///
/// Terms are summed; whitespace and separators between terms are ignored.
/// A bare number without a unit is rejected.
pub fn parse_relative_ms(s: &str) -> Result<i64, DurationError> {
    let normalized: String = s
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '+'))
        .collect();

    let mut chars = normalized.chars().peekable();
    let mut total = 0.0;
    let mut terms = 0;

    while chars.peek().is_some() {
        let mut number = String::new();
        while let Some(&c) = chars.peek() {
            if c.is_ascii_digit() || matches!(c, '.' | '-' | '+') {
                number.push(c);
                chars.next();
            } else {
                break;
            }
        }

        let mut unit = String::new();
        while let Some(&c) = chars.peek() {
            if c.is_ascii_alphabetic() {
                unit.push(c);
                chars.next();
            } else {
                break;
            }
        }

        if number.is_empty() {
            return Err(DurationError::MissingNumber(unit));
        }
        if unit.is_empty() {
            return Err(DurationError::MissingUnit(number));
        }

        let value: f64 = match number.parse() {
            Ok(value) => value,
            Err(_) => return Err(DurationError::InvalidNumber(number)),
        };
        let multiplier = match unit_multiplier(&unit) {
            Some(multiplier) => multiplier,
            None => return Err(DurationError::UnknownUnit(unit)),
        };

        total += value * multiplier;
        terms += 1;
    }

    if terms == 0 {
        return Err(DurationError::Empty);
    }

    let total = total.round();
    if !total.is_finite() || total < -I64_LIMIT || total >= I64_LIMIT {
        return Err(DurationError::OutOfRange);
    }
    Ok(total as i64)
}

/// Parse a non-negative relative-time expression as a [`Duration`].
pub fn parse_duration(s: &str) -> Result<Duration, DurationError> {
    let ms = parse_relative_ms(s)?;
    u64::try_from(ms)
        .map(Duration::from_millis)
        .map_err(|_| DurationError::Negative)
}
