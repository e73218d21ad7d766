//! Time window resolution.
//!
//! Turns the raw `--since`, `--until` and `--step` strings into absolute
//! millisecond timestamps and a sampling step.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::duration::{parse_relative_ms, DurationError};
use crate::error::ParseError;

/// Window length used when `--since` is not given (one hour).
pub const DEFAULT_SPAN_MS: i64 = 3_600_000;

/// Smallest step ever handed to a plugin.
pub const MIN_STEP: f64 = 30.0;

/// Number of samples the default step aims for across the window.
const TARGET_SAMPLES: f64 = 1000.0;

/// The raw range options as typed by the user.
///
/// These are passed unchanged to the plugin alongside the resolved
/// [`TimeWindow`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeOptions {
    pub since: Option<String>,
    pub until: Option<String>,
    pub step: Option<String>,
    #[serde(default)]
    pub aggregate: bool,
}

/// A resolved `[start, end]` interval in epoch milliseconds plus the
/// sampling step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: i64,
    pub end: i64,
    pub step: f64,
}

impl TimeWindow {
    /// Window length in milliseconds. Negative for an inverted window.
    pub fn span_ms(&self) -> i64 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Resolve a window against the current wall-clock time.
pub fn resolve_window(options: &RangeOptions) -> Result<TimeWindow, ParseError> {
    resolve_window_at(options, now_ms())
}

/// Resolve a window relative to `now` (epoch milliseconds).
pub fn resolve_window_at(options: &RangeOptions, now: i64) -> Result<TimeWindow, ParseError> {
    let end = resolve_until(options.until.as_deref(), now)?;
    let start = resolve_since(options.since.as_deref(), end)?;
    let step = resolve_step(options.step.as_deref(), start, end)?;

    let window = TimeWindow { start, end, step };
    if window.is_inverted() {
        warn!(start, end, "resolved window is inverted; plugin will receive it as-is");
    }
    debug!(start, end, step, "resolved time window");
    Ok(window)
}

fn resolve_until(until: Option<&str>, now: i64) -> Result<i64, ParseError> {
    match until {
        None | Some("") => Ok(now),
        Some(s) if s.eq_ignore_ascii_case("now") => Ok(now),
        Some(s) => match parse_absolute(s) {
            Some(at) => Ok(at),
            None => offset_from(now, s, "until"),
        },
    }
}

fn resolve_since(since: Option<&str>, end: i64) -> Result<i64, ParseError> {
    match since {
        None | Some("") => Ok(end.saturating_sub(DEFAULT_SPAN_MS)),
        Some(s) => match parse_absolute(s) {
            Some(at) => Ok(at),
            None => offset_from(end, s, "since"),
        },
    }
}

/// `base` minus the relative expression `s`.
fn offset_from(base: i64, s: &str, option: &'static str) -> Result<i64, ParseError> {
    let offset = parse_relative_ms(s).map_err(|err| ParseError::new(option, s, err))?;
    base.checked_sub(offset)
        .ok_or_else(|| ParseError::new(option, s, DurationError::OutOfRange))
}

fn resolve_step(step: Option<&str>, start: i64, end: i64) -> Result<f64, ParseError> {
    let supplied = match step {
        None | Some("") => None,
        Some(s) => {
            let value: i64 = s
                .trim()
                .parse()
                .map_err(|_| ParseError::new("step", s, "expected a base-10 integer"))?;
            // Zero means "pick one for me".
            (value != 0).then_some(value as f64)
        }
    };

    let step = supplied.unwrap_or_else(|| end.saturating_sub(start) as f64 / TARGET_SAMPLES);
    Ok(step.max(MIN_STEP))
}

/// An RFC 3339 timestamp such as `2024-05-01T12:00:00Z`.
fn parse_absolute(s: &str) -> Option<i64> {
    DateTime::parse_from_rfc3339(s.trim())
        .ok()
        .map(|at| at.timestamp_millis())
}
