//! Error types for window resolution, plugin execution and summarizing.

use std::process::ExitStatus;

use thiserror::Error;

/// Convenience alias used throughout the library.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Top-level error for a single `tsa` invocation.
///
/// Every variant aborts the command; no statistics are printed once one
/// of these has been produced.
#[derive(Debug, Error)]
pub enum Error {
    /// A `--since`, `--until`, `--step` or `--timeout` value was rejected.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The data source failed to produce a result.
    #[error("plugin failed: {0}")]
    Plugin(PluginError),

    /// The data source produced something that is neither a series nor a
    /// labeled collection of series.
    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// A series had no samples to summarize.
    #[error("{}", empty_series_message(.label))]
    EmptySeries { label: Option<String> },

    /// Settings could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

fn empty_series_message(label: &Option<String>) -> String {
    match label {
        Some(label) => format!("series '{}' has no samples", label),
        None => "series has no samples".to_string(),
    }
}

impl From<PluginError> for Error {
    fn from(err: PluginError) -> Self {
        match err {
            PluginError::Shape(shape) => Error::Shape(shape),
            other => Error::Plugin(other),
        }
    }
}

/// A user-supplied option string could not be interpreted.
#[derive(Debug, Error)]
#[error("invalid --{option} value {value:?}: {reason}")]
pub struct ParseError {
    pub option: &'static str,
    pub value: String,
    pub reason: String,
}

impl ParseError {
    pub fn new(option: &'static str, value: &str, reason: impl std::fmt::Display) -> Self {
        Self {
            option,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Errors raised by [`Plugin`](crate::source::Plugin) implementations.
#[derive(Debug, Error)]
pub enum PluginError {
    /// Reading input or spawning a process failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Output was not valid JSON.
    #[error("failed to decode output: {0}")]
    Decode(#[from] serde_json::Error),

    /// External command exited unsuccessfully.
    #[error("command `{program}` exited with {status}{}", stderr_suffix(.stderr))]
    Command {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    /// Output was valid JSON but of the wrong shape.
    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// The fetch did not complete within the configured timeout.
    #[error("timed out after {0:?}")]
    Timeout(std::time::Duration),
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {}", stderr)
    }
}

/// Plugin output did not match any accepted result shape.
#[derive(Debug, Error)]
#[error("unexpected plugin result: {0}")]
pub struct ShapeError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_is_lifted_out_of_plugin_error() {
        let err: Error = PluginError::Shape(ShapeError("expected array".into())).into();
        assert!(matches!(err, Error::Shape(_)));

        let err: Error = PluginError::Timeout(std::time::Duration::from_secs(1)).into();
        assert!(matches!(err, Error::Plugin(PluginError::Timeout(_))));
    }

    #[test]
    fn test_messages() {
        let err = ParseError::new("since", "2x", "unknown unit 'x'");
        assert_eq!(
            err.to_string(),
            "invalid --since value \"2x\": unknown unit 'x'"
        );

        let err = Error::EmptySeries {
            label: Some("cpu".into()),
        };
        assert_eq!(err.to_string(), "series 'cpu' has no samples");
        let err = Error::EmptySeries { label: None };
        assert_eq!(err.to_string(), "series has no samples");
    }
}
