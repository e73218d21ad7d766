//! Plugin abstraction for fetching time-series data.
//!
//! This module provides a trait-based abstraction over whatever actually
//! knows how to produce samples for a window: a JSON file, an external
//! command, or an async byte stream.

mod command;
mod file;
mod stream;

pub use command::CommandPlugin;
pub use file::FilePlugin;
pub use stream::StreamPlugin;

use std::fmt::Debug;

use async_trait::async_trait;

use crate::data::{PluginResult, RangeOptions, TimeWindow};
use crate::error::PluginError;

/// A data source that produces samples for a resolved window.
///
/// Implementations are free to ignore the window or the raw options; the
/// result is classified into a [`PluginResult`] before it is returned.
///
/// # Example
///
/// ```
/// use async_trait::async_trait;
/// use tsa::{Plugin, PluginError, PluginResult, RangeOptions, TimeWindow};
///
/// #[derive(Debug)]
/// struct Constant;
///
/// #[async_trait]
/// impl Plugin for Constant {
///     async fn execute(
///         &self,
///         _window: &TimeWindow,
///         _options: &RangeOptions,
///     ) -> Result<PluginResult, PluginError> {
///         Ok(PluginResult::Flat(vec![1.0, 2.0, 3.0]))
///     }
///
///     fn description(&self) -> &str {
///         "constant"
///     }
/// }
/// ```
#[async_trait]
pub trait Plugin: Send + Sync + Debug {
    /// Fetch the data for `window`.
    ///
    /// Failures are returned unchanged to the caller; plugins are never
    /// retried.
    async fn execute(
        &self,
        window: &TimeWindow,
        options: &RangeOptions,
    ) -> Result<PluginResult, PluginError>;

    /// Returns a human-readable description of the plugin.
    ///
    /// Used in log output.
    fn description(&self) -> &str;
}

/// Decode a JSON document and classify its shape.
fn decode(bytes: &[u8]) -> Result<PluginResult, PluginError> {
    let value: serde_json::Value = serde_json::from_slice(bytes)?;
    Ok(PluginResult::from_json(value)?)
}
