//! Stream-based plugin.
//!
//! Reads a single JSON document from an async reader, typically stdin.

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::Mutex;

use super::{decode, Plugin};
use crate::data::{PluginResult, RangeOptions, TimeWindow};
use crate::error::PluginError;

/// A plugin that reads its result from an async byte stream.
///
/// The stream is consumed to EOF on the first `execute`; later calls see
/// an empty stream and fail to decode.
///
/// # Example
///
/// ```
/// use std::io::Cursor;
/// use tsa::{Plugin, RangeOptions, StreamPlugin, TimeWindow};
///
/// # tokio_test::block_on(async {
/// let plugin = StreamPlugin::new(Cursor::new(b"[1, 2, 3]".to_vec()), "example");
/// let window = TimeWindow { start: 0, end: 60_000, step: 30.0 };
/// let result = plugin.execute(&window, &RangeOptions::default()).await.unwrap();
/// assert_eq!(result.sample_count(), 3);
/// # });
/// ```
#[derive(Debug)]
pub struct StreamPlugin<R> {
    reader: Mutex<R>,
    description: String,
}

impl<R> StreamPlugin<R>
where
    R: AsyncRead + Unpin + Send,
{
    pub fn new(reader: R, description: &str) -> Self {
        Self {
            reader: Mutex::new(reader),
            description: format!("stream: {}", description),
        }
    }
}

impl StreamPlugin<tokio::io::Stdin> {
    /// Read the result from standard input.
    pub fn stdin() -> Self {
        Self::new(tokio::io::stdin(), "stdin")
    }
}

#[async_trait]
impl<R> Plugin for StreamPlugin<R>
where
    R: AsyncRead + Unpin + Send + std::fmt::Debug,
{
    async fn execute(
        &self,
        _window: &TimeWindow,
        _options: &RangeOptions,
    ) -> Result<PluginResult, PluginError> {
        let mut buf = Vec::new();
        self.reader.lock().await.read_to_end(&mut buf).await?;
        decode(&buf)
    }

    fn description(&self) -> &str {
        &self.description
    }
}
