//! File-based plugin.
//!
//! Reads a JSON document holding a series or a labeled collection.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::{decode, Plugin};
use crate::data::{PluginResult, RangeOptions, TimeWindow};
use crate::error::PluginError;

/// A plugin that serves the contents of a JSON file.
///
/// The window is ignored: the file is expected to already hold the samples
/// of interest, e.g. a dump produced by another tool.
#[derive(Debug)]
pub struct FilePlugin {
    path: PathBuf,
    description: String,
}

impl FilePlugin {
    /// Create a new file plugin for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self { path, description }
    }

    /// Returns the path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl Plugin for FilePlugin {
    async fn execute(
        &self,
        _window: &TimeWindow,
        _options: &RangeOptions,
    ) -> Result<PluginResult, PluginError> {
        let content = tokio::fs::read(&self.path).await?;
        debug!(path = %self.path.display(), bytes = content.len(), "read plugin file");
        decode(&content)
    }

    fn description(&self) -> &str {
        &self.description
    }
}
