//! The fetch-then-summarize pipeline for one invocation.

use std::time::Duration;

use tracing::{debug, info};

use crate::config::Settings;
use crate::data::window::now_ms;
use crate::data::{
    resolve_window_at, summarize, PluginResult, RangeOptions, SeriesSummary, TimeWindow,
};
use crate::error::{PluginError, Result};
use crate::source::Plugin;

/// One `tsa` invocation: a plugin plus the options to run it with.
#[derive(Debug)]
pub struct App {
    plugin: Box<dyn Plugin>,
    options: RangeOptions,
    timeout: Option<Duration>,
}

impl App {
    pub fn new(plugin: Box<dyn Plugin>, options: RangeOptions) -> Self {
        Self {
            plugin,
            options,
            timeout: None,
        }
    }

    /// Build an app from loaded settings.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let app = Self::new(settings.plugin.build()?, settings.range_options());
        Ok(match settings.timeout()? {
            Some(timeout) => app.with_timeout(timeout),
            None => app,
        })
    }

    /// Bound the plugin fetch by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn options(&self) -> &RangeOptions {
        &self.options
    }

    /// Resolve the window against the wall clock and summarize.
    pub async fn run(&self) -> Result<Vec<SeriesSummary>> {
        self.run_at(now_ms()).await
    }

    /// Resolve the window relative to `now` (epoch ms) and summarize.
    pub async fn run_at(&self, now: i64) -> Result<Vec<SeriesSummary>> {
        let window = resolve_window_at(&self.options, now)?;
        info!(
            start = window.start,
            end = window.end,
            step = window.step,
            plugin = self.plugin.description(),
            "fetching series"
        );

        let result = self.fetch(&window).await?;
        debug!(samples = result.sample_count(), "plugin returned");

        summarize(&result, self.options.aggregate)
    }

    async fn fetch(&self, window: &TimeWindow) -> Result<PluginResult> {
        let fetch = self.plugin.execute(window, &self.options);
        let result = match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, fetch)
                .await
                .map_err(|_| PluginError::Timeout(timeout))?,
            None => fetch.await,
        };
        Ok(result?)
    }
}
