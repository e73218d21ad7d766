//! # tsa
//!
//! Summary statistics over a window of time-series data.
//!
//! `tsa` resolves a time window from relative (`"2h"`, `"30m"`) or absolute
//! (RFC 3339) expressions, asks a plugin for the samples in that window and
//! reports the minimum, maximum and mean of each returned series.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         Invocation                           │
//! │  ┌─────────┐    ┌──────────┐    ┌──────────┐    ┌─────────┐  │
//! │  │ config  │───▶│   app    │───▶│   data   │───▶│ report  │  │
//! │  │(options)│    │(pipeline)│    │ (stats)  │    │ (lines) │  │
//! │  └─────────┘    └────┬─────┘    └──────────┘    └─────────┘  │
//! │                      │                                       │
//! │                      ▼                                       │
//! │                 ┌─────────┐                                  │
//! │                 │ source  │◀── FilePlugin | CommandPlugin |  │
//! │                 │(plugins)│    StreamPlugin                  │
//! │                 └─────────┘                                  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`config`]**: Settings from a config file, `TSA_*` environment
//!   variables and command-line flags
//! - **[`app`]**: Resolves the window, runs the plugin once and summarizes
//! - **[`source`]**: The [`Plugin`] trait with file, command and stream
//!   implementations
//! - **[`data`]**: Window resolution, result classification and statistics
//! - **[`report`]**: Text and JSON rendering of [`SeriesSummary`] values
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Last hour of a series stored in a file
//! tsa --file series.json
//!
//! # Six hours ending two hours ago, from an external command
//! tsa --exec fetch-metrics --arg cpu --since 6h --until 2h
//!
//! # One combined summary over every labeled series
//! tsa --file labeled.json --aggregate
//! ```
//!
//! ### As a library
//!
//! ```
//! use std::io::Cursor;
//! use tsa::{report, App, RangeOptions, StreamPlugin};
//!
//! # tokio_test::block_on(async {
//! let input = r#"{"data": {"a": [1, 2, 3], "b": [10, 20, 30]}}"#;
//! let plugin = StreamPlugin::new(Cursor::new(input), "example");
//! let app = App::new(Box::new(plugin), RangeOptions::default());
//!
//! let summaries = app.run().await.unwrap();
//! assert_eq!(
//!     report::render_text(&summaries),
//!     vec!["a: Min: 1 Max: 3 Mean: 2", "b: Min: 10 Max: 30 Mean: 20"]
//! );
//! # });
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod report;
pub mod source;

// Re-export main types for convenience
pub use app::App;
pub use config::{PluginSettings, Settings};
pub use data::{
    resolve_window, resolve_window_at, LabeledSeries, PluginResult, RangeOptions, Series,
    SeriesSummary, Statistics, TimeWindow,
};
pub use error::{Error, ParseError, PluginError, Result, ShapeError};
pub use source::{CommandPlugin, FilePlugin, Plugin, StreamPlugin};
