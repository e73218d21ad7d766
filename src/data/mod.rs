//! Window resolution and statistics over plugin results.
//!
//! ## Submodules
//!
//! - [`duration`]: Parsing of relative-time expressions (e.g., "2h", "1h 30m")
//! - [`window`]: Resolving `--since`/`--until`/`--step` into a [`TimeWindow`]
//! - [`series`]: The [`PluginResult`] sum type and its JSON classification
//! - [`stats`]: Min/max/mean over a single series
//! - [`summary`]: Flat, aggregate and per-label [`SeriesSummary`] computation
//!
//! ## Data Flow
//!
//! ```text
//! RangeOptions (raw strings)
//!        │
//!        ▼
//! resolve_window() ──▶ TimeWindow ──▶ Plugin::execute()
//!                                           │
//!                                           ▼
//!                                     PluginResult
//!                                           │
//!                                           ▼
//!                              summarize() ──▶ Vec<SeriesSummary>
//! ```

pub mod duration;
pub mod series;
pub mod stats;
pub mod summary;
pub mod window;

pub use series::{LabeledSeries, PluginResult, Series};
pub use stats::Statistics;
pub use summary::{summarize, SeriesSummary};
pub use window::{resolve_window, resolve_window_at, RangeOptions, TimeWindow};
