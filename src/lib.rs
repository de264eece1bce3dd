//! Terminal presentation toolkit.
//!
//! logbar provides the pieces a command-line tool needs to report progress
//! and status on a terminal:
//!
//! - In-place progress bars with live rate and ETA, singly or stacked
//! - Colorized, leveled logging routed through a pluggable sink
//! - Pretty-printing and dotted-path editing of nested key/value data
//!
//! Everything is synchronous: an update recomputes, renders and writes
//! before it returns.
//!
//! # Modules
//!
//! - [`mod@format`] - Duration, rate and count formatting
//! - [`progress`] - Progress state tracking ([`Tracker`], [`Update`])
//! - [`render`] - Progress line rendering
//! - [`terminal`] - In-place line writing and cursor escapes
//! - [`bar`] - Single progress bar ([`ProgressBar`])
//! - [`group`] - Stacked progress bars ([`BarGroup`])
//! - [`style`] - Semantic colors, ANSI stripping, fill lines
//! - [`logging`] - OutputSink trait and the leveled [`Logger`]
//! - [`pretty`] - Nested value pretty-printing
//! - [`dicts`] - Dotted-path get/set/extract/flatten on nested values
//!
//! # Example
//!
//! ```no_run
//! use logbar::{BarConfig, ProgressBar};
//!
//! let mut bar = ProgressBar::new(BarConfig::new(Some(100)).description("copy"))?;
//! for _ in 0..100 {
//!     bar.inc(1)?;
//! }
//! bar.finish()?;
//! # Ok::<(), logbar::Error>(())
//! ```

pub mod bar;
pub mod dicts;
pub mod error;
pub mod format;
pub mod group;
pub mod logging;
pub mod pretty;
pub mod progress;
pub mod render;
pub mod style;
pub mod terminal;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use bar::{BarConfig, ProgressBar};
pub use dicts::{
    dict_extract, dict_extract_pop, dict_flatten, dict_get, dict_pop, dict_set,
};
pub use error::{Error, Result};
pub use format::{digit_count, format_duration, format_rate, format_timestamp, pad_count};
pub use group::{BarGroup, BarId};
pub use logging::{
    Level, Logger, OutputSink, disable_logging, enable_logging, get_output_sink,
    is_logging_enabled, log_event, log_event_line, reset_output_sink, set_output_sink,
};
pub use pretty::{PrettyOptions, dict_to_str, dict_to_str_with};
pub use progress::{DEFAULT_WIDTH, Snapshot, Tracker, Update};
pub use render::{BANDS, BarStyle, band_color, render_bar};
pub use style::{Category, FillSide, decolored, fill_line, fill_line_to, visible_len};
pub use terminal::LineWriter;
