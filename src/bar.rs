//! Single in-place progress bar.
//!
//! A [`ProgressBar`] ties together a [`Tracker`], the line renderer and a
//! [`LineWriter`]. Every redrawing update reads the clocks once, recomputes
//! the tracker, renders the line and repaints it.

use std::io::{self, Write};
use std::time::Instant;

use chrono::{DateTime, Local};

use crate::error::Result;
use crate::format::format_timestamp;
use crate::progress::{DEFAULT_WIDTH, Snapshot, Tracker, Update};
use crate::render::{BarStyle, render_bar};
use crate::terminal::LineWriter;

// ============================================================================
// Configuration
// ============================================================================

/// Construction parameters for a bar.
///
/// # Example
///
/// ```
/// use logbar::BarConfig;
///
/// let config = BarConfig::new(Some(500))
///     .description("indexing")
///     .width(40)
///     .color(false);
/// assert_eq!(config.total, Some(500));
/// assert!(!config.style.show_color);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarConfig {
    pub count: u64,
    pub total: Option<u64>,
    pub description: String,
    pub width: usize,
    pub style: BarStyle,
    /// Draw the bar once as soon as it is created.
    pub show_at_init: bool,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            count: 0,
            total: None,
            description: String::new(),
            width: DEFAULT_WIDTH,
            style: BarStyle::default(),
            show_at_init: true,
        }
    }
}

impl BarConfig {
    pub fn new(total: Option<u64>) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn count(mut self, count: u64) -> Self {
        self.count = count;
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    #[must_use]
    pub fn color(mut self, show: bool) -> Self {
        self.style.show_color = show;
        self
    }

    #[must_use]
    pub fn datetime(mut self, show: bool) -> Self {
        self.style.show_datetime = show;
        self
    }

    #[must_use]
    pub fn rate(mut self, show: bool) -> Self {
        self.style.show_rate = show;
        self
    }

    #[must_use]
    pub fn show_at_init(mut self, show: bool) -> Self {
        self.show_at_init = show;
        self
    }
}

// ============================================================================
// Bar State
// ============================================================================

/// Everything about one bar except where it is written.
///
/// Shared by [`ProgressBar`] and [`BarGroup`](crate::group::BarGroup).
#[derive(Debug, Clone)]
pub(crate) struct BarState {
    pub(crate) tracker: Tracker,
    style: BarStyle,
    start: Instant,
    updated_at: DateTime<Local>,
}

impl BarState {
    pub(crate) fn new(config: BarConfig) -> Result<Self> {
        Ok(Self {
            tracker: Tracker::new(config.count, config.total, config.description, config.width)?,
            style: config.style,
            start: Instant::now(),
            updated_at: Local::now(),
        })
    }

    /// Apply `update` at the current time. Returns whether to redraw.
    pub(crate) fn advance(&mut self, update: Update) -> Result<bool> {
        let redraw = update.redraws();
        self.tracker.update(update, self.start.elapsed())?;
        self.updated_at = Local::now();
        Ok(redraw)
    }

    pub(crate) fn render(&self) -> String {
        let timestamp = format_timestamp(&self.updated_at);
        render_bar(&self.tracker, self.style, Some(&timestamp))
    }
}

// ============================================================================
// Progress Bar
// ============================================================================

/// A progress bar that repaints one terminal line in place.
///
/// Output goes to stdout unless a writer is supplied with
/// [`ProgressBar::with_writer`]. Call [`finish`](ProgressBar::finish) once
/// when done so later output starts on a fresh line.
///
/// # Example
///
/// ```
/// use logbar::{BarConfig, ProgressBar, Update};
///
/// let config = BarConfig::new(Some(4)).description("steps").color(false);
/// let mut bar = ProgressBar::with_writer(config, Vec::new()).unwrap();
/// for _ in 0..4 {
///     bar.inc(1).unwrap();
/// }
/// bar.finish().unwrap();
///
/// assert_eq!(bar.snapshot().percent, Some(100));
/// let out = String::from_utf8(bar.into_writer()).unwrap();
/// assert!(out.ends_with('\n'));
/// ```
#[derive(Debug)]
pub struct ProgressBar<W: Write = io::Stdout> {
    state: BarState,
    writer: LineWriter<W>,
}

impl ProgressBar<io::Stdout> {
    /// Create a bar on stdout.
    pub fn new(config: BarConfig) -> Result<Self> {
        Self::with_writer(config, io::stdout())
    }
}

impl<W: Write> ProgressBar<W> {
    /// Create a bar writing to `out`. Draws immediately if
    /// `config.show_at_init` is set.
    pub fn with_writer(config: BarConfig, out: W) -> Result<Self> {
        let show = config.show_at_init;
        let mut bar = Self {
            state: BarState::new(config)?,
            writer: LineWriter::new(out),
        };
        if show {
            bar.draw()?;
        }
        Ok(bar)
    }

    /// Apply `update`, recompute statistics and repaint unless the update
    /// was built with [`Update::without_redraw`].
    pub fn update(&mut self, update: Update) -> Result<()> {
        if self.state.advance(update)? {
            self.draw()?;
        }
        Ok(())
    }

    /// Add `delta` to the count and repaint.
    pub fn inc(&mut self, delta: i64) -> Result<()> {
        self.update(Update::delta(delta))
    }

    /// Set the count and repaint.
    pub fn set_position(&mut self, count: u64) -> Result<()> {
        self.update(Update::absolute(count))
    }

    /// Recompute and repaint without changing the count.
    pub fn refresh(&mut self) -> Result<()> {
        self.update(Update::refresh())
    }

    /// Repaint from the last computed state.
    pub fn draw(&mut self) -> Result<()> {
        let line = self.state.render();
        self.writer.write_line(&line)
    }

    /// Move past the bar with a newline.
    pub fn finish(&mut self) -> Result<()> {
        self.writer.finish()
    }

    pub fn set_total(&mut self, total: Option<u64>) {
        self.state.tracker.set_total(total);
    }

    pub fn set_count(&mut self, count: u64) {
        self.state.tracker.set_count(count);
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.state.tracker.set_description(description);
    }

    pub fn set_width(&mut self, width: usize) -> Result<()> {
        self.state.tracker.set_width(width)
    }

    /// The line the next [`draw`](ProgressBar::draw) would write.
    pub fn render(&self) -> String {
        self.state.render()
    }

    pub fn tracker(&self) -> &Tracker {
        &self.state.tracker
    }

    pub fn snapshot(&self) -> &Snapshot {
        self.state.tracker.snapshot()
    }

    pub fn writer(&self) -> &W {
        self.writer.get_ref()
    }

    pub fn into_writer(self) -> W {
        self.writer.into_inner()
    }
}

// ============================================================================
// Tests
// ============================================================================
