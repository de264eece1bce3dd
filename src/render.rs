//! Progress line rendering.
//!
//! [`render_bar`] turns a [`Tracker`]'s latest [`Snapshot`] into one line:
//!
//! ```text
//! [2024-03-09 07:05:01] build:  42/100 (42%) |████ 42%  | [0:10<0:13] (4 it/s)
//! ```
//!
//! The field order and separators are stable so the line can be scraped.
//! Rendering reads state only; it never changes the tracker.
//!
//! [`Snapshot`]: crate::progress::Snapshot

use colored::{Color, Colorize};

use crate::format::{format_duration, format_rate, pad_count};
use crate::progress::Tracker;

// ============================================================================
// Constants
// ============================================================================

/// Glyph for a filled track cell.
pub const FILL_GLYPH: char = '█';

/// Glyph for an empty track cell.
pub const EMPTY_GLYPH: char = ' ';

/// Placeholder for unknown totals, percentages and remaining time.
pub const UNKNOWN: &str = "?";

/// Completion bands and their colors, keyed by percent floored to 25.
pub const BANDS: [(u8, Color); 5] = [
    (0, Color::Red),
    (25, Color::BrightRed),
    (50, Color::Yellow),
    (75, Color::Cyan),
    (100, Color::Green),
];

const TIMESTAMP_COLOR: Color = Color::BrightBlack;
const ELAPSED_COLOR: Color = Color::BrightWhite;
const RATE_COLOR: Color = Color::BrightBlack;

/// Color for the band containing `percent`.
pub fn band_color(percent: u8) -> Color {
    let band = percent.min(100) / 25 * 25;
    BANDS
        .iter()
        .find(|(threshold, _)| *threshold == band)
        .map_or(Color::White, |(_, color)| *color)
}

// ============================================================================
// Bar Style
// ============================================================================

/// Display toggles fixed when a bar is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarStyle {
    pub show_color: bool,
    pub show_datetime: bool,
    pub show_rate: bool,
}

impl Default for BarStyle {
    fn default() -> Self {
        Self {
            show_color: true,
            show_datetime: true,
            show_rate: true,
        }
    }
}

impl BarStyle {
    /// Style with every toggle off: no color, timestamp or rate.
    pub fn plain() -> Self {
        Self {
            show_color: false,
            show_datetime: false,
            show_rate: false,
        }
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.show_color && !text.is_empty() {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Render the tracker's most recent snapshot as one progress line.
///
/// `timestamp` is the preformatted wall-clock time of the update; it is only
/// shown when `style.show_datetime` is set.
///
/// # Example
///
/// ```
/// use logbar::{BarStyle, Tracker, Update, render_bar};
/// use std::time::Duration;
///
/// let mut tracker = Tracker::new(0, Some(100), "build", 10).unwrap();
/// tracker.update(Update::delta(42), Duration::from_secs(10)).unwrap();
///
/// let style = BarStyle { show_rate: true, ..BarStyle::plain() };
/// let line = render_bar(&tracker, style, None);
/// assert_eq!(line, "build:  42/100 (42%) |████ 42%  | [0:10<0:13] (4 it/s)");
/// ```
pub fn render_bar(tracker: &Tracker, style: BarStyle, timestamp: Option<&str>) -> String {
    let snap = tracker.snapshot();
    let band = band_color(snap.percent.unwrap_or(0));

    let mut line = String::new();

    if style.show_datetime
        && let Some(ts) = timestamp
    {
        line.push('[');
        line.push_str(&style.paint(ts, TIMESTAMP_COLOR));
        line.push_str("] ");
    }

    let total_str = snap.total.map_or_else(|| UNKNOWN.to_string(), |t| t.to_string());
    let percent_str = snap
        .percent
        .map_or_else(|| UNKNOWN.to_string(), |p| format!("{p}%"));

    line.push_str(tracker.description());
    line.push_str(": ");
    line.push_str(&style.paint(&pad_count(snap.count, snap.total), band));
    line.push('/');
    line.push_str(&total_str);
    line.push_str(" (");
    line.push_str(&style.paint(&percent_str, band));
    line.push_str(") |");

    let track = Track::new(snap.percent, tracker.width());
    line.push_str(&style.paint(&track.filled, band));
    line.push_str(&style.paint(&track.label, band));
    line.push_str(&track.empty);
    line.push_str("| [");

    let remaining_str = snap
        .remaining
        .map_or_else(|| UNKNOWN.to_string(), format_duration);
    let times = format!("{}<{}", format_duration(snap.elapsed), remaining_str);
    line.push_str(&style.paint(&times, ELAPSED_COLOR));
    line.push(']');

    let rate_str = format_rate(snap.rate);
    if style.show_rate && !rate_str.is_empty() {
        line.push(' ');
        line.push_str(&style.paint(&rate_str, RATE_COLOR));
    }

    line
}

/// `floor(width * percent / 100)`, computed wide so large widths cannot
/// overflow. Never exceeds `width` since percent is at most 100.
fn filled_cells(percent: u8, width: usize) -> usize {
    let cells = width as u128 * u128::from(percent.min(100)) / 100;
    cells as usize
}

/// The three runs of cells inside `|...|`: fill, embedded label, padding.
#[derive(Debug, PartialEq, Eq)]
struct Track {
    filled: String,
    label: String,
    empty: String,
}

impl Track {
    fn new(percent: Option<u8>, width: usize) -> Self {
        let filled_cells = percent.map_or(0, |p| filled_cells(p, width));
        // Only embed the label if it fits whole after the fill
        let label = percent
            .map(|p| format!("{p:>3}%"))
            .filter(|label| filled_cells + label.chars().count() < width)
            .unwrap_or_default();
        let empty_cells = width - filled_cells - label.chars().count();

        Self {
            filled: FILL_GLYPH.to_string().repeat(filled_cells),
            label,
            empty: EMPTY_GLYPH.to_string().repeat(empty_cells),
        }
    }

    #[cfg(test)]
    fn filled_cells(&self) -> usize {
        self.filled.chars().count()
    }
}

// ============================================================================
// Tests
// ============================================================================
