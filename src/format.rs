//! Pure formatting functions for bar statistics.
//!
//! Everything here turns numbers into the short strings that appear in a
//! rendered progress line. None of these functions touch the terminal, so
//! they are trivially testable.
//!
//! # Categories
//!
//! ## Time
//! - [`format_duration`] - Elapsed/remaining time (`M:SS` or `H:MM:SS`)
//! - [`format_timestamp`] - Wall-clock prefix (`YYYY-MM-DD HH:MM:SS`)
//!
//! ## Throughput
//! - [`format_rate`] - `(N it/s)` or `(N s/it)`
//!
//! ## Counts
//! - [`digit_count`] - Decimal width of a number
//! - [`pad_count`] - Count padded to the width of the total

use std::fmt::Display;
use std::time::Duration;

use chrono::{DateTime, TimeZone};

// ============================================================================
// Constants
// ============================================================================

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 60 * SECS_PER_MINUTE;

/// Wall-clock layout used for the `[timestamp]` prefix.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ============================================================================
// Time Formatting
// ============================================================================

/// Format a duration as `M:SS`, or `H:MM:SS` once it reaches an hour.
///
/// Sub-second precision is dropped.
///
/// # Example
///
/// ```
/// use logbar::format_duration;
/// use std::time::Duration;
///
/// assert_eq!(format_duration(Duration::from_secs(0)), "0:00");
/// assert_eq!(format_duration(Duration::from_secs(65)), "1:05");
/// assert_eq!(format_duration(Duration::from_secs(3725)), "1:02:05");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let hours = secs / SECS_PER_HOUR;
    let minutes = (secs % SECS_PER_HOUR) / SECS_PER_MINUTE;
    let seconds = secs % SECS_PER_MINUTE;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

/// Format a point in time for the bar's timestamp prefix.
pub fn format_timestamp<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    time.format(TIMESTAMP_FORMAT).to_string()
}

// ============================================================================
// Rate Formatting
// ============================================================================

/// Format a throughput in iterations per second.
///
/// Rates above one iteration per second render as `(N it/s)`. Slower rates
/// are inverted to `(N s/it)` so they never show as `(0 it/s)`. An unknown,
/// zero or non-finite rate renders as an empty string.
///
/// # Example
///
/// ```
/// use logbar::format_rate;
///
/// assert_eq!(format_rate(Some(12.4)), "(12 it/s)");
/// assert_eq!(format_rate(Some(0.25)), "(4 s/it)");
/// assert_eq!(format_rate(None), "");
/// ```
pub fn format_rate(rate: Option<f64>) -> String {
    match rate.filter(|r| r.is_finite() && *r > 0.0) {
        Some(r) if r > 1.0 => format!("({} it/s)", r.round() as u64),
        Some(r) => format!("({} s/it)", (1.0 / r).round() as u64),
        None => String::new(),
    }
}

// ============================================================================
// Count Formatting
// ============================================================================

/// Number of decimal digits needed to print `n`.
pub fn digit_count(n: u64) -> usize {
    n.checked_ilog10().map_or(1, |d| d as usize + 1)
}

/// Left-pad `count` with spaces to the digit width of `total`.
///
/// Keeps the columns after the count stable while it grows. Counts that
/// already exceed the width, or bars without a known total, are unpadded.
pub fn pad_count(count: u64, total: Option<u64>) -> String {
    match total {
        Some(total) => format!("{count:>width$}", width = digit_count(total)),
        None => count.to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================
