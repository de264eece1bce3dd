//! Progress state tracking.
//!
//! A [`Tracker`] owns the mutable state of one bar. Derived statistics live
//! in a [`Snapshot`] that is rebuilt only by [`Tracker::update`], so the
//! renderer always sees a consistent set of numbers.

use std::time::Duration;

use crate::error::{Error, Result};

/// Default track width in character cells.
pub const DEFAULT_WIDTH: usize = 25;

// ============================================================================
// Update Request
// ============================================================================

/// One change to apply to a tracker.
///
/// Built from [`Update::delta`], [`Update::absolute`] or [`Update::refresh`],
/// optionally with a new description. Setting both a delta and an absolute
/// count is rejected by [`Tracker::update`] with
/// [`Error::ConflictingUpdate`].
///
/// # Example
///
/// ```
/// use logbar::Update;
///
/// let update = Update::delta(5).with_description("downloading");
/// assert!(update.redraws());
///
/// let batched = Update::absolute(10).without_redraw();
/// assert!(!batched.redraws());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Update {
    delta: Option<i64>,
    absolute: Option<u64>,
    description: Option<String>,
    redraw: bool,
}

impl Default for Update {
    fn default() -> Self {
        Self::refresh()
    }
}

impl Update {
    /// Leave the count unchanged; only recompute and redraw.
    pub fn refresh() -> Self {
        Self {
            delta: None,
            absolute: None,
            description: None,
            redraw: true,
        }
    }

    /// Add `n` to the count. Negative values are allowed.
    pub fn delta(n: i64) -> Self {
        Self::refresh().with_delta(n)
    }

    /// Set the count to `n`.
    pub fn absolute(n: u64) -> Self {
        Self::refresh().with_absolute(n)
    }

    #[must_use]
    pub fn with_delta(mut self, n: i64) -> Self {
        self.delta = Some(n);
        self
    }

    #[must_use]
    pub fn with_absolute(mut self, n: u64) -> Self {
        self.absolute = Some(n);
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Recompute state without repainting, for batching several changes.
    #[must_use]
    pub fn without_redraw(mut self) -> Self {
        self.redraw = false;
        self
    }

    pub fn redraws(&self) -> bool {
        self.redraw
    }
}

// ============================================================================
// Snapshot
// ============================================================================

/// Statistics derived from the count, total and elapsed time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub count: u64,
    pub total: Option<u64>,
    pub elapsed: Duration,
    /// `0..=100`, defined only for a known, non-zero total.
    pub percent: Option<u8>,
    /// Estimated time left, defined only while `count` is in `1..=total`.
    pub remaining: Option<Duration>,
    /// Iterations per second, defined once both count and elapsed are non-zero.
    pub rate: Option<f64>,
}

impl Snapshot {
    pub fn compute(count: u64, total: Option<u64>, elapsed: Duration) -> Self {
        Self {
            count,
            total,
            elapsed,
            percent: percent(count, total),
            remaining: remaining(count, total, elapsed),
            rate: rate(count, elapsed),
        }
    }
}

fn percent(count: u64, total: Option<u64>) -> Option<u8> {
    let total = total.filter(|t| *t > 0)?;
    let pct = (u128::from(count) * 100 / u128::from(total)).min(100);
    Some(pct as u8)
}

/// Linear extrapolation: `elapsed * (total - count) / count`.
///
/// Over-completion (`count > total`) has no estimate.
fn remaining(count: u64, total: Option<u64>, elapsed: Duration) -> Option<Duration> {
    let total = total?;
    if count == 0 || count > total {
        return None;
    }
    if count == total {
        return Some(Duration::ZERO);
    }
    let ratio = (total - count) as f64 / count as f64;
    Duration::try_from_secs_f64(elapsed.as_secs_f64() * ratio).ok()
}

fn rate(count: u64, elapsed: Duration) -> Option<f64> {
    if count == 0 || elapsed.is_zero() {
        return None;
    }
    Some(count as f64 / elapsed.as_secs_f64())
}

// ============================================================================
// Tracker
// ============================================================================

/// Mutable state of one progress bar.
///
/// The setters change fields without touching the [`Snapshot`]; the next
/// [`update`](Tracker::update) recomputes everything from the new values.
#[derive(Debug, Clone)]
pub struct Tracker {
    count: u64,
    total: Option<u64>,
    description: String,
    width: usize,
    snapshot: Snapshot,
}

impl Tracker {
    pub fn new(
        count: u64,
        total: Option<u64>,
        description: impl Into<String>,
        width: usize,
    ) -> Result<Self> {
        if width == 0 {
            return Err(Error::InvalidWidth);
        }
        Ok(Self {
            count,
            total,
            description: description.into(),
            width,
            snapshot: Snapshot::compute(count, total, Duration::ZERO),
        })
    }

    /// Apply `update`, then recompute the snapshot at `elapsed`.
    ///
    /// Fails without changing any state if the update sets both a delta and
    /// an absolute count, or if the delta would leave the `u64` range.
    pub fn update(&mut self, update: Update, elapsed: Duration) -> Result<&Snapshot> {
        let count = match (update.delta, update.absolute) {
            (Some(delta), Some(absolute)) => {
                return Err(Error::ConflictingUpdate { delta, absolute });
            }
            (None, Some(absolute)) => absolute,
            (Some(delta), None) => self
                .count
                .checked_add_signed(delta)
                .ok_or(Error::CountOutOfRange {
                    count: self.count,
                    delta,
                })?,
            (None, None) => self.count,
        };

        self.count = count;
        if let Some(description) = update.description {
            self.description = description;
        }
        self.snapshot = Snapshot::compute(self.count, self.total, elapsed);
        Ok(&self.snapshot)
    }

    pub fn set_total(&mut self, total: Option<u64>) {
        self.total = total;
    }

    pub fn set_count(&mut self, count: u64) {
        self.count = count;
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_width(&mut self, width: usize) -> Result<()> {
        if width == 0 {
            return Err(Error::InvalidWidth);
        }
        self.width = width;
        Ok(())
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn total(&self) -> Option<u64> {
        self.total
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Statistics from the most recent update.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }
}

// ============================================================================
// Tests
// ============================================================================
