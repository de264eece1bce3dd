//! Stacked progress bars.
//!
//! A [`BarGroup`] owns several bars drawn on consecutive terminal lines. The
//! first registered bar sits on the anchor line (where the cursor was when
//! the group started) and each later bar one line further down.
//!
//! Repaints use relative cursor moves only. The group records the cursor's
//! row relative to the anchor in `cursor_row`, updates it on every move, and
//! always returns to the anchor after a repaint, so no sequence of updates
//! can make the bars drift.

use std::io::{self, Write};

use crate::bar::{BarConfig, BarState};
use crate::error::{Error, Result};
use crate::progress::{Snapshot, Tracker, Update};
use crate::terminal::{LineWriter, erase_line, line_start, move_rows, move_to_line_start};

/// Handle to a bar registered in a [`BarGroup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BarId(usize);

impl BarId {
    /// Line offset below the anchor, fixed at registration.
    pub fn offset(self) -> usize {
        self.0
    }
}

/// Coordinates repaints of several bars sharing one output stream.
///
/// Each repaint (move to the bar's line, erase, write, move back) is sent as
/// one write, and every method that writes takes `&mut self`, so two bars can
/// never interleave their cursor moves. Share a group across threads by
/// wrapping it in a `Mutex`.
///
/// # Example
///
/// ```
/// use logbar::{BarConfig, BarGroup, Update};
///
/// let mut group = BarGroup::with_writer(Vec::new());
/// let fetch = group.add(BarConfig::new(Some(10)).description("fetch")).unwrap();
/// let build = group.add(BarConfig::new(Some(3)).description("build")).unwrap();
///
/// group.update(fetch, Update::delta(4)).unwrap();
/// group.update(build, Update::delta(1)).unwrap();
/// assert_eq!(group.cursor_row(), 0);
///
/// group.finish().unwrap();
/// ```
#[derive(Debug)]
pub struct BarGroup<W: Write = io::Stdout> {
    bars: Vec<BarState>,
    writer: LineWriter<W>,
    cursor_row: usize,
}

impl BarGroup<io::Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for BarGroup<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> BarGroup<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            bars: Vec::new(),
            writer: LineWriter::new(out),
            cursor_row: 0,
        }
    }

    /// Register a bar on the next free line and return its handle.
    ///
    /// Every bar after the first reserves its line by emitting a newline
    /// below the current last bar.
    pub fn add(&mut self, config: BarConfig) -> Result<BarId> {
        let show = config.show_at_init;
        let state = BarState::new(config)?;
        let id = BarId(self.bars.len());

        if id.0 > 0 {
            let mut buf = String::new();
            self.move_cursor(&mut buf, id.0 - 1);
            buf.push('\n');
            self.cursor_row = id.0;
            buf.push_str(&move_to_line_start(id.0 as i64));
            self.cursor_row = 0;
            self.writer.write_raw(&buf)?;
        }

        self.bars.push(state);
        if show {
            self.draw(id)?;
        }
        Ok(id)
    }

    /// Apply `update` to one bar and repaint its line unless suppressed.
    pub fn update(&mut self, id: BarId, update: Update) -> Result<()> {
        let state = self.bars.get_mut(id.0).ok_or(Error::UnknownBar(id.0))?;
        if state.advance(update)? {
            self.draw(id)?;
        }
        Ok(())
    }

    /// Repaint one bar from its last computed state.
    pub fn draw(&mut self, id: BarId) -> Result<()> {
        let line = self.state(id)?.render();

        let mut buf = String::new();
        self.move_cursor(&mut buf, id.0);
        buf.push_str(erase_line());
        buf.push_str(line_start());
        buf.push_str(&line);
        self.move_cursor(&mut buf, 0);
        self.writer.write_raw(&buf)
    }

    /// Repaint every bar, top to bottom.
    pub fn draw_all(&mut self) -> Result<()> {
        for index in 0..self.bars.len() {
            self.draw(BarId(index))?;
        }
        Ok(())
    }

    /// Move below the last bar so later output does not overwrite the group.
    pub fn finish(&mut self) -> Result<()> {
        let mut buf = String::new();
        if let Some(last) = self.bars.len().checked_sub(1) {
            self.move_cursor(&mut buf, last);
        }
        buf.push('\n');
        self.cursor_row += 1;
        self.writer.write_raw(&buf)
    }

    /// Mutable access for the `set_*` methods, which apply on the next update.
    pub fn tracker_mut(&mut self, id: BarId) -> Result<&mut Tracker> {
        self.bars
            .get_mut(id.0)
            .map(|state| &mut state.tracker)
            .ok_or(Error::UnknownBar(id.0))
    }

    pub fn tracker(&self, id: BarId) -> Result<&Tracker> {
        Ok(&self.state(id)?.tracker)
    }

    pub fn snapshot(&self, id: BarId) -> Result<&Snapshot> {
        Ok(self.state(id)?.tracker.snapshot())
    }

    /// The line `id` would currently render as.
    pub fn render(&self, id: BarId) -> Result<String> {
        Ok(self.state(id)?.render())
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Cursor row relative to the anchor line. Zero between operations until
    /// [`finish`](BarGroup::finish).
    pub fn cursor_row(&self) -> usize {
        self.cursor_row
    }

    pub fn writer(&self) -> &W {
        self.writer.get_ref()
    }

    pub fn into_writer(self) -> W {
        self.writer.into_inner()
    }

    fn state(&self, id: BarId) -> Result<&BarState> {
        self.bars.get(id.0).ok_or(Error::UnknownBar(id.0))
    }

    /// Append the relative move from the current row to `row`.
    fn move_cursor(&mut self, buf: &mut String, row: usize) {
        let up = self.cursor_row as i64 - row as i64;
        buf.push_str(&move_rows(up));
        self.cursor_row = row;
    }
}

// ============================================================================
// Tests
// ============================================================================
