//! In-place terminal line writing.
//!
//! The escape builders return strings instead of writing, so callers can
//! assemble a whole repaint (cursor moves included) and hand it to the
//! stream in one write.

use std::io::{self, Write};

use crate::error::Result;

// ============================================================================
// Escape Sequences
// ============================================================================

const CSI: &str = "\x1b[";

/// Erase the entire current line. The cursor column is unchanged.
pub fn erase_line() -> &'static str {
    "\x1b[2K"
}

/// Move the cursor to column 1 of the current line.
pub fn line_start() -> &'static str {
    "\x1b[1G"
}

/// Move the cursor vertically, keeping its column.
///
/// Positive `rows` move up, negative move down, zero is a no-op.
pub fn move_rows(rows: i64) -> String {
    match rows {
        0 => String::new(),
        r if r > 0 => format!("{CSI}{r}A"),
        r => format!("{CSI}{}B", r.unsigned_abs()),
    }
}

/// Move the cursor to column 1 of a line relative to the current one.
///
/// Positive `rows` move up, negative move down, zero stays on this line.
pub fn move_to_line_start(rows: i64) -> String {
    match rows {
        0 => line_start().to_string(),
        r if r > 0 => format!("{CSI}{r}F"),
        r => format!("{CSI}{}E", r.unsigned_abs()),
    }
}

// ============================================================================
// Line Writer
// ============================================================================

/// Repaints a single terminal line in place.
///
/// Every [`write_line`](LineWriter::write_line) erases the current line and
/// rewrites it from column 1 without a newline, so successive writes
/// overwrite each other. [`finish`](LineWriter::finish) emits the one
/// newline that releases the line for normal output. The stream is flushed
/// after every call.
#[derive(Debug)]
pub struct LineWriter<W: Write> {
    out: W,
}

impl LineWriter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> LineWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Erase the current line and write `text` at column 1.
    pub fn write_line(&mut self, text: &str) -> Result<()> {
        let mut buf = String::with_capacity(text.len() + 8);
        buf.push_str(erase_line());
        buf.push_str(line_start());
        buf.push_str(text);
        self.write_raw(&buf)
    }

    /// Move off the repainted line with a single newline.
    ///
    /// Calling this twice advances two lines.
    pub fn finish(&mut self) -> Result<()> {
        self.write_raw("\n")
    }

    /// Write pre-assembled bytes (escapes included) and flush.
    pub fn write_raw(&mut self, raw: &str) -> Result<()> {
        self.out.write_all(raw.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

// ============================================================================
// Tests
// ============================================================================
