//! Logging infrastructure for logbar.
//!
//! Two layers live here:
//!
//! - An [`OutputSink`] trait with a process-wide sink, so applications decide
//!   where messages go (stdout, a file, a test capture).
//! - A leveled [`Logger`] that styles messages by [`Category`], applies
//!   indentation, and hands finished lines to a sink.
//!
//! # Usage
//!
//! ```no_run
//! use logbar::{Logger, OutputSink, set_output_sink};
//! use std::sync::Arc;
//!
//! struct StdoutSink;
//!
//! impl OutputSink for StdoutSink {
//!     fn emit(&self, message: &str) {
//!         println!("{}\n", message);
//!     }
//!     fn emit_line(&self, message: &str) {
//!         println!("{}", message);
//!     }
//! }
//!
//! set_output_sink(Arc::new(StdoutSink));
//!
//! let mut logger = Logger::new();
//! logger.note("indexing files");
//! logger.indent(2);
//! logger.success("done");
//! ```

use std::fmt::Display;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use chrono::Local;

use crate::format::format_timestamp;
use crate::style::{Category, FillSide, fill_line};

// ============================================================================
// Global Sink
// ============================================================================

/// Flag to disable logging (opt-out). Defaults to false (logging enabled).
static LOGGING_DISABLED: AtomicBool = AtomicBool::new(false);

/// Disable all logging. Tests call this to keep output quiet.
pub fn disable_logging() {
    LOGGING_DISABLED.store(true, Ordering::SeqCst);
}

/// Re-enable logging after it was disabled. Primarily for test cleanup.
pub fn enable_logging() {
    LOGGING_DISABLED.store(false, Ordering::SeqCst);
}

/// Check if logging is enabled. Returns true unless explicitly disabled via `disable_logging()`.
pub fn is_logging_enabled() -> bool {
    !LOGGING_DISABLED.load(Ordering::SeqCst)
}

/// Trait for output sinks that handle logging and display.
///
/// * `emit` - For complete blocks that should have visual separation (trailing blank line)
/// * `emit_line` - For continuous output without separation
pub trait OutputSink: Send + Sync {
    /// Emit a complete block with trailing blank line for visual separation.
    fn emit(&self, message: &str);
    /// Emit a line without trailing blank line.
    fn emit_line(&self, message: &str);
    /// Emit text exactly as given, with no terminator added.
    ///
    /// Line-oriented sinks can keep the default, which hands the text to
    /// `emit_line` minus one trailing newline.
    fn emit_raw(&self, message: &str) {
        self.emit_line(message.strip_suffix('\n').unwrap_or(message));
    }
}

static OUTPUT_SINK: RwLock<Option<Arc<dyn OutputSink>>> = RwLock::new(None);

/// Set the global output sink. Replaces any previous sink.
pub fn set_output_sink(sink: Arc<dyn OutputSink>) {
    if let Ok(mut guard) = OUTPUT_SINK.write() {
        *guard = Some(sink);
    }
}

/// Get the current global output sink.
pub fn get_output_sink() -> Option<Arc<dyn OutputSink>> {
    OUTPUT_SINK.read().ok().and_then(|guard| guard.clone())
}

/// Reset the output sink (for testing). Clears the current sink.
pub fn reset_output_sink() {
    if let Ok(mut guard) = OUTPUT_SINK.write() {
        *guard = None;
    }
}

/// Log a complete block with trailing blank line for visual separation.
pub fn log_event(message: &str) {
    if !is_logging_enabled() {
        return;
    }
    if let Some(sink) = get_output_sink() {
        sink.emit(message);
    }
}

/// Log a line without trailing blank line.
pub fn log_event_line(message: &str) {
    if !is_logging_enabled() {
        return;
    }
    if let Some(sink) = get_output_sink() {
        sink.emit_line(message);
    }
}

// ============================================================================
// Levels
// ============================================================================

/// Severity threshold, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Level {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        };
        f.write_str(name)
    }
}

impl Level {
    /// Level a message of `category` is logged at.
    pub fn of(category: Category) -> Self {
        match category {
            Category::Err => Level::Error,
            Category::Warn => Level::Warning,
            Category::Back => Level::Debug,
            _ => Level::Info,
        }
    }
}

// ============================================================================
// Logger
// ============================================================================

const DEFAULT_NAME: &str = "logbar";

/// Leveled, indenting, colorizing logger.
///
/// Messages below the current level are dropped, as is everything when the
/// logger is not verbose. Each line of a message is prefixed with the current
/// indent, then the whole message is colored by its category.
///
/// Output goes to the logger's own sink if one was given with
/// [`Logger::with_sink`], otherwise to the global sink, otherwise to stderr.
///
/// With [`prefix`](Logger::prefix) enabled every message is preceded by a
/// header line `[<time>] - [<name>] - [<LEVEL>]`.
pub struct Logger {
    sink: Option<Arc<dyn OutputSink>>,
    name: String,
    prefix: bool,
    level: Level,
    levels: Vec<Level>,
    indent: usize,
    indents: Vec<usize>,
    verbose: bool,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("has_sink", &self.sink.is_some())
            .field("name", &self.name)
            .field("prefix", &self.prefix)
            .field("level", &self.level)
            .field("indent", &self.indent)
            .field("verbose", &self.verbose)
            .finish()
    }
}

impl Logger {
    pub fn new() -> Self {
        Self {
            sink: None,
            name: DEFAULT_NAME.to_string(),
            prefix: false,
            level: Level::Info,
            levels: Vec::new(),
            indent: 0,
            indents: Vec::new(),
            verbose: true,
        }
    }

    /// Create a logger bound to `sink` instead of the global one.
    #[must_use]
    pub fn with_sink(sink: Arc<dyn OutputSink>) -> Self {
        Self {
            sink: Some(sink),
            ..Self::new()
        }
    }

    /// Name shown in the prefix header.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Precede each message with a `[<time>] - [<name>] - [<LEVEL>]` line.
    #[must_use]
    pub fn prefix(mut self, prefix: bool) -> Self {
        self.prefix = prefix;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// A non-verbose logger drops every message regardless of level.
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    // ------------------------------------------------------------------
    // Indentation
    // ------------------------------------------------------------------

    pub fn indent(&mut self, by: usize) {
        self.indent += by;
    }

    pub fn set_indent(&mut self, indent: usize) {
        self.indent = indent;
    }

    pub fn reset_indent(&mut self) {
        self.indent = 0;
    }

    pub fn store_indent(&mut self) {
        self.indents.push(self.indent);
    }

    /// Restore the most recently stored indent. No-op if none is stored.
    pub fn restore_indent(&mut self) {
        if let Some(indent) = self.indents.pop() {
            self.indent = indent;
        }
    }

    pub fn current_indent(&self) -> usize {
        self.indent
    }

    // ------------------------------------------------------------------
    // Levels
    // ------------------------------------------------------------------

    pub fn set_level(&mut self, level: Level) {
        self.level = level;
    }

    pub fn store_level(&mut self) {
        self.levels.push(self.level);
    }

    /// Restore the most recently stored level. No-op if none is stored.
    pub fn restore_level(&mut self) {
        if let Some(level) = self.levels.pop() {
            self.level = level;
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Drop everything below [`Level::Critical`].
    pub fn quiet(&mut self) {
        self.set_level(Level::Critical);
    }

    /// Store the level and go quiet, if `quiet` is set.
    pub fn enter_quiet(&mut self, quiet: bool) {
        if quiet {
            self.store_level();
            self.quiet();
        }
    }

    /// Undo a matching [`enter_quiet`](Logger::enter_quiet).
    pub fn exit_quiet(&mut self, quiet: bool) {
        if quiet {
            self.restore_level();
        }
    }

    // ------------------------------------------------------------------
    // Emitting
    // ------------------------------------------------------------------

    /// Whether a message of `category` would currently be emitted.
    pub fn enabled(&self, category: Category) -> bool {
        self.verbose && Level::of(category) >= self.level
    }

    /// Log `msg` styled as `category`.
    pub fn log(&self, category: Category, msg: impl Display) {
        if let Some(text) = self.prepare(category, &msg.to_string(), 0) {
            self.emit(category, &category.paint(&text), None);
        }
    }

    /// Log `msg` followed by `end` instead of a newline.
    ///
    /// An empty `end` leaves the cursor after the message, so a later call
    /// can finish the line.
    pub fn log_end(&self, category: Category, msg: impl Display, end: &str) {
        if let Some(text) = self.prepare(category, &msg.to_string(), 0) {
            self.emit(category, &category.paint(&text), Some(end));
        }
    }

    /// Log `msg` with an extra one-off indent.
    pub fn log_indented(&self, category: Category, msg: impl Display, extra: usize) {
        if let Some(text) = self.prepare(category, &msg.to_string(), extra) {
            self.emit(category, &category.paint(&text), None);
        }
    }

    /// Log `msg` padded with `=` to the terminal width.
    pub fn log_filled(&self, category: Category, msg: impl Display, side: FillSide) {
        if let Some(text) = self.prepare(category, &msg.to_string(), 0) {
            let filled = fill_line(&text, '=', side, None);
            self.emit(category, &category.paint(&filled), None);
        }
    }

    pub fn err(&self, msg: impl Display) {
        self.log(Category::Err, msg);
    }

    pub fn warn(&self, msg: impl Display) {
        self.log(Category::Warn, msg);
    }

    pub fn hint(&self, msg: impl Display) {
        self.log(Category::Hint, msg);
    }

    pub fn note(&self, msg: impl Display) {
        self.log(Category::Note, msg);
    }

    pub fn mesg(&self, msg: impl Display) {
        self.log(Category::Mesg, msg);
    }

    pub fn file(&self, msg: impl Display) {
        self.log(Category::File, msg);
    }

    pub fn line(&self, msg: impl Display) {
        self.log(Category::Line, msg);
    }

    pub fn success(&self, msg: impl Display) {
        self.log(Category::Success, msg);
    }

    pub fn fail(&self, msg: impl Display) {
        self.log(Category::Fail, msg);
    }

    pub fn back(&self, msg: impl Display) {
        self.log(Category::Back, msg);
    }

    /// Indent every line of `msg`, or return None if it should be dropped.
    fn prepare(&self, category: Category, msg: &str, extra: usize) -> Option<String> {
        if !self.enabled(category) || !is_logging_enabled() {
            return None;
        }
        let pad = " ".repeat(self.indent + extra);
        Some(
            msg.split('\n')
                .map(|line| format!("{pad}{line}"))
                .collect::<Vec<_>>()
                .join("\n"),
        )
    }

    fn header(&self, category: Category) -> Option<String> {
        self.prefix.then(|| {
            format!(
                "[{}] - [{}] - [{}]",
                format_timestamp(&Local::now()),
                self.name,
                Level::of(category)
            )
        })
    }

    fn emit(&self, category: Category, styled: &str, end: Option<&str>) {
        let text = match self.header(category) {
            Some(header) => format!("{header}\n{styled}"),
            None => styled.to_string(),
        };
        match (self.sink.clone().or_else(get_output_sink), end) {
            (Some(sink), None) => sink.emit_line(&text),
            (Some(sink), Some(end)) => sink.emit_raw(&format!("{text}{end}")),
            (None, None) => eprintln!("{text}"),
            (None, Some(end)) => eprint!("{text}{end}"),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
