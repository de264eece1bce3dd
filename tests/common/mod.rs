//! Shared test helpers for logbar tests.
//!
//! This module provides common utilities used across test files to reduce
//! duplication and ensure consistent test behavior.

// Allow dead code since not all test files use all helpers
#![allow(dead_code)]

use logbar::{OutputSink, decolored};
use std::sync::{Arc, Mutex, MutexGuard};

// =============================================================================
// Output Inspection
// =============================================================================

/// The text written by the most recent in-place repaint.
pub fn last_frame(output: &str) -> String {
    let frame = output.rsplit("\x1b[2K\x1b[1G").next().unwrap_or("");
    decolored(frame)
}

/// Net vertical cursor movement of an output stream (down is positive).
///
/// Counts newlines and the relative moves `A`/`B`/`E`/`F`.
pub fn vertical_displacement(output: &str) -> i64 {
    let mut net = 0i64;
    let mut chars = output.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\n' {
            net += 1;
        } else if c == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            let mut digits = String::new();
            for next in chars.by_ref() {
                if next.is_ascii_digit() {
                    digits.push(next);
                    continue;
                }
                let n: i64 = digits.parse().unwrap_or(1);
                match next {
                    'A' | 'F' => net -= n,
                    'B' | 'E' => net += n,
                    _ => {}
                }
                break;
            }
        }
    }

    net
}

// =============================================================================
// RAII Guards
// =============================================================================

/// `colored`'s override is global to the test binary; guards hold this lock.
static COLOR_LOCK: Mutex<()> = Mutex::new(());

fn lock_colors() -> MutexGuard<'static, ()> {
    COLOR_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

/// RAII guard that disables colored output for tests.
///
/// This ensures colors are disabled during the test and automatically
/// restored when the guard is dropped, even if the test panics.
///
/// # Example
///
/// ```ignore
/// #[test]
/// fn my_test() {
///     let _guard = DisableColors::new();
///     // ... test code with colors disabled ...
/// } // colors automatically restored here
/// ```
pub struct DisableColors {
    _lock: MutexGuard<'static, ()>,
}

impl DisableColors {
    /// Create a new guard that disables colored output.
    pub fn new() -> Self {
        let lock = lock_colors();
        colored::control::set_override(false);
        Self { _lock: lock }
    }
}

impl Default for DisableColors {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for DisableColors {
    fn drop(&mut self) {
        colored::control::unset_override();
    }
}

/// RAII guard that forces colored output, even when not on a TTY.
pub struct ForceColors {
    _lock: MutexGuard<'static, ()>,
}

impl ForceColors {
    pub fn new() -> Self {
        let lock = lock_colors();
        colored::control::set_override(true);
        Self { _lock: lock }
    }
}

impl Default for ForceColors {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ForceColors {
    fn drop(&mut self) {
        colored::control::unset_override();
    }
}

// =============================================================================
// Test Capture Sink
// =============================================================================

/// A test sink that captures all logged output for verification.
///
/// This implements `OutputSink` and stores all emitted messages in a
/// thread-safe vector that can be inspected after the test.
///
/// # Example
///
/// ```ignore
/// let (sink, captured) = CaptureSink::new();
/// let logger = Logger::with_sink(Arc::new(sink));
///
/// logger.note("test message");
///
/// let logs = captured.lock().unwrap();
/// assert!(logs.iter().any(|l| l.contains("test message")));
/// ```
pub struct CaptureSink {
    /// The captured messages, wrapped in Arc<Mutex> for thread safety.
    pub captured: Arc<Mutex<Vec<String>>>,
}

impl CaptureSink {
    /// Create a new capture sink and return both the sink and a handle
    /// to the captured messages.
    pub fn new() -> (Self, Arc<Mutex<Vec<String>>>) {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let sink = Self {
            captured: captured.clone(),
        };
        (sink, captured)
    }
}

impl Default for CaptureSink {
    fn default() -> Self {
        Self::new().0
    }
}

impl OutputSink for CaptureSink {
    fn emit(&self, message: &str) {
        self.captured.lock().unwrap().push(message.to_string());
    }

    fn emit_line(&self, message: &str) {
        self.captured.lock().unwrap().push(message.to_string());
    }
}
