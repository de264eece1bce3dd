//! Shared helpers for unit tests.
//!
//! `colored`'s override is process-global, so every test that depends on it
//! holds [`COLOR_LOCK`] through one of the RAII guards below.

use std::sync::{Mutex, MutexGuard};

static COLOR_LOCK: Mutex<()> = Mutex::new(());

fn lock_colors() -> MutexGuard<'static, ()> {
    COLOR_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Forces colored output until dropped.
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

impl Drop for ForceColors {
    fn drop(&mut self) {
        colored::control::unset_override();
    }
}

/// Disables colored output until dropped.
pub struct DisableColors {
    _lock: MutexGuard<'static, ()>,
}

impl DisableColors {
    pub fn new() -> Self {
        let lock = lock_colors();
        colored::control::set_override(false);
        Self { _lock: lock }
    }
}

impl Drop for DisableColors {
    fn drop(&mut self) {
        colored::control::unset_override();
    }
}

/// Net rows moved by a stream of output: down is positive.
///
/// Counts newlines and the relative moves `A`/`B`/`E`/`F`.
pub fn vertical_displacement(output: &str) -> i64 {
    let mut net = 0i64;
    let mut chars = output.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\n' => net += 1,
            '\x1b' if chars.peek() == Some(&'[') => {
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
            _ => {}
        }
    }
    net
}
