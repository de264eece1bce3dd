//! Semantic styling helpers.
//!
//! Each log category maps to one color so the same kind of message always
//! looks the same, whether it goes through the [`Logger`] or is embedded in
//! some other output.
//!
//! [`Logger`]: crate::logging::Logger

use colored::{Color, Colorize};
use unicode_width::UnicodeWidthStr;

// ============================================================================
// Categories
// ============================================================================

/// Kind of message, used to pick its color and log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Err,
    Warn,
    Hint,
    Note,
    Mesg,
    File,
    Line,
    Success,
    Fail,
    Back,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Err,
        Category::Warn,
        Category::Hint,
        Category::Note,
        Category::Mesg,
        Category::File,
        Category::Line,
        Category::Success,
        Category::Fail,
        Category::Back,
    ];

    pub fn color(self) -> Color {
        match self {
            Category::Err => Color::Red,
            Category::Warn => Color::BrightRed,
            Category::Hint => Color::BrightYellow,
            Category::Note => Color::BrightMagenta,
            Category::Mesg => Color::BrightCyan,
            Category::File => Color::BrightBlue,
            Category::Line => Color::White,
            Category::Success => Color::BrightGreen,
            Category::Fail => Color::BrightRed,
            Category::Back => Color::BrightCyan,
        }
    }

    /// Wrap `msg` in this category's color.
    pub fn paint(self, msg: &str) -> String {
        msg.color(self.color()).to_string()
    }
}

pub fn err(msg: &str) -> String {
    Category::Err.paint(msg)
}

pub fn warn(msg: &str) -> String {
    Category::Warn.paint(msg)
}

pub fn hint(msg: &str) -> String {
    Category::Hint.paint(msg)
}

pub fn note(msg: &str) -> String {
    Category::Note.paint(msg)
}

pub fn mesg(msg: &str) -> String {
    Category::Mesg.paint(msg)
}

pub fn file(msg: &str) -> String {
    Category::File.paint(msg)
}

pub fn line(msg: &str) -> String {
    Category::Line.paint(msg)
}

pub fn success(msg: &str) -> String {
    Category::Success.paint(msg)
}

pub fn fail(msg: &str) -> String {
    Category::Fail.paint(msg)
}

pub fn back(msg: &str) -> String {
    Category::Back.paint(msg)
}

// ============================================================================
// ANSI Stripping
// ============================================================================

/// Remove ANSI CSI sequences (colors, cursor moves) from `s`.
///
/// # Example
///
/// ```
/// use logbar::decolored;
///
/// assert_eq!(decolored("\x1b[31mred\x1b[0m plain"), "red plain");
/// ```
pub fn decolored(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\x1b' {
            if chars.peek() == Some(&'[') {
                chars.next();
                // Parameters run until the final letter
                for next in chars.by_ref() {
                    if next.is_ascii_alphabetic() {
                        break;
                    }
                }
            }
        } else {
            result.push(c);
        }
    }

    result
}

/// Display width of `s` in terminal columns, ignoring ANSI sequences.
///
/// Wide characters such as CJK ideographs count as two columns.
pub fn visible_len(s: &str) -> usize {
    decolored(s).as_str().width()
}

// ============================================================================
// Fill Lines
// ============================================================================

/// Default width when terminal size cannot be detected (e.g., piped output).
const DEFAULT_WIDTH: usize = 120;

/// Detect the current terminal width, falling back to [`DEFAULT_WIDTH`].
pub fn detect_terminal_width() -> usize {
    let (width, _) = termimad::terminal_size();
    let width = width as usize;
    if width == 0 { DEFAULT_WIDTH } else { width }
}

/// Which side(s) of the text receive filler characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillSide {
    #[default]
    Both,
    Left,
    Right,
}

/// Pad `text` with `filler` to the current terminal width.
///
/// See [`fill_line_to`].
pub fn fill_line(text: &str, filler: char, side: FillSide, fill_color: Option<Color>) -> String {
    fill_line_to(text, detect_terminal_width(), filler, side, fill_color)
}

/// Pad `text` with `filler` so it spans `width` visible columns.
///
/// The text is trimmed and separated from the filler by one space. Its width
/// is measured without ANSI sequences, so pre-colored text is padded
/// correctly. Text at least `width` wide is returned trimmed but unpadded.
///
/// # Example
///
/// ```
/// use logbar::{FillSide, fill_line_to};
///
/// assert_eq!(fill_line_to("hi", 10, '=', FillSide::Both, None), "=== hi ===");
/// assert_eq!(fill_line_to("hi", 10, '-', FillSide::Right, None), "hi -------");
/// ```
pub fn fill_line_to(
    text: &str,
    width: usize,
    filler: char,
    side: FillSide,
    fill_color: Option<Color>,
) -> String {
    let text = text.trim();
    let text_width = visible_len(text);
    if text_width >= width {
        return text.to_string();
    }

    let spare = width - text_width;
    let fill = |n: usize| filler.to_string().repeat(n);
    let (leading, trailing) = match side {
        FillSide::Both => {
            let leading = format!("{} ", fill((spare / 2).saturating_sub(1)));
            let used = leading.chars().count() + 1;
            let trailing = format!(" {}", fill(spare.saturating_sub(used)));
            (leading, trailing)
        }
        FillSide::Left => (format!("{} ", fill(spare - 1)), String::new()),
        FillSide::Right => (String::new(), format!(" {}", fill(spare - 1))),
    };

    match fill_color {
        Some(color) => format!(
            "{}{}{}",
            paint_nonempty(&leading, color),
            text,
            paint_nonempty(&trailing, color)
        ),
        None => format!("{leading}{text}{trailing}"),
    }
}

fn paint_nonempty(s: &str, color: Color) -> String {
    if s.is_empty() {
        String::new()
    } else {
        s.color(color).to_string()
    }
}

// ============================================================================
// Tests
// ============================================================================
