//! Pretty-printing of nested key/value data.
//!
//! [`dict_to_str`] renders a [`serde_json::Value`] as an indented block with
//! aligned colons, cycling brace, key and value colors by nesting depth:
//!
//! ```text
//! {
//!   name    : logbar,
//!   options : {
//!     width : 25
//!   }
//! }
//! ```

use colored::{Color, Colorize};
use serde_json::{Map, Value};
use unicode_width::UnicodeWidthStr;

/// Rendering options for [`dict_to_str`].
#[derive(Debug, Clone, PartialEq)]
pub struct PrettyOptions {
    /// Spaces per nesting level.
    pub indent: usize,
    /// Objects nested deeper than this collapse to `{...}`.
    pub max_depth: Option<usize>,
    /// Pad keys so the colons of one object line up.
    pub align_colon: bool,
    pub brace_colors: Vec<Color>,
    pub key_colors: Vec<Color>,
    pub value_colors: Vec<Color>,
}

impl Default for PrettyOptions {
    fn default() -> Self {
        let depth_colors = vec![Color::BrightBlue, Color::BrightCyan, Color::BrightMagenta];
        Self {
            indent: 2,
            max_depth: None,
            align_colon: true,
            brace_colors: depth_colors.clone(),
            key_colors: depth_colors,
            value_colors: vec![Color::White, Color::BrightGreen],
        }
    }
}

impl PrettyOptions {
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    #[must_use]
    pub fn with_align_colon(mut self, align_colon: bool) -> Self {
        self.align_colon = align_colon;
        self
    }
}

/// Pick the color for `depth`, cycling through `colors`.
fn cycle(colors: &[Color], depth: usize) -> Option<Color> {
    if colors.is_empty() {
        None
    } else {
        Some(colors[depth % colors.len()])
    }
}

fn paint(text: &str, color: Option<Color>) -> String {
    match color {
        Some(color) => text.color(color).to_string(),
        None => text.to_string(),
    }
}

/// Render `value` with the default [`PrettyOptions`].
///
/// # Example
///
/// ```
/// use logbar::dict_to_str;
/// use serde_json::json;
///
/// colored::control::set_override(false);
/// let out = dict_to_str(&json!({"a": 1, "bb": {"c": true}}));
/// assert_eq!(out, "{\n  a  : 1,\n  bb : {\n    c : true\n  }\n}");
/// ```
pub fn dict_to_str(value: &Value) -> String {
    dict_to_str_with(value, &PrettyOptions::default())
}

/// Render `value` with explicit options.
pub fn dict_to_str_with(value: &Value, options: &PrettyOptions) -> String {
    render_value(value, options, 0)
}

fn render_value(value: &Value, options: &PrettyOptions, depth: usize) -> String {
    match value {
        Value::Object(map) => render_object(map, options, depth),
        Value::Array(items) => render_array(items, options, depth),
        Value::String(s) => paint(s, cycle(&options.value_colors, depth)),
        scalar => paint(&scalar.to_string(), cycle(&options.value_colors, depth)),
    }
}

fn render_object(map: &Map<String, Value>, options: &PrettyOptions, depth: usize) -> String {
    let brace_color = cycle(&options.brace_colors, depth);
    let lb = paint("{", brace_color);
    let rb = paint("}", brace_color);

    if options.max_depth.is_some_and(|max| depth > max) {
        let ellipsis = paint("...", cycle(&options.value_colors, depth));
        return format!("{lb}{ellipsis}{rb}");
    }
    if map.is_empty() {
        return format!("{lb}{rb}");
    }

    let colon = paint(":", brace_color);
    let comma = paint(",", brace_color);
    let key_color = cycle(&options.key_colors, depth);
    let indent = " ".repeat(options.indent * (depth + 1));
    let brace_indent = " ".repeat(options.indent * depth);
    let key_width = if options.align_colon {
        map.keys().map(|k| k.width()).max().unwrap_or(0)
    } else {
        0
    };

    let last = map.len() - 1;
    let lines: Vec<String> = map
        .iter()
        .enumerate()
        .map(|(idx, (key, value))| {
            // Only objects open a new depth; arrays stay at the parent's
            let child_depth = if value.is_object() { depth + 1 } else { depth };
            let pad = " ".repeat(key_width.saturating_sub(key.width()));
            let key = paint(&format!("{key}{pad}"), key_color);
            let value = render_value(value, options, child_depth);
            let sep = if idx < last { comma.as_str() } else { "" };
            format!("{indent}{key} {colon} {value}{sep}")
        })
        .collect();

    format!("{lb}\n{}\n{brace_indent}{rb}", lines.join("\n"))
}

fn render_array(items: &[Value], options: &PrettyOptions, depth: usize) -> String {
    let brace_color = cycle(&options.brace_colors, depth);
    let sep = format!("{} ", paint(",", brace_color));
    let rendered: Vec<String> = items
        .iter()
        .map(|item| {
            let item_depth = if item.is_object() { depth + 1 } else { depth };
            render_value(item, options, item_depth)
        })
        .collect();
    format!(
        "{}{}{}",
        paint("[", brace_color),
        rendered.join(sep.as_str()),
        paint("]", brace_color)
    )
}
