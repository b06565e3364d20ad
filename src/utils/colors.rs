/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Completion color:
/// \>= 100 → green
/// \>= 80 → yellow
/// below → red
/// undefined → grey
pub fn color_for_completion(value: Option<f64>) -> &'static str {
    match value {
        Some(v) if v >= 100.0 => GREEN,
        Some(v) if v >= 80.0 => YELLOW,
        Some(_) => RED,
        None => GREY,
    }
}

/// Wrap a value in the color returned by `color_for_completion`.
pub fn colorize_completion(text: &str, value: Option<f64>) -> String {
    format!("{}{}{}", color_for_completion(value), text, RESET)
}
