//! CLI presentation: success and failure messages, colored when printing to a terminal.

use owo_colors::OwoColorize;

/// Success message for stdout.
pub fn format_success(message: &str, color: bool) -> String {
    if color {
        format!("{}", message.green())
    } else {
        message.to_string()
    }
}

/// Failure message for stderr.
pub fn format_failure(message: &str, color: bool) -> String {
    if color {
        format!("{}", message.red())
    } else {
        message.to_string()
    }
}

/// One name per line, or `empty` when there are none.
pub fn format_name_list(names: &[String], empty: &str) -> String {
    if names.is_empty() {
        empty.to_string()
    } else {
        names.join("\n")
    }
}
