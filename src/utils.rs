//! Terminal helpers shared by the binary and printers.

use owo_colors::OwoColorize;

/// Whether ANSI colors should be used for `output` (`NO_COLOR` disables).
pub fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

fn prefix(label: &str, paint: fn(&str) -> String) -> String {
    if use_colors("human") {
        paint(label)
    } else {
        label.to_string()
    }
}

/// `error:` prefix for diagnostics on stderr.
pub fn error_prefix() -> String {
    prefix("error:", |s| s.red().bold().to_string())
}

pub fn note_prefix() -> String {
    prefix("note:", |s| s.cyan().bold().to_string())
}

pub fn info_prefix() -> String {
    prefix("info:", |s| s.blue().bold().to_string())
}
