//! Terminal utilities for colored severity output.

use colored::{ColoredString, Colorize};
use std::io::{self, IsTerminal};
use tracelog_types::TraceKind;

/// Check if stdout is attached to a terminal.
pub fn in_controlling_terminal() -> bool {
    io::stdout().is_terminal()
}

/// Force colors on or off, overriding terminal detection.
pub fn set_colors(enabled: bool) {
    colored::control::set_override(enabled);
}

/// Color a formatted line by the severity of its record.
pub fn paint(kind: TraceKind, line: &str) -> ColoredString {
    match kind {
        TraceKind::Debug => line.bright_magenta(),
        TraceKind::Warning => line.bright_yellow(),
        TraceKind::Info => line.bright_cyan(),
        TraceKind::Error => line.bright_red(),
        TraceKind::Assert => line.bright_red().bold(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint_keeps_text() {
        for kind in [TraceKind::Debug, TraceKind::Warning, TraceKind::Info, TraceKind::Error] {
            let painted = paint(kind, "hello");
            assert!(painted.to_string().contains("hello"));
        }
    }
}
