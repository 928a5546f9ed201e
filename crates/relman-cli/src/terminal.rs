// Rust guideline compliant 2026-02-06

//! Terminal UI utilities for the relman CLI.
//!
//! Status lines go to stderr so that stdout carries only the rendered
//! report or changelog.

use std::env;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Widest separator line drawn by the reports.
pub const MAX_SEPARATOR_WIDTH: usize = 80;

static COLOR_ENABLED: AtomicBool = AtomicBool::new(true);

/// Determines if colored output should be used.
///
/// Respects the NO_COLOR environment variable and terminal capabilities.
pub fn should_use_color() -> bool {
    if env::var_os("NO_COLOR").is_some() {
        return false;
    }

    atty::is(atty::Stream::Stderr)
}

/// Enables or disables colored status lines for the rest of the process.
pub fn set_color_enabled(enabled: bool) {
    COLOR_ENABLED.store(enabled, Ordering::Relaxed);
}

/// Returns whether prompts can be shown: stdin and stderr are both terminals.
pub fn is_interactive() -> bool {
    atty::is(atty::Stream::Stdin) && atty::is(atty::Stream::Stderr)
}

/// Gets the terminal width in columns.
///
/// # Returns
/// The terminal width, or 80 if it cannot be determined
pub fn get_terminal_width() -> usize {
    term_size::dimensions().map(|(w, _)| w).unwrap_or(80)
}

/// Width of the separator lines, capped at [`MAX_SEPARATOR_WIDTH`].
pub fn separator_width() -> usize {
    get_terminal_width().clamp(20, MAX_SEPARATOR_WIDTH)
}

/// Wraps text on word boundaries.
///
/// Continuation lines start with `indent` spaces. Words longer than the
/// available width are kept whole.
pub fn wrap_text(text: &str, width: usize, indent: usize) -> String {
    let available = width.saturating_sub(indent);
    if available < 10 {
        return text.to_string();
    }

    let indent_str = " ".repeat(indent);
    let mut lines: Vec<String> = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let needed = current.chars().count() + 1 + word.chars().count();
            if !current.is_empty() && needed > available {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        lines.push(current);
    }

    lines.join(&format!("\n{}", indent_str))
}

/// Prints a status message with a colored prefix to stderr.
fn print_status(prefix: &str, prefix_color: Color, message: &str) {
    let choice = if COLOR_ENABLED.load(Ordering::Relaxed) {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stderr = StandardStream::stderr(choice);
    let _ = stderr.set_color(ColorSpec::new().set_fg(Some(prefix_color)).set_bold(true));
    let _ = write!(stderr, "{}", prefix);
    let _ = stderr.reset();
    let _ = writeln!(stderr, " {}", message);
}

/// Prints a success message.
pub fn print_success(message: &str) {
    print_status("✓", Color::Green, message);
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    print_status("⚠", Color::Yellow, message);
}

/// Prints an info message.
pub fn print_info(message: &str) {
    print_status("ℹ", Color::Cyan, message);
}
