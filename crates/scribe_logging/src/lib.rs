#![deny(missing_docs)]
//! Shared logging utilities for the scribe workspace.
//!
//! This crate provides the `scribe_*` logging macros used across the codebase,
//! a minimal test initializer for the global logger, and a helper for keeping
//! credential values out of log lines.

use std::fmt;

/// Log target used by every `scribe_*` macro.
pub const TARGET: &str = "scribe";

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! scribe_trace {
    ($($arg:tt)*) => {{
        log::trace!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! scribe_info {
    ($($arg:tt)*) => {{
        log::info!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! scribe_debug {
    ($($arg:tt)*) => {{
        log::debug!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! scribe_warn {
    ($($arg:tt)*) => {{
        log::warn!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! scribe_error {
    ($($arg:tt)*) => {{
        log::error!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Display wrapper that shows only a short prefix of a secret value.
///
/// `Redacted("abcdef123456")` prints as `abcd…(12)`. At most half of a short
/// value is shown. An empty value prints as `<empty>` so a missing token is
/// still visible in the log.
#[derive(Clone, Copy)]
pub struct Redacted<'a>(
    /// The secret value.
    pub &'a str,
);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "<empty>");
        }
        let len = self.0.chars().count();
        let prefix: String = self.0.chars().take((len / 2).min(4)).collect();
        write!(f, "{prefix}…({len})")
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

#[cfg(test)]
mod tests {
    use super::Redacted;

    #[test]
    fn redacted_keeps_short_prefix_and_length() {
        assert_eq!(Redacted("abcdef123456").to_string(), "abcd…(12)");
    }

    #[test]
    fn redacted_marks_empty_value() {
        assert_eq!(Redacted("").to_string(), "<empty>");
    }

    #[test]
    fn redacted_short_value_shows_at_most_half() {
        assert_eq!(Redacted("abcd").to_string(), "ab…(4)");
        assert_eq!(Redacted("ab").to_string(), "a…(2)");
        assert_eq!(Redacted("a").to_string(), "…(1)");
    }
}
