#![deny(missing_docs)]
//! Shared logging utilities for the Bias Lens workspace.
//!
//! This crate provides the `lens_*` logging macros used across the codebase,
//! a process-wide request counter for correlating request and response log
//! lines, and a minimal test initializer for the global logger.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic counter handing out ids for HTTP exchanges.
static HTTP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Returns the next HTTP exchange id, starting at 1.
///
/// Ids are unique for the lifetime of the process and tie together the
/// request and response log lines of one round-trip. They are logged as
/// `http_id` and are unrelated to worker request ids.
pub fn next_http_id() -> u64 {
    HTTP_SEQ.fetch_add(1, Ordering::Relaxed) + 1
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! lens_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! lens_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! lens_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! lens_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! lens_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // A logger may already be installed by another test in the same binary.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
