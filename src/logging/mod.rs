//! # Logging Module
//!
//! This module provides logging utilities for the auto-header tool, including:
//! - Verbose logging that can be enabled/disabled
//! - Standard info logging with color support
//!
//! Verbose logs go to stderr and info logs go to stdout for better pipeline
//! integration; pre-commit hooks typically surface stderr to the committer.
//!
//! ## Example
//!
//! ```rust
//! use auto_header::logging::{ColorMode, set_verbose};
//! use auto_header::{info_log, verbose_log};
//!
//! // Enable verbose logging
//! set_verbose();
//!
//! // Set color mode to Auto (uses owo-colors' automatic TTY detection)
//! ColorMode::Auto.apply();
//!
//! // Log a verbose message (goes to stderr)
//! verbose_log!("Processing file: {}", "example.js");
//!
//! // Log an info message (goes to stdout)
//! info_log!("Updated header in: {}", "example.js");
//! ```

mod modes;

pub use modes::{ColorMode, init_tracing, is_quiet, is_verbose, set_quiet, set_verbose};
use owo_colors::{OwoColorize, Stream};

/// Logs a message to stderr if verbose mode is enabled.
///
/// This macro is used for detailed logging that is only shown when verbose
/// mode is enabled via [`set_verbose`]. It uses the same format string syntax
/// as the standard [`eprintln!`] macro.
#[macro_export]
macro_rules! verbose_log {
    ($($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}

/// Logs a message to stdout unless quiet mode is enabled.
///
/// This macro is used for progress lines the user should normally see. It
/// uses the same format string syntax as the standard [`println!`] macro.
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        if !$crate::logging::is_quiet() {
            $crate::logging::print_info_log(&format!($($arg)*));
        }
    };
}

/// Internal function to print info log messages with formatting.
///
/// This function is used by the [`info_log!`] macro to format and print
/// messages with colors if enabled.
pub fn print_info_log(message: &str) {
  println!("{}", message.if_supports_color(Stream::Stdout, |m| m.green()));
}
