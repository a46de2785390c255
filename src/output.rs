//! # Output Module
//!
//! This module centralizes user-facing output for the auto-header tool.
//! It provides consistent formatting, colors, and symbols for terminal
//! output.
//!
//! ## Design Goals
//!
//! - **Scannable**: a committer glancing at hook output sees what changed
//! - **Progressive**: more detail with `-v`, silence with `-q`
//! - **Scriptable**: stdout stays predictable for piping/automation

use std::path::{Path, PathBuf};

use owo_colors::{OwoColorize, Stream};

use crate::logging::{is_quiet, is_verbose};
use crate::updater::RunSummary;

/// Symbols used in output
pub mod symbols {
  /// Header added or refreshed
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// Per-file failure
  pub const FAILURE: &str = "\u{2717}"; // ✗
}

/// Maximum number of files to show in the default output before truncating
const DEFAULT_FILE_LIST_LIMIT: usize = 20;

/// Print the initial "Processing N staged files..." message.
pub fn print_start_message(file_count: usize, dry_run: bool) {
  if is_quiet() {
    return;
  }

  let verb = if dry_run { "Checking" } else { "Processing" };
  let files_word = if file_count == 1 { "file" } else { "files" };

  println!(
    "{}",
    format!("Auto Header: {verb} {file_count} {files_word}...").if_supports_color(Stream::Stdout, |m| m.blue())
  );
}

/// Print a blank line for visual separation (respects quiet mode).
pub fn print_blank_line() {
  if !is_quiet() {
    println!();
  }
}

/// Print the list of files that failed to process.
///
/// Failures always print, even in quiet mode; they determine the exit code.
pub fn print_failed_files(failed: &[(PathBuf, anyhow::Error)], project_root: Option<&Path>) {
  if failed.is_empty() {
    return;
  }

  let count = failed.len();
  eprintln!(
    "{} {} {} failed to process:",
    symbols::FAILURE.if_supports_color(Stream::Stderr, |s| s.red()),
    count,
    if count == 1 { "file" } else { "files" }
  );

  for (path, error) in failed {
    eprintln!("  {}: {:#}", make_relative_path(path, project_root), error);
  }
}

/// Print the list of updated files with a truncated default view.
pub fn print_updated_files(updated: &[PathBuf], project_root: Option<&Path>) {
  if updated.is_empty() || is_quiet() {
    return;
  }

  let mut sorted: Vec<_> = updated.to_vec();
  sorted.sort();

  let count = sorted.len();
  println!(
    "{} {} {} updated:",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    count,
    if count == 1 { "file" } else { "files" }
  );

  let limit = if is_verbose() { count } else { DEFAULT_FILE_LIST_LIMIT };
  for path in sorted.iter().take(limit) {
    println!("  {}", make_relative_path(path, project_root));
  }

  if count > limit {
    println!("  ... and {} more (use -v to see all)", count - limit);
  }
}

/// Print the end-of-run summary line.
pub fn print_summary(summary: &RunSummary, elapsed: std::time::Duration) {
  if is_quiet() {
    return;
  }

  let line = format!(
    "{} updated, {} unchanged, {} skipped, {} failed in {:.2?}",
    summary.updated.len(),
    summary.unchanged.len(),
    summary.skipped.len(),
    summary.failed.len(),
    elapsed
  );
  println!("{}", line.if_supports_color(Stream::Stdout, |m| m.dimmed()));
}

/// Print the closing success line.
pub fn print_all_done() {
  if is_quiet() {
    return;
  }

  println!(
    "{} {}",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    "Auto Header finished."
  );
}

/// Render a path relative to the project root for display, falling back to
/// the path itself when it is not under the root.
fn make_relative_path(path: &Path, project_root: Option<&Path>) -> String {
  match project_root.and_then(|root| path.strip_prefix(root).ok()) {
    Some(relative) => relative.display().to_string(),
    None => path.display().to_string(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_make_relative_path_under_root() {
    let root = Path::new("/repo");
    let path = Path::new("/repo/src/app.js");
    assert_eq!(make_relative_path(path, Some(root)), "src/app.js");
  }

  #[test]
  fn test_make_relative_path_outside_root() {
    let root = Path::new("/repo");
    let path = Path::new("/elsewhere/app.js");
    assert_eq!(make_relative_path(path, Some(root)), "/elsewhere/app.js");
  }

  #[test]
  fn test_make_relative_path_no_root() {
    let path = Path::new("src/app.js");
    assert_eq!(make_relative_path(path, None), "src/app.js");
  }
}
