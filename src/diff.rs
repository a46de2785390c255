//! # Diff Module
//!
//! This module renders diffs between a file's original content and the
//! content it would have after the header merge. It is used in dry-run mode
//! to show what a real run would change, and can append all diffs of a run
//! to a single file for review.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use similar::{ChangeTag, TextDiff};

/// Manages diff creation and rendering for header changes.
pub struct DiffManager {
  /// Whether to print diffs to stderr.
  pub show_diff: bool,

  /// Path to append diffs to, consolidating all files of a run.
  pub save_diff_path: Option<PathBuf>,
}

impl DiffManager {
  /// Creates a new DiffManager with the specified configuration.
  pub const fn new(show_diff: bool, save_diff_path: Option<PathBuf>) -> Self {
    Self {
      show_diff,
      save_diff_path,
    }
  }

  /// Whether this manager will produce any output at all.
  pub const fn is_active(&self) -> bool {
    self.show_diff || self.save_diff_path.is_some()
  }

  /// Displays and/or saves a line diff between the original and new content.
  ///
  /// With `show_diff` the diff goes to stderr; with `save_diff_path` it is
  /// appended to that file, so multiple files of one run end up in a single
  /// consolidated diff.
  pub fn display_diff(&self, path: &Path, original: &str, new: &str) -> Result<()> {
    if !self.is_active() {
      return Ok(());
    }

    let diff = TextDiff::from_lines(original, new);

    let mut diff_content = String::new();
    diff_content.push_str(&format!("Diff for {}:\n", path.display()));

    for change in diff.iter_all_changes() {
      let sign = match change.tag() {
        ChangeTag::Delete => "-",
        ChangeTag::Insert => "+",
        ChangeTag::Equal => " ",
      };
      diff_content.push_str(&format!("{}{}", sign, change));
    }
    diff_content.push('\n');

    if self.show_diff {
      eprint!("{}", diff_content);
    }

    if let Some(ref diff_path) = self.save_diff_path {
      let mut file = OpenOptions::new().create(true).append(true).open(diff_path)?;
      file.write_all(diff_content.as_bytes())?;
    }

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;

  #[test]
  fn test_inactive_manager_writes_nothing() {
    let manager = DiffManager::new(false, None);
    assert!(!manager.is_active());
    manager
      .display_diff(Path::new("a.js"), "old\n", "new\n")
      .expect("display should succeed");
  }

  #[test]
  fn test_save_diff_appends_per_file_sections() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let diff_path = temp_dir.path().join("changes.diff");

    let manager = DiffManager::new(false, Some(diff_path.clone()));
    manager
      .display_diff(Path::new("a.js"), "old\n", "new\n")
      .expect("first diff should save");
    manager
      .display_diff(Path::new("b.js"), "x\n", "y\n")
      .expect("second diff should save");

    let saved = std::fs::read_to_string(&diff_path).expect("diff file should exist");
    assert!(saved.contains("Diff for a.js:"));
    assert!(saved.contains("Diff for b.js:"));
    assert!(saved.contains("-old"));
    assert!(saved.contains("+new"));
  }
}
