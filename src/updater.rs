//! # Updater Module
//!
//! This module contains the core functionality for processing files: locating
//! an existing header, resolving the creation date, rebuilding the header
//! with a fresh modification date, and rewriting the file when the content
//! actually changed.
//!
//! Files are processed sequentially and independently. A per-file failure is
//! recorded in the [`RunSummary`] and does not abort the remaining files;
//! only missing configuration aborts a run, and that happens before the
//! updater is ever constructed.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::{debug, trace};

use crate::config::{CommentStyle, GlobalConfig, LocalConfig};
use crate::diff::DiffManager;
use crate::header::{self, HeaderFields};
use crate::{git, info_log};

/// Configuration for creating an [`Updater`].
///
/// Both configuration documents are explicit inputs; the updater holds no
/// process-wide defaults, so tests can drive it with synthetic configs.
pub struct UpdaterConfig {
  pub global: GlobalConfig,
  pub local: LocalConfig,

  /// Root against which relative paths are resolved (the project root the
  /// hook runs from).
  pub project_root: PathBuf,

  /// Report what would change without writing anything.
  pub dry_run: bool,

  /// Optional diff rendering for dry runs and change inspection.
  pub diff_manager: Option<DiffManager>,
}

/// Why a file was left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
  /// The path does not exist or is not a regular file.
  NotAFile,
  /// The file has no extension, or its extension is not in the enabled set.
  ExtensionNotEnabled,
  /// The extension is enabled but no comment style is registered for it.
  NoCommentStyle,
}

/// What happened to a single file.
#[derive(Debug)]
pub enum FileOutcome {
  /// The header was added or refreshed and the file rewritten (or would be,
  /// in dry-run mode).
  Updated { had_header: bool },
  /// Processing produced byte-identical content; the file was not written.
  Unchanged,
  /// The file was skipped by policy (not an error).
  Skipped(SkipReason),
}

/// Aggregated results of one `process_files` run.
#[derive(Debug, Default)]
pub struct RunSummary {
  /// Files whose header was added or refreshed.
  pub updated: Vec<PathBuf>,
  /// Files processed without any change.
  pub unchanged: Vec<PathBuf>,
  /// Files skipped by policy.
  pub skipped: Vec<PathBuf>,
  /// Per-file failures (unreadable, unwritable), surfaced after the batch.
  pub failed: Vec<(PathBuf, anyhow::Error)>,
}

impl RunSummary {
  pub fn has_failures(&self) -> bool {
    !self.failed.is_empty()
  }
}

/// Processor for header maintenance on files.
///
/// The `Updater` is responsible for:
/// - Detecting an existing header via the comment-style scanner
/// - Resolving the creation date (header field, then git history, then now)
/// - Rebuilding the header with the current time as the modification date
/// - Splicing the new header into the file and writing it back when changed
pub struct Updater {
  global: GlobalConfig,
  local: LocalConfig,
  project_root: PathBuf,
  dry_run: bool,
  diff_manager: Option<DiffManager>,
}

impl Updater {
  /// Creates a new updater with the specified configuration.
  pub fn new(config: UpdaterConfig) -> Self {
    Self {
      global: config.global,
      local: config.local,
      project_root: config.project_root,
      dry_run: config.dry_run,
      diff_manager: config.diff_manager,
    }
  }

  /// Processes the given file paths in order, independently.
  ///
  /// This is the single entry point the CLI (and the pre-commit hook behind
  /// it) consumes. Relative paths are resolved against the project root.
  pub fn process_files(&self, paths: &[PathBuf]) -> RunSummary {
    let mut summary = RunSummary::default();

    for path in paths {
      let absolute = if path.is_absolute() {
        path.clone()
      } else {
        self.project_root.join(path)
      };

      match self.process_single_file(&absolute) {
        Ok(FileOutcome::Updated { had_header }) => {
          if self.dry_run {
            info_log!("Would update: {}", path.display());
          } else if had_header {
            info_log!("Updated header in: {}", path.display());
          } else {
            info_log!("Added header to: {}", path.display());
          }
          summary.updated.push(path.clone());
        }
        Ok(FileOutcome::Unchanged) => {
          trace!("Unchanged: {}", path.display());
          summary.unchanged.push(path.clone());
        }
        Ok(FileOutcome::Skipped(reason)) => {
          trace!("Skipping: {} ({:?})", path.display(), reason);
          summary.skipped.push(path.clone());
        }
        Err(e) => {
          debug!("Failed to process {}: {:#}", path.display(), e);
          summary.failed.push((path.clone(), e));
        }
      }
    }

    summary
  }

  /// Process a single file through the detect/merge/rewrite pipeline.
  fn process_single_file(&self, path: &Path) -> Result<FileOutcome> {
    // Skip symlinks and anything that is not a regular file; a vanished
    // path is a normal outcome for a pre-commit hook (e.g. deletions).
    match std::fs::symlink_metadata(path) {
      Ok(metadata) if metadata.file_type().is_file() => {}
      _ => return Ok(FileOutcome::Skipped(SkipReason::NotAFile)),
    }

    let Some(extension) = file_extension(path) else {
      return Ok(FileOutcome::Skipped(SkipReason::ExtensionNotEnabled));
    };

    if !self.global.extensions.contains(&extension) {
      return Ok(FileOutcome::Skipped(SkipReason::ExtensionNotEnabled));
    }

    let Some(style) = self.global.comment_style.get(&extension) else {
      return Ok(FileOutcome::Skipped(SkipReason::NoCommentStyle));
    };

    let original =
      std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))?;

    let span = header::locate_header(style, &original);
    let existing_header = span.map(|s| &original[s.start..s.end]);

    let created = self.resolve_creation_date(path, existing_header);
    let fields = HeaderFields {
      author: self.local.author.clone(),
      email: self.local.email.clone(),
      created,
      modified: Utc::now(),
    };

    let new_content = splice_header(style, &fields, &original, span);

    if new_content == original {
      return Ok(FileOutcome::Unchanged);
    }

    if let Some(ref diff_manager) = self.diff_manager
      && let Err(e) = diff_manager.display_diff(path, &original, &new_content)
    {
      eprintln!("Warning: Failed to display diff for {}: {}", path.display(), e);
    }

    if !self.dry_run {
      std::fs::write(path, &new_content).with_context(|| format!("Failed to write file: {}", path.display()))?;
    }

    Ok(FileOutcome::Updated {
      had_header: span.is_some(),
    })
  }

  /// Resolve the creation date with the stability chain: an existing header's
  /// `Created` field wins, then the file's earliest git commit, then now.
  fn resolve_creation_date(&self, path: &Path, existing_header: Option<&str>) -> DateTime<Utc> {
    if let Some(header_text) = existing_header
      && let Some(created) = header::extract_created_date(header_text)
    {
      trace!("Created date from existing header: {}", path.display());
      return created;
    }

    if let Some(created) = git::file_creation_date(path) {
      debug!("Created date from git history: {}", path.display());
      return created;
    }

    debug!("No recorded creation date, using now: {}", path.display());
    Utc::now()
  }
}

/// Build the file's new content: rendered header, blank-line separator, then
/// the remainder with leading whitespace normalized away.
fn splice_header(style: &CommentStyle, fields: &HeaderFields, original: &str, span: Option<header::HeaderSpan>) -> String {
  let header_text = header::render_header(style, fields);

  let remainder = match span {
    Some(s) => {
      let mut rest = String::with_capacity(original.len() - (s.end - s.start));
      rest.push_str(&original[..s.start]);
      rest.push_str(&original[s.end..]);
      rest
    }
    None => original.to_string(),
  };
  let remainder = remainder.trim_start();

  if remainder.is_empty() {
    format!("{header_text}\n")
  } else {
    format!("{header_text}\n\n{remainder}")
  }
}

/// The file's extension in config form: lowercased, with a leading dot.
fn file_extension(path: &Path) -> Option<String> {
  let ext = path.extension()?.to_str()?;
  Some(format!(".{}", ext.to_lowercase()))
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  #[test]
  fn test_file_extension_normalized() {
    assert_eq!(file_extension(Path::new("a/b/App.JS")), Some(".js".to_string()));
    assert_eq!(file_extension(Path::new("Makefile")), None);
  }

  #[test]
  fn test_splice_header_without_existing_header() {
    let style = CommentStyle::Line { start: "//".to_string() };
    let fields = HeaderFields {
      author: "Ada Lovelace".to_string(),
      email: "ada@example.com".to_string(),
      created: Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
      modified: Utc.with_ymd_and_hms(2026, 8, 29, 10, 15, 0).unwrap(),
    };

    let spliced = splice_header(&style, &fields, "\n\nconsole.log(1);\n", None);

    assert!(spliced.starts_with("// @auto-header-start\n"));
    assert!(spliced.contains("\n// @auto-header-end\n\nconsole.log(1);\n"));
    // Leading blank lines of the original content are normalized away.
    assert!(!spliced.contains("\n\n\n"));
  }

  #[test]
  fn test_splice_header_replaces_existing_region() {
    let style = CommentStyle::Line { start: "//".to_string() };
    let fields = HeaderFields {
      author: "Ada Lovelace".to_string(),
      email: "ada@example.com".to_string(),
      created: Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
      modified: Utc.with_ymd_and_hms(2026, 8, 29, 10, 15, 0).unwrap(),
    };

    let old_header = "// @auto-header-start\n// Created:        2020-01-01T00:00:00.000Z\n// @auto-header-end\n";
    let content = format!("{old_header}\ncode();\n");
    let span = header::locate_header(&style, &content).expect("old header should be found");

    let spliced = splice_header(&style, &fields, &content, Some(span));

    assert_eq!(spliced.matches("@auto-header-start").count(), 1);
    assert!(spliced.contains("Created:        2024-03-01T09:30:00.000Z"));
    assert!(spliced.ends_with("\n\ncode();\n"));
  }

  #[test]
  fn test_splice_header_empty_remainder() {
    let style = CommentStyle::Line { start: "#".to_string() };
    let fields = HeaderFields {
      author: "Ada Lovelace".to_string(),
      email: "ada@example.com".to_string(),
      created: Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
      modified: Utc.with_ymd_and_hms(2026, 8, 29, 10, 15, 0).unwrap(),
    };

    let spliced = splice_header(&style, &fields, "", None);

    assert!(spliced.ends_with("# @auto-header-end\n"));
    assert!(!spliced.ends_with("\n\n"));
  }
}
