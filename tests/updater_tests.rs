//! Library-level tests for the updater pipeline: header insertion, existing
//! header merging, skip policy, and failure isolation.

mod common;

use std::path::{Path, PathBuf};

use anyhow::Result;
use auto_header::config::{GlobalConfig, LocalConfig};
use auto_header::updater::{Updater, UpdaterConfig};
use tempfile::TempDir;

use crate::common::{created_field, modified_field};

fn test_global_config() -> GlobalConfig {
  serde_json::from_str(concat!(
    "{\n",
    "  \"extensions\": [\".js\", \".c\"],\n",
    "  \"commentStyle\": {\n",
    "    \".js\": { \"type\": \"line\", \"start\": \"//\" },\n",
    "    \".c\": { \"type\": \"block\", \"start\": \"/*\", \"end\": \" */\", \"line\": \" *\" }\n",
    "  }\n",
    "}\n",
  ))
  .expect("test config should parse")
}

fn test_local_config() -> LocalConfig {
  serde_json::from_str("{ \"author\": \"Test User\", \"email\": \"test@example.com\" }")
    .expect("test identity should parse")
}

fn test_updater(project_root: &Path, dry_run: bool) -> Updater {
  Updater::new(UpdaterConfig {
    global: test_global_config(),
    local: test_local_config(),
    project_root: project_root.to_path_buf(),
    dry_run,
    diff_manager: None,
  })
}

#[test]
fn test_header_added_to_plain_file() -> Result<()> {
  let temp_dir = TempDir::new()?;
  let file = temp_dir.path().join("app.js");
  std::fs::write(&file, "console.log(1);\n")?;

  let updater = test_updater(temp_dir.path(), false);
  let summary = updater.process_files(&[file.clone()]);

  assert_eq!(summary.updated.len(), 1);
  assert!(summary.failed.is_empty());

  let content = std::fs::read_to_string(&file)?;
  let lines: Vec<&str> = content.lines().collect();

  // Five line-comment lines, a blank separator, then the original content.
  assert_eq!(lines[0], "// @auto-header-start");
  assert!(lines[1].starts_with("// Author:         Test User <test@example.com>"));
  assert!(lines[2].starts_with("// Created:        "));
  assert!(lines[3].starts_with("// Last Modified:  "));
  assert_eq!(lines[4], "// @auto-header-end");
  assert_eq!(lines[5], "");
  assert_eq!(lines[6], "console.log(1);");

  // Both timestamps are fresh and well-formed.
  let created = created_field(&content).expect("created field present");
  let modified = modified_field(&content).expect("modified field present");
  assert!(created.ends_with('Z'));
  assert!(modified.ends_with('Z'));

  Ok(())
}

#[test]
fn test_block_style_header() -> Result<()> {
  let temp_dir = TempDir::new()?;
  let file = temp_dir.path().join("main.c");
  std::fs::write(&file, "int main(void) { return 0; }\n")?;

  let updater = test_updater(temp_dir.path(), false);
  let summary = updater.process_files(&[file.clone()]);
  assert_eq!(summary.updated.len(), 1);

  let content = std::fs::read_to_string(&file)?;
  assert!(content.starts_with("/*\n * @auto-header-start\n"));
  assert!(content.contains("\n * @auto-header-end\n */\n\nint main(void)"));

  Ok(())
}

#[test]
fn test_created_date_is_stable_across_runs() -> Result<()> {
  let temp_dir = TempDir::new()?;
  let file = temp_dir.path().join("app.js");
  std::fs::write(&file, "console.log(1);\n")?;

  let updater = test_updater(temp_dir.path(), false);

  updater.process_files(&[file.clone()]);
  let first = std::fs::read_to_string(&file)?;
  let first_created = created_field(&first).expect("created field present");

  std::thread::sleep(std::time::Duration::from_millis(5));

  updater.process_files(&[file.clone()]);
  let second = std::fs::read_to_string(&file)?;
  let second_created = created_field(&second).expect("created field present");

  assert_eq!(first_created, second_created);

  Ok(())
}

#[test]
fn test_existing_header_is_replaced_not_duplicated() -> Result<()> {
  let temp_dir = TempDir::new()?;
  let file = temp_dir.path().join("app.js");

  let existing = concat!(
    "// @auto-header-start\n",
    "// Author:         Old Author <old@example.com>\n",
    "// Created:        2020-01-05T10:00:00.000Z\n",
    "// Last Modified:  2020-01-05T10:00:00.000Z\n",
    "// @auto-header-end\n",
    "\n",
    "console.log(1);\n",
  );
  std::fs::write(&file, existing)?;

  let updater = test_updater(temp_dir.path(), false);
  let summary = updater.process_files(&[file.clone()]);
  assert_eq!(summary.updated.len(), 1);

  let content = std::fs::read_to_string(&file)?;

  assert_eq!(content.matches("@auto-header-start").count(), 1);
  assert_eq!(content.matches("@auto-header-end").count(), 1);

  // Created survives; author and modified are refreshed.
  assert_eq!(
    created_field(&content).expect("created field present"),
    "2020-01-05T10:00:00.000Z"
  );
  assert!(content.contains("Test User <test@example.com>"));
  assert_ne!(
    modified_field(&content).expect("modified field present"),
    "2020-01-05T10:00:00.000Z"
  );
  assert!(content.ends_with("\n\nconsole.log(1);\n"));

  Ok(())
}

#[test]
fn test_unparsable_created_falls_through() -> Result<()> {
  let temp_dir = TempDir::new()?;
  let file = temp_dir.path().join("app.js");

  let existing = concat!(
    "// @auto-header-start\n",
    "// Author:         Old Author <old@example.com>\n",
    "// Created:        last tuesday\n",
    "// Last Modified:  2020-01-05T10:00:00.000Z\n",
    "// @auto-header-end\n",
    "\n",
    "console.log(1);\n",
  );
  std::fs::write(&file, existing)?;

  let updater = test_updater(temp_dir.path(), false);
  updater.process_files(&[file.clone()]);

  let content = std::fs::read_to_string(&file)?;
  let created = created_field(&content).expect("created field present");

  // The bogus value is gone, replaced by a real timestamp (the temp dir has
  // no git history, so the fallback chain lands on "now").
  assert_ne!(created, "last tuesday");
  assert!(created.ends_with('Z'));

  Ok(())
}

#[test]
fn test_disabled_extension_left_byte_identical() -> Result<()> {
  let temp_dir = TempDir::new()?;
  let file = temp_dir.path().join("notes.txt");
  let original = "just some notes\n";
  std::fs::write(&file, original)?;

  let updater = test_updater(temp_dir.path(), false);
  let summary = updater.process_files(&[file.clone()]);

  assert_eq!(summary.skipped, vec![file.clone()]);
  assert!(summary.updated.is_empty());
  assert_eq!(std::fs::read_to_string(&file)?, original);

  Ok(())
}

#[test]
fn test_nonexistent_path_is_skipped_not_failed() {
  let temp_dir = TempDir::new().expect("create temp dir");

  let updater = test_updater(temp_dir.path(), false);
  let summary = updater.process_files(&[PathBuf::from("deleted.js")]);

  assert_eq!(summary.skipped.len(), 1);
  assert!(summary.failed.is_empty());
}

#[test]
fn test_relative_paths_resolved_against_project_root() -> Result<()> {
  let temp_dir = TempDir::new()?;
  std::fs::create_dir_all(temp_dir.path().join("src"))?;
  let file = temp_dir.path().join("src/app.js");
  std::fs::write(&file, "console.log(1);\n")?;

  let updater = test_updater(temp_dir.path(), false);
  let summary = updater.process_files(&[PathBuf::from("src/app.js")]);

  assert_eq!(summary.updated, vec![PathBuf::from("src/app.js")]);
  assert!(std::fs::read_to_string(&file)?.starts_with("// @auto-header-start"));

  Ok(())
}

#[test]
fn test_dry_run_leaves_file_untouched() -> Result<()> {
  let temp_dir = TempDir::new()?;
  let file = temp_dir.path().join("app.js");
  let original = "console.log(1);\n";
  std::fs::write(&file, original)?;

  let updater = test_updater(temp_dir.path(), true);
  let summary = updater.process_files(&[file.clone()]);

  // Reported as an update, but nothing written.
  assert_eq!(summary.updated.len(), 1);
  assert_eq!(std::fs::read_to_string(&file)?, original);

  Ok(())
}

#[test]
fn test_unreadable_file_does_not_abort_the_batch() -> Result<()> {
  let temp_dir = TempDir::new()?;

  // Invalid UTF-8 makes the text read fail for this file only.
  let broken = temp_dir.path().join("broken.js");
  std::fs::write(&broken, [0x66, 0x6e, 0xff, 0xfe, 0x28])?;

  let readable = temp_dir.path().join("app.js");
  std::fs::write(&readable, "console.log(2);\n")?;

  let updater = test_updater(temp_dir.path(), false);
  let summary = updater.process_files(&[broken.clone(), readable.clone()]);

  assert_eq!(summary.failed.len(), 1);
  assert_eq!(summary.failed[0].0, broken);
  // The second file was still processed.
  assert_eq!(summary.updated, vec![readable.clone()]);
  assert!(std::fs::read_to_string(&readable)?.starts_with("// @auto-header-start"));

  Ok(())
}
