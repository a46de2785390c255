//! # Run Command
//!
//! This module implements the `run` subcommand: the pre-commit hook entry
//! point that loads both configuration documents and feeds the given paths
//! through the updater.

use std::collections::HashSet;
use std::path::PathBuf;
use std::process;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use crate::config::{GLOBAL_CONFIG_FILENAME, GlobalConfig, LOCAL_CONFIG_FILENAME, LocalConfig};
use crate::diff::DiffManager;
use crate::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use crate::output::{
  print_all_done, print_blank_line, print_failed_files, print_start_message, print_summary, print_updated_files,
};
use crate::updater::{Updater, UpdaterConfig};
use crate::{git, verbose_log};

/// Arguments for the run command
#[derive(Args, Debug, Default)]
pub struct RunArgs {
  /// Files to process. Directories are processed recursively and glob
  /// patterns are expanded.
  #[arg(required = true)]
  pub files: Vec<String>,

  /// Report what would change without writing any file
  #[arg(long)]
  pub dry_run: bool,

  /// Show a diff of the changes on stderr
  #[arg(long)]
  pub show_diff: bool,

  /// Save a consolidated diff of the changes to a file
  #[arg(long, short = 'o', value_name = "FILE")]
  pub save_diff: Option<PathBuf>,

  /// Path to the global config file (default: auto-header.config.json in the
  /// project root)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

/// Run the update command with the given arguments
pub fn run_update(args: RunArgs) -> Result<()> {
  init_tracing(args.quiet, args.verbose);

  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  let current_dir = std::env::current_dir().with_context(|| "Failed to get current directory")?;
  let project_root = git::discover_repo_root(&current_dir).unwrap_or(current_dir);
  debug!("Using project root: {}", project_root.display());

  // Both config documents must load before any file is touched.
  let global_path = args
    .config
    .clone()
    .unwrap_or_else(|| project_root.join(GLOBAL_CONFIG_FILENAME));
  let global = GlobalConfig::load(&global_path)?;
  let local = LocalConfig::load(&project_root.join(LOCAL_CONFIG_FILENAME))?;

  let files = expand_patterns(&args.files, &project_root)?;

  print_start_message(files.len(), args.dry_run);

  let diff_manager = if args.show_diff || args.save_diff.is_some() {
    Some(DiffManager::new(args.show_diff, args.save_diff.clone()))
  } else {
    None
  };

  let updater = Updater::new(UpdaterConfig {
    global,
    local,
    project_root: project_root.clone(),
    dry_run: args.dry_run,
    diff_manager,
  });

  let start_time = Instant::now();
  let summary = updater.process_files(&files);
  let elapsed = start_time.elapsed();

  print_blank_line();
  print_updated_files(&summary.updated, Some(&project_root));
  print_failed_files(&summary.failed, Some(&project_root));
  print_summary(&summary, elapsed);

  if summary.has_failures() {
    process::exit(1);
  }

  print_all_done();
  Ok(())
}

/// Expand the command-line file arguments into concrete file paths.
///
/// Plain file paths pass through (including nonexistent ones, which the
/// updater skips silently); directories are walked recursively; anything
/// else is tried as a glob pattern. Duplicates are dropped while preserving
/// first-seen order so progress output stays stable.
fn expand_patterns(patterns: &[String], project_root: &std::path::Path) -> Result<Vec<PathBuf>> {
  let mut files = Vec::new();

  for pattern in patterns {
    let candidate = PathBuf::from(pattern);
    let resolved = if candidate.is_absolute() {
      candidate.clone()
    } else {
      project_root.join(&candidate)
    };

    if resolved.is_dir() {
      verbose_log!("Expanding directory: {}", pattern);
      for entry in walkdir::WalkDir::new(&resolved).follow_links(false) {
        let entry = entry.with_context(|| format!("Failed to traverse directory: {}", pattern))?;
        if entry.file_type().is_file() {
          files.push(entry.into_path());
        }
      }
    } else if resolved.exists() || !pattern.contains(['*', '?', '[']) {
      files.push(candidate);
    } else {
      // Globs resolve against the project root, like plain paths, so results
      // do not depend on the directory the hook happens to run from.
      let entries =
        glob::glob(&resolved.to_string_lossy()).with_context(|| format!("Invalid glob pattern: {}", pattern))?;
      for entry in entries {
        match entry {
          Ok(path) if path.is_file() => files.push(path),
          Ok(_) => {}
          Err(e) => eprintln!("Error with glob pattern: {}", e),
        }
      }
    }
  }

  let mut seen = HashSet::new();
  Ok(files.into_iter().filter(|p| seen.insert(p.clone())).collect())
}
