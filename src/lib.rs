//! # auto-header
//!
//! A tool that maintains a standardized comment header (author, creation
//! date, last-modified date) in source files, designed to run as a git
//! pre-commit hook.
//!
//! `auto-header` rewrites files in place: it locates an existing managed
//! header by its marker tokens, preserves the original creation date (falling
//! back to the file's git history, then to the current time), and refreshes
//! the modification date on every run.
//!
//! ## Features
//!
//! * Per-extension comment styles (line and block) from a JSON config
//! * Creation-date provenance: header field, then git history with rename
//!   following, then "now"
//! * Single-command project setup (`auto-header init`) that scaffolds the
//!   config files and installs the pre-commit hook
//! * Dry-run mode with unified diffs of the pending changes
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//!
//! use auto_header::config::{GlobalConfig, LocalConfig};
//! use auto_header::updater::{Updater, UpdaterConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!   let global = GlobalConfig::load(std::path::Path::new("auto-header.config.json"))?;
//!   let local = LocalConfig::load(std::path::Path::new(".auto-header-local.json"))?;
//!
//!   let updater = Updater::new(UpdaterConfig {
//!     global,
//!     local,
//!     project_root: PathBuf::from("."),
//!     dry_run: false,
//!     diff_manager: None,
//!   });
//!
//!   let summary = updater.process_files(&[PathBuf::from("src/app.js")]);
//!   if summary.has_failures() {
//!     anyhow::bail!("some files could not be processed");
//!   }
//!   Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`header`] - Header rendering, detection, and date extraction
//! * [`updater`] - The per-file detect/merge/rewrite pipeline
//! * [`config`] - The two JSON configuration documents
//! * [`scaffold`] - Project setup behind `auto-header init`
//!
//! [`header`]: crate::header
//! [`updater`]: crate::updater
//! [`config`]: crate::config
//! [`scaffold`]: crate::scaffold

pub mod cli;
pub mod config;
pub mod diff;
pub mod git;
pub mod header;
pub mod logging;
pub mod output;
pub mod scaffold;
pub mod updater;
