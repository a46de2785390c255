//! # Configuration Module
//!
//! This module loads the two configuration documents that drive auto-header:
//!
//! - `auto-header.config.json` (versioned): enabled extensions and the
//!   per-extension comment styles.
//! - `.auto-header-local.json` (gitignored): the author identity stamped into
//!   headers.
//!
//! Both documents are read fresh on every invocation; nothing is cached
//! across runs.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::verbose_log;

/// The versioned global config file name.
pub const GLOBAL_CONFIG_FILENAME: &str = "auto-header.config.json";

/// The gitignored local config file name.
pub const LOCAL_CONFIG_FILENAME: &str = ".auto-header-local.json";

/// Comment syntax for one file extension.
///
/// Selected per extension from the global configuration. The JSON shape is
/// `{"type": "block", "start": "/*", "end": " */", "line": " *"}` or
/// `{"type": "line", "start": "//"}`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CommentStyle {
  /// Fenced comment block (e.g. `/* ... */` with a `*` prefix per line).
  Block {
    /// Opening fence emitted on its own line (e.g. `/*`).
    start: String,
    /// Closing fence emitted on its own line (e.g. ` */`).
    end: String,
    /// Prefix for each field line inside the fence (e.g. ` *`).
    line: String,
  },
  /// Line comments only (e.g. `//`).
  Line {
    /// Prefix for every header line (e.g. `//` or `#`).
    start: String,
  },
}

/// Author identity loaded from `.auto-header-local.json`.
///
/// Both fields are required and must be non-empty; a missing or incomplete
/// local config aborts the run before any file is touched.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LocalConfig {
  /// Author name stamped into the `Author:` field.
  pub author: String,

  /// Author email stamped into the `Author:` field.
  pub email: String,
}

/// Global configuration loaded from `auto-header.config.json`.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct GlobalConfig {
  /// Extensions (with leading dot, e.g. `.js`) that headers are maintained
  /// for. Files with any other extension are skipped untouched.
  #[serde(default)]
  pub extensions: HashSet<String>,

  /// Comment style per extension. An enabled extension with no entry here
  /// means matching files are skipped.
  #[serde(default, rename = "commentStyle")]
  pub comment_style: HashMap<String, CommentStyle>,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// A config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  Read { path: PathBuf, source: std::io::Error },

  /// A config file contains invalid JSON.
  #[error("Failed to parse config file '{path}': {source}")]
  Parse { path: PathBuf, source: serde_json::Error },

  /// The local config is present but the author identity is incomplete.
  #[error("Author name or email not configured in '{path}' (edit the file created by `auto-header init`)")]
  MissingIdentity { path: PathBuf },
}

impl GlobalConfig {
  /// Load the global configuration from a file.
  ///
  /// Extension keys (both the enabled set and the style table) are lowercased
  /// so lookups are case-insensitive, matching how file extensions are
  /// normalized during processing.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading global config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
      path: path.to_path_buf(),
      source: e,
    })?;

    let config: GlobalConfig = serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
      path: path.to_path_buf(),
      source: e,
    })?;

    let config = config.normalize();

    for ext in &config.extensions {
      if !config.comment_style.contains_key(ext) {
        verbose_log!("Extension {} is enabled but has no comment style; its files will be skipped", ext);
      }
    }

    verbose_log!(
      "Loaded {} enabled extensions, {} comment styles",
      config.extensions.len(),
      config.comment_style.len()
    );

    Ok(config)
  }

  fn normalize(self) -> Self {
    let extensions = self.extensions.into_iter().map(|e| e.to_lowercase()).collect();
    let comment_style = self
      .comment_style
      .into_iter()
      .map(|(k, v)| (k.to_lowercase(), v))
      .collect();

    Self {
      extensions,
      comment_style,
    }
  }
}

impl LocalConfig {
  /// Load the local configuration from a file.
  ///
  /// Fails with [`ConfigError::MissingIdentity`] when either field is empty
  /// or whitespace; header rendering never sees a blank author.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading local config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
      path: path.to_path_buf(),
      source: e,
    })?;

    let config: LocalConfig = serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
      path: path.to_path_buf(),
      source: e,
    })?;

    if config.author.trim().is_empty() || config.email.trim().is_empty() {
      return Err(ConfigError::MissingIdentity {
        path: path.to_path_buf(),
      });
    }

    Ok(config)
  }
}
