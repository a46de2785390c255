//! # Scaffold Module
//!
//! This module backs the `init` command: it writes the two configuration
//! templates into a project, keeps the local config out of version control,
//! and installs the pre-commit hook that feeds staged files to
//! `auto-header run`.
//!
//! Everything here is plain file orchestration; the hook script itself is
//! written directly into the repository's hooks directory rather than going
//! through an external hook manager.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use git2::Repository;

use crate::config::{GLOBAL_CONFIG_FILENAME, LOCAL_CONFIG_FILENAME};
use crate::verbose_log;

/// Default global configuration written by `init`.
///
/// Covers the common web/systems extensions; projects trim or extend the
/// list and the style table to taste.
pub const DEFAULT_GLOBAL_CONFIG: &str = r##"{
  "extensions": [".js", ".jsx", ".ts", ".tsx", ".css", ".py", ".sh", ".rs", ".go", ".c", ".h"],
  "commentStyle": {
    ".js": { "type": "line", "start": "//" },
    ".jsx": { "type": "line", "start": "//" },
    ".ts": { "type": "line", "start": "//" },
    ".tsx": { "type": "line", "start": "//" },
    ".css": { "type": "block", "start": "/*", "end": " */", "line": " *" },
    ".py": { "type": "line", "start": "#" },
    ".sh": { "type": "line", "start": "#" },
    ".rs": { "type": "line", "start": "//" },
    ".go": { "type": "line", "start": "//" },
    ".c": { "type": "block", "start": "/*", "end": " */", "line": " *" },
    ".h": { "type": "block", "start": "/*", "end": " */", "line": " *" }
  }
}
"##;

/// Default local configuration written by `init`.
///
/// Shipped with empty fields on purpose: `run` refuses to start until the
/// user fills in their identity.
pub const DEFAULT_LOCAL_CONFIG: &str = r#"{
  "author": "",
  "email": ""
}
"#;

/// Pre-commit hook script installed by `init`.
///
/// Collects added/copied/modified/renamed staged files, runs the updater on
/// them, and re-stages whatever the updater rewrote.
pub const PRE_COMMIT_HOOK: &str = "#!/bin/sh\n\
# Installed by auto-header. Maintains author/created/modified headers on staged files.\n\
files=$(git diff --cached --name-only --diff-filter=ACMR)\n\
[ -z \"$files\" ] && exit 0\n\
auto-header run $files || exit 1\n\
git add $files\n";

/// Result of attempting to write one scaffold file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScaffoldAction {
  /// The file was written.
  Written(PathBuf),
  /// The file already existed and `force` was not given.
  Kept(PathBuf),
}

/// Write the two configuration templates into `project_root`.
///
/// Existing files are kept untouched unless `force` is set, so re-running
/// `init` never clobbers a configured identity.
pub fn write_config_templates(project_root: &Path, force: bool) -> Result<Vec<ScaffoldAction>> {
  let templates = [
    (GLOBAL_CONFIG_FILENAME, DEFAULT_GLOBAL_CONFIG),
    (LOCAL_CONFIG_FILENAME, DEFAULT_LOCAL_CONFIG),
  ];

  let mut actions = Vec::with_capacity(templates.len());

  for (name, content) in templates {
    let path = project_root.join(name);
    if path.exists() && !force {
      verbose_log!("Keeping existing {}", path.display());
      actions.push(ScaffoldAction::Kept(path));
      continue;
    }

    std::fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    actions.push(ScaffoldAction::Written(path));
  }

  Ok(actions)
}

/// Ensure `.gitignore` excludes the local config file.
///
/// Creates `.gitignore` when missing; appends the entry when absent;
/// idempotent otherwise.
pub fn ensure_gitignore_entry(project_root: &Path) -> Result<bool> {
  let gitignore_path = project_root.join(".gitignore");

  let existing = match std::fs::read_to_string(&gitignore_path) {
    Ok(content) => content,
    Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
    Err(e) => return Err(e).with_context(|| format!("Failed to read {}", gitignore_path.display())),
  };

  if existing.lines().any(|line| line.trim() == LOCAL_CONFIG_FILENAME) {
    verbose_log!("{} already ignored", LOCAL_CONFIG_FILENAME);
    return Ok(false);
  }

  let mut updated = existing;
  if !updated.is_empty() && !updated.ends_with('\n') {
    updated.push('\n');
  }
  updated.push_str("\n# Auto Header local config\n");
  updated.push_str(LOCAL_CONFIG_FILENAME);
  updated.push('\n');

  std::fs::write(&gitignore_path, updated).with_context(|| format!("Failed to write {}", gitignore_path.display()))?;

  Ok(true)
}

/// Install the pre-commit hook into the repository containing `project_root`.
///
/// Fails when `project_root` is not inside a git repository. An existing
/// hook is only replaced with `force`, and never when it was written by
/// something other than auto-header.
pub fn install_pre_commit_hook(project_root: &Path, force: bool) -> Result<PathBuf> {
  let repo = Repository::discover(project_root)
    .with_context(|| format!("{} is not inside a git repository", project_root.display()))?;

  let hooks_dir = repo.path().join("hooks");
  std::fs::create_dir_all(&hooks_dir).with_context(|| format!("Failed to create {}", hooks_dir.display()))?;

  let hook_path = hooks_dir.join("pre-commit");

  if hook_path.exists() {
    let existing = std::fs::read_to_string(&hook_path).unwrap_or_default();
    let ours = existing.contains("auto-header run");
    if !ours && !force {
      anyhow::bail!(
        "A pre-commit hook already exists at {} (use --force to replace it)",
        hook_path.display()
      );
    }
    if ours {
      verbose_log!("Refreshing existing auto-header hook");
    }
  }

  std::fs::write(&hook_path, PRE_COMMIT_HOOK).with_context(|| format!("Failed to write {}", hook_path.display()))?;

  #[cfg(unix)]
  {
    use std::os::unix::fs::PermissionsExt;
    let mut permissions = std::fs::metadata(&hook_path)
      .with_context(|| format!("Failed to stat {}", hook_path.display()))?
      .permissions();
    permissions.set_mode(0o755);
    std::fs::set_permissions(&hook_path, permissions)
      .with_context(|| format!("Failed to make {} executable", hook_path.display()))?;
  }

  Ok(hook_path)
}
