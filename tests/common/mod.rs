#![allow(dead_code)]

use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};

/// Checks if git is available on the system.
pub fn is_git_available() -> bool {
  Command::new("git").arg("--version").status().is_ok()
}

/// Runs a git command in the given directory, returning an error with stderr
/// on failure.
pub fn run_git(dir: &Path, args: &[&str]) -> Result<()> {
  let output = Command::new("git")
    .args(args)
    .current_dir(dir)
    .output()
    .with_context(|| format!("Failed to execute git {:?}", args))?;

  if !output.status.success() {
    anyhow::bail!("git {:?} failed: {}", args, String::from_utf8_lossy(&output.stderr));
  }
  Ok(())
}

/// Initializes a git repository in the given directory with deterministic
/// settings.
///
/// Configures:
/// - Default branch name set to `main`
/// - User name and email for commits
/// - Disables commit signing for test isolation
pub fn init_git_repo(dir: &Path) -> Result<()> {
  run_git(dir, &["init"])?;
  run_git(dir, &["config", "init.defaultBranch", "main"])?;
  run_git(dir, &["branch", "-M", "main"])?;
  run_git(dir, &["config", "user.name", "Test User"])?;
  run_git(dir, &["config", "user.email", "test@example.com"])?;
  // Disable commit signing for test isolation
  run_git(dir, &["config", "commit.gpgsign", "false"])?;
  Ok(())
}

/// Stages a file and creates a commit with a fixed author date, so tests can
/// assert exact creation timestamps.
pub fn git_add_and_commit_dated(dir: &Path, file: &str, message: &str, author_date: &str) -> Result<()> {
  run_git(dir, &["add", file])?;
  run_git(dir, &["commit", "--date", author_date, "-m", message])
}

/// Stages a file and creates a commit.
pub fn git_add_and_commit(dir: &Path, file: &str, message: &str) -> Result<()> {
  run_git(dir, &["add", file])?;
  run_git(dir, &["commit", "-m", message])
}

/// Writes a global config enabling `.js` (line style) and `.c` (block style)
/// into the project root.
pub fn write_global_config(dir: &Path) -> Result<()> {
  let content = concat!(
    "{\n",
    "  \"extensions\": [\".js\", \".c\"],\n",
    "  \"commentStyle\": {\n",
    "    \".js\": { \"type\": \"line\", \"start\": \"//\" },\n",
    "    \".c\": { \"type\": \"block\", \"start\": \"/*\", \"end\": \" */\", \"line\": \" *\" }\n",
    "  }\n",
    "}\n",
  );
  std::fs::write(dir.join("auto-header.config.json"), content).context("write global config")
}

/// Writes a local config with a test identity into the project root.
pub fn write_local_config(dir: &Path) -> Result<()> {
  std::fs::write(
    dir.join(".auto-header-local.json"),
    "{ \"author\": \"Test User\", \"email\": \"test@example.com\" }\n",
  )
  .context("write local config")
}

/// Extracts the value of the `Created:` field from a file's header.
pub fn created_field(content: &str) -> Option<String> {
  content
    .lines()
    .find(|line| line.contains("Created:"))
    .and_then(|line| line.split("Created:").nth(1))
    .map(|value| value.trim().to_string())
}

/// Extracts the value of the `Last Modified:` field from a file's header.
pub fn modified_field(content: &str) -> Option<String> {
  content
    .lines()
    .find(|line| line.contains("Last Modified:"))
    .and_then(|line| line.split("Last Modified:").nth(1))
    .map(|value| value.trim().to_string())
}
