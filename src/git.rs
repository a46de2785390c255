//! # Git Module
//!
//! This module contains functionality for interacting with git repositories:
//! discovering the repository root and querying a file's history for its
//! earliest recorded commit timestamp.
//!
//! History lookups are best-effort by design. The updater treats any failure
//! here (no repository, untracked file, unreadable history) as "no recorded
//! creation date" and falls back to the current time.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use git2::{Commit, Delta, DiffFindOptions, DiffOptions, Repository, Sort};
use tracing::{debug, trace};

/// Discover the root of the git repository containing `path`, if any.
///
/// Returns the repository's working directory. Bare repositories and
/// non-repository paths both yield `None`.
pub fn discover_repo_root(path: &Path) -> Option<PathBuf> {
  let repo = Repository::discover(path).ok()?;
  let root = repo.workdir()?.to_path_buf();
  trace!("Discovered git repository at {}", root.display());
  Some(root)
}

/// Query git history for the timestamp of the commit that introduced `path`,
/// following renames.
///
/// Walks history from `HEAD` in time order, tracking the file's name across
/// renames, and returns the author timestamp of the commit where the file
/// first appeared. Returns `None` when the file has no recorded history or
/// any git operation fails; this is the signal to fall back to "now".
pub fn file_creation_date(path: &Path) -> Option<DateTime<Utc>> {
  match creation_date_inner(path) {
    Ok(date) => date,
    Err(e) => {
      debug!("Git history lookup failed for {}: {:#}", path.display(), e);
      None
    }
  }
}

fn creation_date_inner(path: &Path) -> Result<Option<DateTime<Utc>>> {
  let absolute = std::fs::canonicalize(path).with_context(|| format!("Failed to resolve path: {}", path.display()))?;

  let repo = Repository::discover(&absolute).with_context(|| "Failed to discover git repository")?;
  let workdir = repo.workdir().context("Repository has no working directory")?;
  let workdir = std::fs::canonicalize(workdir).with_context(|| "Failed to resolve repository root")?;

  let Ok(relative) = absolute.strip_prefix(&workdir) else {
    return Ok(None);
  };

  let mut revwalk = repo.revwalk().with_context(|| "Failed to create revision walker")?;
  revwalk.push_head().with_context(|| "Failed to push HEAD")?;
  revwalk
    .set_sorting(Sort::TIME | Sort::TOPOLOGICAL)
    .with_context(|| "Failed to set revwalk sorting")?;

  // Newest first. Track the file's path backwards through history; whenever a
  // commit introduces the tracked path, remember its timestamp and check for
  // a rename so the walk can continue under the older name. A commit only
  // introduces the path when no parent has it: a merge commit whose branch
  // side carries the file is not the creation point, the branch commit is,
  // and the walk reaches it later. Older introductions overwrite newer ones,
  // so a deleted-and-re-added file reports its original birth.
  let mut tracked: PathBuf = relative.to_path_buf();
  let mut creation: Option<DateTime<Utc>> = None;

  for oid in revwalk {
    let oid = oid.with_context(|| "Revision walk failed")?;
    let commit = repo.find_commit(oid).with_context(|| "Failed to load commit")?;
    let tree = commit.tree().with_context(|| "Failed to load commit tree")?;

    if tree.get_path(&tracked).is_err() {
      continue;
    }

    let mut in_any_parent = false;
    for parent in commit.parents() {
      let parent_tree = parent.tree().with_context(|| "Failed to load parent tree")?;
      if parent_tree.get_path(&tracked).is_ok() {
        in_any_parent = true;
        break;
      }
    }
    if in_any_parent {
      continue;
    }

    creation = Some(commit_timestamp(&commit));

    for parent in commit.parents() {
      if let Some(previous_name) = rename_source(&repo, &parent, &commit, &tracked)? {
        trace!(
          "Following rename {} -> {} at {}",
          previous_name.display(),
          tracked.display(),
          oid
        );
        tracked = previous_name;
        break;
      }
    }
  }

  Ok(creation)
}

/// Check whether `path` arrived in `commit` via a rename, returning the name
/// it had in the parent commit.
fn rename_source(repo: &Repository, parent: &Commit<'_>, commit: &Commit<'_>, path: &Path) -> Result<Option<PathBuf>> {
  let mut diff_opts = DiffOptions::new();
  let mut diff = repo
    .diff_tree_to_tree(
      Some(&parent.tree().with_context(|| "Failed to load parent tree")?),
      Some(&commit.tree().with_context(|| "Failed to load commit tree")?),
      Some(&mut diff_opts),
    )
    .with_context(|| "Failed to diff commit against parent")?;

  let mut find_opts = DiffFindOptions::new();
  find_opts.renames(true);
  diff
    .find_similar(Some(&mut find_opts))
    .with_context(|| "Failed to detect renames")?;

  for delta in diff.deltas() {
    if delta.status() == Delta::Renamed
      && delta.new_file().path() == Some(path)
      && let Some(old_path) = delta.old_file().path()
    {
      return Ok(Some(old_path.to_path_buf()));
    }
  }

  Ok(None)
}

fn commit_timestamp(commit: &Commit<'_>) -> DateTime<Utc> {
  let when = commit.author().when();
  DateTime::from_timestamp(when.seconds(), 0).unwrap_or_else(Utc::now)
}
